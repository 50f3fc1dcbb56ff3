#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{Parser, Subcommand};
    use pointer_trail::processing::replay_trail_file;
    use pointer_trail::TrailConfig;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[command(name = "pointer-trail", version, about)]
    pub struct Cli {
        /// JSON trail configuration; defaults apply when omitted
        #[arg(long, short, env = "POINTER_TRAIL_CONFIG", global = true)]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Subcommand, Debug)]
    pub enum Command {
        /// Animate a headless trail along a circular pointer path
        Demo,
        /// Replay recorded pointer moves and write per-frame trail samples
        Replay {
            /// JSON array of `{x, y, processTimeMs}` moves
            input: PathBuf,
            /// Where to write the samples
            output: PathBuf,
        },
    }

    pub async fn run(cli: Cli) -> anyhow::Result<()> {
        pointer_trail::init_tracing();
        tracing::info!("Starting pointer-trail v{}", env!("CARGO_PKG_VERSION"));

        let config = match &cli.config {
            Some(path) => TrailConfig::load(path)?,
            None => TrailConfig::default(),
        };

        match cli.command.unwrap_or(Command::Demo) {
            Command::Demo => pointer_trail::run_demo(&config).await?,
            Command::Replay { input, output } => {
                replay_trail_file(&input, &output, &config)?;
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    cli::run(cli::Cli::parse()).await
}

// On the web the library's `start` entry point drives the trail
#[cfg(target_arch = "wasm32")]
fn main() {}
