//! Pointer Trail - a cursor dot and a trailing ring that chase the pointer.
//!
//! The animator keeps two exponentially smoothed trackers following the
//! pointer and writes marker translations once per frame; the ring grows
//! while an interactive element is hovered. It draws on any [`Surface`]:
//! the DOM on wasm32, or an in-memory surface natively.
//!
//! [`Surface`]: capture::Surface

pub mod animator;
pub mod capture;
pub mod config;
pub mod processing;

pub use animator::{PointerTrail, TrailError, TrailResult};
pub use config::TrailConfig;

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use crate::animator::{FrameLoop, PointerTrail, TrailResult};
    use crate::capture::HeadlessSurface;
    use crate::config::TrailConfig;
    use parking_lot::Mutex as ParkingMutex;
    use std::f64::consts::TAU;
    use std::sync::Arc;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    /// Initialize tracing/logging
    pub fn init_tracing() {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pointer_trail=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    }

    /// Run the trail headless for one lap of a circular pointer path
    pub async fn run_demo(config: &TrailConfig) -> TrailResult<()> {
        let mut surface = HeadlessSurface::with_markers();
        let button = surface.add_element("button", &[]);
        surface.add_element("p", &[]);

        let Some(trail) = PointerTrail::install(surface, config.clone())? else {
            tracing::info!("Markers missing, nothing to animate");
            return Ok(());
        };
        let trail = Arc::new(ParkingMutex::new(trail));
        let frame_loop = FrameLoop::spawn(trail.clone(), config.frame_interval());

        // One second of pointer movement; frameRate is bounded by validation
        let steps = config.frame_rate.round() as usize;
        for step in 0..steps {
            let angle = step as f64 / steps as f64 * TAU;
            {
                let mut trail = trail.lock();
                trail.on_pointer_move(400.0 + 200.0 * angle.cos(), 300.0 + 200.0 * angle.sin());
                if step == steps / 3 {
                    trail.on_pointer_enter(button)?;
                } else if step == 2 * steps / 3 {
                    trail.on_pointer_leave(button)?;
                }
            }
            tokio::time::sleep(config.frame_interval()).await;
        }

        let frames = frame_loop.stop().await?;

        let trail = trail.lock();
        let state = trail.state();
        tracing::info!(
            "Finished after {} frames: pointer=({:.1}, {:.1}) cursor=({:.1}, {:.1}) follower=({:.1}, {:.1})",
            frames,
            state.pointer.x,
            state.pointer.y,
            state.cursor.position().x,
            state.cursor.position().y,
            state.follower.position().x,
            state.follower.position().y
        );

        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
pub use demo::{init_tracing, run_demo};
