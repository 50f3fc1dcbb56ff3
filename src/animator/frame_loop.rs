//! Native frame loop
//!
//! Runs [`PointerTrail::frame`] on a tokio task at a fixed interval until
//! stopped. Missed ticks are skipped, so at most one frame is ever pending.

use crate::animator::error::{TrailError, TrailResult};
use crate::animator::trail::PointerTrail;
use crate::capture::traits::Surface;
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Animator shared between the frame task and event handlers
pub type SharedTrail<S> = Arc<ParkingMutex<PointerTrail<S>>>;

pub struct FrameLoop {
    is_running: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Start ticking `trail` every `interval`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(trail: SharedTrail<S>, interval: Duration) -> Self
    where
        S: Surface + Send + 'static,
    {
        let interval = interval.max(Duration::from_micros(1));
        let is_running = Arc::new(AtomicBool::new(true));
        let frames = Arc::new(AtomicU64::new(0));

        let running = is_running.clone();
        let counter = frames.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            while running.load(Ordering::SeqCst) {
                ticker.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                let result = trail.lock().frame();
                if let Err(e) = result {
                    tracing::warn!("Frame failed, stopping frame loop: {}", e);
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        tracing::info!("Frame loop started (interval={:?})", interval);

        Self {
            is_running,
            frames,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Stop the loop and wait for the task; returns the frames run
    pub async fn stop(mut self) -> TrailResult<u64> {
        self.is_running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| TrailError::FrameLoop(e.to_string()))?;
        }

        let frames = self.frames();
        tracing::info!("Frame loop stopped (frames={})", frames);
        Ok(frames)
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.is_running.store(false, Ordering::SeqCst);
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::headless::HeadlessSurface;
    use crate::capture::input::types::Position;
    use crate::capture::traits::MarkerRole;
    use crate::config::TrailConfig;

    fn shared_trail() -> SharedTrail<HeadlessSurface> {
        let trail =
            PointerTrail::attach(HeadlessSurface::with_markers(), TrailConfig::default()).unwrap();
        Arc::new(ParkingMutex::new(trail))
    }

    #[tokio::test]
    async fn test_loop_runs_frames_until_stopped() {
        let trail = shared_trail();
        trail.lock().on_pointer_move(100.0, 100.0);

        let frame_loop = FrameLoop::spawn(trail.clone(), Duration::from_millis(1));
        assert!(frame_loop.is_running());
        tokio::time::sleep(Duration::from_millis(100)).await;

        let frames = frame_loop.stop().await.unwrap();
        assert!(frames > 0);

        let trail = trail.lock();
        assert_eq!(trail.state().frames, frames);
        let cursor = trail.state().cursor.position();
        assert!(cursor.x > 0.0 && cursor.x <= 100.0);
        let cursor_el = trail.marker(MarkerRole::Cursor);
        assert_eq!(
            trail.surface().element(cursor_el).unwrap().translation,
            Some(cursor.centered(6.0))
        );
    }

    #[tokio::test]
    async fn test_no_frames_after_stop() {
        let trail = shared_trail();
        let frame_loop = FrameLoop::spawn(trail.clone(), Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let frames = frame_loop.stop().await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(trail.lock().state().frames, frames);
    }

    #[tokio::test]
    async fn test_events_while_running() {
        let trail = shared_trail();
        let frame_loop = FrameLoop::spawn(trail.clone(), Duration::from_millis(1));

        for step in 0..10 {
            trail.lock().on_pointer_move(step as f64 * 10.0, 50.0);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        frame_loop.stop().await.unwrap();

        let trail = trail.lock();
        assert_eq!(trail.state().pointer, Position::new(90.0, 50.0));
        assert!(trail.state().follower.position().x < trail.state().cursor.position().x);
    }

    #[tokio::test]
    async fn test_drop_aborts_loop() {
        let trail = shared_trail();
        let frame_loop = FrameLoop::spawn(trail.clone(), Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(frame_loop);

        tokio::time::sleep(Duration::from_millis(5)).await;
        let frames = trail.lock().state().frames;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(trail.lock().state().frames, frames);
    }
}
