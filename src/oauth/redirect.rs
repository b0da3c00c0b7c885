//! Deferred one-shot navigation used by the success view.
//!
//! The timer is a scoped resource: armed when the view comes up, cancelled by
//! `Drop` when the view goes away, so a navigation can never fire after
//! teardown. An atomic flag keeps the timer and the manual continue action
//! from both navigating for the same view instance.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long the success view waits before returning to the application root.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Performs the actual navigation side effect.
///
/// Production navigators announce or open the target; tests record it.
pub trait Navigate: Send + Sync {
    fn navigate(&self, target: &str);
}

/// One-shot deferred navigation, cancelled on drop.
pub struct DeferredRedirect {
    task: JoinHandle<()>,
    navigated: Arc<AtomicBool>,
    target: String,
    navigator: Arc<dyn Navigate>,
}

impl DeferredRedirect {
    /// Arm the timer: after `delay`, navigate to `target` unless the guard
    /// has been dropped or the manual action already navigated.
    pub fn arm(delay: Duration, target: impl Into<String>, navigator: Arc<dyn Navigate>) -> Self {
        let target = target.into();
        let navigated = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn({
            let navigated = Arc::clone(&navigated);
            let navigator = Arc::clone(&navigator);
            let target = target.clone();
            async move {
                tokio::time::sleep(delay).await;
                if !navigated.swap(true, Ordering::SeqCst) {
                    navigator.navigate(&target);
                }
            }
        });

        Self {
            task,
            navigated,
            target,
            navigator,
        }
    }

    /// The manual continue action: navigate immediately and disarm the timer.
    pub fn fire_now(self) {
        self.task.abort();
        if !self.navigated.swap(true, Ordering::SeqCst) {
            self.navigator.navigate(&self.target);
        }
    }
}

impl Drop for DeferredRedirect {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        targets: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        fn targets(&self) -> Vec<String> {
            self.targets.lock().unwrap().clone()
        }
    }

    impl Navigate for RecordingNavigator {
        fn navigate(&self, target: &str) {
            self.targets.lock().unwrap().push(target.to_string());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_delay() {
        let navigator = Arc::new(RecordingNavigator::default());
        let _redirect = DeferredRedirect::arm(
            REDIRECT_DELAY,
            "/",
            Arc::clone(&navigator) as Arc<dyn Navigate>,
        );

        // Let the spawned task register its sleep before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(2999)).await;
        tokio::task::yield_now().await;
        assert!(navigator.targets().is_empty());

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(navigator.targets(), vec!["/".to_string()]);

        // The timer is one-shot.
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(navigator.targets().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn never_fires_after_drop() {
        let navigator = Arc::new(RecordingNavigator::default());
        let redirect = DeferredRedirect::arm(
            REDIRECT_DELAY,
            "/",
            Arc::clone(&navigator) as Arc<dyn Navigate>,
        );
        drop(redirect);

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert!(navigator.targets().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_continue_navigates_immediately_and_disarms() {
        let navigator = Arc::new(RecordingNavigator::default());
        let redirect = DeferredRedirect::arm(
            REDIRECT_DELAY,
            "/",
            Arc::clone(&navigator) as Arc<dyn Navigate>,
        );

        redirect.fire_now();
        assert_eq!(navigator.targets(), vec!["/".to_string()]);

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(navigator.targets().len(), 1);
    }
}
