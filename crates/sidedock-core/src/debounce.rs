//! Replace-and-cancel debouncing.
//!
//! Each [`Debouncer`] is one debounce site. Scheduling cancels whatever
//! was pending at that site, so at most one action is ever outstanding.
//! The delay runs on a sleeper thread; when it elapses the [`Fired`]
//! value is handed to the sink, whose job is to marshal it back to the
//! thread that owns the window. That thread calls [`Debouncer::settle`]
//! right before acting, which re-checks cancellation there.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Cooperative cancellation flag shared with a sleeper thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A debounced action whose delay has elapsed.
#[derive(Debug)]
pub struct Fired<P> {
    token: CancelToken,
    payload: P,
}

impl<P> Fired<P> {
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the payload unless the action was cancelled meanwhile.
    pub fn into_live(self) -> Option<P> {
        if self.token.is_cancelled() {
            None
        } else {
            Some(self.payload)
        }
    }
}

type Sink<P> = Arc<dyn Fn(Fired<P>) + Send + Sync>;

/// One debounce site.
pub struct Debouncer<P> {
    delay: Duration,
    sink: Sink<P>,
    pending: Option<CancelToken>,
}

impl<P: Send + 'static> Debouncer<P> {
    /// Creates a debounce site that delivers elapsed actions to `sink`.
    ///
    /// `sink` runs on the sleeper thread and must not touch window state.
    pub fn new(delay: Duration, sink: impl Fn(Fired<P>) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            sink: Arc::new(sink),
            pending: None,
        }
    }

    /// Schedules `payload`, superseding anything still pending here.
    pub fn schedule(&mut self, payload: P) {
        self.cancel();

        let token = CancelToken::new();
        self.pending = Some(token.clone());

        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            if token.is_cancelled() {
                return;
            }
            sink(Fired { token, payload });
        });
    }

    /// Cancels the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts a fired action on the owning thread.
    ///
    /// Returns the payload only if it is still this site's pending action
    /// and has not been cancelled. The site is idle afterwards.
    pub fn settle(&mut self, fired: Fired<P>) -> Option<P> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|t| t.same_as(&fired.token));
        if !current {
            return None;
        }
        self.pending = None;
        fired.into_live()
    }
}

impl<P> Drop for Debouncer<P> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Instant;

    use super::*;

    fn channel_site(delay_ms: u64) -> (Debouncer<u32>, mpsc::Receiver<Fired<u32>>) {
        let (tx, rx) = mpsc::channel();
        let site = Debouncer::new(Duration::from_millis(delay_ms), move |fired| {
            let _ = tx.send(fired);
        });
        (site, rx)
    }

    #[test]
    fn burst_of_ten_delivers_only_the_last() {
        // Arrange
        let (mut site, rx) = channel_site(150);

        // Act
        for n in 0..10 {
            site.schedule(n);
        }
        let mut live = Vec::new();
        let deadline = Instant::now() + Duration::from_millis(1000);
        while let Ok(fired) = rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            if let Some(value) = site.settle(fired) {
                live.push(value);
            }
        }

        // Assert
        assert_eq!(live, vec![9]);
        assert!(!site.is_pending());
    }

    #[test]
    fn cancel_prevents_delivery() {
        // Arrange
        let (mut site, rx) = channel_site(50);

        // Act
        site.schedule(1);
        site.cancel();

        // Assert
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
        assert!(!site.is_pending());
    }

    #[test]
    fn settle_rejects_superseded_fire() {
        // Arrange
        let (mut site, rx) = channel_site(20);
        site.schedule(1);
        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();

        // Act: a newer action was scheduled before the first reached the owner.
        site.schedule(2);
        let stale = site.settle(first);
        let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();

        // Assert
        assert_eq!(stale, None);
        assert_eq!(site.settle(second), Some(2));
    }

    #[test]
    fn into_live_checks_token() {
        // Arrange
        let token = CancelToken::new();
        let fired = Fired {
            token: token.clone(),
            payload: "reload",
        };

        // Act
        token.cancel();

        // Assert
        assert_eq!(fired.into_live(), None);
    }

    #[test]
    fn dropping_site_cancels_pending() {
        // Arrange
        let (mut site, rx) = channel_site(50);
        site.schedule(7);

        // Act
        drop(site);

        // Assert
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}
