use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Shared count of requests currently inside the executor.
///
/// Incremented when a call enters [`execute`] and decremented when it
/// settles, whatever the outcome. Intended for test harnesses and
/// observability that want to wait for quiescence; not part of request
/// correctness.
///
/// [`execute`]: crate::Fetcher::execute
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    count: Arc<AtomicUsize>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of unsettled calls.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub(crate) fn start(&self) -> InFlightGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            count: Arc::clone(&self.count),
        }
    }
}

/// Decrements the counter on drop, so every exit path of a call settles it
/// exactly once.
pub(crate) struct InFlightGuard {
    count: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::InFlight;

    #[test]
    fn guard_nets_to_zero() {
        let in_flight = InFlight::new();
        {
            let _a = in_flight.start();
            let _b = in_flight.start();
            assert_eq!(in_flight.count(), 2);
        }
        assert_eq!(in_flight.count(), 0);
    }

    #[test]
    fn clones_share_the_same_count() {
        let in_flight = InFlight::new();
        let observer = in_flight.clone();
        let guard = in_flight.start();
        assert_eq!(observer.count(), 1);
        drop(guard);
        assert_eq!(observer.count(), 0);
    }
}
