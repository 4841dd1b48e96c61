use ferrous_rdns_application::ports::Clock;
use tokio::time::Instant;

/// Runtime clock. Follows tokio's paused/advanced time in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
