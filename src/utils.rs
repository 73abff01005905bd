use std::thread;
use std::time::{Duration, Instant};

/// Spaces out calls to `wait` so they happen at most `rate` times a second.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn with_rate(rate: u64) -> Self {
        Ticker {
            interval: Duration::from_nanos(1_000_000_000 / rate.max(1)),
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // A slow caller is not paid back with a burst of short waits.
    pub fn wait(&mut self) {
        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        self.deadline = Some(Instant::now() + self.interval);
    }
}
