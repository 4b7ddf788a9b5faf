use chrono::Utc;

/// Source of the poll timestamp.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now_in_s(&self) -> i64;
}

/// Wall clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_in_s(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a given Unix timestamp, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub time: i64,
}

impl FixedClock {
    pub fn new(time: i64) -> FixedClock {
        FixedClock { time }
    }
}

impl Clock for FixedClock {
    fn now_in_s(&self) -> i64 {
        self.time
    }
}
