use chrono::{Local, NaiveDate};
use std::fmt::Debug;
use std::sync::Arc;

/// Source of "today" for the widget and the grid
pub trait Clock: Debug + Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock that can be handed to long-lived hosts and swapped in tests
pub type SharedClock = Arc<dyn Clock>;

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one day, for tests and headless replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_clock_delegates() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock: SharedClock = Arc::new(FixedClock(day));
        assert_eq!(clock.today(), day);
    }
}
