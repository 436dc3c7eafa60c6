use chrono::{Local, NaiveDate};

/// Source of "today" for payment dates
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine running the session
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
