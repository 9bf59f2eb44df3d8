use chrono::{Local, NaiveDate};

use spendwise_core::Clock;

/// Wall clock; "today" is the local calendar day.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
