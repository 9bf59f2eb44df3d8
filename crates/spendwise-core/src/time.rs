use chrono::NaiveDate;

/// Supplies the reference date for "current" budget windows.
///
/// Reports take the reference date as an argument; a `Clock` is only consulted at
/// the edge (the CLI) so every computation stays deterministic under test.
pub trait Clock: Send + Sync {
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
