use std::{fmt, path::PathBuf};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{de::Deserializer, Deserialize, Serialize};

/// User preferences for rendering reports and picking default date ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Fractional digits shown for amounts.
    #[serde(default = "Config::default_amount_precision")]
    pub amount_precision: u8,
    #[serde(default)]
    pub dashboard_range: DashboardRange,
    #[serde(default = "Config::default_report_lookback_months")]
    pub report_lookback_months: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Snapshot loaded on startup. Defaults to `<data dir>/spendwise/snapshot.json`.
    pub default_snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            amount_precision: Self::default_amount_precision(),
            dashboard_range: DashboardRange::default(),
            report_lookback_months: Self::default_report_lookback_months(),
            default_snapshot_path: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_amount_precision() -> u8 {
        2
    }

    pub fn default_report_lookback_months() -> u32 {
        6
    }

    pub fn resolve_snapshot_path(&self) -> PathBuf {
        if let Some(path) = &self.default_snapshot_path {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("spendwise").join("snapshot.json")
    }

    /// Default `(start, end)` for the dashboard, ending on `today`.
    pub fn dashboard_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (self.dashboard_range.start_for(today), today)
    }

    /// Default `(start, end)` for breakdown and trend reports: the first day of the
    /// month `report_lookback_months - 1` months back, through `today`.
    pub fn report_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let back = self.report_lookback_months.saturating_sub(1) as i32;
        let index = today.year() * 12 + today.month0() as i32 - back;
        let start = NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
            .unwrap_or(today);
        (start, today)
    }
}

/// Preset dashboard windows.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DashboardRange {
    #[default]
    MonthToDate,
    YearToDate,
    LastThirtyDays,
}

impl DashboardRange {
    pub fn start_for(self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            DashboardRange::MonthToDate => today.with_day(1),
            DashboardRange::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            DashboardRange::LastThirtyDays => today.checked_sub_signed(Duration::days(29)),
        };
        start.unwrap_or(today)
    }

    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "year_to_date" | "ytd" => DashboardRange::YearToDate,
            "last_thirty_days" | "30d" => DashboardRange::LastThirtyDays,
            _ => DashboardRange::MonthToDate,
        }
    }
}

impl fmt::Display for DashboardRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DashboardRange::MonthToDate => "month to date",
            DashboardRange::YearToDate => "year to date",
            DashboardRange::LastThirtyDays => "last 30 days",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for DashboardRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| DashboardRange::from_str(&v))
            .unwrap_or_default())
    }
}
