//! Public holiday documents
//!
//! Served by an auxiliary public endpoint, not the wallpaper backend.
//! Lookups are best-effort; absence of data is normal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One holiday or adjusted working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDay {
    /// Holiday name.
    pub name: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// True for a rest day, false for a make-up working day.
    #[serde(rename = "isOffDay")]
    pub is_off_day: bool,
}

/// The holiday table of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holidays {
    /// The year covered.
    pub year: i32,
    /// Source document URLs.
    #[serde(default)]
    pub papers: Vec<String>,
    /// All special days of the year.
    pub days: Vec<HolidayDay>,
}

impl Holidays {
    /// Looks up the entry for a specific date.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&HolidayDay> {
        self.days.iter().find(|d| d.date == date)
    }
}
