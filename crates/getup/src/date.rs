//! Calendar facts about "today" in a fixed timezone.

use std::fmt;

use chrono::{DateTime, Datelike as _, Utc};
use chrono_tz::Tz;

/// Number of glyphs in the rendered year progress bar.
pub const PROGRESS_BAR_WIDTH: u32 = 20;

const FILLED_GLYPH: char = '█';
const EMPTY_GLYPH: char = '░';

/// Date information captured once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSnapshot {
    /// `YYYY-MM-DD HH:MM:SS` in the local timezone
    pub local_timestamp: String,
    /// 1-based ordinal day
    pub day_of_year: u32,
    pub is_leap_year: bool,
    pub total_days_in_year: u32,
}

impl DateSnapshot {
    pub fn progress_bar(&self) -> ProgressBar {
        ProgressBar::new(self.day_of_year, self.total_days_in_year)
    }
}

/// Takes a snapshot of the current wall-clock time in `tz`.
pub fn snapshot(tz: Tz) -> DateSnapshot {
    snapshot_at(Utc::now().with_timezone(&tz))
}

pub fn snapshot_at(now: DateTime<Tz>) -> DateSnapshot {
    let is_leap_year = is_leap_year(now.year());
    DateSnapshot {
        local_timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        day_of_year: now.ordinal(),
        is_leap_year,
        total_days_in_year: if is_leap_year { 366 } else { 365 },
    }
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Textual visualization of how much of the year has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    day_of_year: u32,
    total_days: u32,
}

impl ProgressBar {
    pub fn new(day_of_year: u32, total_days: u32) -> Self {
        Self {
            day_of_year,
            total_days,
        }
    }

    pub fn filled(&self) -> u32 {
        // floor(width * day / total), clamped in case of a bogus day count
        (PROGRESS_BAR_WIDTH * self.day_of_year / self.total_days.max(1)).min(PROGRESS_BAR_WIDTH)
    }

    pub fn empty(&self) -> u32 {
        PROGRESS_BAR_WIDTH - self.filled()
    }

    pub fn percent(&self) -> f64 {
        f64::from(self.day_of_year) / f64::from(self.total_days.max(1)) * 100.0
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.filled() {
            write!(f, "{FILLED_GLYPH}")?;
        }
        for _ in 0..self.empty() {
            write!(f, "{EMPTY_GLYPH}")?;
        }
        write!(
            f,
            " {:.1}% ({}/{})",
            self.percent(),
            self.day_of_year,
            self.total_days
        )
    }
}
