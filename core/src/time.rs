//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only time zone EdgeGrid timestamps use.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime for now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into the EdgeGrid timestamp: `20140321T19:34:21+0000`
pub fn format_edgegrid_timestamp(t: DateTime) -> String {
    t.format("%Y%m%dT%H:%M:%S+0000").to_string()
}
