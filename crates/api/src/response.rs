//! Response shapes and the threshold side-channel headers.

use axum::http::{HeaderMap, HeaderValue};
use serde::Serialize;
use timetrack_core::timelog::ThresholdBreach;
use timetrack_db::models::time_log::TimeLog;

/// Header flagging that a log write pushed its category past the monthly cap.
pub const THRESHOLD_EXCEEDED_HEADER: &str = "x-threshold-exceeded";
/// Header carrying the configured threshold in minutes.
pub const THRESHOLD_VALUE_HEADER: &str = "x-threshold-value";
/// Header carrying the category's computed total for the month.
pub const THRESHOLD_CURRENT_HEADER: &str = "x-threshold-current";

/// Body returned by a time-log write: the saved row plus whether the write
/// created a new row or revised an existing one.
#[derive(Debug, Serialize)]
pub struct SavedLog {
    #[serde(flatten)]
    pub log: TimeLog,
    pub created: bool,
}

/// Build the advisory headers for a threshold breach.
///
/// The breach is signalled out-of-band so the 2xx body stays the plain log
/// row; the write itself always succeeds.
pub fn threshold_headers(breach: Option<ThresholdBreach>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(breach) = breach {
        headers.insert(THRESHOLD_EXCEEDED_HEADER, HeaderValue::from_static("true"));
        if let Ok(value) = HeaderValue::from_str(&breach.threshold_minutes.to_string()) {
            headers.insert(THRESHOLD_VALUE_HEADER, value);
        }
        if let Ok(value) = HeaderValue::from_str(&breach.month_total.to_string()) {
            headers.insert(THRESHOLD_CURRENT_HEADER, value);
        }
    }
    headers
}
