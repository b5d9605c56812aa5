use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expected PV production at `timestamp`, with its confidence band, in watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub expected: i64,
    pub min: i64,
    pub max: i64,
}
