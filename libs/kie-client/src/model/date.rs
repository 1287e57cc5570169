use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp as the server writes it: `{"java.util.Date": <epoch millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KieDate {
    #[serde(rename = "java.util.Date")]
    pub millis: i64,
}

impl KieDate {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// `None` if the millis fall outside chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.millis).single()
    }
}

impl From<DateTime<Utc>> for KieDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            millis: dt.timestamp_millis(),
        }
    }
}
