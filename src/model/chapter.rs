use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Path relative to the source's base url
    pub url: String,
    pub name: String,
    /// Epoch millis, `0` when unknown
    pub date_upload: i64,
    pub number: Option<f32>,
}

impl Chapter {
    pub fn posted(&self) -> Option<DateTime<Utc>> {
        if self.date_upload == 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.date_upload)
    }
}
