use chrono::NaiveDate;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

pub mod dday;
pub use dday::DdayState;

/// One calendar entry of a couple, as stored by the server.
///
/// GET /api/anniversary/dday
/// - 204 if there is no active d-day
/// - otherwise a list of [`AnniversaryRecord`], expected to hold exactly one entry
///
/// GET /api/anniversary?year=:year&month=:month
/// - 204 if the month has no entries
/// - otherwise a list of [`AnniversaryRecord`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AnniversaryRecord {
    /// server-side row id, not sent by every endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anniversary_id: Option<i64>,
    pub year: i32,
    /// one-based
    pub month: u32,
    pub date: u32,
    pub contents: String,
    /// whether this entry is the active d-day of the couple
    #[serde(default)]
    pub d_day: bool,
}

impl AnniversaryRecord {
    pub fn new(year: i32, month: u32, date: u32, contents: impl Into<String>) -> Self {
        Self {
            anniversary_id: None,
            year,
            month,
            date,
            contents: contents.into(),
            d_day: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.anniversary_id = Some(id);
        self
    }

    #[must_use]
    pub fn as_d_day(mut self) -> Self {
        self.d_day = true;
        self
    }

    /// `None` if the server sent an impossible date, like Feb 30
    pub fn target_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.date)
    }

    /// Date label in the fixed korean form, e.g. `2024년 3월 1일`
    pub fn date_label(&self) -> String {
        format!("{}년 {}월 {}일", self.year, self.month, self.date)
    }

    /// Short label for month listings, e.g. `1일 Anniversary`
    pub fn day_label(&self) -> String {
        format!("{}일 {}", self.date, self.contents)
    }
}

/// Backend user ids came both as numbers and as strings over time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, From)]
#[serde(untagged)]
pub enum UserId {
    #[display("{_0}")]
    Numeric(i64),
    #[display("{_0}")]
    Text(String),
}

/// GET /api/usr
/// - returns a list of [`UserRecord`]; fields other than `id` are ignored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
}

#[cfg(test)]
mod wire_tests {
    use super::{AnniversaryRecord, UserId, UserRecord};
    use chrono::NaiveDate;

    #[test]
    fn anniversary_from_server_json() {
        let records: Vec<AnniversaryRecord> = serde_json::from_str(
            r#"[{"anniversary_id":7,"connection_id":3,"year":2024,"month":3,"date":1,"contents":"Anniversary","d_day":true}]"#,
        )
        .unwrap();
        assert_eq!(
            records,
            vec![AnniversaryRecord::new(2024, 3, 1, "Anniversary")
                .with_id(7)
                .as_d_day()]
        );
    }

    #[test]
    fn anniversary_optional_fields() {
        let record: AnniversaryRecord =
            serde_json::from_str(r#"{"year":2025,"month":1,"date":1,"contents":"new year"}"#)
                .unwrap();
        assert_eq!(record.anniversary_id, None);
        assert!(!record.d_day);
    }

    #[test]
    fn anniversary_dates() {
        let record = AnniversaryRecord::new(2024, 3, 1, "Anniversary");
        assert_eq!(record.target_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.date_label(), "2024년 3월 1일");
        assert_eq!(record.day_label(), "1일 Anniversary");

        assert_eq!(AnniversaryRecord::new(2023, 2, 29, "").target_date(), None);
        assert_eq!(AnniversaryRecord::new(2024, 13, 1, "").target_date(), None);
        assert_eq!(AnniversaryRecord::new(2024, 0, 1, "").target_date(), None);
    }

    #[test]
    fn user_ids() {
        let users: Vec<UserRecord> =
            serde_json::from_str(r#"[{"id":1,"pw":"x"},{"id":"alice"}]"#).unwrap();
        assert_eq!(users[0].id, UserId::Numeric(1));
        assert_eq!(users[1].id, UserId::Text("alice".into()));
        assert_eq!(users[0].id.to_string(), "1");
        assert_eq!(users[1].id.to_string(), "alice");
    }
}
