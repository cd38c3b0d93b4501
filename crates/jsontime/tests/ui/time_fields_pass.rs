use chrono::{DateTime, FixedOffset, Local, Utc};
use jsontime::{Tz, time_fields};
use serde::{Deserialize, Serialize};

#[time_fields]
#[derive(Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub published_at: Option<DateTime<Utc>>,
    #[time(format = "sql_datetime")]
    pub updated_at: Option<chrono::DateTime<FixedOffset>>,
    #[time(zone = "Asia/Shanghai")]
    pub created_at: DateTime<Tz>,
    #[time(format = "%Y-%m-%d", zone = "Local")]
    pub r#type: DateTime<Local>,
    #[time(skip)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub indexed_at: DateTime<Utc>,
}

fn main() {}
