use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn parse_uuid(column: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|err| anyhow!("invalid uuid in column {}: {}", column, err))
}
