use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn minutes_before(at: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    at - Duration::minutes(i64::from(minutes))
}
