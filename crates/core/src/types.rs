/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day in UTC (time-of-day truncated).
pub type Day = chrono::NaiveDate;
