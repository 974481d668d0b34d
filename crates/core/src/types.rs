/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates used by the daily gates. No time component; the API layer
/// resolves "today" once per request and passes it down.
pub type CalendarDate = chrono::NaiveDate;
