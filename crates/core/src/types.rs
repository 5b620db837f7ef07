/// All database primary keys are PostgreSQL UUIDs.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (invoice dates, deadlines) carry no time zone.
pub type Date = chrono::NaiveDate;
