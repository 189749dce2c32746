/// Primary keys are PostgreSQL UUIDs, generated server-side as v7.
pub type DbId = uuid::Uuid;

/// Department keys are institutional integer codes.
pub type DepId = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (milestones, hiring dates).
pub type Date = chrono::NaiveDate;

/// Generate a new time-ordered primary key.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
