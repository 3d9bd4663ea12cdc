use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MuscleGroup {
    pub id: i64,
    pub name: String,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub muscle_group_id: i64,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}
