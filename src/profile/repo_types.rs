use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: Uuid,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub active: bool,
    pub modified_at: OffsetDateTime,
}

/// Profile joined with the owner's login, for the admin listing.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileLine {
    pub id: i64,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub active: bool,
}
