use anyhow::Context;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::repo_types::{ProfileLine, UserProfile};

pub async fn get_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
    let row = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, user_id, age, weight, height, active, modified_at
          FROM user_profiles
         WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get profile by user")?;
    Ok(row)
}

/// Inserts the profile or overwrites the existing one for `user_id`.
pub async fn upsert<'e, E: PgExecutor<'e>>(
    db: E,
    user_id: Uuid,
    age: i32,
    weight: f64,
    height: f64,
) -> anyhow::Result<UserProfile> {
    let row = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles (user_id, age, weight, height)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO UPDATE
           SET age = EXCLUDED.age,
               weight = EXCLUDED.weight,
               height = EXCLUDED.height,
               modified_at = now()
        RETURNING id, user_id, age, weight, height, active, modified_at
        "#,
    )
    .bind(user_id)
    .bind(age)
    .bind(weight)
    .bind(height)
    .fetch_one(db)
    .await
    .context("upsert profile")?;
    Ok(row)
}

pub async fn list_all(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<ProfileLine>> {
    let rows = sqlx::query_as::<_, ProfileLine>(
        r#"
        SELECT p.id, u.email, p.age, p.weight, p.height, p.active
          FROM user_profiles p
          JOIN users u ON u.id = p.user_id
         ORDER BY p.id ASC
         LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list profiles")?;
    Ok(rows)
}
