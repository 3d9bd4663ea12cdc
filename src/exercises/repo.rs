use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{Exercise, MuscleGroup};

// ---- Muscle groups ----

pub async fn list_muscle_groups(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<MuscleGroup>> {
    let rows = sqlx::query_as::<_, MuscleGroup>(
        r#"
        SELECT id, name, active, modified_at
          FROM muscle_groups
         ORDER BY name ASC, id ASC
         LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list muscle groups")?;
    Ok(rows)
}

pub async fn get_muscle_group(db: &PgPool, id: i64) -> anyhow::Result<Option<MuscleGroup>> {
    let row = sqlx::query_as::<_, MuscleGroup>(
        "SELECT id, name, active, modified_at FROM muscle_groups WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("get muscle group")?;
    Ok(row)
}

pub async fn create_muscle_group(db: &PgPool, name: &str) -> anyhow::Result<MuscleGroup> {
    let row = sqlx::query_as::<_, MuscleGroup>(
        r#"
        INSERT INTO muscle_groups (name)
        VALUES ($1)
        RETURNING id, name, active, modified_at
        "#,
    )
    .bind(name)
    .fetch_one(db)
    .await
    .context("insert muscle group")?;
    Ok(row)
}

pub async fn update_muscle_group(
    db: &PgPool,
    id: i64,
    name: &str,
) -> anyhow::Result<Option<MuscleGroup>> {
    let row = sqlx::query_as::<_, MuscleGroup>(
        r#"
        UPDATE muscle_groups
           SET name = $2, modified_at = now()
         WHERE id = $1
        RETURNING id, name, active, modified_at
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_optional(db)
    .await
    .context("update muscle group")?;
    Ok(row)
}

pub async fn delete_muscle_group(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM muscle_groups WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete muscle group")?;
    Ok(res.rows_affected() > 0)
}

// ---- Exercises ----

pub async fn list_exercises(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Exercise>> {
    let rows = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle_group_id, active, modified_at
          FROM exercises
         ORDER BY name ASC, id ASC
         LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list exercises")?;
    Ok(rows)
}

pub async fn get_exercise(db: &PgPool, id: i64) -> anyhow::Result<Option<Exercise>> {
    let row = sqlx::query_as::<_, Exercise>(
        "SELECT id, name, muscle_group_id, active, modified_at FROM exercises WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("get exercise")?;
    Ok(row)
}

/// Loads every exercise in `ids` with a single query.
pub async fn get_exercises(db: &PgPool, ids: &[i64]) -> anyhow::Result<Vec<Exercise>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, Exercise>(
        "SELECT id, name, muscle_group_id, active, modified_at FROM exercises WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(db)
    .await
    .context("get exercises by ids")?;
    Ok(rows)
}

pub async fn create_exercise(
    db: &PgPool,
    name: &str,
    muscle_group_id: i64,
) -> anyhow::Result<Exercise> {
    let row = sqlx::query_as::<_, Exercise>(
        r#"
        INSERT INTO exercises (name, muscle_group_id)
        VALUES ($1, $2)
        RETURNING id, name, muscle_group_id, active, modified_at
        "#,
    )
    .bind(name)
    .bind(muscle_group_id)
    .fetch_one(db)
    .await
    .context("insert exercise")?;
    Ok(row)
}

pub async fn update_exercise(
    db: &PgPool,
    id: i64,
    name: &str,
    muscle_group_id: i64,
) -> anyhow::Result<Option<Exercise>> {
    let row = sqlx::query_as::<_, Exercise>(
        r#"
        UPDATE exercises
           SET name = $2, muscle_group_id = $3, modified_at = now()
         WHERE id = $1
        RETURNING id, name, muscle_group_id, active, modified_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(muscle_group_id)
    .fetch_optional(db)
    .await
    .context("update exercise")?;
    Ok(row)
}

pub async fn delete_exercise(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM exercises WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete exercise")?;
    Ok(res.rows_affected() > 0)
}
