use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{Food, MeasureUnit};

const FOOD_COLUMNS: &str = "id, description, total_kcal, unit, value, active, modified_at";

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Food>> {
    let rows = sqlx::query_as::<_, Food>(&format!(
        "SELECT {FOOD_COLUMNS} FROM foods ORDER BY description ASC, id ASC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list foods")?;
    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(&format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("get food")?;
    Ok(row)
}

/// Loads every food in `ids` with a single query.
pub async fn get_many(db: &PgPool, ids: &[i64]) -> anyhow::Result<Vec<Food>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, Food>(&format!(
        "SELECT {FOOD_COLUMNS} FROM foods WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(db)
    .await
    .context("get foods by ids")?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    description: &str,
    total_kcal: f64,
    unit: MeasureUnit,
    value: f64,
) -> anyhow::Result<Food> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        INSERT INTO foods (description, total_kcal, unit, value)
        VALUES ($1, $2, $3, $4)
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(description)
    .bind(total_kcal)
    .bind(unit)
    .bind(value)
    .fetch_one(db)
    .await
    .context("insert food")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i64,
    description: &str,
    total_kcal: f64,
    unit: MeasureUnit,
    value: f64,
) -> anyhow::Result<Option<Food>> {
    let row = sqlx::query_as::<_, Food>(&format!(
        r#"
        UPDATE foods
           SET description = $2, total_kcal = $3, unit = $4, value = $5, modified_at = now()
         WHERE id = $1
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(description)
    .bind(total_kcal)
    .bind(unit)
    .bind(value)
    .fetch_optional(db)
    .await
    .context("update food")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete food")?;
    Ok(res.rows_affected() > 0)
}
