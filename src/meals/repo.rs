use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{Meal, MealFood, MealPortion, MealType};

const MEAL_COLUMNS: &str = "id, user_id, date, meal_type, active, modified_at";
const MEAL_FOOD_COLUMNS: &str = "mf.id, mf.meal_id, mf.food_id, mf.value, mf.active, mf.modified_at";

// ---- Meals ----

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    date: Option<Date>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1
           AND ($2::date IS NULL OR date = $2)
         ORDER BY date DESC, meal_type ASC, id DESC
         LIMIT $3 OFFSET $4
        "#
    ))
    .bind(user_id)
    .bind(date)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list meals by user")?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals ORDER BY id DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list all meals")?;
    Ok(rows)
}

pub async fn get_for_user(db: &PgPool, user_id: Uuid, meal_id: i64) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2"
    ))
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get meal")?;
    Ok(row)
}

/// Loads the caller's meals among `ids` with a single query.
pub async fn get_many_for_user(
    db: &PgPool,
    user_id: Uuid,
    ids: &[i64],
) -> anyhow::Result<Vec<Meal>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = ANY($1) AND user_id = $2"
    ))
    .bind(ids)
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("get meals by ids")?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    meal_type: MealType,
) -> anyhow::Result<Meal> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (user_id, date, meal_type)
        VALUES ($1, $2, $3)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(date)
    .bind(meal_type)
    .fetch_one(db)
    .await
    .context("insert meal")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    meal_id: i64,
    date: Date,
    meal_type: MealType,
) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals
           SET date = $3, meal_type = $4, modified_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(user_id)
    .bind(date)
    .bind(meal_type)
    .fetch_optional(db)
    .await
    .context("update meal")?;
    Ok(row)
}

/// Deletes a meal; its `meal_foods` rows go with it (ON DELETE CASCADE).
pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(res.rows_affected() > 0)
}

/// Every portion of every meal in `meal_ids`, joined with its food, in one query.
pub async fn portions_for_meals(db: &PgPool, meal_ids: &[i64]) -> anyhow::Result<Vec<MealPortion>> {
    if meal_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, MealPortion>(
        r#"
        SELECT mf.meal_id, mf.value AS portion_value,
               f.id, f.description, f.total_kcal, f.unit, f.value, f.active, f.modified_at
          FROM meal_foods mf
          JOIN foods f ON f.id = mf.food_id
         WHERE mf.meal_id = ANY($1)
         ORDER BY mf.meal_id ASC, mf.id ASC
        "#,
    )
    .bind(meal_ids)
    .fetch_all(db)
    .await
    .context("load meal portions")?;
    Ok(rows)
}

// ---- Meal foods ----

pub async fn list_meal_foods_for_user(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<MealFood>> {
    let rows = sqlx::query_as::<_, MealFood>(&format!(
        r#"
        SELECT {MEAL_FOOD_COLUMNS}
          FROM meal_foods mf
          JOIN meals m ON m.id = mf.meal_id
         WHERE m.user_id = $1
           AND ($2::bigint IS NULL OR mf.meal_id = $2)
         ORDER BY mf.meal_id ASC, mf.id ASC
         LIMIT $3 OFFSET $4
        "#
    ))
    .bind(user_id)
    .bind(meal_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list meal foods")?;
    Ok(rows)
}

pub async fn get_meal_food_for_user(
    db: &PgPool,
    user_id: Uuid,
    id: i64,
) -> anyhow::Result<Option<MealFood>> {
    let row = sqlx::query_as::<_, MealFood>(&format!(
        r#"
        SELECT {MEAL_FOOD_COLUMNS}
          FROM meal_foods mf
          JOIN meals m ON m.id = mf.meal_id
         WHERE mf.id = $1 AND m.user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get meal food")?;
    Ok(row)
}

pub async fn create_meal_food(
    db: &PgPool,
    meal_id: i64,
    food_id: i64,
    value: f64,
) -> anyhow::Result<MealFood> {
    let row = sqlx::query_as::<_, MealFood>(&format!(
        r#"
        INSERT INTO meal_foods AS mf (meal_id, food_id, value)
        VALUES ($1, $2, $3)
        RETURNING {MEAL_FOOD_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(food_id)
    .bind(value)
    .fetch_one(db)
    .await
    .context("insert meal food")?;
    Ok(row)
}

pub async fn update_meal_food_for_user(
    db: &PgPool,
    user_id: Uuid,
    id: i64,
    meal_id: i64,
    food_id: i64,
    value: f64,
) -> anyhow::Result<Option<MealFood>> {
    let row = sqlx::query_as::<_, MealFood>(&format!(
        r#"
        UPDATE meal_foods AS mf
           SET meal_id = $3, food_id = $4, value = $5, modified_at = now()
          FROM meals m
         WHERE mf.id = $1 AND m.id = mf.meal_id AND m.user_id = $2
        RETURNING {MEAL_FOOD_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(meal_id)
    .bind(food_id)
    .bind(value)
    .fetch_optional(db)
    .await
    .context("update meal food")?;
    Ok(row)
}

pub async fn delete_meal_food_for_user(db: &PgPool, user_id: Uuid, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM meal_foods mf
         USING meals m
         WHERE mf.id = $1 AND m.id = mf.meal_id AND m.user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await
    .context("delete meal food")?;
    Ok(res.rows_affected() > 0)
}
