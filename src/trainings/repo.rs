use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{Training, TrainingExercise, TrainingExerciseLine};

const TRAINING_COLUMNS: &str = "id, user_id, name, date, active, modified_at";
const TE_COLUMNS: &str = "te.id, te.exercise_id, te.training_id, te.repetitions, te.series, \
                          te.rest_time_seconds, te.active, te.modified_at";

/// Builds an `ILIKE` pattern matching `needle` anywhere, with LIKE wildcards escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

// ---- Trainings ----

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Training>> {
    let pattern = name.map(contains_pattern);
    let rows = sqlx::query_as::<_, Training>(&format!(
        r#"
        SELECT {TRAINING_COLUMNS}
          FROM trainings
         WHERE user_id = $1
           AND ($2::text IS NULL OR unaccent(name) ILIKE unaccent($2))
         ORDER BY date DESC, id DESC
         LIMIT $3 OFFSET $4
        "#
    ))
    .bind(user_id)
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list trainings by user")?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Training>> {
    let rows = sqlx::query_as::<_, Training>(&format!(
        "SELECT {TRAINING_COLUMNS} FROM trainings ORDER BY id ASC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list all trainings")?;
    Ok(rows)
}

pub async fn get_for_user(db: &PgPool, user_id: Uuid, id: i64) -> anyhow::Result<Option<Training>> {
    let row = sqlx::query_as::<_, Training>(&format!(
        "SELECT {TRAINING_COLUMNS} FROM trainings WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get training")?;
    Ok(row)
}

/// Loads the caller's trainings among `ids` with a single query.
pub async fn get_many_for_user(
    db: &PgPool,
    user_id: Uuid,
    ids: &[i64],
) -> anyhow::Result<Vec<Training>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, Training>(&format!(
        "SELECT {TRAINING_COLUMNS} FROM trainings WHERE id = ANY($1) AND user_id = $2"
    ))
    .bind(ids)
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("get trainings by ids")?;
    Ok(rows)
}

pub async fn create(db: &PgPool, user_id: Uuid, name: &str, date: Date) -> anyhow::Result<Training> {
    let row = sqlx::query_as::<_, Training>(&format!(
        r#"
        INSERT INTO trainings (user_id, name, date)
        VALUES ($1, $2, $3)
        RETURNING {TRAINING_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(name)
    .bind(date)
    .fetch_one(db)
    .await
    .context("insert training")?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: i64,
    name: &str,
    date: Date,
) -> anyhow::Result<Option<Training>> {
    let row = sqlx::query_as::<_, Training>(&format!(
        r#"
        UPDATE trainings
           SET name = $3, date = $4, modified_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {TRAINING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(date)
    .fetch_optional(db)
    .await
    .context("update training")?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM trainings WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete training")?;
    Ok(res.rows_affected() > 0)
}

// ---- Training exercises ----

pub async fn list_exercises_for_user(
    db: &PgPool,
    user_id: Uuid,
    training_id: Option<i64>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<TrainingExercise>> {
    let rows = sqlx::query_as::<_, TrainingExercise>(&format!(
        r#"
        SELECT {TE_COLUMNS}
          FROM training_exercises te
          JOIN trainings t ON t.id = te.training_id
         WHERE t.user_id = $1
           AND ($2::bigint IS NULL OR te.training_id = $2)
         ORDER BY te.training_id ASC, te.id ASC
         LIMIT $3 OFFSET $4
        "#
    ))
    .bind(user_id)
    .bind(training_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list training exercises")?;
    Ok(rows)
}

pub async fn get_exercise_for_user(
    db: &PgPool,
    user_id: Uuid,
    id: i64,
) -> anyhow::Result<Option<TrainingExercise>> {
    let row = sqlx::query_as::<_, TrainingExercise>(&format!(
        r#"
        SELECT {TE_COLUMNS}
          FROM training_exercises te
          JOIN trainings t ON t.id = te.training_id
         WHERE te.id = $1 AND t.user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get training exercise")?;
    Ok(row)
}

pub async fn create_exercise(
    db: &PgPool,
    exercise_id: i64,
    training_id: i64,
    repetitions: i32,
    series: i32,
    rest_time_seconds: i32,
) -> anyhow::Result<TrainingExercise> {
    let row = sqlx::query_as::<_, TrainingExercise>(&format!(
        r#"
        INSERT INTO training_exercises AS te
               (exercise_id, training_id, repetitions, series, rest_time_seconds)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {TE_COLUMNS}
        "#
    ))
    .bind(exercise_id)
    .bind(training_id)
    .bind(repetitions)
    .bind(series)
    .bind(rest_time_seconds)
    .fetch_one(db)
    .await
    .context("insert training exercise")?;
    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_exercise_for_user(
    db: &PgPool,
    user_id: Uuid,
    id: i64,
    exercise_id: i64,
    training_id: i64,
    repetitions: i32,
    series: i32,
    rest_time_seconds: i32,
) -> anyhow::Result<Option<TrainingExercise>> {
    let row = sqlx::query_as::<_, TrainingExercise>(&format!(
        r#"
        UPDATE training_exercises AS te
           SET exercise_id = $3, training_id = $4, repetitions = $5, series = $6,
               rest_time_seconds = $7, modified_at = now()
          FROM trainings t
         WHERE te.id = $1 AND t.id = te.training_id AND t.user_id = $2
        RETURNING {TE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(exercise_id)
    .bind(training_id)
    .bind(repetitions)
    .bind(series)
    .bind(rest_time_seconds)
    .fetch_optional(db)
    .await
    .context("update training exercise")?;
    Ok(row)
}

pub async fn delete_exercise_for_user(db: &PgPool, user_id: Uuid, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM training_exercises te
         USING trainings t
         WHERE te.id = $1 AND t.id = te.training_id AND t.user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await
    .context("delete training exercise")?;
    Ok(res.rows_affected() > 0)
}

/// Exercise lines of every training in `training_ids`, with a single query.
pub async fn exercise_lines(
    db: &PgPool,
    training_ids: &[i64],
) -> anyhow::Result<Vec<TrainingExerciseLine>> {
    if training_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, TrainingExerciseLine>(
        r#"
        SELECT te.id, te.training_id, e.name AS exercise_name,
               te.repetitions, te.series, te.rest_time_seconds
          FROM training_exercises te
          JOIN exercises e ON e.id = te.exercise_id
         WHERE te.training_id = ANY($1)
         ORDER BY te.training_id ASC, te.id ASC
        "#,
    )
    .bind(training_ids)
    .fetch_all(db)
    .await
    .context("list training exercise lines")?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn contains_pattern_wraps_and_escapes() {
        assert_eq!(contains_pattern("leg"), "%leg%");
        assert_eq!(contains_pattern("100%_x"), "%100\\%\\_x%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }
}
