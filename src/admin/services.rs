use std::collections::HashMap;

use sqlx::PgPool;

use super::dto::{AdminMealRow, AdminProfileRow, AdminTrainingExerciseRow, AdminTrainingRow};
use crate::{
    meals::{self, Meal, MealPortion},
    profile::{self, ProfileLine},
    trainings::{self, Training, TrainingExerciseLine},
};

/// Formats meals for the admin listing; `total` comes from the shared calorie totals.
pub fn format_meal_rows(meals: &[Meal], portions: &[MealPortion]) -> Vec<AdminMealRow> {
    let totals = meals::services::meal_totals(portions);
    meals
        .iter()
        .map(|m| AdminMealRow {
            id: m.id,
            meal_type: m.meal_type.label(),
            total: totals.get(&m.id).copied().unwrap_or(0.0),
        })
        .collect()
}

pub fn format_training_rows(
    trainings: Vec<Training>,
    lines: Vec<TrainingExerciseLine>,
) -> Vec<AdminTrainingRow> {
    let mut by_training: HashMap<i64, Vec<AdminTrainingExerciseRow>> = HashMap::new();
    for l in lines {
        by_training
            .entry(l.training_id)
            .or_default()
            .push(AdminTrainingExerciseRow {
                id: l.id,
                exercise: l.exercise_name,
                repetitions: l.repetitions,
                series: l.series,
                rest_time_seconds: l.rest_time_seconds,
            });
    }
    trainings
        .into_iter()
        .map(|t| AdminTrainingRow {
            exercises: by_training.remove(&t.id).unwrap_or_default(),
            id: t.id,
            name: t.name,
        })
        .collect()
}

impl From<ProfileLine> for AdminProfileRow {
    fn from(p: ProfileLine) -> Self {
        Self {
            id: p.id,
            email: p.email,
            age: p.age,
            weight: p.weight,
            height: p.height,
            active: p.active,
        }
    }
}

pub async fn meal_rows(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<AdminMealRow>> {
    let meals = meals::repo::list_all(db, limit, offset).await?;
    let ids: Vec<i64> = meals.iter().map(|m| m.id).collect();
    let portions = meals::repo::portions_for_meals(db, &ids).await?;
    Ok(format_meal_rows(&meals, &portions))
}

pub async fn training_rows(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<AdminTrainingRow>> {
    let rows = trainings::repo::list_all(db, limit, offset).await?;
    let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
    let lines = trainings::repo::exercise_lines(db, &ids).await?;
    Ok(format_training_rows(rows, lines))
}

pub async fn profile_rows(
    db: &PgPool,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<AdminProfileRow>> {
    let rows = profile::repo::list_all(db, limit, offset).await?;
    Ok(rows.into_iter().map(AdminProfileRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::{Food, MeasureUnit};
    use crate::meals::MealType;
    use time::{macros::date, OffsetDateTime};
    use uuid::Uuid;

    fn food(value: f64, total_kcal: f64) -> Food {
        Food {
            id: 1,
            description: "Banana".into(),
            total_kcal,
            unit: MeasureUnit::Unit,
            value,
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn meal(id: i64, meal_type: MealType) -> Meal {
        Meal {
            id,
            user_id: Uuid::nil(),
            date: date!(2024 - 07 - 04),
            meal_type,
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn admin_rows_match_api_totals() {
        let banana = food(1.0, 105.0);
        let broken = food(0.0, 50.0);
        let portions = vec![
            MealPortion { meal_id: 1, portion_value: 2.0, food: banana.clone() },
            MealPortion { meal_id: 1, portion_value: 1.0, food: broken },
            MealPortion { meal_id: 2, portion_value: 0.5, food: banana },
        ];
        let meals_list = vec![
            meal(1, MealType::Breakfast),
            meal(2, MealType::PostWorkout),
            meal(3, MealType::Brunch),
        ];

        let rows = format_meal_rows(&meals_list, &portions);
        let api = meals::services::with_totals(meals_list, &portions);

        assert_eq!(
            rows,
            vec![
                AdminMealRow { id: 1, meal_type: "Breakfast", total: 210.0 },
                AdminMealRow { id: 2, meal_type: "Post-workout", total: 52.5 },
                AdminMealRow { id: 3, meal_type: "Brunch", total: 0.0 },
            ]
        );
        for (row, api) in rows.iter().zip(api.iter()) {
            assert_eq!(row.total, api.total_calories);
        }
    }

    #[test]
    fn trainings_get_their_exercises_inlined() {
        let training = |id: i64, name: &str| Training {
            id,
            user_id: Uuid::nil(),
            name: name.into(),
            date: date!(2024 - 07 - 04),
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        };
        let line = |id: i64, training_id: i64, name: &str| TrainingExerciseLine {
            id,
            training_id,
            exercise_name: name.into(),
            repetitions: 10,
            series: 3,
            rest_time_seconds: 60,
        };
        let rows = format_training_rows(
            vec![training(1, "Legs"), training(2, "Rest day")],
            vec![line(5, 1, "Squat"), line(6, 1, "Lunge")],
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Legs");
        let names: Vec<&str> = rows[0].exercises.iter().map(|e| e.exercise.as_str()).collect();
        assert_eq!(names, vec!["Squat", "Lunge"]);
        assert!(rows[1].exercises.is_empty());
    }
}
