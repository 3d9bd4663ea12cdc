use std::collections::HashMap;

use sqlx::PgPool;

use super::{
    dto::MealResponse,
    repo,
    repo_types::{Meal, MealPortion},
};
use crate::nutrition;

/// Calorie total per meal id. Meals without portions are absent.
pub fn meal_totals(portions: &[MealPortion]) -> HashMap<i64, f64> {
    nutrition::totals_by(
        portions
            .iter()
            .map(|p| (p.meal_id, p.portion_value, &p.food)),
    )
}

/// Pairs each meal with its total, preserving the order of `meals`.
pub fn with_totals(meals: Vec<Meal>, portions: &[MealPortion]) -> Vec<MealResponse> {
    let totals = meal_totals(portions);
    meals
        .into_iter()
        .map(|m| {
            let total = totals.get(&m.id).copied().unwrap_or(0.0);
            MealResponse::new(m, total)
        })
        .collect()
}

/// Annotates meals with calorie totals, loading all their portions in one query.
pub async fn describe_meals(db: &PgPool, meals: Vec<Meal>) -> anyhow::Result<Vec<MealResponse>> {
    let ids: Vec<i64> = meals.iter().map(|m| m.id).collect();
    let portions = repo::portions_for_meals(db, &ids).await?;
    Ok(with_totals(meals, &portions))
}

pub async fn describe_meal(db: &PgPool, meal: Meal) -> anyhow::Result<MealResponse> {
    let id = meal.id;
    describe_meals(db, vec![meal])
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("meal {id} vanished while computing totals"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::{Food, MeasureUnit};
    use crate::meals::repo_types::MealType;
    use time::{macros::date, OffsetDateTime};
    use uuid::Uuid;

    fn food(id: i64, value: f64, total_kcal: f64) -> Food {
        Food {
            id,
            description: format!("food {id}"),
            total_kcal,
            unit: MeasureUnit::Gram,
            value,
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn portion(meal_id: i64, portion_value: f64, food: &Food) -> MealPortion {
        MealPortion {
            meal_id,
            portion_value,
            food: food.clone(),
        }
    }

    fn meal(id: i64) -> Meal {
        Meal {
            id,
            user_id: Uuid::nil(),
            date: date!(2024 - 02 - 10),
            meal_type: MealType::Dinner,
            active: true,
            modified_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn totals_are_computed_per_meal() {
        let a = food(1, 100.0, 200.0);
        let b = food(2, 0.0, 300.0);
        let portions = vec![
            portion(10, 50.0, &a),
            portion(10, 30.0, &b),
            portion(11, 100.0, &a),
            portion(11, 50.0, &a),
        ];
        let totals = meal_totals(&portions);
        assert_eq!(totals[&10], 100.0);
        assert_eq!(totals[&11], 300.0);
    }

    #[test]
    fn meals_without_portions_total_zero_and_keep_order() {
        let a = food(1, 100.0, 200.0);
        let portions = vec![portion(2, 25.0, &a)];
        let out = with_totals(vec![meal(3), meal(2), meal(1)], &portions);
        let ids: Vec<i64> = out.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(out[0].total_calories, 0.0);
        assert_eq!(out[1].total_calories, 50.0);
        assert_eq!(out[2].total_calories, 0.0);
    }

    #[test]
    fn negative_reference_calories_can_make_total_negative() {
        let weird = food(5, 10.0, -4.0);
        let out = with_totals(vec![meal(1)], &[portion(1, 20.0, &weird)]);
        assert_eq!(out[0].total_calories, -8.0);
    }
}
