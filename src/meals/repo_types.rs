use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::foods::Food;

/// Eating occasion, stored with its fixed numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MealType {
    Breakfast = 1,
    MorningSnack = 2,
    Lunch = 3,
    AfternoonSnack = 4,
    Dinner = 5,
    Supper = 6,
    PreWorkout = 7,
    PostWorkout = 8,
    NightSnack = 9,
    Brunch = 10,
}

impl MealType {
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::MorningSnack => "Morning snack",
            MealType::Lunch => "Lunch",
            MealType::AfternoonSnack => "Afternoon snack",
            MealType::Dinner => "Dinner",
            MealType::Supper => "Supper",
            MealType::PreWorkout => "Pre-workout",
            MealType::PostWorkout => "Post-workout",
            MealType::NightSnack => "Night snack",
            MealType::Brunch => "Brunch",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Meal {
    pub id: i64,
    pub user_id: Uuid,
    pub date: Date,
    pub meal_type: MealType,
    pub active: bool,
    pub modified_at: OffsetDateTime,
}

/// A food portion recorded in a meal (`meal_foods` row).
#[derive(Debug, Clone, FromRow)]
pub struct MealFood {
    pub id: i64,
    pub meal_id: i64,
    pub food_id: i64,
    pub value: f64,
    pub active: bool,
    pub modified_at: OffsetDateTime,
}

/// A portion joined with its food, as fed to the calorie totals.
#[derive(Debug, Clone, FromRow)]
pub struct MealPortion {
    pub meal_id: i64,
    pub portion_value: f64,
    #[sqlx(flatten)]
    pub food: Food,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_codes_match_storage() {
        assert_eq!(MealType::Breakfast as i32, 1);
        assert_eq!(MealType::PreWorkout as i32, 7);
        assert_eq!(MealType::Brunch as i32, 10);
    }

    #[test]
    fn meal_type_json_and_labels() {
        assert_eq!(serde_json::to_string(&MealType::PostWorkout).unwrap(), r#""post_workout""#);
        let t: MealType = serde_json::from_str(r#""afternoon_snack""#).unwrap();
        assert_eq!(t, MealType::AfternoonSnack);
        assert_eq!(t.label(), "Afternoon snack");
        assert!(serde_json::from_str::<MealType>(r#""elevenses""#).is_err());
    }
}
