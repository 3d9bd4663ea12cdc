use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::repo_types::{Meal, MealFood, MealType};
use crate::{
    dto::{default_limit, iso_date, page_bounds, parse_date, IdRef},
    error::ApiError,
    foods::Food,
};

/// Meal as exposed by the API, annotated with its calorie total.
#[derive(Debug, Clone, Serialize)]
pub struct MealResponse {
    pub id: i64,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
    pub total_calories: f64,
}

impl MealResponse {
    pub fn new(meal: Meal, total_calories: f64) -> Self {
        Self {
            id: meal.id,
            date: meal.date,
            meal_type: meal.meal_type,
            active: meal.active,
            modified_at: meal.modified_at,
            total_calories,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MealRequest {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub struct MealQuery {
    pub date: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl MealQuery {
    pub fn date_filter(&self) -> Result<Option<Date>, ApiError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_date(raw).map(Some),
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        page_bounds(self.limit, self.offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct MealFoodRequest {
    pub meal: IdRef,
    pub food: IdRef,
    pub value: f64,
}

impl MealFoodRequest {
    /// Non-positive portions are stored; the calorie totals skip them.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.value.is_finite() {
            return Err(ApiError::BadRequest("value must be finite".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct MealFoodQuery {
    /// Restricts the listing to one meal.
    pub diet: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl MealFoodQuery {
    pub fn bounds(&self) -> (i64, i64) {
        page_bounds(self.limit, self.offset)
    }
}

/// Meal food with its meal and food embedded.
#[derive(Debug, Serialize)]
pub struct MealFoodResponse {
    pub id: i64,
    pub meal: MealResponse,
    pub food: Food,
    pub value: f64,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl MealFoodResponse {
    pub fn new(row: MealFood, meal: MealResponse, food: Food) -> Self {
        Self {
            id: row.id,
            meal,
            food,
            value: row.value,
            active: row.active,
            modified_at: row.modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    #[test]
    fn meal_response_carries_total_calories() {
        let meal = Meal {
            id: 7,
            user_id: Uuid::new_v4(),
            date: date!(2024 - 05 - 01),
            meal_type: MealType::Lunch,
            active: true,
            modified_at: datetime!(2024-05-01 12:30 UTC),
        };
        let json = serde_json::to_value(MealResponse::new(meal, 312.5)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["meal_type"], "lunch");
        assert_eq!(json["total_calories"], 312.5);
        assert_eq!(json["modified_at"], "2024-05-01T12:30:00Z");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn meal_request_parses() {
        let req: MealRequest =
            serde_json::from_str(r#"{"date":"2024-05-01","meal_type":"pre_workout"}"#).unwrap();
        assert_eq!(req.date, date!(2024 - 05 - 01));
        assert_eq!(req.meal_type, MealType::PreWorkout);
    }

    #[test]
    fn date_filter_handles_blank_and_bad_input() {
        let q = |d: Option<&str>| MealQuery { date: d.map(String::from), limit: 20, offset: 0 };
        assert_eq!(q(None).date_filter().unwrap(), None);
        assert_eq!(q(Some("")).date_filter().unwrap(), None);
        assert_eq!(q(Some("2024-01-31")).date_filter().unwrap(), Some(date!(2024 - 01 - 31)));
        assert!(q(Some("yesterday")).date_filter().is_err());
    }

    #[test]
    fn meal_food_request_accepts_non_positive_value() {
        let req: MealFoodRequest =
            serde_json::from_str(r#"{"meal":{"id":1},"food":{"id":2},"value":-3}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.value, -3.0);
    }

    #[test]
    fn meal_food_request_requires_nested_ids() {
        assert!(serde_json::from_str::<MealFoodRequest>(r#"{"meal":1,"food":{"id":2},"value":3}"#)
            .is_err());
        assert!(serde_json::from_str::<MealFoodRequest>(r#"{"food":{"id":2},"value":3}"#).is_err());
    }
}
