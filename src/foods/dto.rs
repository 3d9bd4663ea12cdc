use serde::Deserialize;

use super::repo_types::MeasureUnit;
use crate::{dto::validate_name, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct FoodRequest {
    pub description: String,
    pub total_kcal: f64,
    #[serde(default)]
    pub unit: MeasureUnit,
    #[serde(default)]
    pub value: f64,
}

impl FoodRequest {
    /// Only the description is checked. Non-positive `value`/`total_kcal` are stored as given;
    /// the calorie totals skip such foods instead.
    pub fn normalized(mut self) -> Result<Self, ApiError> {
        self.description = validate_name("description", &self.description, 300)?;
        if !self.total_kcal.is_finite() || !self.value.is_finite() {
            return Err(ApiError::BadRequest("total_kcal and value must be finite".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_and_value_have_defaults() {
        let req: FoodRequest =
            serde_json::from_str(r#"{"description":"Oats","total_kcal":389}"#).unwrap();
        assert_eq!(req.unit, MeasureUnit::Gram);
        assert_eq!(req.value, 0.0);
    }

    #[test]
    fn non_positive_reference_data_is_accepted() {
        let req: FoodRequest = serde_json::from_str(
            r#"{"description":" Mystery ","total_kcal":-5,"unit":"unit","value":0}"#,
        )
        .unwrap();
        let req = req.normalized().unwrap();
        assert_eq!(req.description, "Mystery");
        assert_eq!(req.total_kcal, -5.0);
    }

    #[test]
    fn blank_description_is_rejected() {
        let req: FoodRequest =
            serde_json::from_str(r#"{"description":"  ","total_kcal":1,"value":1}"#).unwrap();
        assert!(matches!(req.normalized(), Err(ApiError::BadRequest(_))));
    }
}
