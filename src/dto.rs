use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

use crate::error::ApiError;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

const MAX_LIMIT: i64 = 100;

/// Reference to another row by id, e.g. `{"id": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    20
}

/// Clamps user supplied paging values into something the database can serve.
pub fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_LIMIT), offset.max(0))
}

impl Pagination {
    pub fn bounds(&self) -> (i64, i64) {
        page_bounds(self.limit, self.offset)
    }
}

pub fn parse_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::BadRequest(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Validates a required short name (trimmed, non-empty, at most `max` chars).
pub fn validate_name(field: &str, value: &str, max: usize) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(ApiError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn page_bounds_clamps() {
        assert_eq!(page_bounds(20, 0), (20, 0));
        assert_eq!(page_bounds(0, -5), (1, 0));
        assert_eq!(page_bounds(10_000, 40), (MAX_LIMIT, 40));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert_eq!(parse_date(" 2024-12-31 ").unwrap(), date!(2024 - 12 - 31));
        assert!(matches!(parse_date("09/03/2024"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn iso_date_serde_shape() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "iso_date")]
            date: Date,
        }
        let json = serde_json::to_string(&Wrapper { date: date!(2025 - 01 - 07) }).unwrap();
        assert_eq!(json, r#"{"date":"2025-01-07"}"#);
        let back: Wrapper = serde_json::from_str(r#"{"date":"2023-11-30"}"#).unwrap();
        assert_eq!(back.date, date!(2023 - 11 - 30));
    }

    #[test]
    fn validate_name_rules() {
        assert_eq!(validate_name("name", "  Chest day ", 70).unwrap(), "Chest day");
        assert!(validate_name("name", "   ", 70).is_err());
        assert!(validate_name("name", &"x".repeat(71), 70).is_err());
    }

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.bounds(), (20, 0));
    }
}
