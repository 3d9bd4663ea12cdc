use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Unit a food's reference quantity (and every portion of it) is measured in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MeasureUnit {
    Milliliter = 1,
    #[default]
    Gram = 2,
    Unit = 3,
}

impl MeasureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MeasureUnit::Milliliter => "mL",
            MeasureUnit::Gram => "g",
            MeasureUnit::Unit => "un",
        }
    }
}

/// Catalog entry: `total_kcal` calories per `value` of `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Food {
    pub id: i64,
    pub description: String,
    pub total_kcal: f64,
    pub unit: MeasureUnit,
    pub value: f64,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MeasureUnit::Milliliter).unwrap(), r#""milliliter""#);
        let unit: MeasureUnit = serde_json::from_str(r#""unit""#).unwrap();
        assert_eq!(unit, MeasureUnit::Unit);
    }

    #[test]
    fn unit_defaults_to_gram() {
        assert_eq!(MeasureUnit::default(), MeasureUnit::Gram);
        assert_eq!(MeasureUnit::default().symbol(), "g");
    }

    #[test]
    fn unit_discriminants_match_storage() {
        assert_eq!(MeasureUnit::Milliliter as i32, 1);
        assert_eq!(MeasureUnit::Gram as i32, 2);
        assert_eq!(MeasureUnit::Unit as i32, 3);
    }
}
