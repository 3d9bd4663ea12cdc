//! Calorie totals for meals.
//!
//! A portion is expressed as a multiple of its food's reference quantity, and that multiple scales
//! the food's reference calories linearly. A portion is skipped when its own quantity is not
//! positive or when the food's reference quantity is not positive. The food's `total_kcal` is never
//! filtered: zero or negative calories flow into the total unchanged.
//!
//! Totals are summed in iteration order. Reordering the portions can change the last bits of the
//! result, so compare totals with a floating-point tolerance.

use std::collections::HashMap;
use std::hash::Hash;

use crate::foods::Food;

/// Calories contributed by `portion_value` of `food`, or 0 when the portion is skipped.
pub fn portion_calories(portion_value: f64, food: &Food) -> f64 {
    if portion_value <= 0.0 || food.value <= 0.0 {
        return 0.0;
    }
    (portion_value / food.value) * food.total_kcal
}

/// Total calories of a sequence of `(portion value, food)` pairs. Empty input yields 0.
pub fn total_calories<'a, I>(portions: I) -> f64
where
    I: IntoIterator<Item = (f64, &'a Food)>,
{
    portions
        .into_iter()
        .fold(0.0, |acc, (value, food)| acc + portion_calories(value, food))
}

/// Groups `(key, portion value, food)` rows by key and totals each group.
///
/// Keys with no rows are absent from the map; callers treat them as 0.
pub fn totals_by<'a, K, I>(rows: I) -> HashMap<K, f64>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, f64, &'a Food)>,
{
    let mut grouped: HashMap<K, Vec<(f64, &'a Food)>> = HashMap::new();
    for (key, value, food) in rows {
        grouped.entry(key).or_default().push((value, food));
    }
    grouped
        .into_iter()
        .map(|(key, portions)| (key, total_calories(portions)))
        .collect()
}
