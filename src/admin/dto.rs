use serde::Serialize;

/// Row of the admin meal listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminMealRow {
    pub id: i64,
    pub meal_type: &'static str,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminProfileRow {
    pub id: i64,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminTrainingExerciseRow {
    pub id: i64,
    pub exercise: String,
    pub repetitions: i32,
    pub series: i32,
    pub rest_time_seconds: i32,
}

/// Training with its exercises inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminTrainingRow {
    pub id: i64,
    pub name: String,
    pub exercises: Vec<AdminTrainingExerciseRow>,
}
