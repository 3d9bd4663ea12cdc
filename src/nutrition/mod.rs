pub mod calories;

pub use calories::totals_by;
