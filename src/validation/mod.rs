// Validation layer: structural line checks, check digit arithmetic and
// calendar date verification.

pub mod check_digit;
pub mod date;
pub mod line;

pub use check_digit::{calculate_check_digit, verify_check_digit};
pub use date::{is_valid_date, repair_date, validate_or_repair_date};
pub use line::LineClassifier;
