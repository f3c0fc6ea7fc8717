pub mod date;
pub mod quick_add;

pub use date::parse_numeric_date;
pub use quick_add::{ParsedInput, parse_task_input};
