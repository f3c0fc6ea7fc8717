pub mod config;
pub mod list;
pub mod store;
pub mod tag;
pub mod task;
pub mod view;

pub use config::*;
pub use list::*;
pub use store::*;
pub use tag::*;
pub use task::*;
pub use view::*;

/// A word that does not name any known value of an enumerated field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ValueParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ValueParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        ValueParseError {
            kind,
            value: value.to_string(),
        }
    }
}
