pub mod error;
pub mod money;
pub mod tag;
