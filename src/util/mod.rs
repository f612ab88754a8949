pub mod error;
pub mod inline;
pub mod logger;
