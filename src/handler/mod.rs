pub mod application_handler;
pub mod health_handler;
