pub mod application_router;
pub mod health_router;
