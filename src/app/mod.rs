#[allow(clippy::module_inception)]
pub mod app;
