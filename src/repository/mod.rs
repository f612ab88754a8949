pub mod document_store;
pub mod memory_store;
pub mod repository_error;
