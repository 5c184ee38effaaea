// ============================================================================
// Persistence Module
// Durable order book storage
// ============================================================================

mod json_file;

pub use json_file::JsonFileOrderStore;
