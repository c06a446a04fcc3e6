pub mod auth_state;
pub mod document_path;
pub mod persistence;
