//! Persistence boundary for calendar documents.
//!
//! # Responsibility
//! - Define the save contract the editor writes through.
//! - Keep SQL details out of editor orchestration.

pub mod document_repo;
