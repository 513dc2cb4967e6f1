//! Domain model for placed entities and persisted calendar documents.
//!
//! # Responsibility
//! - Define the in-memory shape of each placed copy (`entity`).
//! - Define the resolution-independent projection saved to the store
//!   (`document`).
//!
//! # Invariants
//! - Pixel values never leak into `document` records.

pub mod document;
pub mod entity;
