//! Editor use-case services.
//!
//! # Responsibility
//! - `editor_service`: the operations UI glue calls on one open calendar.
//! - `session`: mode, selection and pointer state of one editor view.
//!
//! # Invariants
//! - Only these layers know about input gestures; the timeline core does not.

pub mod editor_service;
pub mod session;
