//! Timeline coordinate and twin-rendering model.
//!
//! # Responsibility
//! - Convert between day, pixel and row coordinates (`coords`).
//! - Keep every placed object paired with its wrapped twin (`twin`, `scene`).
//! - Shift the strip with wraparound (`scroll`).
//! - Build season bars, textboxes and background marks (`placement`).
//!
//! # Invariants
//! - Nothing here holds UI session state; `doc_width` and the scroll offset
//!   are always passed in explicitly.

pub mod coords;
pub mod placement;
pub mod scene;
pub mod scroll;
pub mod twin;
