//! Placed timeline entity model.
//!
//! # Responsibility
//! - Define the rendered content carried by each copy of a placed object.
//! - Define stable handles used to address a copy inside the scene arena.
//!
//! # Invariants
//! - `EntityRef::twin().twin()` is the identity.
//! - Both copies of a pair share kind, text, color and size; only positions
//!   differ.

use std::fmt::{Display, Formatter};

/// Classification of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Label drawn above a season's duration bar.
    SeasonTitle,
    /// Horizontal bar spanning the season length.
    SeasonDuration,
    /// Drag handle at the right end of a duration bar.
    Resizer,
    /// Free text annotation.
    Textbox,
    /// Month start, solstice or equinox marking.
    BackgroundMark,
}

impl EntityKind {
    /// Whether scrolling shifts this kind directly.
    ///
    /// Resizer handles sit inside their duration bar and move with it.
    pub fn is_top_level(self) -> bool {
        !matches!(self, Self::Resizer)
    }
}

/// Pixel position of one copy.
///
/// For top-level kinds `x` is a strip offset; for resizers it is relative to
/// the owning duration bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Which physical copy of a pair a handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The copy created first. Only primal copies are exported.
    Primal,
    /// The duplicate offset by one document width.
    Twin,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Primal => Self::Twin,
            Self::Twin => Self::Primal,
        }
    }
}

/// Arena key of one twin pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub(crate) u64);

impl Display for PairId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "pair#{}", self.0)
    }
}

/// Handle to one physical copy in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityRef {
    pub pair: PairId,
    pub side: Side,
}

impl EntityRef {
    pub fn new(pair: PairId, side: Side) -> Self {
        Self { pair, side }
    }

    pub fn primal(pair: PairId) -> Self {
        Self::new(pair, Side::Primal)
    }

    /// Handle to the other copy of the same pair.
    pub fn twin(self) -> Self {
        Self::new(self.pair, self.side.opposite())
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let side = match self.side {
            Side::Primal => "primal",
            Side::Twin => "twin",
        };
        write!(f, "{}/{side}", self.pair)
    }
}

/// Rendered content of one copy.
///
/// Cloning a `Visual` copies content and classification only; the scene
/// keeps relations and input bindings outside of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visual {
    pub kind: EntityKind,
    pub position: Position,
    pub text: String,
    pub color: String,
    pub width_px: i64,
    pub height_px: i64,
}

impl Visual {
    pub fn new(kind: EntityKind, position: Position) -> Self {
        Self {
            kind,
            position,
            text: String::new(),
            color: String::new(),
            width_px: 0,
            height_px: 0,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_size(mut self, width_px: i64, height_px: i64) -> Self {
        self.width_px = width_px;
        self.height_px = height_px;
        self
    }

    /// Whether `(x, y)` falls inside this copy's box.
    ///
    /// `origin_x` is the strip offset the position is relative to (zero for
    /// top-level kinds).
    pub fn contains(&self, origin_x: i64, x: i64, y: i64) -> bool {
        let left = origin_x + self.position.x;
        let top = self.position.y;
        x >= left && x < left + self.width_px.max(1) && y >= top && y < top + self.height_px.max(1)
    }
}

/// Attribute written to both copies of a pair in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwinnedAttribute {
    Text(String),
    Color(String),
    Width(i64),
    Height(i64),
    /// Vertical position; follows the pair, unlike `x`.
    Row(i64),
}

impl TwinnedAttribute {
    /// Applies the attribute to one copy.
    pub fn apply_to(&self, visual: &mut Visual) {
        match self {
            Self::Text(text) => visual.text = text.clone(),
            Self::Color(color) => visual.color = color.clone(),
            Self::Width(width) => visual.width_px = *width,
            Self::Height(height) => visual.height_px = *height,
            Self::Row(y) => visual.position.y = *y,
        }
    }
}
