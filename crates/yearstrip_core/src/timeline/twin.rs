//! Paired primal/twin copies.
//!
//! # Invariants
//! - A pair always holds exactly two copies.
//! - Content writes go through `update`, which touches both copies before
//!   returning.
//! - At construction the twin sits at `wrap_x(primal.x + doc_width)`.

use super::coords::wrap_x;
use crate::model::entity::{Side, Visual};

/// Horizontal placement hooks needed to position a twin.
pub trait Placed: Clone {
    fn x(&self) -> i64;
    fn set_x(&mut self, x: i64);
}

impl Placed for Visual {
    fn x(&self) -> i64 {
        self.position.x
    }

    fn set_x(&mut self, x: i64) {
        self.position.x = x;
    }
}

/// Two copies of a rendered value spaced one document width apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwinPair<T> {
    primal: T,
    twin: T,
}

impl<T: Placed> TwinPair<T> {
    /// Builds the twin by cloning `primal` and shifting it one width right,
    /// wrapped into the scroll window.
    pub fn new(primal: T, doc_width: i64) -> Self {
        let mut twin = primal.clone();
        twin.set_x(wrap_x(primal.x().saturating_add(doc_width), doc_width));
        Self { primal, twin }
    }

    /// Builds a pair for a value positioned relative to a parent. Both
    /// copies keep the same x.
    pub fn relative(primal: T) -> Self {
        let twin = primal.clone();
        Self { primal, twin }
    }

    /// Applies `f` to both copies.
    pub fn update(&mut self, mut f: impl FnMut(&mut T)) {
        f(&mut self.primal);
        f(&mut self.twin);
    }
}

impl<T> TwinPair<T> {
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Primal => &self.primal,
            Side::Twin => &self.twin,
        }
    }

    pub fn primal(&self) -> &T {
        &self.primal
    }

    pub fn twin(&self) -> &T {
        &self.twin
    }

    /// Both copies, primal first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Primal, &self.primal), (Side::Twin, &self.twin)].into_iter()
    }
}
