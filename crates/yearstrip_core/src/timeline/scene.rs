//! Twin-pair arena and relation graph.
//!
//! # Responsibility
//! - Own every placed pair, keyed by a stable `PairId`.
//! - Store relation edges between pairs and cascade deletion along them.
//!
//! # Invariants
//! - Pair ids are never reused within one scene.
//! - Relation edges only reference live pairs.
//! - A cascade removes every reachable pair exactly once.

use super::twin::TwinPair;
use crate::model::entity::{EntityKind, EntityRef, PairId, Side, TwinnedAttribute, Visual};
use log::debug;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors from scene lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No live pair with this id.
    UnknownPair(PairId),
    /// Pair exists but has a different kind than the operation needs.
    WrongKind {
        pair: PairId,
        expected: EntityKind,
        found: EntityKind,
    },
    /// A pair cannot be related to itself.
    SelfRelation(PairId),
}

impl Display for SceneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPair(id) => write!(f, "scene entity not found: {id}"),
            Self::WrongKind {
                pair,
                expected,
                found,
            } => write!(f, "{pair} is {found:?}, expected {expected:?}"),
            Self::SelfRelation(id) => write!(f, "{id} cannot be related to itself"),
        }
    }
}

impl Error for SceneError {}

/// In-memory set of placed pairs.
#[derive(Debug, Default)]
pub struct Scene {
    pairs: BTreeMap<PairId, TwinPair<Visual>>,
    relations: BTreeSet<(PairId, PairId)>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pair from one `factory` call and registers it.
    ///
    /// The twin is cloned from the factory output. Top-level kinds get their
    /// twin wrapped one width to the right; resizers keep the parent-relative
    /// offset.
    pub fn create_pair(&mut self, doc_width: i64, factory: impl FnOnce() -> Visual) -> PairId {
        let primal = factory();
        let pair = if primal.kind.is_top_level() {
            TwinPair::new(primal, doc_width)
        } else {
            TwinPair::relative(primal)
        };
        let id = PairId(self.next_id);
        self.next_id += 1;
        self.pairs.insert(id, pair);
        id
    }

    pub fn pair(&self, id: PairId) -> Option<&TwinPair<Visual>> {
        self.pairs.get(&id)
    }

    pub fn get(&self, entity: EntityRef) -> Option<&Visual> {
        self.pairs.get(&entity.pair).map(|pair| pair.get(entity.side))
    }

    pub fn contains(&self, id: PairId) -> bool {
        self.pairs.contains_key(&id)
    }

    pub fn kind_of(&self, id: PairId) -> Option<EntityKind> {
        self.pairs.get(&id).map(|pair| pair.primal().kind)
    }

    /// Pairs in creation order.
    pub fn pairs(&self) -> impl Iterator<Item = (PairId, &TwinPair<Visual>)> {
        self.pairs.iter().map(|(id, pair)| (*id, pair))
    }

    /// Every physical copy in creation order, primal before twin.
    pub fn entities(&self) -> impl Iterator<Item = (EntityRef, &Visual)> {
        self.pairs.iter().flat_map(|(id, pair)| {
            pair.iter()
                .map(move |(side, visual)| (EntityRef::new(*id, side), visual))
        })
    }

    pub fn entity_count(&self) -> usize {
        self.pairs.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Adds a symmetric relation between two live pairs.
    pub fn relate(&mut self, a: PairId, b: PairId) -> SceneResult<()> {
        if a == b {
            return Err(SceneError::SelfRelation(a));
        }
        self.require(a)?;
        self.require(b)?;
        self.relations.insert(edge(a, b));
        Ok(())
    }

    /// Pairs directly related to `id`.
    pub fn related(&self, id: PairId) -> Vec<PairId> {
        self.relations
            .iter()
            .filter_map(|&(a, b)| {
                if a == id {
                    Some(b)
                } else if b == id {
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// First pair of `kind` directly related to `id`.
    pub fn related_of_kind(&self, id: PairId, kind: EntityKind) -> Option<PairId> {
        self.related(id)
            .into_iter()
            .find(|other| self.kind_of(*other) == Some(kind))
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// All relation edges, each once with the smaller id first.
    pub fn relation_edges(&self) -> impl Iterator<Item = (PairId, PairId)> + '_ {
        self.relations.iter().copied()
    }

    /// Writes one attribute to both copies of the entity's pair.
    pub fn apply_twinned_attribute(
        &mut self,
        entity: EntityRef,
        attribute: &TwinnedAttribute,
    ) -> SceneResult<()> {
        let pair = self
            .pairs
            .get_mut(&entity.pair)
            .ok_or(SceneError::UnknownPair(entity.pair))?;
        pair.update(|visual| attribute.apply_to(visual));
        Ok(())
    }

    /// Removes the entity, its twin and everything transitively related.
    ///
    /// Returns the removed copies in traversal order, each exactly once.
    pub fn remove_entity(&mut self, entity: EntityRef) -> SceneResult<Vec<EntityRef>> {
        self.require(entity.pair)?;

        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([entity.pair]);
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            for next in self.related(id) {
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }

        self.relations
            .retain(|(a, b)| !visited.contains(a) && !visited.contains(b));

        let mut removed = Vec::with_capacity(order.len() * 2);
        for id in order {
            if self.pairs.remove(&id).is_some() {
                removed.push(EntityRef::new(id, Side::Primal));
                removed.push(EntityRef::new(id, Side::Twin));
            }
        }

        debug!(
            "event=scene_remove module=timeline status=ok root={} removed={}",
            entity,
            removed.len()
        );
        Ok(removed)
    }

    /// Drops every pair and relation. Ids keep counting up.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.relations.clear();
    }

    /// Topmost selectable copy at a strip point.
    ///
    /// Resizer handles win over everything else, then later pairs over
    /// earlier ones. Background marks are never hit.
    pub fn hit_test(&self, x: i64, y: i64) -> Option<EntityRef> {
        for (id, pair) in self.pairs.iter().rev() {
            if pair.primal().kind != EntityKind::Resizer {
                continue;
            }
            let Some(bar) = self.related_of_kind(*id, EntityKind::SeasonDuration) else {
                continue;
            };
            let Some(bar_pair) = self.pairs.get(&bar) else {
                continue;
            };
            for (side, handle) in pair.iter() {
                if handle.contains(bar_pair.get(side).position.x, x, y) {
                    return Some(EntityRef::new(*id, side));
                }
            }
        }

        for (id, pair) in self.pairs.iter().rev() {
            let kind = pair.primal().kind;
            if matches!(kind, EntityKind::Resizer | EntityKind::BackgroundMark) {
                continue;
            }
            for (side, visual) in pair.iter() {
                if visual.contains(0, x, y) {
                    return Some(EntityRef::new(*id, side));
                }
            }
        }
        None
    }

    pub(crate) fn pair_mut(&mut self, id: PairId) -> SceneResult<&mut TwinPair<Visual>> {
        self.pairs.get_mut(&id).ok_or(SceneError::UnknownPair(id))
    }

    pub(crate) fn pairs_mut(&mut self) -> impl Iterator<Item = &mut TwinPair<Visual>> {
        self.pairs.values_mut()
    }

    /// Looks up a pair and checks its kind.
    pub(crate) fn require_kind(&self, id: PairId, expected: EntityKind) -> SceneResult<()> {
        let found = self.kind_of(id).ok_or(SceneError::UnknownPair(id))?;
        if found != expected {
            return Err(SceneError::WrongKind {
                pair: id,
                expected,
                found,
            });
        }
        Ok(())
    }

    fn require(&self, id: PairId) -> SceneResult<()> {
        if self.pairs.contains_key(&id) {
            Ok(())
        } else {
            Err(SceneError::UnknownPair(id))
        }
    }
}

fn edge(a: PairId, b: PairId) -> (PairId, PairId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
