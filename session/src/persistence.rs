//! Hook for layering durable storage outside the core.

use serde::{Deserialize, Serialize};
use treasure_hunt_core::{BoardSnapshot, Event};

/// Everything a guarded operation changed, handed over while the guard is still held.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Position of the commit in the session's history, starting at 1.
    pub sequence: u64,
    /// Events emitted by the operation.
    pub events: Vec<Event>,
    /// Board state after the operation.
    pub snapshot: BoardSnapshot,
}

/// Receives every commit in order.
///
/// Implementations run inside the concurrency guard, so commits never
/// interleave. They cannot fail the operation: a sink that cannot store a
/// commit should report the problem itself.
pub trait GamePersistence: Send {
    /// Records a single commit.
    fn on_commit(&mut self, commit: &Commit);
}

/// Persistence that discards every commit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPersistence;

impl GamePersistence for NullPersistence {
    fn on_commit(&mut self, _commit: &Commit) {}
}
