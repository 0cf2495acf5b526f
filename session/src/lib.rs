#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Thread-safe entry points for driving a Treasure Hunt game.
//!
//! A [`GameSession`] owns the single authoritative world behind a
//! [`ConcurrencyGuard`]. Starting a game and attempting a move each hold the
//! guard for their whole read-validate-apply-persist sequence, so concurrent
//! callers always act on, and observe, a committed board.

mod guard;
mod persistence;

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use treasure_hunt_core::{BoardSnapshot, Direction, Event, GameConfig, GameError};
use treasure_hunt_system_bootstrap::Bootstrap;
use treasure_hunt_world::{self as world, query, World};

pub use guard::{ConcurrencyGuard, GuardedState};
pub use persistence::{Commit, GamePersistence, NullPersistence};

/// Game shared by every connected player.
#[derive(Debug)]
pub struct GameSession {
    state: ConcurrencyGuard<SessionState>,
}

struct SessionState {
    world: World,
    bootstrap: Bootstrap,
    rng: ChaCha8Rng,
    persistence: Box<dyn GamePersistence>,
    sequence: u64,
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("world", &self.world)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl SessionState {
    fn commit(&mut self, events: Vec<Event>) -> BoardSnapshot {
        self.sequence = self.sequence.saturating_add(1);
        let commit = Commit {
            sequence: self.sequence,
            events,
            snapshot: query::board_snapshot(&self.world),
        };
        self.persistence.on_commit(&commit);
        commit.snapshot
    }
}

impl GameSession {
    /// Creates a session with no game in progress, seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        tracing::info!(seed, "session seeded from entropy");
        Self::seeded(seed)
    }

    /// Creates a session whose games are laid out deterministically from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: ConcurrencyGuard::new(SessionState {
                world: World::new(),
                bootstrap: Bootstrap,
                rng: ChaCha8Rng::seed_from_u64(seed),
                persistence: Box::new(NullPersistence),
                sequence: 0,
            }),
        }
    }

    /// Routes every future commit to `persistence`.
    #[must_use]
    pub fn with_persistence(mut self, persistence: impl GamePersistence + 'static) -> Self {
        self.state.get_mut().persistence = Box::new(persistence);
        self
    }

    /// Replaces the current game, if any, with a freshly laid out one.
    ///
    /// On error the previous game is left exactly as it was.
    pub fn start_new_game(&self, config: &GameConfig) -> Result<BoardSnapshot, GameError> {
        self.state.with(|state| {
            let mut events = Vec::new();
            let fresh = state
                .bootstrap
                .start_new_game(config, &mut state.rng, &mut events)?;
            state.world = fresh;
            tracing::info!(
                grid_size = config.grid_size,
                treasure_count = config.treasure_count,
                "game started"
            );
            Ok(state.commit(events))
        })
    }

    /// Moves a player one step and returns the resulting board.
    ///
    /// A move that is off the board or onto the other player is refused
    /// silently: the unchanged board is returned.
    pub fn attempt_move(
        &self,
        player: &str,
        direction: Direction,
    ) -> Result<BoardSnapshot, GameError> {
        self.state.with(|state| {
            let mut events = Vec::new();
            let _ = world::attempt_move(&mut state.world, player, direction, &mut events)?;
            Ok(state.commit(events))
        })
    }

    /// Captures the current board; empty before the first game.
    #[must_use]
    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.state.with(|state| query::board_snapshot(&state.world))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
