//! Consistency checks between the grid and the player registry.
//!
//! These should never fire for a world mutated only through [`crate::apply`].
//! They exist to catch bugs in tests and debug builds.

use thiserror::Error;
use treasure_hunt_core::{PlayerName, TileCoord};

use crate::World;

/// A broken link between a tile and a player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A player stands outside the board.
    #[error("player `{player}` stands at {position}, outside the board")]
    PlayerOutOfBounds {
        /// Offending player.
        player: PlayerName,
        /// Recorded position.
        position: TileCoord,
    },
    /// A player's tile does not record the player as occupant.
    #[error("player `{player}` stands at {position} but the tile records {recorded:?}")]
    OccupantMismatch {
        /// Offending player.
        player: PlayerName,
        /// Recorded position.
        position: TileCoord,
        /// Occupant stored on the tile.
        recorded: Option<PlayerName>,
    },
    /// A tile records an occupant the registry does not place there.
    #[error("tile {tile} records `{occupant}` who is not standing there")]
    OrphanedOccupant {
        /// Offending tile.
        tile: TileCoord,
        /// Occupant stored on the tile.
        occupant: PlayerName,
    },
    /// Treasure lies beneath a player.
    #[error("tile {tile} holds treasure {value} beneath `{occupant}`")]
    TreasureUnderPlayer {
        /// Offending tile.
        tile: TileCoord,
        /// Uncollected value.
        value: u32,
        /// Player standing on it.
        occupant: PlayerName,
    },
}

/// Checks every tile/player invariant.
///
/// Returns the violations found, or an empty list when the world is consistent.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for player in world.players.iter() {
        let position = player.position();
        match world.grid.tile_at(position) {
            Err(_) => violations.push(InvariantViolation::PlayerOutOfBounds {
                player: player.name().clone(),
                position,
            }),
            Ok(tile) if tile.occupant() != Some(player.name()) => {
                violations.push(InvariantViolation::OccupantMismatch {
                    player: player.name().clone(),
                    position,
                    recorded: tile.occupant().cloned(),
                });
            }
            Ok(_) => {}
        }
    }

    for tile in world.grid.iter() {
        let Some(occupant) = tile.occupant() else {
            continue;
        };

        let placed_here = world
            .players
            .get_by_name(occupant.as_str())
            .is_ok_and(|player| player.position() == tile.coord());
        if !placed_here {
            violations.push(InvariantViolation::OrphanedOccupant {
                tile: tile.coord(),
                occupant: occupant.clone(),
            });
        }

        if tile.treasure() > 0 {
            violations.push(InvariantViolation::TreasureUnderPlayer {
                tile: tile.coord(),
                value: tile.treasure(),
                occupant: occupant.clone(),
            });
        }
    }

    violations
}
