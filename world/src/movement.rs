//! Validate-then-apply move transaction.

use treasure_hunt_core::{Direction, Event, GameError, MoveRejection, PlayerName, TileCoord};

use crate::World;

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player advanced one tile.
    Moved {
        /// Tile the player left.
        from: TileCoord,
        /// Tile the player arrived on.
        to: TileCoord,
        /// Treasure picked up on arrival, zero when the tile was empty.
        collected: u32,
    },
    /// The move was refused and the world is unchanged.
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// Reports whether the player changed position.
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Moves a player one step and collects any treasure on the destination.
///
/// Bounds are checked before occupancy. Every lookup that can fail happens
/// before the first write, so the player, the origin tile and the destination
/// tile change together or not at all.
pub(crate) fn attempt_move(
    world: &mut World,
    player_name: &str,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Result<MoveOutcome, GameError> {
    let World { grid, players } = world;
    let player = players.get_by_name_mut(player_name)?;
    let origin = player.position();

    let Some(destination) = origin.step(direction, grid.size()) else {
        return Ok(reject(player.name().clone(), direction, MoveRejection::OutOfBounds, out_events));
    };

    let origin_index = grid.index_of(origin)?;
    let destination_index = grid.index_of(destination)?;
    if grid.tile_at(destination)?.occupant().is_some() {
        return Ok(reject(player.name().clone(), direction, MoveRejection::Occupied, out_events));
    }

    grid.tile_by_index_mut(origin_index).set_occupant(None);
    let destination_tile = grid.tile_by_index_mut(destination_index);
    destination_tile.set_occupant(Some(player.name().clone()));
    player.relocate(destination);
    out_events.push(Event::PlayerMoved {
        player: player.name().clone(),
        from: origin,
        to: destination,
    });

    let collected = destination_tile.take_treasure();
    if collected > 0 {
        let score = player.award(collected);
        tracing::debug!(
            player = %player.name(),
            tile = %destination,
            value = collected,
            score,
            "treasure collected"
        );
        out_events.push(Event::TreasureCollected {
            player: player.name().clone(),
            tile: destination,
            value: collected,
            score,
        });
    }

    tracing::debug!(player = %player.name(), %direction, from = %origin, to = %destination, "player moved");
    Ok(MoveOutcome::Moved {
        from: origin,
        to: destination,
        collected,
    })
}

fn reject(
    player: PlayerName,
    direction: Direction,
    reason: MoveRejection,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    tracing::debug!(player = %player, %direction, %reason, "move rejected");
    out_events.push(Event::MoveRejected {
        player,
        direction,
        reason,
    });
    MoveOutcome::Rejected(reason)
}
