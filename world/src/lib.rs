#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Treasure Hunt.
//!
//! The world owns the [`Grid`] and the [`PlayerRegistry`] and is mutated only
//! through [`apply`]. It performs no locking of its own; callers sharing a
//! world between threads must serialize access around each command.

mod grid;
pub mod invariants;
mod movement;
mod players;

use treasure_hunt_core::{Command, Direction, Event, GameError};

pub use grid::{Grid, Tile};
pub use movement::MoveOutcome;
pub use players::{Player, PlayerRegistry};

/// Represents the authoritative Treasure Hunt world state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    grid: Grid,
    players: PlayerRegistry,
}

impl World {
    /// Creates a world without a board, as seen before the first game starts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::empty(),
            players: PlayerRegistry::new(),
        }
    }

    /// Creates a world holding an empty board of the given side length.
    pub fn with_grid_size(grid_size: u32) -> Result<Self, GameError> {
        let mut world = Self::new();
        world.reset(grid_size)?;
        Ok(world)
    }

    /// Discards every tile and player, leaving an empty board of the given size.
    ///
    /// An oversized board is refused and the world is left as it was.
    pub fn reset(&mut self, grid_size: u32) -> Result<(), GameError> {
        let grid = Grid::new(grid_size)?;
        self.players.clear_all();
        self.grid = grid;
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Errors leave the world untouched. A refused move is not an error: it is
/// reported through [`Event::MoveRejected`] and changes nothing.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    match command {
        Command::PlaceTreasure { tile, value } => {
            let target = world.grid.tile_at_mut(tile)?;
            if !target.is_free() {
                return Err(GameError::TileOccupied { tile });
            }
            if value == 0 {
                return Ok(());
            }
            target.set_treasure(value);
            out_events.push(Event::TreasurePlaced { tile, value });
        }
        Command::PlacePlayer { player, tile } => {
            let index = world.grid.index_of(tile)?;
            if !world.grid.tile_by_index_mut(index).is_free() {
                return Err(GameError::TileOccupied { tile });
            }
            let _ = world.players.create_player(player.clone(), tile)?;
            world
                .grid
                .tile_by_index_mut(index)
                .set_occupant(Some(player.clone()));
            tracing::debug!(%player, %tile, "player placed");
            out_events.push(Event::PlayerPlaced { player, tile });
        }
        Command::MovePlayer { player, direction } => {
            let _ = movement::attempt_move(world, player.as_str(), direction, out_events)?;
        }
    }

    Ok(())
}

/// Moves a player one step, returning a summary of what happened.
///
/// Equivalent to applying [`Command::MovePlayer`], but exposes the outcome
/// directly instead of requiring callers to inspect the emitted events.
pub fn attempt_move(
    world: &mut World,
    player: &str,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Result<MoveOutcome, GameError> {
    movement::attempt_move(world, player, direction, out_events)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use treasure_hunt_core::{
        BoardSnapshot, GameError, PlayerSnapshot, TileCoord, TileSnapshot,
    };

    use super::{Grid, Player, PlayerRegistry, Tile, World};

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the player registry.
    #[must_use]
    pub fn players(world: &World) -> &PlayerRegistry {
        &world.players
    }

    /// Side length of the current board, zero before any game.
    #[must_use]
    pub fn grid_size(world: &World) -> u32 {
        world.grid.size()
    }

    /// Looks up the tile at the provided coordinate.
    pub fn tile_at(world: &World, coord: TileCoord) -> Result<&Tile, GameError> {
        world.grid.tile_at(coord)
    }

    /// Looks up a player by name.
    pub fn player<'w>(world: &'w World, name: &str) -> Result<&'w Player, GameError> {
        world.players.get_by_name(name)
    }

    /// Captures the whole board and every player at this instant.
    #[must_use]
    pub fn board_snapshot(world: &World) -> BoardSnapshot {
        let tiles = world
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|tile| TileSnapshot {
                        row: tile.coord().row(),
                        col: tile.coord().col(),
                        treasure_value: tile.treasure(),
                        occupant: tile.occupant().cloned(),
                    })
                    .collect()
            })
            .collect();
        let players = world
            .players
            .iter()
            .map(|player| PlayerSnapshot {
                name: player.name().clone(),
                row: player.position().row(),
                col: player.position().col(),
                score: player.score(),
            })
            .collect();

        BoardSnapshot {
            grid_size: world.grid.size(),
            tiles,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use treasure_hunt_core::{Command, Direction, Event, GameError, PlayerName, TileCoord};

    use super::*;

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value).expect("valid name")
    }

    fn place_player(world: &mut World, player: &str, tile: TileCoord) {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlacePlayer {
                player: name(player),
                tile,
            },
            &mut events,
        )
        .expect("placement succeeds");
    }

    #[test]
    fn new_world_has_no_board() {
        let world = World::new();
        assert_eq!(query::grid_size(&world), 0);
        assert!(query::players(&world).is_empty());
        let snapshot = query::board_snapshot(&world);
        assert_eq!(snapshot, treasure_hunt_core::BoardSnapshot::empty());
    }

    #[test]
    fn reset_discards_players_and_tiles() {
        let mut world = World::with_grid_size(3).expect("valid size");
        place_player(&mut world, "1", TileCoord::new(1, 1));
        world.reset(5).expect("valid size");
        assert_eq!(query::grid_size(&world), 5);
        assert!(query::players(&world).is_empty());
        assert_eq!(query::grid(&world).free_tile_count(), 25);
    }

    #[test]
    fn oversized_reset_keeps_current_world() {
        let mut world = World::with_grid_size(3).expect("valid size");
        place_player(&mut world, "1", TileCoord::new(0, 2));
        let before = world.clone();

        assert_eq!(world.reset(u32::MAX), Err(GameError::InvalidGridSize));
        assert_eq!(world, before);
        assert!(World::with_grid_size(u32::MAX).is_err());
    }

    #[test]
    fn place_player_records_occupancy_both_ways() {
        let mut world = World::with_grid_size(3).expect("valid size");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlacePlayer {
                player: name("1"),
                tile: TileCoord::new(2, 0),
            },
            &mut events,
        )
        .expect("placement succeeds");

        let tile = query::tile_at(&world, TileCoord::new(2, 0)).expect("in bounds");
        assert_eq!(tile.occupant(), Some(&name("1")));
        let player = query::player(&world, "1").expect("registered");
        assert_eq!(player.position(), TileCoord::new(2, 0));
        assert_eq!(
            events,
            vec![Event::PlayerPlaced {
                player: name("1"),
                tile: TileCoord::new(2, 0)
            }]
        );
        assert!(invariants::check_invariants(&world).is_empty());
    }

    #[test]
    fn place_player_rejects_taken_tiles_and_names() {
        let mut world = World::with_grid_size(3).expect("valid size");
        place_player(&mut world, "1", TileCoord::new(0, 0));
        let before = world.clone();
        let mut events = Vec::new();

        assert_eq!(
            apply(
                &mut world,
                Command::PlacePlayer {
                    player: name("2"),
                    tile: TileCoord::new(0, 0),
                },
                &mut events,
            ),
            Err(GameError::TileOccupied {
                tile: TileCoord::new(0, 0)
            })
        );
        assert_eq!(
            apply(
                &mut world,
                Command::PlacePlayer {
                    player: name("1"),
                    tile: TileCoord::new(1, 1),
                },
                &mut events,
            ),
            Err(GameError::DuplicateName {
                name: "1".to_owned()
            })
        );
        assert_eq!(
            apply(
                &mut world,
                Command::PlacePlayer {
                    player: name("2"),
                    tile: TileCoord::new(3, 1),
                },
                &mut events,
            ),
            Err(GameError::OutOfBounds {
                tile: TileCoord::new(3, 1),
                grid_size: 3
            })
        );
        assert!(events.is_empty());
        assert_eq!(world, before);
    }

    #[test]
    fn place_treasure_requires_free_tile() {
        let mut world = World::with_grid_size(2).expect("valid size");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTreasure {
                tile: TileCoord::new(0, 1),
                value: 3,
            },
            &mut events,
        )
        .expect("free tile");
        assert_eq!(
            apply(
                &mut world,
                Command::PlaceTreasure {
                    tile: TileCoord::new(0, 1),
                    value: 4,
                },
                &mut events,
            ),
            Err(GameError::TileOccupied {
                tile: TileCoord::new(0, 1)
            })
        );
        assert_eq!(
            query::tile_at(&world, TileCoord::new(0, 1))
                .expect("in bounds")
                .treasure(),
            3
        );
        assert_eq!(
            events,
            vec![Event::TreasurePlaced {
                tile: TileCoord::new(0, 1),
                value: 3
            }]
        );
    }

    #[test]
    fn move_command_reports_unknown_player() {
        let mut world = World::with_grid_size(2).expect("valid size");
        let mut events = Vec::new();
        assert_eq!(
            apply(
                &mut world,
                Command::MovePlayer {
                    player: name("ghost"),
                    direction: Direction::Up,
                },
                &mut events,
            ),
            Err(GameError::PlayerNotFound {
                name: "ghost".to_owned()
            })
        );
        assert!(events.is_empty());
    }

    #[test]
    fn snapshot_mirrors_world() {
        let mut world = World::with_grid_size(2).expect("valid size");
        place_player(&mut world, "1", TileCoord::new(1, 0));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceTreasure {
                tile: TileCoord::new(0, 1),
                value: 6,
            },
            &mut events,
        )
        .expect("free tile");

        let snapshot = query::board_snapshot(&world);
        assert_eq!(snapshot.grid_size, 2);
        assert_eq!(snapshot.tiles.len(), 2);
        assert!(snapshot.tiles.iter().all(|row| row.len() == 2));
        assert_eq!(
            snapshot
                .tile(TileCoord::new(0, 1))
                .map(|tile| tile.treasure_value),
            Some(6)
        );
        assert_eq!(
            snapshot
                .tile(TileCoord::new(1, 0))
                .and_then(|tile| tile.occupant.clone()),
            Some(name("1"))
        );
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.players[0].score, 0);
    }
}
