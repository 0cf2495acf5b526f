#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Treasure Hunt engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the initializer system. The initializer submits
//! [`Command`] values that place treasure and players, sessions submit move
//! commands on behalf of connected players, and the world answers every
//! command with [`Event`] values describing what actually happened. Readers
//! never see the world directly: they receive a [`BoardSnapshot`] captured at
//! a committed point in time.

use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the board used when no configuration is supplied.
pub const DEFAULT_GRID_SIZE: u32 = 10;
/// Number of treasures scattered when no configuration is supplied.
pub const DEFAULT_TREASURE_COUNT: u32 = 10;
/// Smallest treasure value drawn when no configuration is supplied.
pub const DEFAULT_MIN_TREASURE: u32 = 1;
/// Largest treasure value drawn when no configuration is supplied.
pub const DEFAULT_MAX_TREASURE: u32 = 9;
/// Names given to the two players when no configuration is supplied.
pub const DEFAULT_PLAYER_NAMES: [&str; PLAYER_COUNT] = ["1", "2"];
/// Number of players taking part in a game.
pub const PLAYER_COUNT: usize = 2;
/// Longest accepted player name, measured in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 10;
/// Largest accepted board side length.
pub const MAX_GRID_SIZE: u32 = 1024;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Deposits treasure on a tile that currently holds neither treasure nor a player.
    PlaceTreasure {
        /// Tile receiving the treasure.
        tile: TileCoord,
        /// Points awarded to the first player arriving on the tile.
        value: u32,
    },
    /// Registers a new player standing on the provided tile.
    PlacePlayer {
        /// Unique name identifying the player.
        player: PlayerName,
        /// Tile the player starts on.
        tile: TileCoord,
    },
    /// Requests that a player advance a single step in the specified direction.
    MovePlayer {
        /// Name of the player attempting to move.
        player: PlayerName,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that treasure was deposited on a tile.
    TreasurePlaced {
        /// Tile holding the treasure.
        tile: TileCoord,
        /// Value of the deposited treasure.
        value: u32,
    },
    /// Confirms that a player joined the board.
    PlayerPlaced {
        /// Name of the new player.
        player: PlayerName,
        /// Tile the player occupies.
        tile: TileCoord,
    },
    /// Confirms that a player moved between two adjacent tiles.
    PlayerMoved {
        /// Name of the player that moved.
        player: PlayerName,
        /// Tile the player occupied before moving.
        from: TileCoord,
        /// Tile the player occupies after moving.
        to: TileCoord,
    },
    /// Reports that a player picked up the treasure lying on a tile.
    TreasureCollected {
        /// Name of the collecting player.
        player: PlayerName,
        /// Tile the treasure was collected from.
        tile: TileCoord,
        /// Value added to the player's score.
        value: u32,
        /// Player score after the collection.
        score: u64,
    },
    /// Reports that a well-formed move was refused and nothing changed.
    MoveRejected {
        /// Name of the player whose move was refused.
        player: PlayerName,
        /// Direction the player attempted to travel.
        direction: Direction,
        /// Specific reason the move was refused.
        reason: MoveRejection,
    },
}

/// Reasons a move request may be refused without raising an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination lies outside the board.
    OutOfBounds,
    /// Another player already stands on the destination.
    Occupied,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("destination is off the board"),
            Self::Occupied => f.write_str("destination is occupied"),
        }
    }
}

/// Cardinal movement directions available to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit offset applied to `(row, col)` when travelling in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Upper-case name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a direction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`; expected UP, DOWN, LEFT or RIGHT")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDirectionError(trimmed.to_owned()))
    }
}

/// Location of a single tile expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    row: u32,
    col: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Reports whether the coordinate lies on a board with the given side length.
    #[must_use]
    pub const fn within(&self, grid_size: u32) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// Neighbouring coordinate one step away, or `None` if the step leaves the board.
    #[must_use]
    pub fn step(self, direction: Direction, grid_size: u32) -> Option<TileCoord> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        let next = TileCoord::new(row, col);
        next.within(grid_size).then_some(next)
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unique name identifying a player.
///
/// Names are non-empty and at most [`MAX_PLAYER_NAME_LEN`] characters long.
/// Tiles refer to their occupant by name, so the name doubles as the lookup
/// key into the player registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates and wraps a player name.
    pub fn new(name: impl Into<String>) -> Result<Self, GameError> {
        let name = name.into();
        let length = name.chars().count();
        if name.trim().is_empty() || length > MAX_PLAYER_NAME_LEN {
            return Err(GameError::InvalidPlayerName { name });
        }
        Ok(Self(name))
    }

    /// Borrows the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl FromStr for PlayerName {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl Borrow<str> for PlayerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive range from which treasure values are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureRange {
    /// Smallest value a treasure may carry.
    pub min: u32,
    /// Largest value a treasure may carry.
    pub max: u32,
}

impl TreasureRange {
    /// Creates a new inclusive treasure range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Reports whether a treasure value falls within the range.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for TreasureRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TREASURE, DEFAULT_MAX_TREASURE)
    }
}

/// Parameters describing how a fresh game is laid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board.
    pub grid_size: u32,
    /// Number of tiles that receive treasure.
    pub treasure_count: u32,
    /// Inclusive range of treasure values.
    pub treasure_value_range: TreasureRange,
    /// Names of the two competing players.
    pub player_names: [PlayerName; PLAYER_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            treasure_count: DEFAULT_TREASURE_COUNT,
            treasure_value_range: TreasureRange::default(),
            player_names: DEFAULT_PLAYER_NAMES.map(|name| PlayerName(name.to_owned())),
        }
    }
}

impl GameConfig {
    /// Total number of tiles on the configured board.
    #[must_use]
    pub fn tile_count(&self) -> u64 {
        u64::from(self.grid_size) * u64::from(self.grid_size)
    }

    /// Checks every constraint a new game imposes, without touching any state.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidGridSize);
        }

        let range = self.treasure_value_range;
        if range.min == 0 || range.min > range.max {
            return Err(GameError::InvalidTreasureRange {
                min: range.min,
                max: range.max,
            });
        }

        for (index, name) in self.player_names.iter().enumerate() {
            if self.player_names[..index].contains(name) {
                return Err(GameError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let required = u64::from(self.treasure_count) + PLAYER_COUNT as u64;
        let available = self.tile_count();
        if required > available {
            return Err(GameError::InsufficientSpace {
                required,
                available,
            });
        }

        Ok(())
    }
}

/// Immutable representation of a single tile used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Row of the tile.
    pub row: u32,
    /// Column of the tile.
    pub col: u32,
    /// Treasure remaining on the tile, zero when none.
    pub treasure_value: u32,
    /// Name of the player standing on the tile, if any.
    pub occupant: Option<PlayerName>,
}

impl TileSnapshot {
    /// Coordinate of the captured tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        TileCoord::new(self.row, self.col)
    }
}

/// Immutable representation of a single player used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Unique name of the player.
    pub name: PlayerName,
    /// Row the player stands on.
    pub row: u32,
    /// Column the player stands on.
    pub col: u32,
    /// Sum of all treasure the player collected.
    pub score: u64,
}

impl PlayerSnapshot {
    /// Coordinate the player stands on.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        TileCoord::new(self.row, self.col)
    }
}

/// Consistent, point-in-time read of the whole board and every player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Side length of the board; zero before any game starts.
    pub grid_size: u32,
    /// Tiles laid out row by row.
    pub tiles: Vec<Vec<TileSnapshot>>,
    /// Players in registration order.
    pub players: Vec<PlayerSnapshot>,
}

impl BoardSnapshot {
    /// Snapshot describing the absence of a game.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the captured tile at the provided coordinate.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<&TileSnapshot> {
        let row = usize::try_from(coord.row()).ok()?;
        let col = usize::try_from(coord.col()).ok()?;
        self.tiles.get(row)?.get(col)
    }

    /// Looks up the captured player with the provided name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerSnapshot> {
        self.players
            .iter()
            .find(|player| player.name.as_str() == name)
    }

    /// Iterator over every captured tile in row-major order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.tiles.iter().flatten()
    }

    /// Number of tiles still holding treasure.
    #[must_use]
    pub fn treasure_tile_count(&self) -> usize {
        self.iter_tiles()
            .filter(|tile| tile.treasure_value > 0)
            .count()
    }

    /// Sum of all treasure still lying on the board.
    #[must_use]
    pub fn remaining_treasure(&self) -> u64 {
        self.iter_tiles()
            .map(|tile| u64::from(tile.treasure_value))
            .sum()
    }

    /// Sum of every player's score.
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.players.iter().map(|player| player.score).sum()
    }
}

/// Failures reported synchronously by the engine.
///
/// A refused move is not an error; it is reported as
/// [`Event::MoveRejected`] instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GameError {
    /// A coordinate lies outside the board.
    #[error("tile {tile} lies outside the {grid_size}x{grid_size} board")]
    OutOfBounds {
        /// Offending coordinate.
        tile: TileCoord,
        /// Side length of the board.
        grid_size: u32,
    },
    /// Every tile holds treasure or a player.
    #[error("no tile is free of both treasure and players")]
    NoFreeTileAvailable,
    /// Treasure and players cannot fit on the board.
    #[error("{required} tiles are needed but the board only has {available}")]
    InsufficientSpace {
        /// Treasure plus players to place.
        required: u64,
        /// Tiles on the board.
        available: u64,
    },
    /// Two players were given the same name.
    #[error("a player named `{name}` already exists")]
    DuplicateName {
        /// Name that collided.
        name: String,
    },
    /// No player carries the requested name.
    #[error("no player named `{name}`")]
    PlayerNotFound {
        /// Name that was looked up.
        name: String,
    },
    /// The board side length was zero or above [`MAX_GRID_SIZE`].
    #[error("grid size must be between 1 and {}", MAX_GRID_SIZE)]
    InvalidGridSize,
    /// The treasure range was empty or allowed zero-valued treasure.
    #[error("treasure range {min}..={max} is invalid; values must be positive and min <= max")]
    InvalidTreasureRange {
        /// Configured lower bound.
        min: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// A player name was empty or too long.
    #[error("player name `{name}` must be 1 to 10 characters long")]
    InvalidPlayerName {
        /// Rejected name.
        name: String,
    },
    /// Something was placed onto a tile that was not free.
    #[error("tile {tile} is not free")]
    TileOccupied {
        /// Tile that was already taken.
        tile: TileCoord,
    },
}
