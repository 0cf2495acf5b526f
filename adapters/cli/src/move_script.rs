use std::{error::Error, fmt, str::FromStr};

use treasure_hunt_core::{Direction, ParseDirectionError};

/// Delimiter separating the player name from the direction.
const FIELD_DELIMITER: char = ':';

/// Single scripted move supplied on the command line as `NAME:DIRECTION`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MoveStep {
    /// Name of the player taking the step.
    pub(crate) player: String,
    /// Direction of the step.
    pub(crate) direction: Direction,
}

impl FromStr for MoveStep {
    type Err = MoveStepError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MoveStepError::Empty);
        }

        // Names may contain the delimiter, directions never do.
        let (player, direction) = trimmed
            .rsplit_once(FIELD_DELIMITER)
            .ok_or_else(|| MoveStepError::MissingDelimiter(trimmed.to_owned()))?;
        if player.is_empty() {
            return Err(MoveStepError::MissingPlayer(trimmed.to_owned()));
        }
        let direction = direction
            .parse::<Direction>()
            .map_err(MoveStepError::InvalidDirection)?;

        Ok(Self {
            player: player.to_owned(),
            direction,
        })
    }
}

/// Errors produced while parsing a scripted move.
#[derive(Debug)]
pub(crate) enum MoveStepError {
    /// The argument was empty or contained only whitespace.
    Empty,
    /// The argument had no `:` separating name and direction.
    MissingDelimiter(String),
    /// Nothing preceded the delimiter.
    MissingPlayer(String),
    /// The direction was not one of UP, DOWN, LEFT or RIGHT.
    InvalidDirection(ParseDirectionError),
}

impl fmt::Display for MoveStepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "move was empty"),
            Self::MissingDelimiter(value) => {
                write!(f, "move '{value}' is not in NAME:DIRECTION form")
            }
            Self::MissingPlayer(value) => write!(f, "move '{value}' is missing a player name"),
            Self::InvalidDirection(error) => write!(f, "{error}"),
        }
    }
}

impl Error for MoveStepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDirection(error) => Some(error),
            _ => None,
        }
    }
}

/// Steps that walk a player over every tile of a `grid_size` board.
///
/// The player is first pushed into the top-left corner, then sweeps each row
/// left to right or right to left, dropping one row at the end of each pass.
/// Steps blocked by the edge or the other player are refused by the session
/// and simply leave the walker in place.
pub(crate) fn serpentine_sweep(grid_size: u32) -> Vec<Direction> {
    let span = grid_size.saturating_sub(1) as usize;
    let mut steps = Vec::new();
    steps.extend(std::iter::repeat(Direction::Up).take(span));
    steps.extend(std::iter::repeat(Direction::Left).take(span));

    for row in 0..grid_size {
        let across = if row % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        steps.extend(std::iter::repeat(across).take(span));
        if row + 1 < grid_size {
            steps.push(Direction::Down);
        }
    }
    steps
}
