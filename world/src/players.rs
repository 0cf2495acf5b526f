//! Registry owning every active player.

use treasure_hunt_core::{GameError, PlayerName, TileCoord};

/// A player standing somewhere on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: PlayerName,
    position: TileCoord,
    score: u64,
}

impl Player {
    /// Unique name of the player.
    #[must_use]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    /// Tile the player currently stands on.
    #[must_use]
    pub const fn position(&self) -> TileCoord {
        self.position
    }

    /// Sum of all treasure collected so far.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn relocate(&mut self, destination: TileCoord) {
        self.position = destination;
    }

    pub(crate) fn award(&mut self, value: u32) -> u64 {
        self.score = self.score.saturating_add(u64::from(value));
        self.score
    }
}

/// Sole owner of the players taking part in the current game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player with a zero score at the provided position.
    pub fn create_player(
        &mut self,
        name: PlayerName,
        position: TileCoord,
    ) -> Result<&Player, GameError> {
        if self.players.iter().any(|player| player.name == name) {
            return Err(GameError::DuplicateName {
                name: name.to_string(),
            });
        }

        let index = self.players.len();
        self.players.push(Player {
            name,
            position,
            score: 0,
        });
        Ok(&self.players[index])
    }

    /// Looks up a player by name.
    pub fn get_by_name(&self, name: &str) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|player| player.name.as_str() == name)
            .ok_or_else(|| GameError::PlayerNotFound {
                name: name.to_owned(),
            })
    }

    pub(crate) fn get_by_name_mut(&mut self, name: &str) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|player| player.name.as_str() == name)
            .ok_or_else(|| GameError::PlayerNotFound {
                name: name.to_owned(),
            })
    }

    /// Removes every player.
    pub fn clear_all(&mut self) {
        self.players.clear();
    }

    /// Iterator over the players in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Reports whether no player is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use treasure_hunt_core::{GameError, PlayerName, TileCoord};

    use super::PlayerRegistry;

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value).expect("valid name")
    }

    #[test]
    fn create_player_starts_with_zero_score() {
        let mut registry = PlayerRegistry::new();
        let player = registry
            .create_player(name("1"), TileCoord::new(2, 3))
            .expect("fresh name");
        assert_eq!(player.score(), 0);
        assert_eq!(player.position(), TileCoord::new(2, 3));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = PlayerRegistry::new();
        let _ = registry
            .create_player(name("1"), TileCoord::new(0, 0))
            .expect("fresh name");
        assert_eq!(
            registry.create_player(name("1"), TileCoord::new(1, 1)),
            Err(GameError::DuplicateName {
                name: "1".to_owned()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_reports_missing_players() {
        let registry = PlayerRegistry::new();
        assert_eq!(
            registry.get_by_name("ghost"),
            Err(GameError::PlayerNotFound {
                name: "ghost".to_owned()
            })
        );
    }

    #[test]
    fn clear_all_empties_registry() {
        let mut registry = PlayerRegistry::new();
        let _ = registry
            .create_player(name("1"), TileCoord::new(0, 0))
            .expect("fresh name");
        let _ = registry
            .create_player(name("2"), TileCoord::new(0, 1))
            .expect("fresh name");
        registry.clear_all();
        assert!(registry.is_empty());
        assert!(registry.get_by_name("1").is_err());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = PlayerRegistry::new();
        let _ = registry
            .create_player(name("b"), TileCoord::new(0, 0))
            .expect("fresh name");
        let _ = registry
            .create_player(name("a"), TileCoord::new(0, 1))
            .expect("fresh name");
        let names: Vec<_> = registry.iter().map(|player| player.name().as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn award_accumulates_score() {
        let mut registry = PlayerRegistry::new();
        let _ = registry
            .create_player(name("1"), TileCoord::new(0, 0))
            .expect("fresh name");
        let player = registry.get_by_name_mut("1").expect("registered");
        assert_eq!(player.award(4), 4);
        assert_eq!(player.award(5), 9);
    }
}
