#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that lays out a fresh Treasure Hunt game.

use rand::Rng;
use treasure_hunt_core::{Command, Event, GameConfig, GameError};
use treasure_hunt_world::{self as world, query, World};

/// Builds new games from a [`GameConfig`].
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds a complete world for a new game.
    ///
    /// The board is built off to the side: on error nothing is returned and
    /// `out_events` is left untouched, so the caller's current world survives
    /// any failure. Treasure is scattered first, then each player lands on a
    /// tile free of both treasure and other players.
    pub fn start_new_game<R>(
        &self,
        config: &GameConfig,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<World, GameError>
    where
        R: Rng + ?Sized,
    {
        if let Err(error) = config.validate() {
            tracing::warn!(%error, "rejected game configuration");
            return Err(error);
        }

        let mut world = World::with_grid_size(config.grid_size)?;
        let mut events = Vec::new();
        let range = config.treasure_value_range;

        for _ in 0..config.treasure_count {
            let tile = query::grid(&world).random_free_tile(rng)?.coord();
            let value = rng.gen_range(range.min..=range.max);
            world::apply(&mut world, Command::PlaceTreasure { tile, value }, &mut events)?;
        }

        for player in &config.player_names {
            let tile = query::grid(&world).random_free_tile(rng)?.coord();
            world::apply(
                &mut world,
                Command::PlacePlayer {
                    player: player.clone(),
                    tile,
                },
                &mut events,
            )?;
        }

        tracing::info!(
            grid_size = config.grid_size,
            treasure_count = config.treasure_count,
            players = config.player_names.len(),
            "new game laid out"
        );
        out_events.append(&mut events);
        Ok(world)
    }
}
