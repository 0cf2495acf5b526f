use std::fmt::Write as _;

use treasure_hunt_core::{BoardSnapshot, TileSnapshot};

const TREASURE_GLYPH: &str = "$";
const EMPTY_GLYPH: &str = ".";

fn glyph(tile: &TileSnapshot) -> &str {
    match &tile.occupant {
        Some(name) => name.as_str(),
        None if tile.treasure_value > 0 => TREASURE_GLYPH,
        None => EMPTY_GLYPH,
    }
}

/// Renders the board as rows of glyphs followed by one score line per player.
///
/// Columns are padded to the widest glyph so multi-character names keep the
/// grid aligned.
pub(crate) fn render(snapshot: &BoardSnapshot) -> String {
    let width = snapshot
        .iter_tiles()
        .map(|tile| glyph(tile).chars().count())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for row in &snapshot.tiles {
        let cells: Vec<String> = row
            .iter()
            .map(|tile| format!("{:<width$}", glyph(tile)))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
    for player in &snapshot.players {
        let _ = writeln!(
            out,
            "{} at ({}, {}) score {}",
            player.name, player.row, player.col, player.score
        );
    }
    out
}
