//! Dense N×N tile storage.

use rand::Rng;
use treasure_hunt_core::{GameError, PlayerName, TileCoord, MAX_GRID_SIZE};

/// Single board cell holding treasure and, at most, one occupant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    coord: TileCoord,
    treasure: u32,
    occupant: Option<PlayerName>,
}

impl Tile {
    const fn empty(coord: TileCoord) -> Self {
        Self {
            coord,
            treasure: 0,
            occupant: None,
        }
    }

    /// Coordinate of the tile.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Treasure lying on the tile, zero when none.
    #[must_use]
    pub const fn treasure(&self) -> u32 {
        self.treasure
    }

    /// Name of the player standing on the tile.
    #[must_use]
    pub fn occupant(&self) -> Option<&PlayerName> {
        self.occupant.as_ref()
    }

    /// Reports whether the tile holds neither treasure nor a player.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.treasure == 0 && self.occupant.is_none()
    }

    pub(crate) fn set_treasure(&mut self, value: u32) {
        self.treasure = value;
    }

    pub(crate) fn take_treasure(&mut self) -> u32 {
        std::mem::take(&mut self.treasure)
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<PlayerName>) {
        self.occupant = occupant;
    }
}

/// Square board whose shape is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Board without any tiles, as held before the first game.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            size: 0,
            tiles: Vec::new(),
        }
    }

    /// Creates a board of `size`×`size` empty tiles.
    ///
    /// Sizes above [`MAX_GRID_SIZE`] are refused before anything is allocated.
    pub fn new(size: u32) -> Result<Self, GameError> {
        if size > MAX_GRID_SIZE {
            return Err(GameError::InvalidGridSize);
        }
        let tiles = (0..size)
            .flat_map(|row| (0..size).map(move |col| Tile::empty(TileCoord::new(row, col))))
            .collect();
        Ok(Self { size, tiles })
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Tile located at the provided coordinate.
    pub fn tile_at(&self, coord: TileCoord) -> Result<&Tile, GameError> {
        let index = self.index_of(coord)?;
        Ok(&self.tiles[index])
    }

    pub(crate) fn tile_at_mut(&mut self, coord: TileCoord) -> Result<&mut Tile, GameError> {
        let index = self.index_of(coord)?;
        Ok(&mut self.tiles[index])
    }

    pub(crate) fn tile_by_index_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    pub(crate) fn index_of(&self, coord: TileCoord) -> Result<usize, GameError> {
        let out_of_bounds = || GameError::OutOfBounds {
            tile: coord,
            grid_size: self.size,
        };
        if !coord.within(self.size) {
            return Err(out_of_bounds());
        }
        let row = usize::try_from(coord.row()).map_err(|_| out_of_bounds())?;
        let col = usize::try_from(coord.col()).map_err(|_| out_of_bounds())?;
        let width = usize::try_from(self.size).map_err(|_| out_of_bounds())?;
        Ok(row * width + col)
    }

    /// Picks a uniformly random tile holding neither treasure nor a player.
    ///
    /// Coordinates are resampled until a free tile turns up, so the expected
    /// number of draws grows as the board fills.
    pub fn random_free_tile<R>(&self, rng: &mut R) -> Result<&Tile, GameError>
    where
        R: Rng + ?Sized,
    {
        if self.free_tile_count() == 0 {
            return Err(GameError::NoFreeTileAvailable);
        }

        loop {
            let coord = TileCoord::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size));
            let tile = self.tile_at(coord)?;
            if tile.is_free() {
                return Ok(tile);
            }
        }
    }

    /// Iterator over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterator over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        let width = usize::try_from(self.size).unwrap_or(usize::MAX).max(1);
        self.tiles.chunks(width)
    }

    /// Number of tiles holding neither treasure nor a player.
    #[must_use]
    pub fn free_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_free()).count()
    }

    /// Number of tiles still holding treasure.
    #[must_use]
    pub fn treasure_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.treasure > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use treasure_hunt_core::{GameError, PlayerName, TileCoord, MAX_GRID_SIZE};

    use super::Grid;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4).expect("valid size");
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.iter().count(), 16);
        assert_eq!(grid.free_tile_count(), 16);
        assert_eq!(grid.treasure_tile_count(), 0);
        assert!(grid.iter().all(|tile| tile.occupant().is_none()));
    }

    #[test]
    fn tiles_are_row_major() {
        let grid = Grid::new(3).expect("valid size");
        let coords: Vec<_> = grid.iter().map(|tile| tile.coord()).collect();
        assert_eq!(coords[0], TileCoord::new(0, 0));
        assert_eq!(coords[1], TileCoord::new(0, 1));
        assert_eq!(coords[3], TileCoord::new(1, 0));
        assert_eq!(coords[8], TileCoord::new(2, 2));
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 3));
        assert_eq!(grid.rows().nth(1).map(|row| row[0].coord()), Some(TileCoord::new(1, 0)));
    }

    #[test]
    fn oversized_grid_is_refused_without_allocating() {
        assert_eq!(Grid::new(MAX_GRID_SIZE + 1), Err(GameError::InvalidGridSize));
        assert_eq!(Grid::new(u32::MAX), Err(GameError::InvalidGridSize));
        assert_eq!(Grid::empty(), Grid::new(0).expect("valid size"));
    }

    #[test]
    fn tile_at_rejects_out_of_bounds() {
        let grid = Grid::new(3).expect("valid size");
        assert!(grid.tile_at(TileCoord::new(2, 2)).is_ok());
        assert_eq!(
            grid.tile_at(TileCoord::new(3, 0)),
            Err(GameError::OutOfBounds {
                tile: TileCoord::new(3, 0),
                grid_size: 3
            })
        );
        assert!(grid.tile_at(TileCoord::new(0, 3)).is_err());
    }

    #[test]
    fn random_free_tile_skips_taken_tiles() {
        let mut grid = Grid::new(2).expect("valid size");
        grid.tile_at_mut(TileCoord::new(0, 0))
            .expect("in bounds")
            .set_treasure(5);
        grid.tile_at_mut(TileCoord::new(0, 1))
            .expect("in bounds")
            .set_occupant(Some(PlayerName::new("1").expect("valid")));
        grid.tile_at_mut(TileCoord::new(1, 1))
            .expect("in bounds")
            .set_treasure(2);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..32 {
            let tile = grid.random_free_tile(&mut rng).expect("one free tile");
            assert_eq!(tile.coord(), TileCoord::new(1, 0));
        }
    }

    #[test]
    fn random_free_tile_fails_on_saturated_grid() {
        let mut grid = Grid::new(1).expect("valid size");
        grid.tile_at_mut(TileCoord::new(0, 0))
            .expect("in bounds")
            .set_treasure(1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            grid.random_free_tile(&mut rng),
            Err(GameError::NoFreeTileAvailable)
        );
    }

    #[test]
    fn random_free_tile_fails_on_zero_sized_grid() {
        let grid = Grid::new(0).expect("valid size");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            grid.random_free_tile(&mut rng),
            Err(GameError::NoFreeTileAvailable)
        );
    }

    #[test]
    fn take_treasure_clears_value() {
        let mut grid = Grid::new(2).expect("valid size");
        let tile = grid.tile_at_mut(TileCoord::new(1, 1)).expect("in bounds");
        tile.set_treasure(8);
        assert_eq!(tile.take_treasure(), 8);
        assert_eq!(tile.take_treasure(), 0);
        assert!(tile.is_free());
    }
}
