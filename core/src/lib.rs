use core::ops::Index;
use ndarray::Array2;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use preset::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod preset;
mod types;

/// Final mine positions of a board. Built once, never mutated during play.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Mask dimensions must fit in `Coord`; callers build the mask from a
    /// `Coord2` size, so the casts in `size` and `total_cells` cannot truncate.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Difficulty matching this layout. Fails for layouts that leave no safe cell.
    pub fn difficulty(&self) -> Result<Difficulty> {
        let (rows, columns) = self.size();
        Difficulty::new(rows, columns, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.mine_mask.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Mine coordinates in row-major order.
    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn cell_content(&self, coords: Coord2) -> CellContent {
        if self[coords] {
            CellContent::Mine
        } else {
            CellContent::AdjacentCount(self.adjacent_mine_count(coords))
        }
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_board_keeps_its_size() {
        let layout = MineLayout::from_mine_coords((255, 255), &[(254, 254), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (255, 255));
        assert_eq!(layout.total_cells(), 255 * 255);
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.mine_positions().last(), Some((254, 254)));
        assert_eq!(layout.adjacent_mine_count((253, 253)), 1);
    }

    #[test]
    fn adjacent_counts_are_clipped_at_edges() {
        let layout = MineLayout::from_mine_coords((3, 4), &[(0, 0), (2, 3)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 3)), 0);
        assert_eq!(layout.cell_content((2, 3)), CellContent::Mine);
    }

    #[test]
    fn mine_positions_are_row_major() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(1, 0), (0, 2)]).unwrap();

        assert_eq!(layout.mine_positions().collect::<Vec<_>>(), vec![(0, 2), (1, 0)]);
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 4);
    }

    #[test]
    fn out_of_bounds_mine_is_rejected() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
