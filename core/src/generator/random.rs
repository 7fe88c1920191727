use hashbrown::HashSet;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that keeps the start area free of mines, other than that the layout is purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
    placement: Placement,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    fn effective_start_tile(&self, difficulty: Difficulty) -> StartTile {
        use StartTile::*;

        let total_cells = difficulty.total_cells();
        let zone = SafeZone::new(self.start, difficulty.size());

        match self.start_tile {
            // `Difficulty` keeps at least one cell free, so the start cell always fits
            Random => Random,
            SimpleSafe => SimpleSafe,
            AlwaysZero if difficulty.mines() + zone.len() > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, difficulty: Difficulty) -> MineLayout {
        let size = difficulty.size();
        let (rows, columns) = size;
        let zone = SafeZone::new(self.start, size);
        let start_tile = self.effective_start_tile(difficulty);
        let excluded = |coords: Coord2| match start_tile {
            StartTile::Random => false,
            StartTile::SimpleSafe => coords == zone.center(),
            StartTile::AlwaysZero => zone.contains(coords),
        };

        let wanted = usize::from(difficulty.mines());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let chosen: Vec<CellIndex> = match self.placement {
            Placement::Shuffle => {
                let mut candidates: Vec<CellIndex> = (0..difficulty.total_cells())
                    .filter(|&index| !excluded(unpack(index, columns)))
                    .collect();
                let (picked, _) = candidates.partial_shuffle(&mut rng, wanted);
                picked.to_vec()
            }
            Placement::Rejection => {
                let mut picked = HashSet::with_capacity(wanted);
                while picked.len() < wanted {
                    let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
                    if !excluded(coords) {
                        picked.insert(pack(coords, columns));
                    }
                }
                picked.into_iter().collect()
            }
        };

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for index in chosen {
            mine_mask[unpack(index, columns).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != difficulty.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                difficulty.mines()
            );
        }
        log::debug!(
            "placed {} mines on {}x{} board, seed {}, start {:?}",
            layout.mine_count(),
            rows,
            columns,
            self.seed,
            self.start
        );
        layout
    }
}
