use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, difficulty: Difficulty) -> MineLayout;
}

/// How much of the first revealed cell is protected from mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartTile {
    Random,
    SimpleSafe,
    /// The whole clipped 3x3 block around the start is mine-free.
    #[default]
    AlwaysZero,
}

/// Sampling strategy used to pick mine positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Partial Fisher-Yates over the candidate cells, bounded time.
    #[default]
    Shuffle,
    /// Draw random coordinates until enough distinct candidates were accepted.
    Rejection,
}
