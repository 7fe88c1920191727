use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Packed `row * columns + col` key for set and map membership.
pub type CellIndex = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn pack(coords: Coord2, columns: Coord) -> CellIndex {
    coords.0 as CellIndex * columns as CellIndex + coords.1 as CellIndex
}

pub const fn unpack(index: CellIndex, columns: Coord) -> Coord2 {
    let columns = columns as CellIndex;
    ((index / columns) as Coord, (index % columns) as Coord)
}

pub(crate) trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, columns) = self.dim();
        // board dimensions are built from `Coord` values so they always fit
        NeighborIter::new(index, (rows as Coord, columns as Coord))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= columns {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds cells at Chebyshev distance one, clipped at the board edges.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// The 3x3 block centred on the first revealed cell, clipped to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SafeZone {
    center: Coord2,
    bounds: Coord2,
}

impl SafeZone {
    pub const fn new(center: Coord2, bounds: Coord2) -> Self {
        Self { center, bounds }
    }

    pub const fn center(&self) -> Coord2 {
        self.center
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.bounds.0
            && coords.1 < self.bounds.1
            && self.center.0.abs_diff(coords.0) <= 1
            && self.center.1.abs_diff(coords.1) <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + use<> {
        core::iter::once(self.center).chain(NeighborIter::new(self.center, self.bounds))
    }

    pub fn len(&self) -> CellCount {
        // the centre is always in bounds
        1 + NeighborIter::new(self.center, self.bounds).count() as CellCount
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
