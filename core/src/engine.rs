use ndarray::Array2;
use rand::Rng;
use serde::Serialize;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// The game has ended and no moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Flagging before the first reveal starts the clock.
    pub flag_starts_clock: bool,
    pub placement: Placement,
    pub start_tile: StartTile,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            flag_starts_clock: true,
            placement: Placement::default(),
            start_tile: StartTile::default(),
        }
    }
}

/// A cell whose displayed value changed during one operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellUpdate {
    pub row: Coord,
    pub col: Coord,
    pub display: DisplayValue,
}

impl CellUpdate {
    fn new((row, col): Coord2, display: DisplayValue) -> Self {
        Self { row, col, display }
    }
}

/// Delta produced by [`GameSession::reveal_cell`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevealResult {
    pub changed_cells: Vec<CellUpdate>,
    pub phase: Phase,
    pub is_mine: bool,
}

impl RevealResult {
    pub fn has_update(&self) -> bool {
        !self.changed_cells.is_empty()
    }
}

/// Outcome of [`GameSession::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlagResult {
    Changed {
        row: Coord,
        col: Coord,
        is_flagged: bool,
        remaining_mines: CellCount,
    },
    Rejected,
}

impl FlagResult {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Fresh seed from the thread-local generator.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

/// One game from the first click to win or loss.
///
/// Mines are placed lazily on the first reveal so that the clicked cell and its
/// neighbours are always safe.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    difficulty: Difficulty,
    options: EngineOptions,
    seed: u64,
    layout: Option<MineLayout>,
    board: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase,
    clock_running: bool,
    elapsed_secs: u32,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, random_seed())
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_options(difficulty, seed, EngineOptions::default())
    }

    pub fn with_options(difficulty: Difficulty, seed: u64, options: EngineOptions) -> Self {
        log::debug!("new game: {}, seed {}", difficulty, seed);
        Self {
            difficulty,
            options,
            seed,
            layout: None,
            board: Array2::default(difficulty.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            phase: Phase::default(),
            clock_running: false,
            elapsed_secs: 0,
            triggered_mine: None,
        }
    }

    /// Starts a session on a fixed board. The first reveal is not protected.
    pub fn from_layout(layout: MineLayout, options: EngineOptions) -> Result<Self> {
        let difficulty = layout.difficulty()?;
        let mut session = Self::with_options(difficulty, 0, options);
        session.apply_layout(layout);
        Ok(session)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet.
    pub fn remaining_mines(&self) -> CellCount {
        self.difficulty.mines() - self.flagged_count
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.difficulty.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// Mine coordinates in row-major order, empty until mines are placed.
    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.layout
            .as_ref()
            .map(|layout| layout.mine_positions().collect())
            .unwrap_or_default()
    }

    pub fn layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }

    /// Advances the clock by one second while the game is running.
    pub fn tick(&mut self) -> u32 {
        if self.clock_running && !self.phase.is_finished() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.elapsed_secs
    }

    pub fn reveal_cell(&mut self, row: Coord, col: Coord) -> Result<RevealResult> {
        let coords = self.difficulty.validate_coords((row, col))?;

        if self.phase.is_finished() {
            log::debug!("Ignoring reveal on finished game at {:?}", coords);
            return Ok(self.unchanged());
        }
        if !self.board[coords.to_nd_index()].is_hidden() {
            log::debug!("Ignoring reveal on non-hidden cell {:?}", coords);
            return Ok(self.unchanged());
        }

        if self.layout.is_none() {
            let layout = RandomMinefieldGenerator::new(self.seed, coords, self.options.start_tile)
                .with_placement(self.options.placement)
                .generate(self.difficulty);
            self.apply_layout(layout);
        }
        self.mark_started();

        if self.board[coords.to_nd_index()].is_mine() {
            return Ok(self.explode(coords));
        }

        let mut changed_cells = self.cascade(coords);
        if self.revealed_count == self.difficulty.safe_cells() {
            self.finish_won(&mut changed_cells);
        }

        Ok(RevealResult {
            changed_cells,
            phase: self.phase,
            is_mine: false,
        })
    }

    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<FlagResult> {
        let coords = self.difficulty.validate_coords((row, col))?;

        if self.phase.is_finished() {
            log::debug!("Ignoring flag on finished game at {:?}", coords);
            return Ok(FlagResult::Rejected);
        }

        let status = self.board[coords.to_nd_index()].status;
        if status == RevealStatus::Revealed {
            log::debug!("Ignoring flag on revealed cell {:?}", coords);
            return Ok(FlagResult::Rejected);
        }

        if self.options.flag_starts_clock {
            self.mark_started();
        }

        let is_flagged = match status {
            RevealStatus::Flagged => {
                self.flagged_count -= 1;
                false
            }
            _ if self.flagged_count >= self.difficulty.mines() => {
                log::debug!("Flag budget exhausted, rejecting flag at {:?}", coords);
                return Ok(FlagResult::Rejected);
            }
            _ => {
                self.flagged_count += 1;
                true
            }
        };
        self.board[coords.to_nd_index()].status = if is_flagged {
            RevealStatus::Flagged
        } else {
            RevealStatus::Hidden
        };
        log::debug!("Cell {:?} flagged: {}", coords, is_flagged);

        Ok(FlagResult::Changed {
            row,
            col,
            is_flagged,
            remaining_mines: self.remaining_mines(),
        })
    }

    fn unchanged(&self) -> RevealResult {
        RevealResult {
            changed_cells: Vec::new(),
            phase: self.phase,
            is_mine: false,
        }
    }

    fn apply_layout(&mut self, layout: MineLayout) {
        for ((row, col), cell) in self.board.indexed_iter_mut() {
            cell.content = Some(layout.cell_content((row as Coord, col as Coord)));
        }
        self.layout = Some(layout);
    }

    /// Iterative flood fill, every cell flips from hidden to revealed at most once.
    fn cascade(&mut self, start: Coord2) -> Vec<CellUpdate> {
        let mut changed_cells = Vec::new();
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.board[coords.to_nd_index()];
            // skip flagged or already opened cells
            if !cell.is_hidden() {
                continue;
            }

            cell.status = RevealStatus::Revealed;
            let revealed = *cell;
            self.revealed_count += 1;
            changed_cells.push(CellUpdate::new(coords, revealed.display()));
            log::trace!("Revealed {:?} as {:?}", coords, revealed.content);

            if revealed.content == Some(CellContent::AdjacentCount(0)) {
                let board = &self.board;
                to_visit.extend(
                    board
                        .iter_neighbors(coords)
                        .filter(|&pos| board[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        log::debug!(
            "Reveal at {:?} opened {} cells, {}/{} safe cells open",
            start,
            changed_cells.len(),
            self.revealed_count,
            self.difficulty.safe_cells()
        );
        changed_cells
    }

    fn explode(&mut self, coords: Coord2) -> RevealResult {
        log::debug!("Hit mine at {:?}, game lost", coords);
        self.triggered_mine = Some(coords);
        self.end_game(Phase::Lost);

        // flagged mines stay flagged, the delta still lists them
        let mut changed_cells = Vec::new();
        for pos in self.mine_positions() {
            let cell = &mut self.board[pos.to_nd_index()];
            if cell.is_hidden() {
                cell.status = RevealStatus::Revealed;
            }
            changed_cells.push(CellUpdate::new(pos, DisplayValue::Mine));
        }

        RevealResult {
            changed_cells,
            phase: self.phase,
            is_mine: true,
        }
    }

    fn finish_won(&mut self, changed_cells: &mut Vec<CellUpdate>) {
        self.end_game(Phase::Won);

        for pos in self.mine_positions() {
            let cell = &mut self.board[pos.to_nd_index()];
            if cell.is_hidden() {
                cell.status = RevealStatus::Flagged;
                self.flagged_count += 1;
                changed_cells.push(CellUpdate::new(pos, DisplayValue::Flagged));
            }
        }
    }

    fn mark_started(&mut self) {
        if self.phase.is_initial() {
            log::debug!("game started");
            self.phase = Phase::InProgress;
            self.clock_running = true;
        }
    }

    fn end_game(&mut self, phase: Phase) {
        log::debug!("game ended: {:?} after {}s", phase, self.elapsed_secs);
        self.phase = phase;
        self.clock_running = false;
    }
}
