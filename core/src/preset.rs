use core::fmt;
use core::str::FromStr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDifficulty")]
pub struct Difficulty {
    rows: Coord,
    columns: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawDifficulty {
    rows: Coord,
    columns: Coord,
    mines: CellCount,
}

impl TryFrom<RawDifficulty> for Difficulty {
    type Error = GameError;

    fn try_from(raw: RawDifficulty) -> Result<Self> {
        Self::new(raw.rows, raw.columns, raw.mines)
    }
}

impl Difficulty {
    pub(crate) const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 || mines == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= mult(rows, columns) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, columns, mines))
    }

    pub const fn easy() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn medium() -> Self {
        Self::new_unchecked(11, 11, 22)
    }

    pub const fn hard() -> Self {
        Self::new_unchecked(11, 13, 32)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.rows && coords.1 < self.columns {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.rows, self.columns, self.mines)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl PresetName {
    pub const ALL: [PresetName; 3] = [PresetName::Easy, PresetName::Medium, PresetName::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(GameError::Config(format!("unknown preset `{other}`"))),
        }
    }
}

/// The three named difficulties. Any preset missing from a config file keeps its default.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Presets {
    pub easy: Difficulty,
    pub medium: Difficulty,
    pub hard: Difficulty,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            easy: Difficulty::easy(),
            medium: Difficulty::medium(),
            hard: Difficulty::hard(),
        }
    }
}

impl Presets {
    pub fn get(&self, name: PresetName) -> Difficulty {
        match name {
            PresetName::Easy => self.easy,
            PresetName::Medium => self.medium,
            PresetName::Hard => self.hard,
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| GameError::Config(err.message().to_owned()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| GameError::Config(format!("{}: {err}", path.display())))?;
        let presets = Self::from_toml_str(&source)?;
        log::debug!("loaded presets from {}: {:?}", path.display(), presets);
        Ok(presets)
    }
}
