use serde::{Deserialize, Serialize};

/// What a cell holds once mines have been placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    AdjacentCount(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStatus {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// Canonical state of one board cell. `content` is `None` until mines are placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub content: Option<CellContent>,
    pub status: RevealStatus,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        matches!(self.status, RevealStatus::Hidden)
    }

    pub fn is_mine(self) -> bool {
        self.content.is_some_and(CellContent::is_mine)
    }

    /// What the view should draw for this cell.
    pub fn display(self) -> DisplayValue {
        match (self.status, self.content) {
            (RevealStatus::Hidden, _) => DisplayValue::Hidden,
            (RevealStatus::Flagged, _) => DisplayValue::Flagged,
            (RevealStatus::Revealed, Some(CellContent::Mine)) => DisplayValue::Mine,
            (RevealStatus::Revealed, Some(CellContent::AdjacentCount(count))) => {
                DisplayValue::Count(count)
            }
            // revealed cells always have content
            (RevealStatus::Revealed, None) => DisplayValue::Hidden,
        }
    }
}

/// Player-visible projection of a cell, as sent to the view layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    Hidden,
    Flagged,
    Count(u8),
    Mine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cell_never_leaks_content() {
        let cell = Cell {
            content: Some(CellContent::Mine),
            status: RevealStatus::Hidden,
        };
        assert_eq!(cell.display(), DisplayValue::Hidden);
    }

    #[test]
    fn only_mine_content_is_a_mine() {
        let mut cell = Cell::default();
        assert!(!cell.is_mine());

        cell.content = Some(CellContent::AdjacentCount(0));
        assert!(!cell.is_mine());

        cell.content = Some(CellContent::Mine);
        assert!(cell.is_mine());
    }

    #[test]
    fn revealed_count_is_displayed() {
        let cell = Cell {
            content: Some(CellContent::AdjacentCount(3)),
            status: RevealStatus::Revealed,
        };
        assert_eq!(cell.display(), DisplayValue::Count(3));
    }

    #[test]
    fn display_value_serializes_with_state_tag() {
        let json = serde_json::to_string(&DisplayValue::Count(2)).unwrap();
        assert_eq!(json, r#"{"state":"count","value":2}"#);

        let json = serde_json::to_string(&DisplayValue::Flagged).unwrap();
        assert_eq!(json, r#"{"state":"flagged"}"#);
    }
}
