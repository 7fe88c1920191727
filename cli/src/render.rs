use minefield_core::{DisplayValue, GameSession, Phase};

fn glyph(display: DisplayValue) -> char {
    match display {
        DisplayValue::Hidden => '#',
        DisplayValue::Flagged => 'F',
        DisplayValue::Mine => '*',
        DisplayValue::Count(0) => '.',
        DisplayValue::Count(count) => char::from(b'0' + count),
    }
}

fn status_line(session: &GameSession) -> &'static str {
    match session.phase() {
        Phase::NotStarted => "ready",
        Phase::InProgress => "playing",
        Phase::Won => "you won",
        Phase::Lost => "boom, you lost",
    }
}

/// Text projection of the board, one character per cell, with row and column labels.
pub(crate) fn render(session: &GameSession) -> String {
    let (rows, columns) = session.size();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..columns {
        out.push_str(&format!("{:>3}", col));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3}", row));
        for col in 0..columns {
            let display = session
                .cell_at((row, col))
                .map_or(DisplayValue::Hidden, |cell| cell.display());
            out.push_str(&format!("{:>3}", glyph(display)));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "mines left: {}  time: {}s  seed: {}  {}",
        session.remaining_mines(),
        session.elapsed_secs(),
        session.seed(),
        status_line(session)
    ));
    out
}
