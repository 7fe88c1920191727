use anyhow::{Context, bail};
use minefield_core::{Coord, PresetName};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    Tick,
    NewGame(Option<PresetName>),
    Help,
    Quit,
}

fn coords<'a>(mut parts: impl Iterator<Item = &'a str>) -> anyhow::Result<(Coord, Coord)> {
    let row = parts.next().context("missing row")?;
    let col = parts.next().context("missing column")?;
    if parts.next().is_some() {
        bail!("too many arguments");
    }
    let row = row.parse().with_context(|| format!("invalid row `{row}`"))?;
    let col = col.parse().with_context(|| format!("invalid column `{col}`"))?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };

        Ok(match verb {
            "r" | "reveal" => {
                let (row, col) = coords(parts)?;
                Self::Reveal(row, col)
            }
            "f" | "flag" => {
                let (row, col) = coords(parts)?;
                Self::Flag(row, col)
            }
            "t" | "tick" => Self::Tick,
            "n" | "new" => Self::NewGame(parts.next().map(str::parse).transpose()?),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command `{other}`"),
        })
    }
}

pub(crate) const HELP: &str = "\
commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  t           advance the clock by one second
  n [PRESET]  new game (easy, medium, hard)
  q           quit";
