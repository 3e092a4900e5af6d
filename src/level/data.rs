//! Parsed level grids.

use serde::{Deserialize, Serialize};

use crate::core::Position;

use super::error::{Layer, LevelError};

/// An empty cell in either layer.
pub const BLANK: char = ' ';

/// A level as two same-sized character grids.
///
/// The gameplay layer holds physical tiles, the rule layer holds words.
/// Both are `height` rows of `width` characters; [`BLANK`] means nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub gameplay: Vec<Vec<char>>,
    pub rules: Vec<Vec<char>>,
}

impl LevelData {
    /// A blank `width` × `height` level.
    #[must_use]
    pub fn blank(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            gameplay: vec![vec![BLANK; width]; height],
            rules: vec![vec![BLANK; width]; height],
        }
    }

    /// Build a level from row strings, padding or truncating each row to
    /// `width`. Missing rows are blank.
    #[must_use]
    pub fn from_rows(name: impl Into<String>, width: usize, height: usize, gameplay: &[&str], rules: &[&str]) -> Self {
        let layer = |rows: &[&str]| -> Vec<Vec<char>> {
            (0..height)
                .map(|y| normalize_row(rows.get(y).copied().unwrap_or(""), width))
                .collect()
        };
        Self {
            name: name.into(),
            width,
            height,
            gameplay: layer(gameplay),
            rules: layer(rules),
        }
    }

    /// Check that the grid is non-empty and both layers are rectangular.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::EmptyGrid {
                level: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }
        for (layer, grid) in [(Layer::Gameplay, &self.gameplay), (Layer::Rules, &self.rules)] {
            if grid.len() != self.height {
                return Err(LevelError::IncompleteLayer {
                    level: self.name.clone(),
                    layer,
                    expected: self.height,
                    found: grid.len(),
                });
            }
            if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != self.width) {
                return Err(LevelError::NonRectangular {
                    level: self.name.clone(),
                    layer,
                    row,
                    expected: self.width,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    /// Set a gameplay character. Out-of-range cells are ignored.
    pub fn set_gameplay(&mut self, x: usize, y: usize, c: char) {
        if let Some(cell) = self.gameplay.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = c;
        }
    }

    /// Set a rule character. Out-of-range cells are ignored.
    pub fn set_rule(&mut self, x: usize, y: usize, c: char) {
        if let Some(cell) = self.rules.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = c;
        }
    }

    /// Every cell in row-major order with its gameplay and rule characters.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char, char)> + '_ {
        self.gameplay
            .iter()
            .zip(&self.rules)
            .enumerate()
            .flat_map(|(y, (g_row, r_row))| {
                g_row
                    .iter()
                    .zip(r_row)
                    .enumerate()
                    .map(move |(x, (&g, &r))| (Position::new(x as i32, y as i32), g, r))
            })
    }

    /// Render the level back to its text block.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{} x {}\n", self.name, self.width, self.height);
        for row in self.gameplay.iter().chain(&self.rules) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

/// Truncate or right-pad a row to exactly `width` characters.
pub(crate) fn normalize_row(row: &str, width: usize) -> Vec<char> {
    let mut cells: Vec<char> = row.chars().take(width).collect();
    cells.resize(width, BLANK);
    cells
}
