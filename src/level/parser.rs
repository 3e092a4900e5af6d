//! Level text format.
//!
//! A level file is a sequence of blocks:
//!
//! ```text
//! Level 1        <- name
//! 5 x 3          <- width x height
//! hhhhh          <- `height` gameplay rows
//! hb fh
//! hhhhh
//!                <- `height` rule rows
//! BIY
//! FIX
//! ```
//!
//! Blank lines between blocks are skipped. Rows are truncated or padded
//! with spaces to the declared width, so a short or empty row is never an
//! error. Running out of rows is.

use super::data::{normalize_row, LevelData};
use super::error::{Layer, LevelError};

/// Parse every level in `text`.
///
/// ```
/// use rule_grid::level::parse_levels;
///
/// let levels = parse_levels("Tiny\n3 x 1\nb f\nBIY\n").unwrap();
/// assert_eq!(levels.len(), 1);
/// assert_eq!(levels[0].name, "Tiny");
/// assert_eq!(levels[0].gameplay[0], vec!['b', ' ', 'f']);
/// ```
pub fn parse_levels(text: &str) -> Result<Vec<LevelData>, LevelError> {
    let mut lines = text.lines();
    let mut levels = Vec::new();

    while let Some(line) = lines.next() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let dims = lines.next().ok_or_else(|| LevelError::MissingDimensions { level: name.to_string() })?;
        let (width, height) = parse_dimensions(dims).ok_or_else(|| LevelError::InvalidDimensions {
            level: name.to_string(),
            line: dims.to_string(),
        })?;

        let gameplay = read_layer(&mut lines, name, Layer::Gameplay, width, height)?;
        let rules = read_layer(&mut lines, name, Layer::Rules, width, height)?;

        let level = LevelData {
            name: name.to_string(),
            width,
            height,
            gameplay,
            rules,
        };
        level.validate()?;
        tracing::debug!(level = %level.name, width, height, "parsed level");
        levels.push(level);
    }

    Ok(levels)
}

/// Parse a `W x H` line.
fn parse_dimensions(line: &str) -> Option<(usize, usize)> {
    let (w, h) = line.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn read_layer<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    level: &str,
    layer: Layer,
    width: usize,
    height: usize,
) -> Result<Vec<Vec<char>>, LevelError> {
    let mut rows = Vec::with_capacity(height);
    for found in 0..height {
        let line = lines.next().ok_or_else(|| LevelError::IncompleteLayer {
            level: level.to_string(),
            layer,
            expected: height,
            found,
        })?;
        rows.push(normalize_row(line, width));
    }
    Ok(rows)
}
