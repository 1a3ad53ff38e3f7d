// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # ASCII Map Loading
//!
//! Decodes the textual map format into a validated [`GridModel`].
//!
//! ## Format
//!
//! One character per cell, one line per row, all rows the same width:
//!
//! | Symbol      | Meaning                                          |
//! |-------------|--------------------------------------------------|
//! | `.`         | open terrain                                     |
//! | `~`         | water                                            |
//! | `H`         | agent origin (open terrain)                      |
//! | `C`         | reward cell (open terrain)                       |
//! | `W`         | pre-placed wall, returned as part of the parse   |
//! | `0`-`9`     | teleport channels 0 through 9                    |
//! | `a`-`z`     | teleport channels 10 through 35                  |
//!
//! Pre-placed walls are not baked into the model. They come back as a
//! [`Placement`] so callers can re-score an existing answer against the
//! same grid the optimizer sees. Blank lines around the map are ignored.

use crate::grid::{ConfigError, GridBuilder, GridModel, Terrain};
use crate::index::ChannelIndex;
use crate::solution::Placement;

/// A decoded map: the validated grid plus any pre-placed walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMap {
    /// The validated grid model.
    pub grid: GridModel,
    /// Walls already present in the map text (`W` cells).
    pub walls: Placement,
}

/// Errors raised while decoding a map text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapParseError {
    /// The text contains no map rows.
    EmptyMap,
    /// A row has a different width than the first row.
    RaggedRow {
        /// Zero-based row number of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character that is not part of the map alphabet.
    UnknownSymbol {
        /// Zero-based row of the symbol.
        row: usize,
        /// Zero-based column of the symbol.
        col: usize,
        /// The offending character.
        symbol: char,
    },
    /// The decoded grid failed model validation.
    Config(ConfigError),
}

impl std::fmt::Display for MapParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapParseError::EmptyMap => write!(f, "map text contains no rows"),
            MapParseError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has width {} but the first row has width {}",
                row, found, expected
            ),
            MapParseError::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown map symbol '{}' at ({}, {})", symbol, row, col)
            }
            MapParseError::Config(error) => write!(f, "invalid map: {}", error),
        }
    }
}

impl std::error::Error for MapParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapParseError::Config(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigError> for MapParseError {
    fn from(error: ConfigError) -> Self {
        MapParseError::Config(error)
    }
}

/// Decodes a map text into a validated grid with the given wall budget.
///
/// # Errors
///
/// Returns a [`MapParseError`] if the text is empty, ragged, contains an
/// unknown symbol, or decodes into an invalid instance (e.g., no origin).
///
/// # Examples
///
/// ```rust
/// use corral_model::loading::parse_map;
///
/// let map = "....\n.H.C\n....\n";
/// let parsed = parse_map(map, 4).unwrap();
/// assert_eq!(parsed.grid.rows(), 3);
/// assert_eq!(parsed.grid.cols(), 4);
/// assert!(parsed.walls.is_empty());
/// ```
pub fn parse_map(text: &str, budget: i64) -> Result<ParsedMap, MapParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let rows = lines.len();
    if rows == 0 {
        return Err(MapParseError::EmptyMap);
    }
    let cols = lines[0].chars().count();
    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(MapParseError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }
    }
    if cols == 0 {
        return Err(MapParseError::EmptyMap);
    }

    let mut builder = GridBuilder::new(rows, cols);
    builder.set_budget(budget);
    let mut walls = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        for (col, symbol) in line.chars().enumerate() {
            let cell = builder.cell_at(row, col);
            match symbol {
                '.' => {}
                '~' => {
                    builder.set_terrain(cell, Terrain::Water);
                }
                'H' => {
                    builder.set_origin(cell);
                }
                'C' => {
                    builder.set_reward(cell, true);
                }
                'W' => {
                    walls.push(cell);
                }
                '0'..='9' => {
                    builder.set_channel(cell, ChannelIndex::new(symbol as usize - '0' as usize));
                }
                'a'..='z' => {
                    builder.set_channel(
                        cell,
                        ChannelIndex::new(10 + symbol as usize - 'a' as usize),
                    );
                }
                _ => {
                    return Err(MapParseError::UnknownSymbol { row, col, symbol });
                }
            }
        }
    }

    Ok(ParsedMap {
        grid: builder.build()?,
        walls: Placement::new(walls),
    })
}
