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

//! # Corral Model
//!
//! The immutable problem description for the grid enclosure solver: a
//! rectangular grid of cells with terrain, reward cells, teleport channels,
//! an agent origin, and a wall budget.
//!
//! ## Design
//!
//! The model follows a strict two-phase lifecycle:
//!
//! 1. [`GridBuilder`](grid::GridBuilder) accumulates cell attributes and
//!    validates the instance on `build` (fail-fast, every violation is a
//!    [`ConfigError`](grid::ConfigError)).
//! 2. [`GridModel`](grid::GridModel) is the frozen, validated instance that
//!    all engines read from. It never changes after construction, so solver
//!    threads can share it freely behind a plain `&`.
//!
//! Cell data is stored in Structure-of-Arrays layout indexed by row-major
//! [`CellIndex`](index::CellIndex).
//!
//! ## Modules
//!
//! - `index`: Typed indices for cells and teleport channels.
//! - `grid`: `GridModel`, `GridBuilder`, and `ConfigError`.
//! - `rules`: Configurable reward weighting ([`ScoreRules`](rules::ScoreRules)).
//! - `loading`: ASCII map decoding.
//! - `solution`: Wall placements, scored solutions, and board rendering.

pub mod grid;
pub mod index;
pub mod loading;
pub mod rules;
pub mod solution;

pub use grid::{ConfigError, GridBuilder, GridModel, Terrain};
pub use index::{CellIndex, ChannelIndex};
pub use loading::{parse_map, MapParseError, ParsedMap};
pub use rules::ScoreRules;
pub use solution::{Placement, Solution};
