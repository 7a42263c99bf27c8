//! This module defines the `Tape`, the machine's working memory. The tape has a hard left
//! edge at position 0 and grows to the right on demand; every cell that was never written
//! holds the blank symbol.

use crate::types::{Symbol, TuringMachineError};
use std::fmt;
use std::str::FromStr;

/// A single tape, bounded on the left and unbounded on the right.
///
/// Only positions `[0, len)` are stored. Reads past the end yield blank without growing the
/// storage; writes past the end pad with blanks up to and including the written cell.
/// Storage never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
}

impl Tape {
    /// Creates an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tape from a literal such as `Baabca`.
    ///
    /// # Returns
    ///
    /// * `Ok(Tape)` holding one cell per character.
    /// * `Err(TuringMachineError::InvalidSymbol)` for the first character outside the alphabet.
    pub fn parse(literal: &str) -> Result<Self, TuringMachineError> {
        let cells = literal
            .chars()
            .map(Symbol::from_char)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { cells })
    }

    /// Returns the symbol at `position`, or blank if the cell was never written.
    pub fn get(&self, position: isize) -> Result<Symbol, TuringMachineError> {
        let index = Self::index(position)?;
        Ok(self.cells.get(index).copied().unwrap_or(Symbol::Blank))
    }

    /// Writes `symbol` at `position`, extending the tape with blanks if needed.
    ///
    /// A negative position leaves the tape untouched.
    pub fn set(&mut self, position: isize, symbol: Symbol) -> Result<(), TuringMachineError> {
        let index = Self::index(position)?;

        if index < self.cells.len() {
            self.cells[index] = symbol;
        } else {
            self.cells.resize(index, Symbol::Blank);
            self.cells.push(symbol);
        }

        Ok(())
    }

    /// Renders the stored cells as trace glyphs, blanks as spaces.
    pub fn render(&self) -> String {
        self.cells.iter().map(|symbol| symbol.glyph()).collect()
    }

    /// The number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.cells
    }

    fn index(position: isize) -> Result<usize, TuringMachineError> {
        usize::try_from(position).map_err(|_| TuringMachineError::OutOfBounds(position))
    }
}

impl From<Vec<Symbol>> for Tape {
    fn from(cells: Vec<Symbol>) -> Self {
        Self { cells }
    }
}

impl FromStr for Tape {
    type Err = TuringMachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats the tape as its literal, so that `tape.to_string().parse()` yields the same tape.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.cells {
            write!(f, "{}", symbol.literal())?;
        }
        Ok(())
    }
}
