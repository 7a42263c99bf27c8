//! This module defines the core data structures shared by the interpreter: the alphabet,
//! the control states, head directions, transition rules, programs, halting conditions,
//! and the error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Rule;

/// The maximum number of loop iterations a single execution may perform.
pub const MAX_ITERATIONS: usize = 100;
/// The maximum allowed size for a program source in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB

/// A tape symbol.
///
/// The alphabet is closed. Each symbol has a literal character used in tape literals and
/// program files (`B`, upper-case, is the blank) and a glyph used in traces (the blank
/// prints as a space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "X")]
    X,
    #[serde(rename = "Y")]
    Y,
    #[serde(rename = "Z")]
    Z,
    /// The distinguished blank symbol held by every unwritten cell.
    #[serde(rename = "B")]
    Blank,
}

impl Symbol {
    /// Maps a literal character to its symbol.
    pub fn from_char(c: char) -> Result<Self, TuringMachineError> {
        match c {
            'a' => Ok(Symbol::A),
            'b' => Ok(Symbol::B),
            'c' => Ok(Symbol::C),
            'X' => Ok(Symbol::X),
            'Y' => Ok(Symbol::Y),
            'Z' => Ok(Symbol::Z),
            'B' => Ok(Symbol::Blank),
            _ => Err(TuringMachineError::InvalidSymbol(c)),
        }
    }

    /// The character that denotes this symbol in tape literals and program files.
    pub fn literal(self) -> char {
        match self {
            Symbol::A => 'a',
            Symbol::B => 'b',
            Symbol::C => 'c',
            Symbol::X => 'X',
            Symbol::Y => 'Y',
            Symbol::Z => 'Z',
            Symbol::Blank => 'B',
        }
    }

    /// The character printed for this symbol in a trace.
    pub fn glyph(self) -> char {
        match self {
            Symbol::Blank => ' ',
            other => other.literal(),
        }
    }

    pub fn is_blank(self) -> bool {
        self == Symbol::Blank
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal())
    }
}

/// A control state of the machine. `Q0` is the start state of every execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    #[serde(rename = "q0")]
    Q0,
    #[serde(rename = "q1")]
    Q1,
    #[serde(rename = "q2")]
    Q2,
    #[serde(rename = "q3")]
    Q3,
    #[serde(rename = "q4")]
    Q4,
    #[serde(rename = "q5")]
    Q5,
    #[serde(rename = "q6")]
    Q6,
    #[serde(rename = "q7")]
    Q7,
    #[serde(rename = "q8")]
    Q8,
    #[serde(rename = "q9")]
    Q9,
}

impl State {
    pub const ALL: [State; 10] = [
        State::Q0,
        State::Q1,
        State::Q2,
        State::Q3,
        State::Q4,
        State::Q5,
        State::Q6,
        State::Q7,
        State::Q8,
        State::Q9,
    ];

    /// The numeric index of the state, `n` in `qn`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.index())
    }
}

impl FromStr for State {
    type Err = TuringMachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('q')
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
            .and_then(|index| State::ALL.get(index).copied())
            .ok_or_else(|| TuringMachineError::InvalidState(s.to_string()))
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Keep the head in the same position.
    Stay,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The head displacement of this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Direction::Left),
            'S' => Some(Direction::Stay),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The left-hand side of a rule: the state the machine is in and the symbol under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub state: State,
    pub read: Symbol,
}

/// The right-hand side of a rule: the next state, the symbol written over the current cell,
/// and the head displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub state: State,
    pub write: Symbol,
    pub direction: Direction,
}

/// A single transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub input: Input,
    pub output: Output,
}

impl Transition {
    /// Builds the rule `(from, read) -> (to, write, direction)`.
    pub fn new(from: State, read: Symbol, to: State, write: Symbol, direction: Direction) -> Self {
        Self {
            input: Input { state: from, read },
            output: Output {
                state: to,
                write,
                direction,
            },
        }
    }
}

/// A named transition table together with the tape it starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The name of the program.
    pub name: String,
    /// The initial tape as a literal, e.g. `Baabca`.
    #[serde(default)]
    pub tape: String,
    /// The ordered transition table. The first matching rule wins.
    pub transitions: Vec<Transition>,
}

impl Program {
    /// Builds the initial tape from the program's tape literal.
    pub fn initial_tape(&self) -> Result<crate::tape::Tape, TuringMachineError> {
        self.tape.parse()
    }
}

/// Represents the outcome of a single fetch-decide-apply cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A transition was applied and the machine can keep going.
    Continue,
    /// The machine stopped.
    Halt(Halt),
}

/// The condition an execution ended with.
///
/// All three are expected outcomes reported to the caller, never panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// No rule matches the current state and the symbol under the head.
    ExhaustedTransitions { state: State, symbol: Symbol },
    /// The iteration cap was reached.
    ExhaustedIterations(usize),
    /// The head addressed a position left of the tape.
    OutOfBounds(isize),
}

impl Halt {
    /// Converts a tape addressing error into the halt it causes.
    ///
    /// Returns `None` for errors that cannot end a run.
    pub fn from_error(error: &TuringMachineError) -> Option<Self> {
        match error {
            TuringMachineError::OutOfBounds(position) => Some(Halt::OutOfBounds(*position)),
            _ => None,
        }
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::ExhaustedTransitions { .. } => write!(f, "No transitions possible."),
            Halt::ExhaustedIterations(limit) => write!(f, "Iteration limit of {} reached.", limit),
            Halt::OutOfBounds(_) => write!(f, "Execution fell off the tape."),
        }
    }
}

/// Represents various errors that can occur while building tapes and loading programs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A tape position left of cell 0 was read or written.
    #[error("Tape position {0} is out of bounds")]
    OutOfBounds(isize),
    /// A literal character does not belong to the alphabet.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(char),
    /// A state label is not one of `q0`..`q9`.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Indicates an error during the parsing of a program definition.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a structurally invalid program definition.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading program files.
    #[error("File error: {0}")]
    FileError(String),
}
