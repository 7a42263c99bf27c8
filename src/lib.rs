//! This crate provides a deterministic single-tape Turing machine interpreter.
//! It includes the tape and machine models, execution traces, a parser and loader for
//! transition-table programs, and a collection of built-in programs.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the engine and its execution types from the machine module.
pub use machine::{Execution, StepMode, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `ProgramManager` and `PROGRAMS` from the programs module.
pub use programs::{ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the trace frame and sinks from the trace module.
pub use trace::{Frame, JsonLinesSink, Recorder, TextSink, TraceSink};
/// Re-exports the alphabet, states, rules, and outcomes from the types module.
pub use types::{
    Direction, Halt, Input, Output, Program, State, Step, Symbol, Transition, TuringMachineError,
    MAX_ITERATIONS, MAX_PROGRAM_SIZE,
};
