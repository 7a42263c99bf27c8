//! This module defines the `TuringMachine` struct, the execution engine. It owns an immutable
//! transition table and the run state (current state and head position), and drives the
//! fetch-decide-apply loop against a `Tape`.

use crate::tape::Tape;
use crate::trace::{Frame, TraceSink};
use crate::types::{
    Halt, Output, Program, State, Step, Symbol, Transition, TuringMachineError, MAX_ITERATIONS,
};

/// How the machine advances between iterations.
pub enum StepMode<'a> {
    /// Run to a halt without pausing.
    Continuous,
    /// Invoke the callback after each frame is emitted and before the cycle runs. The callback
    /// may block, e.g. waiting for an operator to press enter.
    Manual(&'a mut dyn FnMut(&Frame)),
}

impl Default for StepMode<'_> {
    fn default() -> Self {
        StepMode::Continuous
    }
}

/// The result of a complete execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Why the run ended.
    pub halt: Halt,
    /// The number of transitions applied.
    pub steps: usize,
    /// The state the machine ended in.
    pub state: State,
    /// The final head position.
    pub head: isize,
    /// The tape as the run left it.
    pub tape: Tape,
}

/// A deterministic single-tape Turing machine.
///
/// The transition table is fixed at construction. Every execution starts from `q0` with the
/// head on cell 0, so runs with the same table and tape are reproducible.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    transitions: Vec<Transition>,
    state: State,
    head: isize,
    max_iterations: usize,
}

impl TuringMachine {
    /// The state every execution starts in.
    pub const INITIAL_STATE: State = State::Q0;

    /// Creates a machine for the given ordered transition table.
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self {
            transitions,
            state: Self::INITIAL_STATE,
            head: 0,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Creates a machine running the transition table of `program`.
    pub fn from_program(program: &Program) -> Self {
        Self::new(program.transitions.clone())
    }

    /// Replaces the iteration cap (`MAX_ITERATIONS` by default).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Runs the machine on `tape` until it halts.
    ///
    /// Each iteration emits a frame to `sink`, pauses if `mode` is manual, then performs one
    /// cycle. The halt is reported to `sink` and returned with the final tape.
    pub fn execute<S>(&mut self, mut tape: Tape, sink: &mut S, mut mode: StepMode<'_>) -> Execution
    where
        S: TraceSink + ?Sized,
    {
        self.reset();

        let mut steps = 0;
        let mut outcome = None;

        for _ in 0..self.max_iterations {
            let frame = self.frame(&tape);
            sink.frame(&frame);
            if let StepMode::Manual(pause) = &mut mode {
                pause(&frame);
            }

            match self.step(&mut tape) {
                Step::Continue => steps += 1,
                Step::Halt(halt) => {
                    outcome = Some(halt);
                    break;
                }
            }
        }

        let halt = outcome.unwrap_or(Halt::ExhaustedIterations(self.max_iterations));
        log::info!(
            "Machine halted after {} steps in state {} at position {}: {:?}",
            steps,
            self.state,
            self.head,
            halt
        );
        sink.halt(&halt);

        Execution {
            halt,
            steps,
            state: self.state,
            head: self.head,
            tape,
        }
    }

    /// Runs the machine on `tape` without a trace.
    pub fn run(&mut self, tape: Tape) -> Execution {
        self.execute(tape, &mut (), StepMode::Continuous)
    }

    /// Performs a single fetch-decide-apply cycle.
    ///
    /// The write, state change, and head move are applied together or not at all.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(Halt::OutOfBounds)` if the head is left of the tape.
    /// * `Step::Halt(Halt::ExhaustedTransitions)` if no rule matches.
    pub fn step(&mut self, tape: &mut Tape) -> Step {
        let symbol = match tape.get(self.head) {
            Ok(symbol) => symbol,
            Err(e) => return Step::Halt(Self::out_of_bounds(e, self.head)),
        };

        let output = match self.lookup(self.state, symbol) {
            Some(output) => *output,
            None => {
                return Step::Halt(Halt::ExhaustedTransitions {
                    state: self.state,
                    symbol,
                })
            }
        };

        if let Err(e) = tape.set(self.head, output.write) {
            return Step::Halt(Self::out_of_bounds(e, self.head));
        }

        log::debug!(
            "({}, {}) -> ({}, {}, {:?}) at position {}",
            self.state,
            symbol,
            output.state,
            output.write,
            output.direction,
            self.head
        );

        self.state = output.state;
        self.head += output.direction.offset();

        Step::Continue
    }

    /// Finds the output of the first rule matching `(state, symbol)`.
    pub fn lookup(&self, state: State, symbol: Symbol) -> Option<&Output> {
        self.transitions
            .iter()
            .find(|t| t.input.state == state && t.input.read == symbol)
            .map(|t| &t.output)
    }

    /// Resets the run state to `q0` with the head on cell 0.
    pub fn reset(&mut self) {
        self.state = Self::INITIAL_STATE;
        self.head = 0;
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the current head position.
    pub fn head(&self) -> isize {
        self.head
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn frame(&self, tape: &Tape) -> Frame {
        Frame {
            tape: tape.render(),
            head: self.head,
            state: self.state,
        }
    }

    fn out_of_bounds(error: TuringMachineError, head: isize) -> Halt {
        Halt::from_error(&error).unwrap_or(Halt::OutOfBounds(head))
    }
}
