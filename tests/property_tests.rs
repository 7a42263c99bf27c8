//! Property-based tests for the tape and the engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use tapeworm::{
    Direction, Halt, Recorder, State, StepMode, Symbol, Tape, Transition, TuringMachine,
    TuringMachineError,
};

prop_compose! {
    fn arbitrary_symbol()(variant in 0..7u8) -> Symbol {
        match variant {
            0 => Symbol::A,
            1 => Symbol::B,
            2 => Symbol::C,
            3 => Symbol::X,
            4 => Symbol::Y,
            5 => Symbol::Z,
            _ => Symbol::Blank,
        }
    }
}

prop_compose! {
    fn arbitrary_tape()(cells in prop::collection::vec(arbitrary_symbol(), 0..32)) -> Tape {
        Tape::from(cells)
    }
}

prop_compose! {
    fn arbitrary_transition()(
        from in 0..4usize,
        read in arbitrary_symbol(),
        to in 0..4usize,
        write in arbitrary_symbol(),
        direction in 0..3u8,
    ) -> Transition {
        let direction = match direction {
            0 => Direction::Left,
            1 => Direction::Stay,
            _ => Direction::Right,
        };
        Transition::new(State::ALL[from], read, State::ALL[to], write, direction)
    }
}

proptest! {
    #[test]
    fn unwritten_cells_read_blank(tape in arbitrary_tape(), offset in 0..64isize) {
        let position = tape.len() as isize + offset;
        prop_assert_eq!(tape.get(position), Ok(Symbol::Blank));
    }

    #[test]
    fn write_then_read(
        tape in arbitrary_tape(),
        position in 0..64isize,
        symbol in arbitrary_symbol(),
    ) {
        let mut tape = tape;
        tape.set(position, symbol).unwrap();
        prop_assert_eq!(tape.get(position), Ok(symbol));
        prop_assert!(tape.len() > position as usize);
    }

    #[test]
    fn write_leaves_other_cells_alone(
        tape in arbitrary_tape(),
        position in 0..64isize,
        other in 0..64isize,
        symbol in arbitrary_symbol(),
    ) {
        prop_assume!(position != other);
        let before = tape.get(other).unwrap();

        let mut tape = tape;
        tape.set(position, symbol).unwrap();

        prop_assert_eq!(tape.get(other), Ok(before));
    }

    #[test]
    fn storage_never_shrinks(
        tape in arbitrary_tape(),
        writes in prop::collection::vec((0..48isize, arbitrary_symbol()), 0..16),
    ) {
        let mut tape = tape;
        let mut len = tape.len();
        for (position, symbol) in writes {
            tape.set(position, symbol).unwrap();
            prop_assert!(tape.len() >= len);
            len = tape.len();
        }
    }

    #[test]
    fn negative_positions_fail(tape in arbitrary_tape(), position in -64..0isize, symbol in arbitrary_symbol()) {
        let mut tape = tape;
        prop_assert_eq!(tape.get(position), Err(TuringMachineError::OutOfBounds(position)));
        prop_assert_eq!(tape.set(position, symbol), Err(TuringMachineError::OutOfBounds(position)));
    }

    #[test]
    fn execution_is_reproducible(
        table in prop::collection::vec(arbitrary_transition(), 0..12),
        tape in arbitrary_tape(),
    ) {
        let mut machine = TuringMachine::new(table);

        let mut first = Recorder::new();
        let a = machine.execute(tape.clone(), &mut first, StepMode::Continuous);
        let mut second = Recorder::new();
        let b = machine.execute(tape, &mut second, StepMode::Continuous);

        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_run_ends_within_the_cap(
        table in prop::collection::vec(arbitrary_transition(), 0..12),
        tape in arbitrary_tape(),
    ) {
        let mut machine = TuringMachine::new(table);
        let mut recorder = Recorder::new();
        let execution = machine.execute(tape, &mut recorder, StepMode::Continuous);

        prop_assert!(execution.steps <= machine.max_iterations());
        prop_assert_eq!(recorder.halt.as_ref(), Some(&execution.halt));
        match execution.halt {
            Halt::ExhaustedIterations(cap) => {
                prop_assert_eq!(cap, machine.max_iterations());
                prop_assert_eq!(execution.steps, cap);
            }
            _ => prop_assert_eq!(recorder.frames.len(), execution.steps + 1),
        }
    }
}
