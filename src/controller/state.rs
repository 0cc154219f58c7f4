// controller/state.rs
//
// The 14-state transaction state machine and its transition table.

/// One of the 14 states a [`Controller`](super::Controller) transaction can
/// be in, encoded 0..13 to match the port's 4-bit state code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// Waiting for a `start` pulse.
    Idle = 0,
    /// Receiving byte 0 of `operand_a`.
    LoadA0 = 1,
    /// Receiving byte 1 of `operand_a`.
    LoadA1 = 2,
    /// Receiving byte 2 of `operand_a`.
    LoadA2 = 3,
    /// Receiving byte 3 of `operand_a`.
    LoadA3 = 4,
    /// Receiving byte 0 of `operand_b`.
    LoadB0 = 5,
    /// Receiving byte 1 of `operand_b`.
    LoadB1 = 6,
    /// Receiving byte 2 of `operand_b`.
    LoadB2 = 7,
    /// Receiving byte 3 of `operand_b`.
    LoadB3 = 8,
    /// Invoking the kernel exactly once.
    Execute = 9,
    /// Driving byte 0 of `result`.
    Output0 = 10,
    /// Driving byte 1 of `result`.
    Output1 = 11,
    /// Driving byte 2 of `result`.
    Output2 = 12,
    /// Driving byte 3 of `result`.
    Output3 = 13,
}

impl State {
    /// The 4-bit state code published on the port, per spec §4.2/§6.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether `done` is asserted in this state (true only in the
    /// OUTPUT_* states, per the §3 invariant).
    pub fn done(self) -> bool {
        matches!(
            self,
            State::Output0 | State::Output1 | State::Output2 | State::Output3
        )
    }

    /// The state entered next, given whether `start` is asserted this
    /// tick. `start` only matters in `Idle`; every other state has a
    /// single fixed successor, since a transaction always loads 8 bytes,
    /// executes once, and emits 4 bytes in strict order.
    ///
    /// Kept as an explicit table rather than folded into per-state tick
    /// logic, per the crate's controller design: a bug in the sequencing
    /// is then a one-line diff against this function instead of a change
    /// scattered across branches.
    pub(crate) fn next(self, start: bool) -> State {
        match self {
            State::Idle => {
                if start {
                    State::LoadA0
                } else {
                    State::Idle
                }
            }
            State::LoadA0 => State::LoadA1,
            State::LoadA1 => State::LoadA2,
            State::LoadA2 => State::LoadA3,
            State::LoadA3 => State::LoadB0,
            State::LoadB0 => State::LoadB1,
            State::LoadB1 => State::LoadB2,
            State::LoadB2 => State::LoadB3,
            State::LoadB3 => State::Execute,
            State::Execute => State::Output0,
            State::Output0 => State::Output1,
            State::Output1 => State::Output2,
            State::Output2 => State::Output3,
            State::Output3 => State::Idle,
        }
    }
}
