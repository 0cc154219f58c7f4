//! The byte-serial, tick-driven controller that sequences operand
//! reception, a single kernel call, and result emission.
//!
//! [`Controller`] owns no state beyond the registers the spec assigns it
//! (`operand_a`, `operand_b`, `result`, `opcode`, and the current
//! [`State`]); [`Controller::step`] is its only way to make progress, one
//! tick at a time.

mod state;

pub use state::State;

use crate::kernel::addsub;

/// Per-tick inputs sampled by [`Controller::step`].
///
/// Mirrors the conceptual 8-bit port of spec §6: `reset` and `start` are
/// control lines, `opcode` is sampled only at the `Idle` → `LoadA0`
/// transition, and `in_byte` carries the data path during `LoadA*`/`LoadB*`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInputs {
    /// Synchronous reset. Dominates every other input.
    pub reset: bool,
    /// Requests a new transaction while in `Idle`. Ignored elsewhere.
    pub start: bool,
    /// `false` = add, `true` = sub. Sampled only at `Idle` → `LoadA0`.
    pub opcode: bool,
    /// The data byte for this tick, consumed during `LoadA*`/`LoadB*`.
    pub in_byte: u8,
}

/// Per-tick outputs produced by [`Controller::step`].
///
/// `state` and `done` are combinational on the current state register, so
/// they reflect the state *after* this tick's transition, matching the
/// §6 observability rule that both must describe the current state in
/// every cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutputs {
    /// The 4-bit state code of the state entered this tick.
    pub state: u8,
    /// Asserted iff the state entered this tick is one of the OUTPUT_*
    /// states.
    pub done: bool,
    /// The result byte driven this tick. Meaningful only when `done` is
    /// asserted; undefined (but deterministic) otherwise.
    pub out_byte: u8,
}

/// A single add/subtract transaction sequencer.
///
/// Construct with [`Controller::new`] and drive with [`Controller::step`]
/// once per logical tick. There is no other way to advance a transaction:
/// this mirrors the single logical-tick scheduling model of spec §5.
#[derive(Debug)]
pub struct Controller {
    state: State,
    operand_a: u32,
    operand_b: u32,
    result: u32,
    sub: bool,
}

impl Controller {
    /// Creates a controller in `Idle` with all registers cleared, as if
    /// freshly reset.
    pub fn new() -> Self {
        Controller {
            state: State::Idle,
            operand_a: 0,
            operand_b: 0,
            result: 0,
            sub: false,
        }
    }

    /// The state entered by the most recently completed tick.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether `done` is currently asserted.
    pub fn done(&self) -> bool {
        self.state.done()
    }

    /// Advances the controller by one logical tick and returns this
    /// tick's outputs.
    ///
    /// Reset takes precedence over every other input and field. Within a
    /// state, at most one register write happens per tick, matching the
    /// spec's "exactly one ArithKernel invocation per transaction" and
    /// "bytes consumed/emitted in strict ascending order" invariants.
    pub fn step(&mut self, inputs: TickInputs) -> TickOutputs {
        if inputs.reset {
            log::trace!("controller: reset asserted, returning to Idle");
            self.state = State::Idle;
            self.operand_a = 0;
            self.operand_b = 0;
            self.result = 0;
            self.sub = false;
            return self.outputs(0);
        }

        let prev = self.state;
        let next = prev.next(inputs.start);

        match prev {
            State::Idle => {
                if inputs.start {
                    self.sub = inputs.opcode;
                }
            }
            State::LoadA0 => set_byte(&mut self.operand_a, 0, inputs.in_byte),
            State::LoadA1 => set_byte(&mut self.operand_a, 1, inputs.in_byte),
            State::LoadA2 => set_byte(&mut self.operand_a, 2, inputs.in_byte),
            State::LoadA3 => set_byte(&mut self.operand_a, 3, inputs.in_byte),
            State::LoadB0 => set_byte(&mut self.operand_b, 0, inputs.in_byte),
            State::LoadB1 => set_byte(&mut self.operand_b, 1, inputs.in_byte),
            State::LoadB2 => set_byte(&mut self.operand_b, 2, inputs.in_byte),
            State::LoadB3 => set_byte(&mut self.operand_b, 3, inputs.in_byte),
            State::Execute => {
                self.result = addsub(self.operand_a, self.operand_b, self.sub);
                log::trace!(
                    "controller: executed opcode={} a={:#010x} b={:#010x} -> {:#010x}",
                    self.sub as u8,
                    self.operand_a,
                    self.operand_b,
                    self.result
                );
            }
            State::Output0 | State::Output1 | State::Output2 | State::Output3 => {}
        }

        if next != prev {
            log::trace!("controller: {:?} -> {:?}", prev, next);
        }
        self.state = next;

        let out_byte = match next {
            State::Output0 => get_byte(self.result, 0),
            State::Output1 => get_byte(self.result, 1),
            State::Output2 => get_byte(self.result, 2),
            State::Output3 => get_byte(self.result, 3),
            _ => 0,
        };
        self.outputs(out_byte)
    }

    fn outputs(&self, out_byte: u8) -> TickOutputs {
        TickOutputs {
            state: self.state.code(),
            done: self.state.done(),
            out_byte,
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new()
    }
}

fn set_byte(word: &mut u32, index: u32, byte: u8) {
    debug_assert!(index < 4, "byte index out of range");
    let shift = index * 8;
    *word = (*word & !(0xFF << shift)) | ((byte as u32) << shift);
}

fn get_byte(word: u32, index: u32) -> u8 {
    debug_assert!(index < 4, "byte index out of range");
    ((word >> (index * 8)) & 0xFF) as u8
}
