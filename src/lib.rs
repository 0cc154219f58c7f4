/*!
`fp32-addsub-core` is a bit-exact reference model of a binary32
(IEEE 754 single-precision) add/subtract unit together with a byte-serial
command/result controller.

The crate is split into two pieces that mirror the two subsystems of the
hardware this models:

- [`kernel`] is a pure, stateless function `(a, b, sub) -> result` that
  reproduces IEEE 754 round-to-nearest-even addition and subtraction bit
  for bit, including signed zeros, subnormals, infinities, NaNs, and the
  guard/round/sticky rounding rule.
- [`controller`] is a 14-state tick-synchronous finite-state machine that
  sequences the reception of two 4-byte operands, a single kernel
  invocation, and the emission of a 4-byte result, one byte per tick.

Neither half ever panics or returns an error: every `u32` operand and every
`u8` byte has a defined, total interpretation.
*/

#![warn(missing_docs)]

/// The binary32 add/subtract arithmetic kernel.
pub mod kernel;

/// The byte-serial tick-driven controller that sequences a kernel call.
pub mod controller;

pub use controller::{Controller, State, TickInputs, TickOutputs};
pub use kernel::addsub;
