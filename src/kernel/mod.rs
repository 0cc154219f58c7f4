//! The binary32 add/subtract arithmetic kernel.
//!
//! [`addsub`] is the sole public entry point: a pure, total function over
//! binary32 bit patterns. Internally it is organized the way a hardware
//! description would be — unpack/classify, special-case disposition,
//! align, sum, normalize, round, pack — with each stage factored into its
//! own function in [`ops`] rather than one long body.

mod ops;
mod types;

pub use ops::addsub;
pub use types::{CANON_NAN, NEG_ZERO, POS_ZERO};
