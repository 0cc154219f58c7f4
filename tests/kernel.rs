// Black-box tests for `fp32_addsub_core::kernel::addsub`, covering the
// concrete scenarios and universal properties.

use fp32_addsub_core::addsub;
use proptest::prelude::*;

const POS_ZERO: u32 = 0x0000_0000;
const NEG_ZERO: u32 = 0x8000_0000;
const CANON_NAN: u32 = 0x7FC0_0000;
const POS_INF: u32 = 0x7F80_0000;
const NEG_INF: u32 = 0xFF80_0000;

fn bits(x: f32) -> u32 {
    x.to_bits()
}

#[test]
fn scenario_1_simple_add() {
    assert_eq!(addsub(bits(1.25), bits(2.75), false), bits(4.0));
}

#[test]
fn scenario_2_simple_sub() {
    assert_eq!(addsub(bits(5.5), bits(3.25), true), bits(2.25));
}

#[test]
fn scenario_3_sticky_rounds_away_tiny_addend() {
    assert_eq!(addsub(bits(1.0), bits(1e-10), false), bits(1.0));
}

#[test]
fn scenario_4_exponent_carry() {
    assert_eq!(addsub(bits(8.0), bits(8.0), false), bits(16.0));
}

#[test]
fn scenario_5_overflow_to_infinity() {
    assert_eq!(addsub(bits(2.4e38), bits(3.1e38), false), POS_INF);
}

#[test]
fn scenario_6_subnormal_sum() {
    let got = addsub(bits(1.234e-41), bits(5.678e-41), false);
    let got_f = f32::from_bits(got);
    assert!(got_f > 0.0 && got_f < 1e-39);
    assert!((got_f - 6.912e-41).abs() < 2e-41);
}

#[test]
fn scenario_7_subnormal_difference() {
    let got = addsub(bits(3.52e-38), bits(3.51e-38), true);
    let got_f = f32::from_bits(got);
    assert!(got_f > 0.0);
    assert!((got_f - 1e-40).abs() < 5e-41);
}

#[test]
fn scenario_8_infinity_minus_infinity_is_nan() {
    assert_eq!(addsub(POS_INF, POS_INF, true), CANON_NAN);
}

#[test]
fn scenario_10_signed_zero_rules() {
    assert_eq!(addsub(NEG_ZERO, NEG_ZERO, false), NEG_ZERO);
    assert_eq!(addsub(NEG_ZERO, POS_ZERO, false), POS_ZERO);
    assert_eq!(addsub(POS_ZERO, POS_ZERO, true), POS_ZERO);
    assert_eq!(addsub(NEG_ZERO, POS_ZERO, true), NEG_ZERO);
}

#[test]
fn nan_propagation_discards_payload() {
    let snan = 0x7FA0_0001u32;
    let qnan = 0x7FE0_1234u32;
    assert_eq!(addsub(snan, bits(1.0), false), CANON_NAN);
    assert_eq!(addsub(bits(1.0), qnan, false), CANON_NAN);
    assert_eq!(addsub(snan, qnan, true), CANON_NAN);
}

#[test]
fn infinity_rules() {
    assert_eq!(addsub(POS_INF, NEG_INF, false), CANON_NAN);
    assert_eq!(addsub(POS_INF, bits(42.0), false), POS_INF);
    assert_eq!(addsub(NEG_INF, POS_INF, true), NEG_INF);
}

#[test]
fn identity_with_positive_zero() {
    for &x in &[1.0f32, -1.0, 0.5, 123.456, f32::MIN_POSITIVE] {
        assert_eq!(addsub(bits(x), POS_ZERO, false), bits(x));
    }
    assert_eq!(addsub(POS_ZERO, POS_ZERO, false), POS_ZERO);
}

#[test]
fn self_cancellation() {
    for &x in &[1.0f32, -1.0, 0.5, -123.456, f32::MIN_POSITIVE, f32::MAX] {
        assert_eq!(addsub(bits(x), bits(x), true), POS_ZERO);
    }
}

fn is_nan_bits(b: u32) -> bool {
    let e = (b >> 23) & 0xFF;
    let t = b & 0x007F_FFFF;
    e == 0xFF && t != 0
}

proptest! {
    #[test]
    fn commutative_add(a in any::<u32>(), b in any::<u32>()) {
        let lhs = addsub(a, b, false);
        let rhs = addsub(b, a, false);
        if is_nan_bits(lhs) || is_nan_bits(rhs) {
            prop_assert!(is_nan_bits(lhs) && is_nan_bits(rhs));
        } else {
            prop_assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn sub_is_negated_add(a in any::<u32>(), b in any::<u32>()) {
        let lhs = addsub(a, b, true);
        let rhs = addsub(a, b ^ 0x8000_0000, false);
        if is_nan_bits(lhs) || is_nan_bits(rhs) {
            prop_assert!(is_nan_bits(lhs) && is_nan_bits(rhs));
        } else {
            prop_assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn never_panics(a in any::<u32>(), b in any::<u32>(), sub in any::<bool>()) {
        let _ = addsub(a, b, sub);
    }
}
