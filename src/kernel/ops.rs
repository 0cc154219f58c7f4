// kernel/ops.rs
//
// The binary32 add/subtract algorithm: special-case disposition,
// alignment with guard/round/sticky bits, normalization, and
// round-to-nearest-even. Implements spec §4.1 Steps 1-8.

use super::types::{pack, pack_inf, Class, Unpacked, CANON_NAN, NEG_ZERO, POS_ZERO, SIGN_BIT};

/// Computes `a + b` (when `sub` is `false`) or `a - b` (when `sub` is
/// `true`) as IEEE 754 binary32 round-to-nearest-even arithmetic,
/// returning the canonical result bit pattern.
///
/// This is a pure function: it never panics, and every `(a, b, sub)`
/// triple has a defined output, including NaNs, infinities, and signed
/// zeros.
pub fn addsub(a: u32, b: u32, sub: bool) -> u32 {
    let b_eff_bits = if sub { b ^ SIGN_BIT } else { b };

    let a_u = Unpacked::new(a);
    let b_u = Unpacked::new(b_eff_bits);

    // Step 2: special-case disposition, checked in priority order.
    if a_u.class == Class::NaN || b_u.class == Class::NaN {
        return CANON_NAN;
    }

    match (a_u.class, b_u.class) {
        (Class::Infinity, Class::Infinity) => {
            return if a_u.sign == b_u.sign {
                pack_inf(a_u.sign)
            } else {
                CANON_NAN
            };
        }
        (Class::Infinity, _) => return pack_inf(a_u.sign),
        (_, Class::Infinity) => return pack_inf(b_u.sign),
        (Class::Zero, Class::Zero) => {
            return if a_u.sign && b_u.sign { NEG_ZERO } else { POS_ZERO };
        }
        (Class::Zero, _) => return b_eff_bits,
        (_, Class::Zero) => return a,
        _ => {}
    }

    // Step 3/4: both finite nonzero; order by (exp, signif) and align.
    let (large, small) = pick_large(&a_u, &b_u);
    let d = (large.exp - small.exp) as u32;

    let large_ext = (large.signif as u64) << 3;
    let small_ext = align(small.signif, d);

    let effective_add = a_u.sign == b_u.sign;
    let sign = large.sign;

    if !effective_add && large_ext == small_ext {
        // Exact cancellation: spec mandates +0 regardless of operand sign.
        return POS_ZERO;
    }

    // Step 5: summation over the widened (G/R/S-extended) significands.
    let sum = if effective_add {
        large_ext + small_ext
    } else {
        // `large` was chosen to have the larger (exp, signif), so this
        // never underflows.
        large_ext - small_ext
    };

    // Step 6: normalization.
    let (candidate, exp, implicit_before) = if effective_add {
        normalize_add(sum, large.exp)
    } else {
        normalize_sub(sum, large.exp)
    };

    if exp >= 255 {
        return pack_inf(sign);
    }
    if candidate == 0 {
        return POS_ZERO;
    }

    // Step 7: round-to-nearest-even over the bottom three (G/R/S) bits.
    let (mantissa, exp) = round_nearest_even(candidate, exp);

    // Step 8: pack, promoting a subnormal whose rounded mantissa carried
    // into bit 23 to the smallest normal.
    pack_result(sign, mantissa, exp, implicit_before)
}

/// Picks the operand with the larger `(exp, signif)` pair; ties favor `a`
/// (a tie with opposite signs is the exact-cancellation case, handled by
/// the caller before this distinction can matter; a tie with the same
/// sign is symmetric).
fn pick_large<'a>(a: &'a Unpacked, b: &'a Unpacked) -> (&'a Unpacked, &'a Unpacked) {
    if (a.exp, a.signif) >= (b.exp, b.signif) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Right-aligns a significand by `d` bit positions, widening by 3 bits
/// (guard, round, sticky) first. Any bit shifted out below the sticky
/// position is OR-folded into it.
fn align(signif: u32, d: u32) -> u64 {
    let widened = (signif as u64) << 3;
    if d == 0 {
        return widened;
    }
    if d >= 64 {
        return (widened != 0) as u64;
    }
    let dropped_mask = (1u64 << d) - 1;
    let sticky = (widened & dropped_mask != 0) as u64;
    (widened >> d) | sticky
}

/// Normalizes the effective-add case: handles the single possible
/// carry-out above the implicit bit.
///
/// Returns `(candidate, exp, implicit_before)` where `candidate` is the
/// positioned 27-bit-ish value (G/R/S in the low 3 bits, 24-bit
/// significand window above), `exp` is the resulting working exponent,
/// and `implicit_before` is whether bit 26 (the implicit-bit slot) of
/// `candidate` ends up set. This is usually true — it is only false when
/// both operands were Subnormal and their sum still falls short of the
/// smallest normal, in which case the result stays subnormal.
fn normalize_add(sum: u64, exp: i32) -> (u64, i32, bool) {
    // Carry out of the 24-bit significand lands in bit (23 + 3 + 1) = 27.
    if sum & (1 << 27) != 0 {
        let sticky = sum & 1;
        ((sum >> 1) | sticky, exp + 1, true)
    } else {
        let implicit_before = sum & (1 << 26) != 0;
        (sum, exp, implicit_before)
    }
}

/// Normalizes the effective-subtract case: counts leading zeros above the
/// implicit-bit slot (bit 26) and left-shifts to restore it, clamping the
/// shift so the working exponent never drops below 1 — the shared
/// baseline `Unpacked` pins every Subnormal operand to, and the smallest
/// possible Normal exponent. Going no lower keeps a clamped result's
/// `(mantissa, exp)` pair in the same units a genuine Subnormal operand
/// uses, so the caller can pack it without any further rebasing.
fn normalize_sub(sum: u64, exp: i32) -> (u64, i32, bool) {
    debug_assert!(sum != 0, "exact cancellation handled by caller");
    debug_assert!(exp >= 1, "working exponent is pinned to >= 1");

    let top_bit = 63 - sum.leading_zeros() as i32;
    let shift_needed = 26 - top_bit;
    if shift_needed <= 0 {
        // Already normalized (or, in principle, over-wide — shouldn't
        // happen since `sum` started at <= 27 bits).
        return (sum, exp, true);
    }

    let shift_amount = shift_needed.min(exp - 1);
    let shifted = sum << shift_amount;
    let new_exp = exp - shift_amount;
    let implicit_before = shift_amount == shift_needed;
    (shifted, new_exp, implicit_before)
}

/// Round-to-nearest-even over the bottom three bits (G, R, S) of
/// `candidate`, handling the single possible round-up carry into bit 24.
fn round_nearest_even(candidate: u64, exp: i32) -> (u64, i32) {
    let g = (candidate >> 2) & 1;
    let r = (candidate >> 1) & 1;
    let s = candidate & 1;
    let mantissa = candidate >> 3;

    let round_up = if g == 0 {
        false
    } else if (r | s) != 0 {
        true
    } else {
        mantissa & 1 == 1
    };

    if !round_up {
        return (mantissa, exp);
    }

    let mantissa = mantissa + 1;
    if mantissa & (1 << 24) != 0 {
        (mantissa >> 1, exp + 1)
    } else {
        (mantissa, exp)
    }
}

/// Packs a rounded `(mantissa, exp)` pair into a result bit pattern.
///
/// `implicit_before` is whether the pre-rounding significand window
/// already had its implicit bit (bit 23 of `mantissa`) set. When it did
/// not, `exp` is already pinned at the shared Subnormal/smallest-Normal
/// baseline of 1 (see [`normalize_sub`]/[`normalize_add`]), so a
/// rounding carry that reaches bit 23 packs directly as the smallest
/// Normal at that same `exp` — no further adjustment needed. Otherwise
/// the candidate stays Subnormal, packed with a `0` exponent field.
fn pack_result(sign: bool, mantissa: u64, exp: i32, implicit_before: bool) -> u32 {
    if implicit_before {
        if exp >= 255 {
            return pack_inf(sign);
        }
        pack(sign, exp as u32, mantissa as u32)
    } else if mantissa & (1 << 23) != 0 {
        debug_assert_eq!(exp, 1, "promotion can only happen at the pinned baseline");
        pack(sign, exp as u32, mantissa as u32)
    } else {
        pack(sign, 0, mantissa as u32)
    }
}
