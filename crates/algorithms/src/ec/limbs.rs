//! Fixed-width limb helpers shared by the field and scalar code
//!
//! Values are stored as little-endian 32-bit limbs (limb 0 is least
//! significant); byte encodings are big-endian.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Number of 32-bit limbs (8 × 32 = 256 bits)
pub(crate) const LIMBS: usize = 8;

/// Widest supported big-endian encoding in bytes
pub(crate) const MAX_BYTES: usize = LIMBS * 4;

pub(crate) type Limbs = [u32; LIMBS];

pub(crate) const ZERO: Limbs = [0u32; LIMBS];

pub(crate) const ONE: Limbs = {
    let mut limbs = [0u32; LIMBS];
    limbs[0] = 1;
    limbs
};

/// Build limbs from a small literal
#[inline]
pub(crate) fn from_u64(n: u64) -> Limbs {
    let mut limbs = ZERO;
    limbs[0] = n as u32;
    limbs[1] = (n >> 32) as u32;
    limbs
}

/// Parse a big-endian byte string of at most `MAX_BYTES` bytes
pub(crate) fn from_be_slice(bytes: &[u8]) -> Option<Limbs> {
    if bytes.len() > MAX_BYTES {
        return None;
    }
    let mut limbs = ZERO;
    for (i, &byte) in bytes.iter().rev().enumerate() {
        limbs[i / 4] |= (byte as u32) << (8 * (i % 4));
    }
    Some(limbs)
}

/// Serialize into exactly `width` big-endian bytes
///
/// Bits above `8 * width` are dropped; callers pass the width of the modulus.
pub(crate) fn to_be_bytes(limbs: &Limbs, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    for (i, byte) in out.iter_mut().rev().enumerate().take(MAX_BYTES) {
        *byte = (limbs[i / 4] >> (8 * (i % 4))) as u8;
    }
    out
}

/// Limb-wise addition with carry out
#[inline(always)]
pub(crate) fn adc(a: &Limbs, b: &Limbs) -> (Limbs, u32) {
    let mut r = ZERO;
    let mut carry = 0u64;
    for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
        let tmp = (a_limb as u64) + (b_limb as u64) + carry;
        *r_limb = tmp as u32;
        carry = tmp >> 32;
    }
    (r, carry as u32)
}

/// Limb-wise subtraction; the returned borrow is 1 iff `a < b`
#[inline(always)]
pub(crate) fn sbb(a: &Limbs, b: &Limbs) -> (Limbs, u32) {
    let mut r = ZERO;
    let mut borrow = 0u64;
    for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
        // a - (b + borrow) wraps past 2⁶³ exactly when it underflows
        let tmp = (a_limb as u64).wrapping_sub(b_limb as u64 + borrow);
        *r_limb = tmp as u32;
        borrow = tmp >> 63;
    }
    (r, borrow as u32)
}

/// Constant-time select: `a` when `choice` is 0, `b` when it is 1
#[inline(always)]
pub(crate) fn select(a: &Limbs, b: &Limbs, choice: Choice) -> Limbs {
    let mut out = ZERO;
    for ((a_limb, b_limb), out_limb) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
        *out_limb = u32::conditional_select(a_limb, b_limb, choice);
    }
    out
}

#[inline(always)]
pub(crate) fn ct_eq(a: &Limbs, b: &Limbs) -> Choice {
    a[..].ct_eq(&b[..])
}

#[inline(always)]
pub(crate) fn is_zero(a: &Limbs) -> Choice {
    ct_eq(a, &ZERO)
}

/// `a < b` in constant time
#[inline(always)]
pub(crate) fn lt(a: &Limbs, b: &Limbs) -> Choice {
    let (_, borrow) = sbb(a, b);
    Choice::from(borrow as u8)
}

/// Bit `i` of `a` as a `Choice`
#[inline(always)]
pub(crate) fn bit(a: &Limbs, i: usize) -> Choice {
    Choice::from(((a[i / 32] >> (i % 32)) & 1) as u8)
}

/// Number of significant bits (variable time; public values only)
pub(crate) fn bit_len(a: &Limbs) -> usize {
    for i in (0..LIMBS).rev() {
        if a[i] != 0 {
            return i * 32 + (32 - a[i].leading_zeros() as usize);
        }
    }
    0
}

/// Logical right shift by a public amount
pub(crate) fn shr(a: &Limbs, shift: usize) -> Limbs {
    let mut out = ZERO;
    let limb_shift = shift / 32;
    let bit_shift = shift % 32;
    for i in 0..LIMBS {
        let src = i + limb_shift;
        if src >= LIMBS {
            break;
        }
        let mut v = a[src] >> bit_shift;
        if bit_shift != 0 && src + 1 < LIMBS {
            v |= a[src + 1] << (32 - bit_shift);
        }
        out[i] = v;
    }
    out
}
