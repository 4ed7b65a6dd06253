//! Montgomery arithmetic modulo a runtime odd modulus
//!
//! Both the base field 𝔽ₚ and the scalar field ℤₙ are built on [`MontyParams`].
//! Elements handed to `mul`/`square`/`pow` are in Montgomery form
//! (`x·R mod m` with `R = 2²⁵⁶`); `add`/`sub`/`neg` work in either form as
//! long as both operands agree.

use sha2::{Digest, Sha256};
use subtle::Choice;

use super::limbs::{self, Limbs, LIMBS, ONE, ZERO};

/// Fixed Miller-Rabin bases; exact below 3.18·10²³
const MR_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Extra rounds with bases SHA-256(m ‖ i) mod m, so a composite built to
/// pass the fixed bases still has to survive bases it cannot choose
const DERIVED_ROUNDS: u32 = 32;

#[derive(Clone, Debug)]
pub(crate) struct MontyParams {
    modulus: Limbs,
    /// -m⁻¹ mod 2³²
    m_inv: u32,
    /// R mod m, the Montgomery form of one
    r: Limbs,
    /// R² mod m
    r2: Limbs,
    bits: usize,
}

impl MontyParams {
    /// Precompute constants for an odd modulus `m ≥ 3`
    pub(crate) fn new(modulus: Limbs) -> Option<Self> {
        if modulus[0] & 1 == 0 || limbs::bit_len(&modulus) < 2 {
            return None;
        }

        // Newton iteration doubles the number of correct low bits each step
        let m0 = modulus[0];
        let mut inv = 1u32;
        for _ in 0..5 {
            inv = inv.wrapping_mul(2u32.wrapping_sub(m0.wrapping_mul(inv)));
        }

        let mut params = Self {
            modulus,
            m_inv: inv.wrapping_neg(),
            r: ZERO,
            r2: ZERO,
            bits: limbs::bit_len(&modulus),
        };

        let mut acc = ONE;
        for _ in 0..LIMBS * 32 {
            acc = params.add(&acc, &acc);
        }
        params.r = acc;
        for _ in 0..LIMBS * 32 {
            acc = params.add(&acc, &acc);
        }
        params.r2 = acc;

        Some(params)
    }

    #[inline]
    pub(crate) fn modulus(&self) -> &Limbs {
        &self.modulus
    }

    #[inline]
    pub(crate) fn bits(&self) -> usize {
        self.bits
    }

    #[inline]
    pub(crate) fn bytes(&self) -> usize {
        (self.bits + 7) / 8
    }

    /// Montgomery form of one
    #[inline]
    pub(crate) fn one(&self) -> Limbs {
        self.r
    }

    /// `a < m` in constant time
    #[inline]
    pub(crate) fn is_reduced(&self, a: &Limbs) -> Choice {
        limbs::lt(a, &self.modulus)
    }

    /// (a + b) mod m for reduced inputs
    #[inline]
    pub(crate) fn add(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (sum, carry) = limbs::adc(a, b);
        let (reduced, borrow) = limbs::sbb(&sum, &self.modulus);
        let use_reduced = Choice::from((carry as u8) | ((borrow ^ 1) as u8));
        limbs::select(&sum, &reduced, use_reduced)
    }

    /// (a - b) mod m for reduced inputs
    #[inline]
    pub(crate) fn sub(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (diff, borrow) = limbs::sbb(a, b);
        let (wrapped, _) = limbs::adc(&diff, &self.modulus);
        limbs::select(&diff, &wrapped, Choice::from(borrow as u8))
    }

    #[inline]
    pub(crate) fn neg(&self, a: &Limbs) -> Limbs {
        self.sub(&ZERO, a)
    }

    /// Subtract the modulus once if `a ≥ m`; valid for `a < 2m`
    #[inline]
    pub(crate) fn reduce_once(&self, a: &Limbs) -> Limbs {
        let (reduced, borrow) = limbs::sbb(a, &self.modulus);
        limbs::select(&reduced, a, Choice::from(borrow as u8))
    }

    /// Montgomery product a·b·R⁻¹ mod m (CIOS)
    ///
    /// Requires `a·b < m·R`, which holds whenever one operand is reduced.
    pub(crate) fn mul(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let m = &self.modulus;
        let mut t = [0u32; LIMBS + 2];

        for &b_limb in b.iter() {
            let mut carry = 0u64;
            for j in 0..LIMBS {
                let tmp = (t[j] as u64) + (a[j] as u64) * (b_limb as u64) + carry;
                t[j] = tmp as u32;
                carry = tmp >> 32;
            }
            let tmp = (t[LIMBS] as u64) + carry;
            t[LIMBS] = tmp as u32;
            t[LIMBS + 1] = (tmp >> 32) as u32;

            let q = t[0].wrapping_mul(self.m_inv);
            let tmp = (t[0] as u64) + (q as u64) * (m[0] as u64);
            let mut carry = tmp >> 32;
            for j in 1..LIMBS {
                let tmp = (t[j] as u64) + (q as u64) * (m[j] as u64) + carry;
                t[j - 1] = tmp as u32;
                carry = tmp >> 32;
            }
            let tmp = (t[LIMBS] as u64) + carry;
            t[LIMBS - 1] = tmp as u32;
            t[LIMBS] = t[LIMBS + 1] + ((tmp >> 32) as u32);
            t[LIMBS + 1] = 0;
        }

        let mut lo = ZERO;
        lo.copy_from_slice(&t[..LIMBS]);
        let hi = t[LIMBS];

        let (reduced, borrow) = limbs::sbb(&lo, m);
        let use_reduced = Choice::from(((hi & 1) as u8) | ((borrow ^ 1) as u8));
        limbs::select(&lo, &reduced, use_reduced)
    }

    #[inline]
    pub(crate) fn square(&self, a: &Limbs) -> Limbs {
        self.mul(a, a)
    }

    /// Enter Montgomery form; accepts any `a < 2²⁵⁶`
    #[inline]
    pub(crate) fn to_monty(&self, a: &Limbs) -> Limbs {
        self.mul(a, &self.r2)
    }

    /// Leave Montgomery form
    #[inline]
    pub(crate) fn from_monty(&self, a: &Limbs) -> Limbs {
        self.mul(a, &ONE)
    }

    /// baseᵉ for a Montgomery-form base and a public exponent
    ///
    /// Branches on the exponent bits, so it must never see secret exponents.
    pub(crate) fn pow(&self, base: &Limbs, exp: &Limbs) -> Limbs {
        let mut result = self.r;
        for i in (0..limbs::bit_len(exp)).rev() {
            result = self.square(&result);
            if bool::from(limbs::bit(exp, i)) {
                result = self.mul(&result, base);
            }
        }
        result
    }

    /// Inverse by Fermat's little theorem; only meaningful for prime moduli
    ///
    /// Maps zero to zero; callers check for it first.
    pub(crate) fn invert(&self, a: &Limbs) -> Limbs {
        let (exp, _) = limbs::sbb(&self.modulus, &limbs::from_u64(2));
        self.pow(a, &exp)
    }

    /// Reduce a big-endian integer of any length modulo m (canonical form)
    pub(crate) fn reduce_be_bytes(&self, bytes: &[u8]) -> Limbs {
        let shift = self.to_monty(&limbs::from_u64(1 << 32));
        let head = bytes.len() % 4;
        let (first, rest) = bytes.split_at(head);

        let mut acc = ZERO;
        for chunk in core::iter::once(first)
            .filter(|c| !c.is_empty())
            .chain(rest.chunks(4))
        {
            let word = chunk.iter().fold(0u64, |w, &b| (w << 8) | b as u64);
            acc = self.mul(&acc, &shift);
            acc = self.add(&acc, &self.to_monty(&limbs::from_u64(word)));
        }
        self.from_monty(&acc)
    }

    /// Miller-Rabin probable-prime test of the modulus
    pub(crate) fn is_probable_prime(&self) -> bool {
        let m = &self.modulus;
        let encoded = limbs::to_be_bytes(m, self.bytes());

        let fixed = MR_BASES
            .iter()
            .map(|&b| limbs::from_u64(b))
            .filter(|b| bool::from(limbs::lt(b, m)));
        let derived = (0..DERIVED_ROUNDS).map(|i| {
            let h = Sha256::new()
                .chain_update(&encoded)
                .chain_update(i.to_be_bytes())
                .finalize();
            self.reduce_be_bytes(&h)
        });

        fixed.chain(derived).all(|base| self.is_strong_probable_prime(&base))
    }

    /// One Miller-Rabin round for a canonical base
    ///
    /// Bases ≡ 0, ±1 mod m say nothing and pass.
    fn is_strong_probable_prime(&self, base: &Limbs) -> bool {
        let (m_minus_one, _) = limbs::sbb(&self.modulus, &ONE);
        let mut s = 0usize;
        while !bool::from(limbs::bit(&m_minus_one, s)) {
            s += 1;
        }
        let d = limbs::shr(&m_minus_one, s);

        let one = self.r;
        let minus_one = self.neg(&self.r);
        let a = self.to_monty(base);
        if a == ZERO || a == one || a == minus_one {
            return true;
        }

        let mut x = self.pow(&a, &d);
        if x == one || x == minus_one {
            return true;
        }
        for _ in 1..s {
            x = self.square(&x);
            if x == minus_one {
                return true;
            }
        }
        false
    }
}
