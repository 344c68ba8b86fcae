//! Ring elements: dense polynomials over Z/2^64 (wrapping `i64` coefficients).
//!
//! Working modulo 2^64 keeps every operation a ring homomorphism onto Z/2,
//! so the parity read back at decryption time is exact no matter how far
//! intermediate coefficients grow.

use itertools::{EitherOrBoth, Itertools};
use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Rem, Sub, SubAssign};

use crate::error::{MorphError, Result};
use crate::params::Distribution;

/// f(x) = coeffs[0] + coeffs[1]·x + ...
///
/// Storage may carry trailing zeros; equality and [`RingElement::degree`]
/// ignore them.
#[derive(Clone, Debug, Default)]
pub struct RingElement {
    coeffs: Vec<i64>,
}

impl RingElement {
    /// Zero element with room for `degree_bound` coefficients.
    #[must_use]
    pub fn zero(degree_bound: usize) -> Self {
        Self {
            coeffs: vec![0; degree_bound],
        }
    }

    /// [`RingElement::zero`], reporting allocation failure instead of aborting.
    pub fn try_zero(degree_bound: usize) -> Result<Self> {
        let mut coeffs = Vec::new();
        coeffs.try_reserve_exact(degree_bound)?;
        coeffs.resize(degree_bound, 0);
        Ok(Self { coeffs })
    }

    /// Constant polynomial.
    #[must_use]
    pub fn constant(value: i64) -> Self {
        Self { coeffs: vec![value] }
    }

    /// Takes ownership of a little-endian coefficient vector.
    #[must_use]
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        Self { coeffs }
    }

    /// Draws a fresh element with `degree_bound` coefficients from `dist`.
    pub fn sample<R: Rng + ?Sized>(dist: &Distribution, degree_bound: usize, rng: &mut R) -> Result<Self> {
        let coeffs = match *dist {
            Distribution::Uniform { bound } => {
                let bound = i64::from(bound);
                (0..degree_bound).map(|_| rng.gen_range(-bound..=bound)).collect()
            }
            Distribution::Gaussian { sigma } => {
                let normal = Normal::new(0.0, sigma)
                    .map_err(|e| MorphError::InvalidParameters(format!("gaussian sigma {sigma}: {e}")))?;
                (0..degree_bound)
                    .map(|_| normal.sample(rng).round() as i64)
                    .collect()
            }
            Distribution::Ternary => (0..degree_bound).map(|_| rng.gen_range(-1..=1)).collect(),
        };
        Ok(Self { coeffs })
    }

    /// Raw coefficient storage, trailing zeros included.
    #[must_use]
    pub fn coeffs(&self) -> &[i64] {
        &self.coeffs
    }

    /// Coefficient `i`, zero past the end of storage.
    #[must_use]
    pub fn coeff(&self, i: usize) -> i64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Sets coefficient `i`, growing storage when needed.
    pub fn set_coeff(&mut self, i: usize, value: i64) {
        if i >= self.coeffs.len() {
            self.coeffs.resize(i + 1, 0);
        }
        self.coeffs[i] = value;
    }

    /// Index of the highest nonzero coefficient plus one; 0 for the zero element.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1)
    }

    /// True for the zero element, whatever its storage length.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.degree() == 0
    }

    /// Writes `self · rhs` into `out`, reusing its buffer.
    ///
    /// `out` is an exclusive borrow, so it can never alias an input.
    pub fn mul_into(&self, rhs: &RingElement, out: &mut RingElement) {
        out.coeffs.clear();
        let (da, db) = (self.degree(), rhs.degree());
        if da == 0 || db == 0 {
            return;
        }
        out.coeffs.resize(da + db - 1, 0);
        for (i, &a) in self.coeffs[..da].iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in rhs.coeffs[..db].iter().enumerate() {
                out.coeffs[i + j] = out.coeffs[i + j].wrapping_add(a.wrapping_mul(b));
            }
        }
    }

    /// In-place remainder modulo a monic polynomial.
    ///
    /// # Panics
    /// If `modulus` is zero or its leading coefficient is not 1.
    pub fn reduce_mod(&mut self, modulus: &RingElement) {
        let dm = modulus.degree();
        assert!(dm > 0, "division by zero polynomial");
        assert_eq!(modulus.coeffs[dm - 1], 1, "reduction polynomial must be monic");
        let deg_u = dm - 1;

        let mut top = self.degree();
        while top > deg_u {
            let shift = top - 1 - deg_u;
            let lead = self.coeffs[top - 1];
            for (i, &u) in modulus.coeffs[..dm].iter().enumerate() {
                self.coeffs[shift + i] = self.coeffs[shift + i].wrapping_sub(lead.wrapping_mul(u));
            }
            while top > 0 && self.coeffs[top - 1] == 0 {
                top -= 1;
            }
        }
        self.coeffs.truncate(top);
    }

    /// Remainder modulo a monic polynomial, as a new element.
    #[must_use]
    pub fn rem_monic(&self, modulus: &RingElement) -> Self {
        let mut r = self.clone();
        r.reduce_mod(modulus);
        r
    }

    /// Replaces every coefficient by its truncated remainder mod `m`,
    /// leaving values in `(-m, m)`.
    ///
    /// # Panics
    /// If `m` is not positive.
    pub fn reduce_coeffs_mod(&mut self, m: i64) {
        assert!(m > 0, "coefficient modulus must be positive");
        for c in &mut self.coeffs {
            *c = c.wrapping_rem(m);
        }
    }

    /// Multiplies every coefficient by `k`.
    pub fn scale(&mut self, k: i64) {
        for c in &mut self.coeffs {
            *c = c.wrapping_mul(k);
        }
    }

    /// Overwrites `self` with `src`, keeping the existing allocation when it fits.
    pub fn copy_from(&mut self, src: &RingElement) {
        self.coeffs.clone_from(&src.coeffs);
    }

    /// Resets to the zero element, keeping the allocation.
    pub fn reset(&mut self) {
        self.coeffs.clear();
    }

    /// Negates in place.
    pub fn negate(&mut self) {
        for c in &mut self.coeffs {
            *c = c.wrapping_neg();
        }
    }
}

impl PartialEq for RingElement {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs[..self.degree()] == other.coeffs[..other.degree()]
    }
}

impl Eq for RingElement {}

impl fmt::Display for RingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.coeffs[..self.degree()].iter().join(", "))
    }
}

impl Add for &RingElement {
    type Output = RingElement;
    fn add(self, rhs: Self) -> Self::Output {
        let coeffs = self
            .coeffs
            .iter()
            .zip_longest(&rhs.coeffs)
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => a.wrapping_add(*b),
                EitherOrBoth::Left(a) | EitherOrBoth::Right(a) => *a,
            })
            .collect();
        RingElement { coeffs }
    }
}

impl Add for RingElement {
    type Output = RingElement;
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl AddAssign<&RingElement> for RingElement {
    fn add_assign(&mut self, rhs: &RingElement) {
        if rhs.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), 0);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *a = a.wrapping_add(b);
        }
    }
}

impl Sub for &RingElement {
    type Output = RingElement;
    fn sub(self, rhs: Self) -> Self::Output {
        let coeffs = self
            .coeffs
            .iter()
            .zip_longest(&rhs.coeffs)
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => a.wrapping_sub(*b),
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => b.wrapping_neg(),
            })
            .collect();
        RingElement { coeffs }
    }
}

impl Sub for RingElement {
    type Output = RingElement;
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl SubAssign<&RingElement> for RingElement {
    fn sub_assign(&mut self, rhs: &RingElement) {
        if rhs.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), 0);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *a = a.wrapping_sub(b);
        }
    }
}

impl Neg for &RingElement {
    type Output = RingElement;
    fn neg(self) -> Self::Output {
        let mut r = self.clone();
        r.negate();
        r
    }
}

impl Neg for RingElement {
    type Output = RingElement;
    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl Mul for &RingElement {
    type Output = RingElement;
    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = RingElement::default();
        self.mul_into(rhs, &mut out);
        out
    }
}

impl Mul for RingElement {
    type Output = RingElement;
    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Rem<&RingElement> for &RingElement {
    type Output = RingElement;
    fn rem(self, rhs: &RingElement) -> Self::Output {
        self.rem_monic(rhs)
    }
}

impl Rem<&RingElement> for RingElement {
    type Output = RingElement;
    fn rem(mut self, rhs: &RingElement) -> Self::Output {
        self.reduce_mod(rhs);
        self
    }
}
