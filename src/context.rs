//! Ring context: the dimension and reduction polynomial of one instance.

use std::sync::Arc;

use crate::error::{MorphError, Result};
use crate::polynomial::RingElement;

/// Immutable parameters shared by every element and ciphertext of an instance.
///
/// Only [`RingContext::new`] and [`RingContext::with_modulus`] build one, so
/// the reduction polynomial is always monic of degree `n`:
///
/// ```compile_fail
/// use morph_core::{RingContext, RingElement};
///
/// let ctx = RingContext { n: 4, poly_mod: RingElement::from_coeffs(vec![1, 0, 0, 0, 2]) };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingContext {
    n: usize,
    poly_mod: RingElement,
}

impl RingContext {
    /// Negacyclic ring `Z[x] / (x^n + 1)`.
    pub fn new(n: usize) -> Result<Arc<Self>> {
        if n == 0 {
            return Err(MorphError::InvalidParameters("ring dimension must be positive".into()));
        }
        let mut poly_mod = RingElement::zero(n + 1);
        poly_mod.set_coeff(0, 1);
        poly_mod.set_coeff(n, 1);
        Ok(Arc::new(Self { n, poly_mod }))
    }

    /// Ring with a caller-chosen reduction polynomial, which must be monic of degree `n`.
    pub fn with_modulus(n: usize, poly_mod: RingElement) -> Result<Arc<Self>> {
        if n == 0 {
            return Err(MorphError::InvalidParameters("ring dimension must be positive".into()));
        }
        if poly_mod.degree() != n + 1 || poly_mod.coeff(n) != 1 {
            return Err(MorphError::InvalidParameters(format!(
                "reduction polynomial {poly_mod} is not monic of degree {n}"
            )));
        }
        Ok(Arc::new(Self { n, poly_mod }))
    }

    /// Ring dimension `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Monic reduction polynomial of degree `n`.
    #[must_use]
    pub fn poly_mod(&self) -> &RingElement {
        &self.poly_mod
    }

    /// Fresh zero element sized for this ring.
    pub fn zero(&self) -> Result<RingElement> {
        RingElement::try_zero(self.n)
    }

    /// Fails unless `a` and `b` describe the same instance.
    pub(crate) fn ensure_same(a: &Arc<Self>, b: &Arc<Self>) -> Result<()> {
        if Arc::ptr_eq(a, b) || a == b {
            Ok(())
        } else {
            Err(MorphError::ContextMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negacyclic_modulus() {
        let ctx = RingContext::new(4).unwrap();
        assert_eq!(ctx.n(), 4);
        assert_eq!(ctx.poly_mod(), &RingElement::from_coeffs(vec![1, 0, 0, 0, 1]));
        assert_eq!(ctx.zero().unwrap().coeffs().len(), 4);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(RingContext::new(0).is_err());
        assert!(RingContext::with_modulus(3, RingElement::from_coeffs(vec![1, 0, 0, 2])).is_err());
        assert!(RingContext::with_modulus(3, RingElement::from_coeffs(vec![1, 0, 1])).is_err());
        assert!(RingContext::with_modulus(3, RingElement::from_coeffs(vec![1, 1, 0, 1])).is_ok());
    }

    #[test]
    fn test_non_monic_modulus_never_reaches_decryption() {
        let bad = RingElement::from_coeffs(vec![1, 0, 0, 0, 2]);
        let err = RingContext::with_modulus(4, bad).unwrap_err();
        assert!(matches!(err, MorphError::InvalidParameters(_)));
        assert!(!err.is_precondition_violation());

        // every context that does exist reduces without panicking
        let ctx = RingContext::with_modulus(4, RingElement::from_coeffs(vec![1, 0, 0, 0, 1])).unwrap();
        let mut x5 = RingElement::zero(6);
        x5.set_coeff(5, 1);
        x5.reduce_mod(ctx.poly_mod());
        assert_eq!(x5, RingElement::from_coeffs(vec![0, -1]));
    }

    #[test]
    fn test_ensure_same() {
        let a = RingContext::new(8).unwrap();
        let b = RingContext::new(8).unwrap();
        let c = RingContext::new(16).unwrap();
        assert!(RingContext::ensure_same(&a, &a.clone()).is_ok());
        assert!(RingContext::ensure_same(&a, &b).is_ok());
        assert!(matches!(RingContext::ensure_same(&a, &c), Err(MorphError::ContextMismatch)));
    }
}
