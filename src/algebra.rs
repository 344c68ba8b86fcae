//! Homomorphic add / mult.  Multiplication grows ciphertexts by convolution.

use std::sync::Arc;

use itertools::{iproduct, EitherOrBoth, Itertools};
use tracing::{debug, instrument};

use crate::cipher::Cipher;
use crate::context::RingContext;
use crate::error::{MorphError, Result};

/// Evaluator bound to one ring context.
#[derive(Clone, Debug)]
pub struct Algebra {
    ctx: Arc<RingContext>,
}

impl Algebra {
    /// Evaluator for ciphertexts created under `ctx`.
    #[must_use]
    pub fn new(ctx: &Arc<RingContext>) -> Self {
        Self { ctx: Arc::clone(ctx) }
    }

    fn check(&self, c: &Cipher) -> Result<()> {
        RingContext::ensure_same(&self.ctx, c.context())
    }

    /// Slot-wise sum; decrypts to the XOR of the operands.
    pub fn add(&self, op0: &Cipher, op1: &Cipher) -> Result<Cipher> {
        let mut result = Cipher::new(&self.ctx, 0)?;
        self.add_into(&mut result, op0, op1)?;
        Ok(result)
    }

    /// `result ← op0 + op1`, sized `max(|op0|, |op1|)`.
    ///
    /// Where only one operand has an element the element is copied over.
    #[instrument(skip_all)]
    pub fn add_into(&self, result: &mut Cipher, op0: &Cipher, op1: &Cipher) -> Result<()> {
        self.check(result)?;
        self.check(op0)?;
        self.check(op1)?;

        let size = op0.size().max(op1.size());
        result.resize(size)?;
        for (i, pair) in op0.iter().zip_longest(op1.iter()).enumerate() {
            let slot = result.slot_mut(i)?;
            match pair {
                EitherOrBoth::Both(a, b) => {
                    slot.copy_from(a);
                    *slot += b;
                }
                EitherOrBoth::Left(a) | EitherOrBoth::Right(a) => slot.copy_from(a),
            }
        }
        result.depth = op0.depth.max(op1.depth);
        debug!(size, depth = result.depth, "homomorphic add");
        Ok(())
    }

    /// `acc ← acc + op`, the in-place form of [`Algebra::add_into`].
    #[instrument(skip_all)]
    pub fn add_assign(&self, acc: &mut Cipher, op: &Cipher) -> Result<()> {
        self.check(acc)?;
        self.check(op)?;

        let old = acc.size();
        acc.resize(old.max(op.size()))?;
        for (i, b) in op.iter().enumerate() {
            let slot = acc.slot_mut(i)?;
            if i < old {
                *slot += b;
            } else {
                slot.copy_from(b);
            }
        }
        acc.depth = acc.depth.max(op.depth);
        debug!(size = acc.size(), depth = acc.depth, "homomorphic add (in place)");
        Ok(())
    }

    /// Tensor product; decrypts to the product of the operands.
    pub fn mult(&self, op0: &Cipher, op1: &Cipher) -> Result<Cipher> {
        let mut result = Cipher::new(&self.ctx, 0)?;
        self.mult_into(&mut result, op0, op1)?;
        Ok(result)
    }

    /// `result ← op0 ⊗ op1`, sized `|op0| + |op1| - 1`.
    ///
    /// Slot `k` collects every `op0[i]·op1[j]` with `i + j = k`, which is
    /// the coefficient of `s^k` in the product of the two decryption
    /// polynomials. `result` is exclusively borrowed, so it cannot be one
    /// of the operands:
    ///
    /// ```compile_fail
    /// use morph_core::{Algebra, Cipher};
    ///
    /// fn square_in_place(alg: &Algebra, c: &mut Cipher, d: &Cipher) {
    ///     alg.mult_into(c, c, d).unwrap();
    /// }
    /// ```
    #[instrument(skip_all)]
    pub fn mult_into(&self, result: &mut Cipher, op0: &Cipher, op1: &Cipher) -> Result<()> {
        self.check(result)?;
        self.check(op0)?;
        self.check(op1)?;
        if op0.is_empty() || op1.is_empty() {
            return Err(MorphError::EmptyCiphertext);
        }

        let size = op0.size() + op1.size() - 1;
        result.resize(size)?;
        for k in 0..size {
            result.slot_mut(k)?.reset();
        }

        let mut tmp = self.ctx.zero()?;
        for ((i, a), (j, b)) in iproduct!(op0.iter().enumerate(), op1.iter().enumerate()) {
            a.mul_into(b, &mut tmp);
            *result.slot_mut(i + j)? += &tmp;
        }
        result.depth = op0.depth.max(op1.depth) + 1;
        debug!(size, depth = result.depth, "homomorphic mult");
        Ok(())
    }
}
