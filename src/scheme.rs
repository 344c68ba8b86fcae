//! Encryption & decryption.

use std::fmt;
use std::mem;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::cipher::Cipher;
use crate::codec::{decode_u32, encode_u32, WORD_BITS};
use crate::context::RingContext;
use crate::error::{MorphError, Result};
use crate::params::{Distribution, Params};
use crate::polynomial::RingElement;

/// Secret element plus the distributions encryption samples from.
pub struct SecretKey {
    ctx: Arc<RingContext>,
    secret: RingElement,
    distribution_a: Distribution,
    distribution_e: Distribution,
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("n", &self.ctx.n())
            .field("distribution_a", &self.distribution_a)
            .field("distribution_e", &self.distribution_e)
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Samples a fresh secret from `params.distribution_s`.
    #[instrument(skip_all)]
    pub fn generate<R: Rng + ?Sized>(ctx: &Arc<RingContext>, params: &Params, rng: &mut R) -> Result<Self> {
        params.validate()?;
        if params.dimension != ctx.n() {
            return Err(MorphError::InvalidParameters(format!(
                "parameter dimension {} does not match ring dimension {}",
                params.dimension, ctx.n()
            )));
        }
        let secret = RingElement::sample(&params.distribution_s, ctx.n(), rng)?;
        debug!(n = ctx.n(), "generated secret key");
        Ok(Self::from_secret(ctx, secret, params.distribution_a, params.distribution_e))
    }

    /// Wraps a caller-chosen secret element.
    #[must_use]
    pub fn from_secret(
        ctx: &Arc<RingContext>,
        secret: RingElement,
        distribution_a: Distribution,
        distribution_e: Distribution,
    ) -> Self {
        Self {
            ctx: Arc::clone(ctx),
            secret,
            distribution_a,
            distribution_e,
        }
    }

    /// Context the key belongs to.
    #[must_use]
    pub fn context(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    /// Encrypt a plaintext element  →  (s·a + 2e + m, −a)
    #[instrument(skip_all)]
    pub fn encrypt<R: Rng + ?Sized>(&self, message: &RingElement, rng: &mut R) -> Result<Cipher> {
        let n = self.ctx.n();
        let mut a = RingElement::sample(&self.distribution_a, n, rng)?;

        // even error vanishes under the final mod-2 reduction
        let mut e = RingElement::sample(&self.distribution_e, n, rng)?;
        e.scale(2);

        let mut c1 = &self.secret * &a;
        c1 += &e;
        c1 += message;
        drop(e);

        a.negate();
        Ok(Cipher::from_elements(&self.ctx, vec![c1, a]))
    }

    /// Decrypts `ct` into `out`: Σ sⁱ·ctᵢ mod (poly_mod), then mod 2.
    ///
    /// `out` is cleared first; its allocation is reused.
    #[instrument(skip_all)]
    pub fn decrypt(&self, ct: &Cipher, out: &mut RingElement) -> Result<()> {
        RingContext::ensure_same(&self.ctx, ct.context())?;
        if ct.is_empty() {
            return Err(MorphError::EmptyCiphertext);
        }
        out.reset();

        let mut pow_s = RingElement::constant(1);
        let mut scratch = self.ctx.zero()?;
        let last = ct.size() - 1;
        for (i, c) in ct.iter().enumerate() {
            pow_s.mul_into(c, &mut scratch);
            *out += &scratch;
            // reduce after every term, before the next power is folded in
            out.reduce_mod(self.ctx.poly_mod());
            trace!(term = i, degree = out.degree(), "accumulated");

            if i < last {
                pow_s.mul_into(&self.secret, &mut scratch);
                mem::swap(&mut pow_s, &mut scratch);
            }
        }

        out.reduce_coeffs_mod(2);
        Ok(())
    }

    /// [`SecretKey::decrypt`] into a fresh element.
    pub fn decrypt_element(&self, ct: &Cipher) -> Result<RingElement> {
        let mut out = self.ctx.zero()?;
        self.decrypt(ct, &mut out)?;
        Ok(out)
    }

    /// Bit-encodes and encrypts a 32-bit word.
    pub fn encrypt_u32<R: Rng + ?Sized>(&self, message: u32, rng: &mut R) -> Result<Cipher> {
        if self.ctx.n() < WORD_BITS {
            return Err(MorphError::InvalidParameters(format!(
                "ring dimension {} cannot hold a {WORD_BITS}-bit word",
                self.ctx.n()
            )));
        }
        self.encrypt(&encode_u32(message), rng)
    }

    /// Decrypts and bit-decodes a 32-bit word.
    pub fn decrypt_u32(&self, ct: &Cipher) -> Result<u32> {
        decode_u32(&self.decrypt_element(ct)?)
    }
}
