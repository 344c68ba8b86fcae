//! Bit encoding of 32-bit integers: coefficient `i` carries bit `i`.

use crate::error::{MorphError, Result};
use crate::polynomial::RingElement;

/// Number of coefficients an encoded word occupies.
pub const WORD_BITS: usize = 32;

/// Element with coefficient `i` set to bit `i` of `message`.
#[must_use]
pub fn encode_u32(message: u32) -> RingElement {
    let mut coded = RingElement::zero(WORD_BITS);
    for i in 0..WORD_BITS {
        coded.set_coeff(i, i64::from((message >> i) & 1));
    }
    coded
}

/// Reads the low 32 coefficients back as bits; higher ones are ignored.
///
/// Expects a mod-2 reduced element: any inspected coefficient outside
/// `{-1, 0, 1}` means the caller skipped the reduction.
pub fn decode_u32(coded: &RingElement) -> Result<u32> {
    let len = coded.degree().min(WORD_BITS);
    coded.coeffs()[..len]
        .iter()
        .enumerate()
        .try_fold(0u32, |acc, (index, &value)| match value {
            0 => Ok(acc),
            -1 | 1 => Ok(acc | (1 << index)),
            _ => Err(MorphError::UnreducedCoefficient { index, value }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_encode_layout() {
        let coded = encode_u32(0b101);
        let mut expected = vec![0; WORD_BITS];
        expected[0] = 1;
        expected[2] = 1;
        assert_eq!(coded.coeffs(), expected.as_slice());
        assert_eq!(decode_u32(&coded).unwrap(), 5);
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(32);
        for m in [0, 1, u32::MAX, 1 << 31, 0xdead_beef] {
            assert_eq!(decode_u32(&encode_u32(m)).unwrap(), m);
        }
        for _ in 0..200 {
            let m: u32 = rng.gen();
            assert_eq!(decode_u32(&encode_u32(m)).unwrap(), m);
        }
    }

    #[test]
    fn test_decode_accepts_negative_one() {
        let coded = RingElement::from_coeffs(vec![-1, 0, 1, -1]);
        assert_eq!(decode_u32(&coded).unwrap(), 0b1101);
    }

    #[test]
    fn test_decode_ignores_high_coefficients() {
        let mut coded = encode_u32(9);
        coded.set_coeff(WORD_BITS, 1);
        coded.set_coeff(WORD_BITS + 5, 7);
        assert_eq!(decode_u32(&coded).unwrap(), 9);
    }

    #[test]
    fn test_decode_rejects_unreduced() {
        let coded = RingElement::from_coeffs(vec![1, 0, 2]);
        let err = decode_u32(&coded).unwrap_err();
        assert!(err.is_precondition_violation());
        assert!(matches!(err, MorphError::UnreducedCoefficient { index: 2, value: 2 }));
    }
}
