//! MORPH ― somewhat homomorphic secret-key encryption over polynomial rings
//!
//! A ciphertext `(c₀, …, c_{k-1})` decrypts as `Σ sⁱ·cᵢ mod f(x)`, reduced
//! mod 2. Addition and multiplication act slot-wise and by convolution, so
//! decryption of sums and products yields XOR and AND of the plaintext bits.
//! There is no relinearization or refresh: ciphertexts grow with every
//! multiplication.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, missing_docs)]

pub mod algebra;
pub mod cipher;
pub mod codec;
pub mod context;
pub mod error;
pub mod params;
pub mod polynomial;
pub mod scheme;

pub use algebra::Algebra;
pub use cipher::Cipher;
pub use codec::{decode_u32, encode_u32};
pub use context::RingContext;
pub use error::{MorphError, Result};
pub use params::{Distribution, Params};
pub use polynomial::RingElement;
pub use scheme::SecretKey;
