//! Instance parameters: ring dimension and the sampling distributions.

use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};

/// Coefficient distribution used when sampling a ring element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform over `[-bound, bound]`.
    Uniform {
        /// Largest magnitude drawn.
        bound: u32,
    },
    /// Rounded centered normal.
    Gaussian {
        /// Standard deviation before rounding.
        sigma: f64,
    },
    /// Uniform over `{-1, 0, 1}`.
    Ternary,
}

/// Everything needed to build a [`crate::RingContext`] and a [`crate::SecretKey`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Ring dimension `n`; the reduction polynomial is `x^n + 1`.
    pub dimension: usize,
    /// Mask term `a`.
    pub distribution_a: Distribution,
    /// Error term `e`.
    pub distribution_e: Distribution,
    /// Secret element.
    pub distribution_s: Distribution,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            dimension: 64,
            distribution_a: Distribution::Uniform { bound: 1 << 16 },
            distribution_e: Distribution::Gaussian { sigma: 3.2 },
            distribution_s: Distribution::Ternary,
        }
    }
}

impl Params {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(src: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(src)
            .map_err(|e| MorphError::InvalidParameters(format!("malformed parameter file: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects parameter sets no instance can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(MorphError::InvalidParameters("ring dimension must be positive".into()));
        }
        if let Distribution::Uniform { bound: 0 } = self.distribution_a {
            return Err(MorphError::InvalidParameters("mask distribution must not be constant zero".into()));
        }
        for (name, dist) in [
            ("distribution_a", &self.distribution_a),
            ("distribution_e", &self.distribution_e),
            ("distribution_s", &self.distribution_s),
        ] {
            if let Distribution::Gaussian { sigma } = *dist {
                if !sigma.is_finite() || sigma <= 0.0 {
                    return Err(MorphError::InvalidParameters(format!("{name}: sigma must be positive, got {sigma}")));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Params::default().validate().unwrap();
    }

    #[test]
    fn test_from_json_partial() {
        let params = Params::from_json(r#"{ "dimension": 16, "distribution_e": { "kind": "gaussian", "sigma": 1.5 } }"#).unwrap();
        assert_eq!(params.dimension, 16);
        assert_eq!(params.distribution_e, Distribution::Gaussian { sigma: 1.5 });
        assert_eq!(params.distribution_a, Params::default().distribution_a);
        assert_eq!(params.distribution_s, Distribution::Ternary);
    }

    #[test]
    fn test_rejects_bad_params() {
        let zero_dim = Params { dimension: 0, ..Params::default() };
        assert!(matches!(zero_dim.validate(), Err(MorphError::InvalidParameters(_))));

        let zero_mask = Params { distribution_a: Distribution::Uniform { bound: 0 }, ..Params::default() };
        assert!(zero_mask.validate().is_err());

        let bad_sigma = Params { distribution_e: Distribution::Gaussian { sigma: -1.0 }, ..Params::default() };
        assert!(bad_sigma.validate().is_err());

        assert!(Params::from_json("{ not json").is_err());
    }
}
