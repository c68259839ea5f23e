use ndarray::Array2;
use rand::Rng;
use tracing::debug;

use crate::config::check_size;
use crate::error::{Result, SamplerError};
use crate::utils::rdirichlet;

/// Posterior sampler for multinomial proportions under a uniform
/// Dirichlet(1, ..., 1) prior, i.e. draws from Dirichlet(counts + 1).
#[derive(Debug, Clone)]
pub struct ProportionSampler {
    alpha: Vec<f64>,
}

impl ProportionSampler {
    pub fn new(counts: &[i64]) -> Result<Self> {
        if counts.is_empty() {
            return Err(SamplerError::invalid("count vector has no categories"));
        }
        if let Some((idx, c)) = counts.iter().enumerate().find(|&(_, &c)| c < 0) {
            return Err(SamplerError::invalid(format!(
                "count {idx} is negative ({c})"
            )));
        }

        let alpha: Vec<f64> = counts.iter().map(|&c| c as f64 + 1.0).collect();
        debug!(k = alpha.len(), "proportion sampler ready");
        Ok(Self { alpha })
    }

    pub fn n_categories(&self) -> usize {
        self.alpha.len()
    }

    /// Posterior concentration counts + 1
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    pub fn run<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Array2<f64>> {
        check_size(size)?;

        let k = self.n_categories();
        // A single category has a one-point simplex.
        if k == 1 {
            return Ok(Array2::<f64>::ones((size, 1)));
        }

        let mut proportions = Array2::<f64>::zeros((size, k));
        for i in 0..size {
            let draw = rdirichlet(rng, &self.alpha)?;
            proportions.row_mut(i).assign(&draw);
        }

        debug!(size, k, "proportion draws completed");
        Ok(proportions)
    }
}

/// Draw `size` posterior proportion vectors for the given category counts.
///
/// Each row of the result lies on the probability simplex.
pub fn sample_multinomial_params<R: Rng + ?Sized>(
    size: usize,
    counts: &[i64],
    rng: &mut R,
) -> Result<Array2<f64>> {
    check_size(size)?;
    ProportionSampler::new(counts)?.run(size, rng)
}

/// Retired name of [`sample_multinomial_params`]. Always fails.
#[deprecated(note = "renamed to `sample_multinomial_params`")]
pub fn sample_proportions<R: Rng + ?Sized>(
    _size: usize,
    _counts: &[i64],
    _rng: &mut R,
) -> Result<Array2<f64>> {
    Err(SamplerError::RenamedFunction {
        old: "sample_proportions",
        new: "sample_multinomial_params",
    })
}

/// Retired name of [`sample_multinomial_params`]. Always fails.
#[deprecated(note = "renamed to `sample_multinomial_params`")]
pub fn sample_multinomial<R: Rng + ?Sized>(
    _size: usize,
    _counts: &[i64],
    _rng: &mut R,
) -> Result<Array2<f64>> {
    Err(SamplerError::RenamedFunction {
        old: "sample_multinomial",
        new: "sample_multinomial_params",
    })
}
