use ndarray::{Array1, Array2};
use rand::Rng;
use tracing::debug;

use crate::config::check_size;
use crate::error::{Result, SamplerError};
use crate::matrix::{cholesky_lower, invert_spd};
use crate::types::{CoefficientVarianceSample, LinearModelFit};
use crate::utils::{rinvgamma, rnorm_vec};

/// Posterior sampler for (σ², β) of a linear model under the reference prior.
///
/// σ² | y ~ InvGamma((n - p)/2, eᵗe/2) and β | σ², y ~ N(β̂, σ²(XᵗX)⁻¹).
/// Everything that does not depend on σ² is computed once in [`new`].
///
/// [`new`]: CoefficientSampler::new
#[derive(Debug, Clone)]
pub struct CoefficientSampler {
    beta_hat: Array1<f64>,
    // Lower factor of (XᵗX)⁻¹; scaled by s per draw
    xtx_inv_chol: Array2<f64>,
    shape: f64,
    rate: f64,
}

impl CoefficientSampler {
    pub fn new(fit: &LinearModelFit) -> Result<Self> {
        let n = fit.n_obs();
        let p = fit.n_coef();

        if fit.coefficients.len() != p || fit.residuals.len() != n {
            return Err(SamplerError::invalid(format!(
                "fit pieces disagree with the {n}x{p} design"
            )));
        }
        if p == 0 {
            return Err(SamplerError::invalid("design matrix has no columns"));
        }
        if n <= p {
            return Err(SamplerError::SingularDesignMatrix { n, p });
        }

        let xtx = fit.x.t().dot(&fit.x);
        let xtx_inv =
            invert_spd(&xtx.view()).ok_or(SamplerError::SingularDesignMatrix { n, p })?;
        let xtx_inv_chol =
            cholesky_lower(&xtx_inv.view()).ok_or(SamplerError::SingularDesignMatrix { n, p })?;

        let shape = fit.df_resid() as f64 / 2.0;
        let rate = fit.rss() / 2.0;
        // 1/rate must stay finite or every gamma draw overflows to inf.
        if !(rate > 0.0 && rate.is_finite() && (1.0 / rate).is_finite()) {
            return Err(SamplerError::invalid(format!(
                "residual sum of squares must be positive and finite, got {}",
                fit.rss()
            )));
        }

        debug!(n, p, shape, rate, "coefficient sampler ready");

        Ok(Self {
            beta_hat: fit.coefficients.clone(),
            xtx_inv_chol,
            shape,
            rate,
        })
    }

    pub fn n_coef(&self) -> usize {
        self.beta_hat.len()
    }

    /// Inverse-gamma shape (n - p)/2
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Inverse-gamma rate eᵗe/2
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// One joint draw: σ² first, then β conditional on it.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(f64, Array1<f64>)> {
        let s2 = rinvgamma(rng, self.shape, self.rate)?;
        let z = rnorm_vec(rng, self.n_coef());

        // chol(s² A) = s chol(A)
        let beta = &self.beta_hat + &(self.xtx_inv_chol.dot(&z) * s2.sqrt());
        Ok((s2, beta))
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<CoefficientVarianceSample> {
        check_size(size)?;

        let p = self.n_coef();
        let mut variances = Array1::<f64>::zeros(size);
        let mut coefficients = Array2::<f64>::zeros((size, p));

        for i in 0..size {
            let (s2, beta) = self.draw(rng)?;
            variances[i] = s2;
            coefficients.row_mut(i).assign(&beta);
        }

        debug!(size, p, "coefficient draws completed");

        Ok(CoefficientVarianceSample {
            variances,
            coefficients,
        })
    }
}

/// Draw `size` joint (σ², β) samples from the posterior of a linear model fit.
pub fn sample_model_params<R: Rng + ?Sized>(
    size: usize,
    fit: &LinearModelFit,
    rng: &mut R,
) -> Result<CoefficientVarianceSample> {
    check_size(size)?;
    CoefficientSampler::new(fit)?.run(size, rng)
}
