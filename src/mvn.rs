use ndarray::{Array1, Array2, ArrayView2};
use rand::Rng;
use tracing::debug;

use crate::config::check_size;
use crate::error::{Result, SamplerError};
use crate::matrix::{
    cholesky_lower, column_means, invert_spd, pack_symmetric, packed_len, scatter_matrix,
    symmetrize,
};
use crate::types::MvnParameterSample;
use crate::utils::{rinvwishart, rmvnorm};

/// Posterior sampler for the mean and covariance of multivariate normal data.
///
/// Each draw takes Σ ~ InvWishart(n - 1, S) straight from its marginal
/// posterior, then μ | Σ ~ N(ȳ, Σ/n). Draws are independent of each other;
/// there is no chain.
#[derive(Debug, Clone)]
pub struct MvnParamSampler {
    n: usize,
    ybar: Array1<f64>,
    // Lower factor of S⁻¹, the Wishart scale of the precision Σ⁻¹
    scale_chol: Array2<f64>,
    df: f64,
}

impl MvnParamSampler {
    pub fn new(data: &ArrayView2<f64>) -> Result<Self> {
        let (n, d) = data.dim();

        if d < 1 {
            return Err(SamplerError::invalid("data has no columns"));
        }
        if n < 1 {
            return Err(SamplerError::invalid("data has no rows"));
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(SamplerError::invalid("data contains non-finite values"));
        }
        if n <= d + 1 {
            return Err(SamplerError::SingularScatterMatrix { n, d });
        }

        let ybar = column_means(data);
        let scatter = scatter_matrix(data, &ybar);
        let scatter_inv =
            invert_spd(&scatter.view()).ok_or(SamplerError::SingularScatterMatrix { n, d })?;
        let scale_chol = cholesky_lower(&scatter_inv.view())
            .ok_or(SamplerError::SingularScatterMatrix { n, d })?;

        let df = (n - 1) as f64;
        debug!(n, d, df, "mvn parameter sampler ready");

        Ok(Self {
            n,
            ybar,
            scale_chol,
            df,
        })
    }

    pub fn dim(&self) -> usize {
        self.ybar.len()
    }

    /// Column means ȳ
    pub fn mean(&self) -> &Array1<f64> {
        &self.ybar
    }

    /// Inverse-Wishart degrees of freedom n - 1
    pub fn df(&self) -> f64 {
        self.df
    }

    /// One draw: Σ from its marginal posterior, then μ given that Σ.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Array1<f64>, Array2<f64>)> {
        let sigma = symmetrize(rinvwishart(rng, self.df, &self.scale_chol.view())?);

        let mean_cov = &sigma / self.n as f64;
        let mean_chol = cholesky_lower(&mean_cov.view()).ok_or_else(|| {
            SamplerError::Distribution("covariance draw is not positive definite".to_string())
        })?;
        let mu = rmvnorm(rng, &self.ybar.view(), &mean_chol.view());

        Ok((mu, sigma))
    }

    pub fn run<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<MvnParameterSample> {
        check_size(size)?;

        let d = self.dim();
        let mut means = Array2::<f64>::zeros((size, d));
        let mut sigmas = Array2::<f64>::zeros((size, packed_len(d)));

        for i in 0..size {
            let (mu, sigma) = self.draw(rng)?;
            means.row_mut(i).assign(&mu);
            sigmas.row_mut(i).assign(&pack_symmetric(&sigma.view())?);
        }

        debug!(size, d, "mvn parameter draws completed");
        Ok(MvnParameterSample { means, sigmas })
    }
}

/// Draw `size` posterior (μ, Σ) pairs for n x d data; Σ rows come back packed.
pub fn sample_mvn_params<R: Rng + ?Sized>(
    size: usize,
    data: &ArrayView2<f64>,
    rng: &mut R,
) -> Result<MvnParameterSample> {
    check_size(size)?;
    MvnParamSampler::new(data)?.run(size, rng)
}
