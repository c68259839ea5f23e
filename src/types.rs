use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Result, SamplerError};
use crate::matrix::unpack_symmetric;

/// Least-squares fit of a linear model, produced by the caller
#[derive(Debug, Clone)]
pub struct LinearModelFit {
    /// Design matrix X (n x p)
    pub x: Array2<f64>,
    /// Response y (n)
    pub y: Array1<f64>,
    /// Point-estimate coefficients β̂ (p)
    pub coefficients: Array1<f64>,
    /// Residuals e = y - Xβ̂ (n)
    pub residuals: Array1<f64>,
}

impl LinearModelFit {
    /// Bundle a fit, checking that the pieces agree in shape and are finite.
    ///
    /// Rank and degrees of freedom are checked by the sampler, which reports
    /// them as `SingularDesignMatrix`.
    pub fn new(
        x: Array2<f64>,
        y: Array1<f64>,
        coefficients: Array1<f64>,
        residuals: Array1<f64>,
    ) -> Result<Self> {
        let (n, p) = x.dim();
        if y.len() != n || residuals.len() != n {
            return Err(SamplerError::invalid(format!(
                "design has {n} rows but y has {} and residuals have {}",
                y.len(),
                residuals.len()
            )));
        }
        if coefficients.len() != p {
            return Err(SamplerError::invalid(format!(
                "design has {p} columns but {} coefficients were given",
                coefficients.len()
            )));
        }
        if p == 0 {
            return Err(SamplerError::invalid("design matrix has no columns"));
        }
        let all_finite = x.iter().all(|v| v.is_finite())
            && y.iter().all(|v| v.is_finite())
            && coefficients.iter().all(|v| v.is_finite())
            && residuals.iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(SamplerError::invalid("fit contains non-finite values"));
        }

        Ok(Self {
            x,
            y,
            coefficients,
            residuals,
        })
    }

    pub fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_coef(&self) -> usize {
        self.x.ncols()
    }

    /// Residual degrees of freedom n - p (zero when p >= n)
    pub fn df_resid(&self) -> usize {
        self.n_obs().saturating_sub(self.n_coef())
    }

    /// Residual sum of squares eᵗe
    pub fn rss(&self) -> f64 {
        self.residuals.dot(&self.residuals)
    }
}

/// Joint posterior draws of residual variance and coefficients.
///
/// Row `i` of `coefficients` was drawn conditional on `variances[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVarianceSample {
    pub variances: Array1<f64>,
    pub coefficients: Array2<f64>,
}

impl CoefficientVarianceSample {
    pub fn len(&self) -> usize {
        self.variances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variances.is_empty()
    }
}

/// Posterior draws of a normal mean and covariance.
///
/// Row `i` of `sigmas` is a covariance packed as the row-major lower
/// triangle (see [`crate::matrix::pack_symmetric`]); row `i` of `means` was
/// drawn conditional on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MvnParameterSample {
    pub means: Array2<f64>,
    pub sigmas: Array2<f64>,
}

impl MvnParameterSample {
    pub fn len(&self) -> usize {
        self.means.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.means.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.means.ncols()
    }

    /// Unpack covariance draw `i` into a full d x d matrix
    pub fn covariance(&self, i: usize) -> Result<Array2<f64>> {
        if i >= self.len() {
            return Err(SamplerError::invalid(format!(
                "draw {i} out of range for {} draws",
                self.len()
            )));
        }
        let row: ArrayView1<f64> = self.sigmas.row(i);
        unpack_symmetric(&row.to_vec())
    }
}
