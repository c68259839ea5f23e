use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rand_distr::{ChiSquared, Dirichlet, Distribution, Gamma, StandardNormal};

use crate::error::{Result, SamplerError};
use crate::matrix::invert_spd;

fn rejected<E: std::fmt::Debug>(err: E) -> SamplerError {
    SamplerError::Distribution(format!("{err:?}"))
}

/// Sample from inverse-gamma distribution
///
/// InvGamma(shape, rate) is 1 / Gamma(shape, rate). rand_distr's Gamma takes
/// a scale, so it is built with scale = 1 / rate.
pub fn rinvgamma<R: Rng + ?Sized>(rng: &mut R, shape: f64, rate: f64) -> Result<f64> {
    let gamma_dist = Gamma::new(shape, 1.0 / rate).map_err(rejected)?;
    let draw = 1.0 / gamma_dist.sample(rng);
    if !(draw > 0.0 && draw.is_finite()) {
        return Err(SamplerError::Distribution(format!(
            "inverse-gamma draw {draw} for shape = {shape}, rate = {rate}"
        )));
    }
    Ok(draw)
}

/// Sample a vector of independent standard normals
pub fn rnorm_vec<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Array1<f64> {
    Array1::from_shape_fn(len, |_| StandardNormal.sample(rng))
}

/// Sample from Dirichlet distribution
pub fn rdirichlet<R: Rng + ?Sized>(rng: &mut R, alpha: &[f64]) -> Result<Array1<f64>> {
    let dirichlet = Dirichlet::new(alpha).map_err(rejected)?;
    let sample: Vec<f64> = dirichlet.sample(rng);
    Ok(Array1::from_vec(sample))
}

/// Bartlett factor M = L A of a Wishart(df, scale) draw, where `scale_chol`
/// is the lower Cholesky factor L of the scale. The draw itself is M Mᵗ.
///
/// A is lower triangular with A_ii = sqrt(χ²(df - i)) and A_ij ~ N(0, 1)
/// below the diagonal; df must exceed d - 1.
pub fn rwishart_lower<R: Rng + ?Sized>(
    rng: &mut R,
    df: f64,
    scale_chol: &ArrayView2<f64>,
) -> Result<Array2<f64>> {
    let d = scale_chol.nrows();
    if !(df > d as f64 - 1.0) {
        return Err(SamplerError::Distribution(format!(
            "Wishart needs df > d - 1, got df = {df}, d = {d}"
        )));
    }

    let mut bartlett = Array2::<f64>::zeros((d, d));
    for i in 0..d {
        let chi2 = ChiSquared::new(df - i as f64).map_err(rejected)?;
        bartlett[[i, i]] = chi2.sample(rng).sqrt();
        for j in 0..i {
            bartlett[[i, j]] = StandardNormal.sample(rng);
        }
    }

    Ok(scale_chol.dot(&bartlett))
}

/// Sample from inverse-Wishart distribution
///
/// `scale_chol` is the lower Cholesky factor of the Wishart scale of the
/// precision: the result is Σ = W⁻¹ with W ~ Wishart(df, scale). With
/// scale = S⁻¹ this is the usual InvWishart(df, S) posterior for Σ.
pub fn rinvwishart<R: Rng + ?Sized>(
    rng: &mut R,
    df: f64,
    scale_chol: &ArrayView2<f64>,
) -> Result<Array2<f64>> {
    let m = rwishart_lower(rng, df, scale_chol)?;
    let w = m.dot(&m.t());
    invert_spd(&w.view()).ok_or_else(|| {
        SamplerError::Distribution("Wishart draw is numerically singular".to_string())
    })
}

/// Sample from multivariate normal given the lower Cholesky factor of the
/// covariance
pub fn rmvnorm<R: Rng + ?Sized>(
    rng: &mut R,
    mean: &ArrayView1<f64>,
    cov_chol: &ArrayView2<f64>,
) -> Array1<f64> {
    let z = rnorm_vec(rng, mean.len());
    cov_chol.dot(&z) + mean
}
