use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{Result, SamplerError};

/// Per-column summary of a draw matrix (one row per draw)
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSummary {
    pub mean: Array1<f64>,
    pub sd: Array1<f64>,
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
    /// Mass of the equal-tailed interval [lower, upper]
    pub level: f64,
}

/// Summarize each column of `draws` with its mean, standard deviation and an
/// equal-tailed credible interval holding `level` of the posterior mass.
pub fn summarize(draws: &ArrayView2<f64>, level: f64) -> Result<PosteriorSummary> {
    if !(level > 0.0 && level < 1.0) {
        return Err(SamplerError::invalid(format!(
            "credible level must lie in (0, 1), got {level}"
        )));
    }
    let (n, k) = draws.dim();
    if n == 0 {
        return Err(SamplerError::invalid("cannot summarize zero draws"));
    }

    let tail = (1.0 - level) / 2.0;
    let mut mean = Array1::<f64>::zeros(k);
    let mut sd = Array1::<f64>::zeros(k);
    let mut lower = Array1::<f64>::zeros(k);
    let mut upper = Array1::<f64>::zeros(k);

    for j in 0..k {
        let col = draws.column(j);
        let m = col.sum() / n as f64;
        mean[j] = m;
        sd[j] = if n > 1 {
            (col.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n as f64 - 1.0)).sqrt()
        } else {
            0.0
        };

        let mut sorted = col.to_vec();
        sorted.sort_by(f64::total_cmp);
        lower[j] = quantile_sorted(&sorted, tail);
        upper[j] = quantile_sorted(&sorted, 1.0 - tail);
    }

    Ok(PosteriorSummary {
        mean,
        sd,
        lower,
        upper,
        level,
    })
}

/// Linear interpolation between order statistics
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Calculate effective sample size (ESS)
///
/// Simple estimator: n / (1 + 2 * sum of autocorrelations), truncated at
/// the first lag whose autocorrelation is below 0.05 in magnitude.
///
/// The samplers here return independent draws, so the ESS of any output
/// column should sit close to its length. A value well below that points
/// at a random stream shared or reused across draws.
pub fn effective_size(samples: &ArrayView1<f64>) -> f64 {
    let n = samples.len();
    if n < 10 {
        return n as f64;
    }

    let mean = samples.sum() / n as f64;
    let centred: Vec<f64> = samples.iter().map(|x| x - mean).collect();
    let var = centred.iter().map(|d| d * d).sum::<f64>() / (n as f64 - 1.0);
    if var < 1e-10 {
        return n as f64;
    }

    let rho_sum: f64 = (1..n / 2)
        .map(|lag| {
            let num: f64 = centred.iter().zip(&centred[lag..]).map(|(a, b)| a * b).sum();
            num / ((n - lag) as f64 * var)
        })
        .take_while(|rho| rho.abs() >= 0.05)
        .sum();

    n as f64 / (1.0 + 2.0 * rho_sum)
}
