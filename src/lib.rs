//! Posterior parameter draws for three conjugate models:
//!
//! - linear regression: joint (σ², β) draws from a least-squares fit
//! - multinomial proportions: Dirichlet(counts + 1) draws
//! - multivariate normal: inverse-Wishart covariance and conditional mean
//!
//! Every sampler takes the random stream explicitly, so the same seed gives
//! the same draws and workers can each own a generator.
//!
//! ```
//! use conjugate_draws::{sample_multinomial_params, SamplingConfig};
//!
//! let config = SamplingConfig::new(100, 7).unwrap();
//! let mut rng = config.rng();
//! let draws = sample_multinomial_params(config.size, &[727, 583, 137], &mut rng).unwrap();
//! assert_eq!(draws.dim(), (100, 3));
//! ```

mod config;
mod dirichlet;
mod error;
mod gibbs;
pub mod matrix;
mod mvn;
pub mod summary;
mod types;
pub mod utils;

pub use config::SamplingConfig;
#[allow(deprecated)]
pub use dirichlet::{sample_multinomial, sample_proportions};
pub use dirichlet::{sample_multinomial_params, ProportionSampler};
pub use error::{Result, SamplerError};
pub use gibbs::{sample_model_params, CoefficientSampler};
pub use matrix::{pack_symmetric, packed_len, unpack_symmetric};
pub use mvn::{sample_mvn_params, MvnParamSampler};
pub use summary::{effective_size, summarize, PosteriorSummary};
pub use types::{CoefficientVarianceSample, LinearModelFit, MvnParameterSample};
