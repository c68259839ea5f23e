use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::error::{Result, SamplerError};

/// Options shared by every sampler: how many draws, and the seed of the
/// random stream they are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub size: usize,
    pub seed: u64,
}

impl SamplingConfig {
    pub fn new(size: usize, seed: u64) -> Result<Self> {
        let config = Self { size, seed };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_size(self.size)
    }

    /// Fresh generator positioned at the start of this config's stream
    pub fn rng(&self) -> Pcg64 {
        Pcg64::seed_from_u64(self.seed)
    }
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size < 1 {
        return Err(SamplerError::invalid("sample size must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            SamplingConfig::new(0, 1),
            Err(SamplerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rng_restarts_the_stream() {
        let config = SamplingConfig::new(5, 42).unwrap();
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
