use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::embedding::{validate_fit_params, Embedder, Embedding};
use crate::errors::{EmbeddingError, Result};
use crate::growth::DEFAULT_GAMMA;
use crate::metric::DistanceMatrix;

/// Embedding configuration.
///
/// Missing fields fall back to the defaults when deserialised:
/// `dimensions = 8`, `p = 2.0`, `gamma = 64.0`, no fixed seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingParams {
    /// Number of output coordinates `D`.
    pub dimensions: usize,
    /// Norm parameter of the target `l_p` space.
    pub p: f64,
    /// Ratio between the outer and inner growth-rate radii.
    pub gamma: f64,
    /// Seed for the embedder's generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EmbeddingParams {
    fn default() -> Self {
        Self {
            dimensions: 8,
            p: 2.0,
            gamma: DEFAULT_GAMMA,
            seed: None,
        }
    }
}

impl EmbeddingParams {
    pub fn validate(&self) -> Result<()> {
        validate_fit_params(self.dimensions, self.p)?;
        if !(self.gamma.is_finite() && self.gamma > 1.0) {
            return Err(EmbeddingError::InvalidGamma { gamma: self.gamma });
        }
        Ok(())
    }
}

pub struct EmbedderBuilder {
    params: EmbeddingParams,
}

impl Default for EmbedderBuilder {
    fn default() -> Self {
        debug!("Creating EmbedderBuilder with default parameters");
        Self {
            params: EmbeddingParams::default(),
        }
    }
}

impl EmbedderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------- Configuration --------------------

    pub fn with_params(mut self, params: EmbeddingParams) -> Self {
        info!("Configuring embedder from params: {:?}", params);
        self.params = params;
        self
    }

    /// Target dimension `D` used by [`Embedder::fit`] through [`EmbedderBuilder::fit`].
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        info!("Setting dimensions: {}", dimensions);
        self.params.dimensions = dimensions;
        self
    }

    /// Norm parameter `p` of the target space.
    pub fn with_norm(mut self, p: f64) -> Self {
        info!("Setting norm p: {}", p);
        self.params.p = p;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        info!("Setting gamma: {}", gamma);
        self.params.gamma = gamma;
        self
    }

    /// Fixes the generator seed for reproducible partitions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        info!("Setting seed: {}", seed);
        self.params.seed = Some(seed);
        self
    }

    pub fn params(&self) -> &EmbeddingParams {
        &self.params
    }

    // -------------------- Build --------------------

    /// Validates the configuration and prepares an [`Embedder`] for `metric`.
    pub fn build(self, metric: DistanceMatrix) -> Result<Embedder> {
        self.params.validate()?;
        Embedder::with_config(metric, self.params.gamma, self.params.seed)
    }

    /// Builds and runs `fit(dimensions, p)` with the configured values.
    pub fn fit(self, metric: DistanceMatrix) -> Result<Embedding> {
        let (dimensions, p) = (self.params.dimensions, self.params.p);
        let mut embedder = self.build(metric)?;
        embedder.fit(dimensions, p)
    }
}
