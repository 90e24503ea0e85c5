//! # bourgain-embed: scaling Bourgain embeddings of finite metrics
//!
//! Embeds an n-point metric space, given by its distance matrix, into
//! `l_p^D` following the scaling Bourgain construction over Δ-bounded random
//! partitions (Abraham, Bartal, Neiman).
//!
//! ## Pipeline
//!
//! 1. **Growth rates** ([`growth`]): `|B(x, Γr)| / |B(x, r/Γ)|` from pre-sorted rows.
//! 2. **Radii** ([`sampling`]): a growth-rate dependent distribution over `[Δ/4, Δ/2]`.
//! 3. **Partitions** ([`partition`]): greedy covering, lowest clamped growth rate first.
//! 4. **Embedding** ([`embedding`]): per coordinate, sum the contributions
//!    `min(Δ_i, σ·ξ/η · d(x, outside))` over the scales `Δ_i = diameter / 2^(i+1)`,
//!    then scale the `D × n` matrix by `D^(-1/p)`.
//!
//! All randomness comes from a caller-owned generator: [`Embedder`] keeps a
//! seeded `ChaCha8Rng`, and every lower layer takes `&mut impl Rng`.
//!
//! The result is a Monte-Carlo embedding with bounds on the *expected*
//! distortion; [`distortion`] measures what a given run achieved.

pub mod builder;
pub mod cluster;
pub mod distortion;
pub mod embedding;
pub mod errors;
pub mod growth;
pub mod metric;
pub mod partition;
pub mod sampling;

pub use builder::{EmbedderBuilder, EmbeddingParams};
pub use cluster::ClusterRecord;
pub use distortion::DistortionReport;
pub use embedding::{Embedder, Embedding};
pub use errors::{EmbeddingError, Result};
pub use growth::GrowthRateEstimator;
pub use metric::DistanceMatrix;
pub use partition::{Partition, PartitionBuilder};
pub use sampling::{GrowthRadiusSampler, RadiusSampler};

#[cfg(test)]
mod tests;
