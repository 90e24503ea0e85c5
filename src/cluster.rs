//! One cluster of a Δ-bounded partition.
//!
//! A [`ClusterRecord`] is built once, when its center is picked, and never
//! changes afterwards. Its random bit `sigma` is drawn at construction from the
//! caller's generator; `ksi`, `eta` and the clamped growth rate are derived
//! from the center's growth rate.

use std::fmt;

use log::trace;
use rand::Rng;

use crate::growth::hat_growth_rate;

/// Scale constant in `eta = log2(hat_growth_rate) / 256`.
pub const ETA_DENOMINATOR: f64 = 256.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterRecord {
    index: usize,
    center: usize,
    radius: f64,
    growth_rate: f64,
    hat_growth_rate: f64,
    sigma: u8,
    ksi: u8,
    eta: f64,
    points: Vec<usize>,
}

impl ClusterRecord {
    /// Creates the cluster and draws its `sigma` bit.
    ///
    /// `points` must already be the final member set (the center included).
    pub fn new<R: Rng + ?Sized>(
        index: usize,
        center: usize,
        radius: f64,
        growth_rate: f64,
        points: Vec<usize>,
        rng: &mut R,
    ) -> Self {
        let sigma = rng.random_range(0..2u8);
        let record = Self::with_sigma(index, center, radius, growth_rate, points, sigma);
        trace!("{}", record);
        record
    }

    /// Same as [`new`](Self::new) with a fixed `sigma`; anything non-zero counts as 1.
    pub fn with_sigma(
        index: usize,
        center: usize,
        radius: f64,
        growth_rate: f64,
        points: Vec<usize>,
        sigma: u8,
    ) -> Self {
        let hat = hat_growth_rate(growth_rate);
        Self {
            index,
            center,
            radius,
            growth_rate,
            hat_growth_rate: hat,
            sigma: u8::from(sigma != 0),
            ksi: u8::from(growth_rate >= 2.0),
            eta: hat.log2() / ETA_DENOMINATOR,
            points,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unclamped growth rate of the center at the partition's Δ.
    #[inline]
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    #[inline]
    pub fn hat_growth_rate(&self) -> f64 {
        self.hat_growth_rate
    }

    #[inline]
    pub fn sigma(&self) -> u8 {
        self.sigma
    }

    #[inline]
    pub fn ksi(&self) -> u8 {
        self.ksi
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.eta
    }

    #[inline]
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `sigma · ksi / eta`, the factor applied to a member's distance to the
    /// outside of the cluster. `eta >= 1/256` since `hat_growth_rate >= 2`.
    #[inline]
    pub fn weight(&self) -> f64 {
        f64::from(self.sigma) * f64::from(self.ksi) / self.eta
    }
}

impl fmt::Display for ClusterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cluster {} center={} radius={:.6} sigma={} ksi={} eta={:.6} points={:?}",
            self.index, self.center, self.radius, self.sigma, self.ksi, self.eta, self.points
        )
    }
}
