//! Physical configuration — fixed for the lifetime of a simulation.

use cartpend_math::{DEFAULT_DT, GRAVITY};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Immutable physical parameters of the cart and its two point-mass links.
///
/// Only obtainable through [`ConfigBuilder::build`] (or deserialization,
/// which goes through the same validation), so every instance has positive
/// lengths, masses, track half-width and timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigBuilder", into = "ConfigBuilder")]
pub struct PhysicalConfig {
    l0: f64,
    l1: f64,
    m0: f64,
    m1: f64,
    gravity: f64,
    horizontal_damping: f64,
    edge: f64,
    dt: f64,
}

impl PhysicalConfig {
    /// Parse a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let builder: ConfigBuilder = serde_json::from_str(json)?;
        builder.build()
    }

    /// Inner link length (m).
    #[inline]
    pub fn l0(&self) -> f64 {
        self.l0
    }

    /// Outer link length (m).
    #[inline]
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Mass at the end of the inner link (kg).
    #[inline]
    pub fn m0(&self) -> f64 {
        self.m0
    }

    /// Mass at the end of the outer link (kg).
    #[inline]
    pub fn m1(&self) -> f64 {
        self.m1
    }

    /// Gravitational acceleration (m/s²), positive pointing down.
    #[inline]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Viscous drag coefficient on cart velocity (1/s).
    #[inline]
    pub fn horizontal_damping(&self) -> f64 {
        self.horizontal_damping
    }

    /// Track half-width (m).
    #[inline]
    pub fn edge(&self) -> f64 {
        self.edge
    }

    /// Fixed tick length (s).
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// A builder seeded with this configuration's values.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder::from(*self)
    }
}

impl Default for PhysicalConfig {
    fn default() -> Self {
        Self {
            l0: 0.5,
            l1: 0.5,
            m0: 0.1,
            m1: 0.1,
            gravity: GRAVITY,
            horizontal_damping: 0.3,
            edge: 1.0,
            dt: DEFAULT_DT,
        }
    }
}

/// Builder for [`PhysicalConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigBuilder {
    l0: f64,
    l1: f64,
    m0: f64,
    m1: f64,
    gravity: f64,
    horizontal_damping: f64,
    edge: f64,
    dt: f64,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::from(PhysicalConfig::default())
    }

    /// Set both link lengths.
    pub fn lengths(mut self, l0: f64, l1: f64) -> Self {
        self.l0 = l0;
        self.l1 = l1;
        self
    }

    pub fn l0(mut self, l0: f64) -> Self {
        self.l0 = l0;
        self
    }

    pub fn l1(mut self, l1: f64) -> Self {
        self.l1 = l1;
        self
    }

    /// Set both point masses.
    pub fn masses(mut self, m0: f64, m1: f64) -> Self {
        self.m0 = m0;
        self.m1 = m1;
        self
    }

    pub fn m0(mut self, m0: f64) -> Self {
        self.m0 = m0;
        self
    }

    pub fn m1(mut self, m1: f64) -> Self {
        self.m1 = m1;
        self
    }

    pub fn gravity(mut self, g: f64) -> Self {
        self.gravity = g;
        self
    }

    pub fn horizontal_damping(mut self, damping: f64) -> Self {
        self.horizontal_damping = damping;
        self
    }

    pub fn edge(mut self, edge: f64) -> Self {
        self.edge = edge;
        self
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<PhysicalConfig> {
        for (name, value) in [("l0", self.l0), ("l1", self.l1)] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositiveLength { name, value });
            }
        }
        for (name, value) in [("m0", self.m0), ("m1", self.m1)] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositiveMass { name, value });
            }
        }
        if !is_positive(self.dt) {
            return Err(ConfigError::NonPositiveTimestep(self.dt));
        }
        if !is_positive(self.edge) {
            return Err(ConfigError::NonPositiveEdge(self.edge));
        }
        if !(self.horizontal_damping >= 0.0 && self.horizontal_damping.is_finite()) {
            return Err(ConfigError::NegativeDamping(self.horizontal_damping));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity(self.gravity));
        }

        Ok(PhysicalConfig {
            l0: self.l0,
            l1: self.l1,
            m0: self.m0,
            m1: self.m1,
            gravity: self.gravity,
            horizontal_damping: self.horizontal_damping,
            edge: self.edge,
            dt: self.dt,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PhysicalConfig> for ConfigBuilder {
    fn from(c: PhysicalConfig) -> Self {
        Self {
            l0: c.l0,
            l1: c.l1,
            m0: c.m0,
            m1: c.m1,
            gravity: c.gravity,
            horizontal_damping: c.horizontal_damping,
            edge: c.edge,
            dt: c.dt,
        }
    }
}

impl TryFrom<ConfigBuilder> for PhysicalConfig {
    type Error = ConfigError;

    fn try_from(builder: ConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

fn is_positive(x: f64) -> bool {
    x > 0.0 && x.is_finite()
}
