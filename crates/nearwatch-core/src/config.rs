//! Process-wide simulation configuration, set once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult, Kind, MaterialHandle, Vec3};

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Near neighbors designated per entity (`k`).
    pub neighbor_count: usize,
    /// Box that spawned entities are placed in.
    pub bounds: Bounds,
    /// Base and highlight materials per kind.
    pub materials: Materials,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 2,
            bounds: Bounds::default(),
            materials: Materials::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub const fn with_neighbor_count(mut self, neighbor_count: usize) -> Self {
        self.neighbor_count = neighbor_count;
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.bounds.validate()?;
        for kind in Kind::ALL {
            let palette = self.materials.palette(kind);
            if palette.base == palette.highlight {
                return Err(ConfigError::IndistinctPalette { kind });
            }
        }
        Ok(())
    }
}

/// Inclusive axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::splat(-10.0),
            max: Vec3::splat(10.0),
        }
    }
}

impl Bounds {
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let axes = [
            ('x', self.min.x, self.max.x),
            ('y', self.min.y, self.max.y),
            ('z', self.min.z, self.max.z),
        ];
        for (axis, min, max) in axes {
            if min > max || min.is_nan() || max.is_nan() {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }
        Ok(())
    }
}

/// Base and highlight material for one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub base: MaterialHandle,
    pub highlight: MaterialHandle,
}

/// Palettes for every kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    pub bot: Palette,
    pub item: Palette,
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            bot: Palette {
                base: MaterialHandle(1),
                highlight: MaterialHandle(2),
            },
            item: Palette {
                base: MaterialHandle(3),
                highlight: MaterialHandle(4),
            },
        }
    }
}

impl Materials {
    #[must_use]
    pub const fn palette(&self, kind: Kind) -> Palette {
        match kind {
            Kind::Bot => self.bot,
            Kind::Item => self.item,
        }
    }
}
