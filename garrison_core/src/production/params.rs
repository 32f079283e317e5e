// garrison_core/src/production/params.rs

use thiserror::Error;

/// Upper bound on `unit_count`.
pub const MAX_UNIT_COUNT: usize = 64;
/// Upper bound on `fallback_rings`.
pub const MAX_FALLBACK_RINGS: usize = 16;

/// Tunables of a production run. Fixed at setup time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionParams {
    /// Lateral distance between neighbouring slots, and the step of the
    /// forward/backward fallback search.
    pub unit_spacing: f64,

    /// Radius of the sphere searched for road colliders around the producer.
    pub detection_radius: f64,

    /// Number of slots attempted per run.
    pub unit_count: usize,

    /// Radius of the sphere that must be free of units and enemies.
    pub clearance_radius: f64,

    /// How far the road-support ray may travel.
    pub ray_max_distance: f64,

    /// How far above a candidate the road-support ray starts.
    pub ray_start_height: f64,

    /// Forward/backward steps tried after the primary candidate of a slot.
    pub fallback_rings: usize,

    /// Vertical extent of a spawned unit. Added to the road position so the
    /// unit stands on the surface instead of inside it.
    pub unit_height_offset: f64,
}

impl Default for ProductionParams {
    fn default() -> Self {
        Self {
            unit_spacing: 1.0,
            detection_radius: 10.0,
            unit_count: 5,
            clearance_radius: 0.5,
            ray_max_distance: 15.0,
            ray_start_height: 10.0,
            fallback_rings: 3,
            unit_height_offset: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("unit_spacing must be positive and finite, got {0}")]
    NonPositiveSpacing(f64),
    #[error("{name} must be non-negative and finite, got {value}")]
    NegativeLength { name: &'static str, value: f64 },
    #[error("unit_count must be at least 1")]
    ZeroUnitCount,
    #[error("unit_count must be at most {max}, got {0}", max = MAX_UNIT_COUNT)]
    TooManyUnits(usize),
    #[error("fallback_rings must be at most {max}, got {0}", max = MAX_FALLBACK_RINGS)]
    TooManyFallbackRings(usize),
}

impl ProductionParams {
    /// Checks that every length is usable by the search.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.unit_spacing.is_finite() && self.unit_spacing > 0.0) {
            return Err(ParamsError::NonPositiveSpacing(self.unit_spacing));
        }
        for (name, value) in [
            ("detection_radius", self.detection_radius),
            ("clearance_radius", self.clearance_radius),
            ("ray_max_distance", self.ray_max_distance),
            ("ray_start_height", self.ray_start_height),
            ("unit_height_offset", self.unit_height_offset),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParamsError::NegativeLength { name, value });
            }
        }
        if self.unit_count == 0 {
            return Err(ParamsError::ZeroUnitCount);
        }
        if self.unit_count > MAX_UNIT_COUNT {
            return Err(ParamsError::TooManyUnits(self.unit_count));
        }
        if self.fallback_rings > MAX_FALLBACK_RINGS {
            return Err(ParamsError::TooManyFallbackRings(self.fallback_rings));
        }
        Ok(())
    }

    /// Candidates examined per slot: the primary plus two per fallback ring.
    pub fn candidates_per_slot(&self) -> usize {
        self.fallback_rings.saturating_mul(2).saturating_add(1)
    }
}
