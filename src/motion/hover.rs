use crate::foundation::error::{FxError, FxResult};

/// Pointer proximity field around a vertical rest axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverParams {
    /// Horizontal distance (px) inside which the pointer pulls the line.
    pub radius: f64,
    /// Offset (px) reached when the pointer sits at the edge of the radius.
    pub max_distortion: f64,
}

impl Default for HoverParams {
    fn default() -> Self {
        Self {
            radius: 120.0,
            max_distortion: 90.0,
        }
    }
}

impl HoverParams {
    pub fn validate(&self) -> FxResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(FxError::validation(format!(
                "hover radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !self.max_distortion.is_finite() {
            return Err(FxError::validation("max distortion must be finite"));
        }
        Ok(())
    }

    /// Spring target for a pointer at signed horizontal distance `dx` from the rest axis.
    ///
    /// Linear inside the radius, zero at or beyond it.
    pub fn target(&self, dx: f64) -> f64 {
        if dx.abs() < self.radius {
            (dx / self.radius) * self.max_distortion
        } else {
            0.0
        }
    }
}
