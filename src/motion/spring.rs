use crate::foundation::error::{FxError, FxResult};

/// Per-frame spring coefficients.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringParams {
    /// Fraction of the remaining distance added to velocity each frame, in `(0, 1)`.
    pub stiffness: f64,
    /// Fraction of velocity kept each frame, in `(0, 1)`.
    pub damping: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 0.18,
            damping: 0.75,
        }
    }
}

impl SpringParams {
    /// Reject coefficients outside the open unit interval.
    pub fn validate(&self) -> FxResult<()> {
        for (name, v) in [("stiffness", self.stiffness), ("damping", self.damping)] {
            if !(v > 0.0 && v < 1.0) {
                return Err(FxError::validation(format!(
                    "spring {name} must be in (0, 1), got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Damped spring integrated once per frame.
///
/// There is no settle threshold: the value approaches its target asymptotically and is never
/// snapped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
}

impl Spring {
    /// A spring at rest at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset from the rest axis.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current rate of change of [`Spring::position`].
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Advance one frame toward `target` and return the new position.
    pub fn step(&mut self, target: f64, params: &SpringParams) -> f64 {
        self.velocity += (target - self.position) * params.stiffness;
        self.velocity *= params.damping;
        self.position += self.velocity;
        self.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/spring.rs"]
mod tests;
