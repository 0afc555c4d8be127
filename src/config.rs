use crate::contrast::sampler::SamplerConfig;
use crate::foundation::error::{FxError, FxResult};
use crate::motion::animator::{ColumnConfig, LineEffect, WaveConfig};
use std::path::Path;

/// Construction-time constants for every effect.
///
/// All fields default, so `{}` is a complete config.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    pub column: ColumnConfig,
    pub wave: WaveConfig,
    pub contrast: SamplerConfig,
}

impl EffectConfig {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FxError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> FxResult<()> {
        LineEffect::Column(self.column).validate()?;
        LineEffect::Wave(self.wave).validate()?;
        self.contrast.validate()
    }
}
