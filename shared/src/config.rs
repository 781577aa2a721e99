use crate::vec2::Vec2;

/// Simulation tunables shared by the core and the presentation client.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SandboxConfig {
    /// Pixels per simulation world unit.
    pub scale: f32,
    /// World units/s², Y-down.
    pub gravity: Vec2,
    /// Smallest rect area (px²) that becomes an obstacle.
    pub min_area: f32,
    /// Ball radius in world units.
    pub ball_radius: f32,
    /// Horizontal spawn position as a fraction of the frame width.
    pub spawn_fraction: f32,
    /// Pixels the ball may travel below the frame before it is reset.
    pub leeway: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Clamp for the per-tick delta. `None` passes elapsed time through unchanged.
    pub max_step_secs: Option<f32>,
    /// Deltas above this are logged as stalls.
    pub stall_warn_secs: f32,
    /// Monitor index the projector window opens on.
    pub projector_display_index: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            scale: 100.0,
            gravity: Vec2::new(0.0, 5.0),
            min_area: 100.0,
            ball_radius: 0.25,
            spawn_fraction: 0.5,
            leeway: 2.0,
            velocity_iterations: 6,
            position_iterations: 2,
            max_step_secs: None,
            stall_warn_secs: 0.25,
            projector_display_index: 0,
        }
    }
}

impl SandboxConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err("scale must be finite and > 0".to_string());
        }
        if !self.gravity.is_finite() {
            return Err("gravity must be finite".to_string());
        }
        if !self.min_area.is_finite() || self.min_area <= 0.0 {
            return Err("min_area must be finite and > 0".to_string());
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err("ball_radius must be finite and > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.spawn_fraction) {
            return Err("spawn_fraction must be within 0..=1".to_string());
        }
        if !self.leeway.is_finite() || self.leeway < 0.0 {
            return Err("leeway must be finite and >= 0".to_string());
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return Err("solver iteration counts must be >= 1".to_string());
        }
        if let Some(max) = self.max_step_secs {
            if !max.is_finite() || max <= 0.0 {
                return Err("max_step_secs must be finite and > 0".to_string());
            }
        }
        if !self.stall_warn_secs.is_finite() || self.stall_warn_secs <= 0.0 {
            return Err("stall_warn_secs must be finite and > 0".to_string());
        }
        Ok(())
    }
}

/// Legacy projector selection file (`{"projector-display-index": N}`).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ProjectorIndexFile {
    #[serde(rename = "projector-display-index")]
    pub projector_display_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sandbox_config_is_valid() {
        let config = SandboxConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_scale_invalid() {
        let config = SandboxConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_step_clamp_invalid() {
        let config = SandboxConfig {
            max_step_secs: Some(0.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SandboxConfig =
            serde_json::from_str(r#"{"scale":50.0,"maxStepSecs":0.033}"#).unwrap();
        assert_eq!(config.scale, 50.0);
        assert_eq!(config.max_step_secs, Some(0.033));
        assert_eq!(config.velocity_iterations, 6);
        assert_eq!(config.min_area, 100.0);
    }

    #[test]
    fn projector_index_file_uses_dashed_key() {
        let file: ProjectorIndexFile =
            serde_json::from_str(r#"{"projector-display-index": 2}"#).unwrap();
        assert_eq!(file.projector_display_index, 2);
    }
}
