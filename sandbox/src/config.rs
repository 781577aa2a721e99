use std::env;
use std::path::{Path, PathBuf};

use whiteboard_shared::config::ProjectorIndexFile;
use whiteboard_shared::SandboxConfig;

use crate::error::SandboxError;
use crate::source::{FrameSource, ReplaySource, ScriptedSource};

pub const DEFAULT_CONFIG_PATH: &str = "data/sandbox.json";
pub const PROJECTOR_INDEX_PATH: &str = "data/projectorIndex.json";

/// Where frames come from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceConfig {
    Scripted { width: u32, height: u32, seed: u64 },
    Replay { path: PathBuf, looping: bool },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Scripted {
            width: 640,
            height: 480,
            seed: 42,
        }
    }
}

impl SourceConfig {
    pub fn open(&self) -> Result<Box<dyn FrameSource + Send + Sync>, SandboxError> {
        Ok(match self {
            SourceConfig::Scripted {
                width,
                height,
                seed,
            } => Box::new(ScriptedSource::new(*width, *height, *seed)),
            SourceConfig::Replay { path, looping } => {
                Box::new(ReplaySource::from_path(path, *looping)?)
            }
        })
    }
}

/// Process configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfig {
    pub sandbox: SandboxConfig,
    pub source: SourceConfig,
    /// Headless runs stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Headless pacing; 0 runs flat out.
    pub tick_rate_hz: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sandbox: SandboxConfig::default(),
            source: SourceConfig::default(),
            max_ticks: None,
            tick_rate_hz: 60,
        }
    }
}

impl RuntimeConfig {
    /// Load from `WHITEBOARD_CONFIG` (or the default path), falling back to
    /// defaults when the file does not exist, then apply env overrides.
    pub fn load() -> Result<Self, SandboxError> {
        let path = env::var("WHITEBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_path_or_default(Path::new(&path))?;

        if let Some(index) = read_projector_index(Path::new(PROJECTOR_INDEX_PATH))? {
            config.sandbox.projector_display_index = index;
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_path_or_default(path: &Path) -> Result<Self, SandboxError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    pub fn from_path(path: &Path) -> Result<Self, SandboxError> {
        let text = std::fs::read_to_string(path).map_err(|source| SandboxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SandboxError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("WHITEBOARD_REPLAY") {
            self.source = SourceConfig::Replay {
                path: PathBuf::from(path),
                looping: false,
            };
        }
        if let Some(ticks) = env::var("WHITEBOARD_MAX_TICKS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.max_ticks = Some(ticks);
        }
        if let Some(new_seed) = env::var("WHITEBOARD_SEED").ok().and_then(|v| v.parse().ok()) {
            if let SourceConfig::Scripted { seed, .. } = &mut self.source {
                *seed = new_seed;
            }
        }
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        self.sandbox.validate().map_err(SandboxError::InvalidConfig)?;
        if let SourceConfig::Scripted { width, height, .. } = self.source {
            if width == 0 || height == 0 {
                return Err(SandboxError::InvalidConfig(
                    "scripted source dimensions must be > 0".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Read the legacy projector selection file, if present.
pub fn read_projector_index(path: &Path) -> Result<Option<usize>, SandboxError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| SandboxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ProjectorIndexFile =
        serde_json::from_str(&text).map_err(|source| SandboxError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(file.projector_display_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("whiteboard-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn default_runtime_config_is_valid() {
        assert!(RuntimeConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            RuntimeConfig::from_path_or_default(Path::new("/nonexistent/sandbox.json")).unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn parses_replay_source_and_nested_sandbox() {
        let path = temp_file(
            "replay.json",
            r#"{
                "sandbox": { "scale": 80.0 },
                "source": { "kind": "replay", "path": "frames.json", "looping": true },
                "maxTicks": 100
            }"#,
        );
        let config = RuntimeConfig::from_path(&path).unwrap();
        assert_eq!(config.sandbox.scale, 80.0);
        assert_eq!(config.sandbox.min_area, 100.0);
        assert_eq!(config.max_ticks, Some(100));
        assert_eq!(
            config.source,
            SourceConfig::Replay {
                path: PathBuf::from("frames.json"),
                looping: true
            }
        );
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_json_is_reported_with_path() {
        let path = temp_file("bad.json", "{ not json");
        let err = RuntimeConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, SandboxError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn zero_sized_scripted_source_invalid() {
        let config = RuntimeConfig {
            source: SourceConfig::Scripted {
                width: 0,
                height: 480,
                seed: 1,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn projector_index_file_is_read() {
        let path = temp_file("projector.json", r#"{"projector-display-index": 1}"#);
        assert_eq!(read_projector_index(&path).unwrap(), Some(1));
        std::fs::remove_file(path).ok();
        assert_eq!(read_projector_index(Path::new("/nonexistent/p.json")).unwrap(), None);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/sandbox.json");
        assert_eq!(RuntimeConfig::from_path(&path).unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn scripted_source_opens_with_configured_size() {
        let source = SourceConfig::default().open().unwrap();
        assert_eq!(source.frame_size(), (640, 480));
    }
}
