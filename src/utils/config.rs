//! Configuration: an optional JSON file in `~/.flappy/` plus CLI overrides.
//!
//! The file is only ever read. Physics constants are not configurable; the
//! settings here concern the host (frame cadence, RNG seed, logging).

use crate::core::constants::{DEFAULT_FRAME_INTERVAL_MS, PIPE_SPAWN_INTERVAL_MS};
use crate::core::game_loop::LoopTiming;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_LOG_FILENAME: &str = "flappy.log";
pub const MIN_FRAME_INTERVAL_MS: u64 = 1;
pub const MAX_FRAME_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
}

/// Host settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RNG seed for pipe placement (None = from entropy).
    pub seed: Option<u64>,
    /// Milliseconds between frame updates. Also the physics rate.
    pub frame_interval_ms: u64,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log destination (None = `flappy.log` in the temp dir).
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Loop timing with the frame interval clamped to a sane range.
    pub fn timing(&self) -> LoopTiming {
        LoopTiming {
            frame_interval_ms: self
                .frame_interval_ms
                .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS),
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILENAME))
    }
}

/// `~/.flappy/`, if a home directory can be determined. Not created.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".flappy"))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Parse a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an explicit config file, or the default one if it exists.
///
/// An explicit path must be readable; a missing default file means defaults.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub fps: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl CliOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.frame_interval_ms = (1000 / fps.max(1)).max(MIN_FRAME_INTERVAL_MS);
        }
        if let Some(ref path) = self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOverrides),
    Version,
    Help,
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--seed" => {
                let value = required_value(&mut args, &arg)?;
                overrides.seed = Some(parse_number(&arg, &value)?);
            }
            "--fps" => {
                let value = required_value(&mut args, &arg)?;
                let fps = parse_number(&arg, &value)?;
                if !(1..=1000).contains(&fps) {
                    return Err(ConfigError::InvalidValue {
                        flag: arg.clone(),
                        value,
                    });
                }
                overrides.fps = Some(fps);
            }
            "--log-file" => {
                overrides.log_file = Some(PathBuf::from(required_value(&mut args, &arg)?));
            }
            "--log-level" => {
                overrides.log_level = Some(required_value(&mut args, &arg)?);
            }
            "--config" => {
                overrides.config_path = Some(PathBuf::from(required_value(&mut args, &arg)?));
            }
            _ => return Err(ConfigError::UnknownArgument(arg.clone())),
        }
    }

    Ok(CliCommand::Run(overrides))
}

/// Load the config file and apply command-line overrides on top.
pub fn resolve_config(overrides: &CliOverrides) -> Result<Config, ConfigError> {
    let mut config = load_config_or_default(overrides.config_path.as_deref())?;
    overrides.apply(&mut config);
    Ok(config)
}

fn required_value<I: Iterator<Item = String>>(
    args: &mut I,
    flag: &str,
) -> Result<String, ConfigError> {
    args.next()
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn parse_number(flag: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "flappy-config-test-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.log_level, "info");
        assert!(config.log_path().ends_with("flappy.log"));
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(
            parse_args(args(&[])).expect("parse"),
            CliCommand::Run(CliOverrides::default())
        );
    }

    #[test]
    fn test_parse_all_flags() {
        let command = parse_args(args(&[
            "--seed",
            "42",
            "--fps",
            "30",
            "--log-file",
            "/tmp/f.log",
            "--log-level",
            "debug",
            "--config",
            "/tmp/c.json",
        ]))
        .expect("parse");

        let CliCommand::Run(overrides) = command else {
            panic!("expected a run command");
        };
        assert_eq!(overrides.seed, Some(42));
        assert_eq!(overrides.fps, Some(30));
        assert_eq!(overrides.log_file, Some(PathBuf::from("/tmp/f.log")));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.config_path, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(parse_args(args(&["-v"])).expect("parse"), CliCommand::Version);
        assert_eq!(
            parse_args(args(&["--seed", "1", "--help"])).expect("parse"),
            CliCommand::Help
        );
    }

    #[test]
    fn test_unknown_argument() {
        let err = parse_args(args(&["--turbo"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArgument(ref a) if a == "--turbo"));
        assert_eq!(err.to_string(), "unknown argument: --turbo");
    }

    #[test]
    fn test_missing_and_invalid_values() {
        assert!(matches!(
            parse_args(args(&["--seed"])),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(args(&["--seed", "--fps"])),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(args(&["--seed", "abc"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_args(args(&["--fps", "0"])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            seed: Some(7),
            fps: Some(60),
            log_level: Some("warn".to_string()),
            ..CliOverrides::default()
        };
        overrides.apply(&mut config);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_timing_clamps_frame_interval() {
        let config = Config {
            frame_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.timing().frame_interval_ms, 1);

        let config = Config {
            frame_interval_ms: 60_000,
            ..Config::default()
        };
        assert_eq!(config.timing().frame_interval_ms, 1000);
        assert_eq!(config.timing().spawn_interval_ms, 1600);
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_file("partial.json", r#"{ "seed": 9, "log_level": "trace" }"#);
        let config = load_config(&path).expect("load");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.frame_interval_ms, 16);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_invalid_file() {
        let path = temp_file("broken.json", "{ seed: ");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("flappy-config-test-does-not-exist.json");
        let err = load_config_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_resolve_applies_overrides_over_file() {
        let path = temp_file("resolve.json", r#"{ "seed": 1, "frame_interval_ms": 33 }"#);
        let overrides = CliOverrides {
            config_path: Some(path.clone()),
            seed: Some(2),
            ..CliOverrides::default()
        };
        let config = resolve_config(&overrides).expect("resolve");
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.frame_interval_ms, 33);
        let _ = fs::remove_file(path);
    }
}
