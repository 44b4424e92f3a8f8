use std::path::PathBuf;
use std::time::Duration;

use crate::assembly::PlacementOptions;
use crate::error::{Error, Result};
use crate::feedback::Lifetimes;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub sounds_dir: Option<PathBuf>,
    pub quiz_file: Option<PathBuf>,
    pub placement: PlacementOptions,
    pub lifetimes: Lifetimes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("db.sqlite"),
            sounds_dir: None,
            quiz_file: None,
            placement: PlacementOptions::default(),
            lifetimes: Lifetimes::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let mut lifetimes = defaults.lifetimes;
        for (key, slot) in [
            ("SUCCESS_TOAST_MS", &mut lifetimes.success),
            ("SHORT_TOAST_MS", &mut lifetimes.short),
            ("WRONG_TOAST_MS", &mut lifetimes.wrong),
            ("PULSE_MS", &mut lifetimes.pulse),
        ] {
            if let Some(raw) = get(key) {
                *slot = parse_millis(key, &raw)?;
            }
        }

        let placement = match get("DISABLE_SOURCE_AFTER_PLACEMENT") {
            Some(raw) => PlacementOptions {
                disable_source_after_placement: parse_bool("DISABLE_SOURCE_AFTER_PLACEMENT", &raw)?,
            },
            None => defaults.placement,
        };

        Ok(Self {
            database_path: get("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            sounds_dir: get("SOUNDS_DIR").map(PathBuf::from),
            quiz_file: get("QUIZ_FILE").map(PathBuf::from),
            placement,
            lifetimes,
        })
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::Config(format!("{key} must be a number of milliseconds, got {raw:?}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key} must be true or false, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_key() {
        let cfg = Config::from_lookup(lookup(&[
            ("DATABASE_PATH", "/tmp/bot.sqlite"),
            ("SOUNDS_DIR", "assets"),
            ("QUIZ_FILE", "quiz.json"),
            ("DISABLE_SOURCE_AFTER_PLACEMENT", "off"),
            ("SUCCESS_TOAST_MS", "1500"),
            ("SHORT_TOAST_MS", "1000"),
            ("WRONG_TOAST_MS", "800"),
            ("PULSE_MS", "300"),
        ]))
        .unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/bot.sqlite"));
        assert_eq!(cfg.sounds_dir, Some(PathBuf::from("assets")));
        assert_eq!(cfg.quiz_file, Some(PathBuf::from("quiz.json")));
        assert!(!cfg.placement.disable_source_after_placement);
        assert_eq!(cfg.lifetimes.success, Duration::from_millis(1500));
        assert_eq!(cfg.lifetimes.short, Duration::from_millis(1000));
        assert_eq!(cfg.lifetimes.wrong, Duration::from_millis(800));
        assert_eq!(cfg.lifetimes.pulse, Duration::from_millis(300));
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = Config::from_lookup(lookup(&[("SOUNDS_DIR", "  ")])).unwrap();
        assert_eq!(cfg.sounds_dir, None);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("PULSE_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("PULSE_MS"));
        assert!(matches!(
            Config::from_lookup(lookup(&[("DISABLE_SOURCE_AFTER_PLACEMENT", "maybe")])),
            Err(Error::Config(_))
        ));
    }
}
