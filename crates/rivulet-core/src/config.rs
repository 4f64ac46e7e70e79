// SPDX-License-Identifier: MIT OR Apache-2.0
//! View configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional JSON file,
//! `RIVULET_*` environment variables, then builder calls made at runtime.
//!
//! ```
//! use rivulet_core::{ConsumptionPolicy, ViewConfig};
//!
//! let config = ViewConfig::from_json_str(r#"{ "consumption": "replayable" }"#)
//!     .unwrap()
//!     .with_label("animals");
//! assert_eq!(config.consumption, ConsumptionPolicy::Replayable);
//! ```

use rivulet_types::{Result, RivuletError, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const COMPONENT: &str = "rivulet-core";

/// Environment variable selecting the consumption policy.
pub const ENV_CONSUMPTION: &str = "RIVULET_CONSUMPTION";

/// Environment variable setting the view label. An empty value clears it.
pub const ENV_LABEL: &str = "RIVULET_LABEL";

/// Maximum length of a view label.
pub const LABEL_MAX_LEN: usize = 64;

/// What a view does when a terminal operation runs more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPolicy {
    /// The second terminal operation fails with `AlreadyConsumed`.
    #[default]
    SingleUse,
    /// Every terminal operation re-reads the live source.
    Replayable,
}

impl fmt::Display for ConsumptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleUse => write!(f, "single_use"),
            Self::Replayable => write!(f, "replayable"),
        }
    }
}

impl FromStr for ConsumptionPolicy {
    type Err = RivuletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_use" => Ok(Self::SingleUse),
            "replayable" => Ok(Self::Replayable),
            other => Err(RivuletError::validation(
                "VAL-020",
                COMPONENT,
                "consumption",
                format!("unknown consumption policy '{other}', expected single_use or replayable"),
            )),
        }
    }
}

/// Settings applied to a lazy view at creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Behavior on repeated realization.
    pub consumption: ConsumptionPolicy,
    /// Optional human-readable name shown in log events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ViewConfig {
    /// Set the consumption policy.
    pub fn with_consumption(mut self, consumption: ConsumptionPolicy) -> Self {
        self.consumption = consumption;
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parse and validate a JSON document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// `VAL-002` for malformed JSON, or any validation failure.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RivuletError::from_json(e, COMPONENT))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file.
    ///
    /// # Errors
    ///
    /// `VAL-001` if the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw =
            std::fs::read_to_string(path).map_err(|e| RivuletError::from_io(e, COMPONENT))?;
        tracing::debug!(path = %path.display(), "loaded view config file");
        Self::from_json_str(&raw)
    }

    /// Overlay `RIVULET_*` variables from an arbitrary source. Unrelated keys
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable policy or an invalid resulting config.
    pub fn apply_env<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_CONSUMPTION => self.consumption = value.parse()?,
                ENV_LABEL if value.is_empty() => self.label = None,
                ENV_LABEL => self.label = Some(value.to_owned()),
                _ => {}
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Defaults overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// As [`Self::apply_env`].
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env(process_env()?)
    }

    /// Full layered load: defaults, then `path` if given, then the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Any file, parse or validation failure.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.apply_env(process_env()?)?;
        tracing::debug!(
            consumption = %config.consumption,
            label = config.label.as_deref().unwrap_or("-"),
            "resolved view config"
        );
        Ok(config)
    }
}

/// Read the `RIVULET_*` keys from the process environment. No other
/// variable is touched.
fn process_env() -> Result<Vec<(&'static str, String)>> {
    let mut vars = Vec::new();
    for key in [ENV_CONSUMPTION, ENV_LABEL] {
        let Some(raw) = std::env::var_os(key) else {
            continue;
        };
        let value = raw.into_string().map_err(|raw| {
            RivuletError::validation(
                "VAL-023",
                COMPONENT,
                key,
                format!("{key} is not valid UTF-8: {}", raw.to_string_lossy()),
            )
        })?;
        vars.push((key, value));
    }
    Ok(vars)
}

impl Validate for ViewConfig {
    fn validate(&self) -> Result<()> {
        if let Some(label) = &self.label {
            if label.trim().is_empty() {
                return Err(RivuletError::validation(
                    "VAL-021",
                    COMPONENT,
                    "label",
                    "label must not be blank",
                ));
            }
            if label.chars().count() > LABEL_MAX_LEN {
                return Err(RivuletError::validation(
                    "VAL-022",
                    COMPONENT,
                    "label",
                    format!("label exceeds {LABEL_MAX_LEN} characters"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::ffi::{OsStr, OsString};
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the env lock and restores every touched key on drop.
    struct ScopedEnv {
        keys: Vec<OsString>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn new() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let env = Self {
                keys: Vec::new(),
                _lock: lock,
            };
            env.clear(ENV_CONSUMPTION).clear(ENV_LABEL)
        }

        fn set(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
            std::env::set_var(key, value);
            self.keys.push(key.into());
            self
        }

        fn clear(self, key: &str) -> Self {
            std::env::remove_var(key);
            self
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for key in &self.keys {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_are_single_use_unlabeled() {
        let config = ViewConfig::default();
        assert_eq!(config.consumption, ConsumptionPolicy::SingleUse);
        assert!(config.label.is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn policy_parses_case_insensitively() {
        let Ok(policy) = " Replayable ".parse::<ConsumptionPolicy>() else {
            panic!("should parse");
        };
        assert_eq!(policy, ConsumptionPolicy::Replayable);
        assert_eq!(ConsumptionPolicy::SingleUse.to_string(), "single_use");
    }

    #[test]
    fn policy_rejects_unknown() {
        let Err(err) = "lazy".parse::<ConsumptionPolicy>() else {
            panic!("unknown policy should fail");
        };
        assert_eq!(err.error_code(), "VAL-020");
        assert!(err.to_string().contains("'lazy'"));
    }

    #[test]
    fn json_missing_fields_keep_defaults() {
        let Ok(config) = ViewConfig::from_json_str(r#"{ "label": "zoo" }"#) else {
            panic!("partial config should parse");
        };
        assert_eq!(config.consumption, ConsumptionPolicy::SingleUse);
        assert_eq!(config.label.as_deref(), Some("zoo"));
    }

    #[test]
    fn json_unknown_field_is_rejected() {
        let Err(err) = ViewConfig::from_json_str(r#"{ "eager": true }"#) else {
            panic!("unknown field should fail");
        };
        assert_eq!(err.error_code(), "VAL-002");
    }

    #[test]
    fn blank_label_fails_validation() {
        let Err(err) = ViewConfig::from_json_str(r#"{ "label": "   " }"#) else {
            panic!("blank label should fail");
        };
        assert_eq!(err.error_code(), "VAL-021");
    }

    #[test]
    fn long_label_fails_validation() {
        let config = ViewConfig::default().with_label("x".repeat(LABEL_MAX_LEN + 1));
        let Err(err) = config.validate() else {
            panic!("long label should fail");
        };
        assert_eq!(err.error_code(), "VAL-022");
    }

    #[test]
    fn env_overrides_file_values() {
        let Ok(base) = ViewConfig::from_json_str(r#"{ "consumption": "single_use", "label": "a" }"#)
        else {
            panic!("base should parse");
        };
        let vars = [
            (ENV_CONSUMPTION, "replayable"),
            (ENV_LABEL, ""),
            ("PATH", "/usr/bin"),
        ];
        let Ok(config) = base.apply_env(vars) else {
            panic!("env overlay should apply");
        };
        assert_eq!(config.consumption, ConsumptionPolicy::Replayable);
        assert!(config.label.is_none());
    }

    #[test]
    fn env_with_bad_policy_fails() {
        let result = ViewConfig::default().apply_env([(ENV_CONSUMPTION, "twice")]);
        assert!(result.is_err());
    }

    #[test]
    fn from_file_reads_json() {
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            panic!("temp file should be created");
        };
        let Ok(()) = file.write_all(br#"{ "consumption": "replayable" }"#) else {
            panic!("temp file should be writable");
        };
        let Ok(config) = ViewConfig::from_file(file.path()) else {
            panic!("file config should load");
        };
        assert_eq!(config.consumption, ConsumptionPolicy::Replayable);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let Err(err) = ViewConfig::from_file("/definitely/not/here.json") else {
            panic!("missing file should fail");
        };
        assert_eq!(err.error_code(), "VAL-001");
    }

    #[test]
    fn serializes_snake_case_and_skips_empty_label() {
        let config = ViewConfig::default().with_consumption(ConsumptionPolicy::Replayable);
        let Ok(json) = serde_json::to_string(&config) else {
            panic!("serialization should succeed");
        };
        assert_eq!(json, r#"{"consumption":"replayable"}"#);
    }

    #[test]
    fn load_without_file_or_env_is_default() {
        let _env = ScopedEnv::new();
        let Ok(config) = ViewConfig::load(None) else {
            panic!("default load should succeed");
        };
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn load_env_overrides_file() {
        let _env = ScopedEnv::new().set(ENV_CONSUMPTION, "replayable");
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            panic!("temp file should be created");
        };
        let Ok(()) = file.write_all(br#"{ "consumption": "single_use", "label": "zoo" }"#) else {
            panic!("temp file should be writable");
        };

        let Ok(config) = ViewConfig::load(Some(file.path())) else {
            panic!("layered load should succeed");
        };
        assert_eq!(config.consumption, ConsumptionPolicy::Replayable);
        assert_eq!(config.label.as_deref(), Some("zoo"));
    }

    #[test]
    fn from_env_reads_label() {
        let _env = ScopedEnv::new().set(ENV_LABEL, "aviary");
        let Ok(config) = ViewConfig::from_env() else {
            panic!("env config should load");
        };
        assert_eq!(config.label.as_deref(), Some("aviary"));
        assert_eq!(config.consumption, ConsumptionPolicy::SingleUse);
    }

    #[test]
    fn from_env_rejects_bad_policy() {
        let _env = ScopedEnv::new().set(ENV_CONSUMPTION, "twice");
        let Err(err) = ViewConfig::from_env() else {
            panic!("bad policy should fail");
        };
        assert_eq!(err.error_code(), "VAL-020");
    }

    #[cfg(unix)]
    #[test]
    fn from_env_ignores_unrelated_non_utf8_variable() {
        use std::os::unix::ffi::OsStrExt;

        let _env = ScopedEnv::new().set("RIVULET_TEST_UNRELATED", OsStr::from_bytes(b"f\xffo"));
        let Ok(config) = ViewConfig::from_env() else {
            panic!("unrelated variables must not affect the load");
        };
        assert_eq!(config, ViewConfig::default());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_label_is_validation_error() {
        use std::os::unix::ffi::OsStrExt;

        let _env = ScopedEnv::new().set(ENV_LABEL, OsStr::from_bytes(b"z\xffo"));
        let Err(err) = ViewConfig::load(None) else {
            panic!("non-UTF-8 label should fail");
        };
        assert_eq!(err.error_code(), "VAL-023");
        let RivuletError::ValidationFailed { field, .. } = err else {
            panic!("expected ValidationFailed");
        };
        assert_eq!(field.as_deref(), Some(ENV_LABEL));
    }
}
