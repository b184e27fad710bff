//! Loader for workspace configuration with YAML + environment overlays.
//!
//! `muse.yaml` declares a catalogue of quote sources (the variants the
//! original page iterated on, consolidated behind one schema) and names the
//! active one. `MUSE__`-prefixed environment variables override file values,
//! and `${VAR}` placeholders inside string values are expanded after merge.
use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct MuseConfig {
    pub version: Option<String>,
    /// `id` of the source the fetcher uses.
    pub active_source: String,
    pub sources: Vec<SourceSpec>,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

impl MuseConfig {
    /// Resolve the active source spec; disabled or missing ids are an error.
    pub fn active(&self) -> Result<&SourceSpec, ConfigError> {
        self.sources
            .iter()
            .filter(|s| s.enabled.unwrap_or(true))
            .find(|s| s.id == self.active_source)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "active_source `{}` is not an enabled source",
                    self.active_source
                ))
            })
    }
}

/// Shared fields + the per-kind “details”
#[derive(Debug, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub details: SourceDetails,
}

/// The tag is `kind`; the payload lives in `config`
#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum SourceDetails {
    /// Plain-text body, one quote, fixed author label.
    #[serde(rename = "text")]
    Text { config: TextSourceConfig },

    /// JSON body: a top-level array, or an object wrapping one.
    #[serde(rename = "json")]
    Json { config: JsonSourceConfig },
}

#[derive(Debug, Deserialize)]
pub struct TextSourceConfig {
    pub url: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonSourceConfig {
    pub url: String,
    /// Field carrying the quote text in each element.
    #[serde(default)]
    pub field: QuoteField,
    /// Set when the array is wrapped in an object, e.g. `quotes`.
    #[serde(default)]
    pub wrapped_key: Option<String>,
    /// Truncate the parsed list to at most this many quotes.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteField {
    #[default]
    Content,
    Quote,
}

#[derive(Debug, Default, Deserialize)]
pub struct EstimatorConfig {
    /// Reserved minutes subtracted from the free-hours budget.
    #[serde(default)]
    pub buffer_minutes: u32,
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct MuseConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for MuseConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MuseConfigLoader {
    /// Start with sensible defaults: YAML file + `MUSE_` env overrides.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("MUSE").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use muse_config::{MuseConfigLoader, SourceDetails};
    ///
    /// let cfg = MuseConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// active_source: "zen"
    /// sources:
    ///   - id: "zen"
    ///     kind: "text"
    ///     config:
    ///       url: "https://api.github.com/zen"
    ///       author: "GitHub Zen"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert!(matches!(cfg.sources[0].details, SourceDetails::Text { .. }));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config. `${VAR}` placeholders are expanded before typing.
    pub fn load(self) -> Result<MuseConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: MuseConfig = serde_json::from_value(v)
            .map_err(|e| ConfigError::Load(config::ConfigError::Message(e.to_string())))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("QUOTE_HOST", Some("quotes.example"), || {
            let mut v = json!("https://${QUOTE_HOST}/v1");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("https://quotes.example/v1"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("A", Some("one")), ("B", Some("two"))], || {
            let mut v = json!(["x-$A", { "y": "${A}-${B}" }, 7, false, null]);
            expand_env_in_value(&mut v);
            assert_eq!(v, json!(["x-one", { "y": "one-two" }, 7, false, null]));
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("INNER", Some("leaf")),
                ("MID", Some("mid-${INNER}")),
                ("OUTER", Some("start-${MID}-end")),
            ],
            || {
                let mut v = json!("X=${OUTER}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-leaf-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars([("P", Some("${Q}")), ("Q", Some("${P}"))], || {
            let mut v = json!("x=${P}-y");
            // Only the termination matters here; the depth cap breaks the cycle.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn active_rejects_disabled_sources() {
        let cfg = MuseConfigLoader::new()
            .with_yaml_str(
                r#"
version: "1"
active_source: "quotable"
sources:
  - id: "quotable"
    enabled: false
    kind: "json"
    config:
      url: "https://api.quotable.io/quotes/random"
"#,
            )
            .load()
            .unwrap();
        assert!(cfg.active().is_err());
    }
}
