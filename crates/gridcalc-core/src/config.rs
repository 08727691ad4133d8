//! Calculation settings loaded from TOML.
//!
//! ```toml
//! functions_path = "functions.rhai"
//!
//! [evaluation]
//! marker = "="
//! max_depth = 256
//! out_of_range = "0"
//!
//! [rhai]
//! max_operations = 1000000
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use gridcalc_engine::EvalOptions;

/// Resource limits applied to the Rhai engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhaiLimits {
    pub max_operations: u64,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
}

impl Default for RhaiLimits {
    fn default() -> Self {
        RhaiLimits {
            max_operations: 1_000_000,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 1 << 20,
            max_array_size: 1 << 16,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evaluation: EvalOptions,
    pub rhai: RhaiLimits,
    /// Inline Rhai source defining custom functions.
    pub functions: Option<String>,
    /// File of Rhai custom functions, relative to the config file.
    pub functions_path: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file. A relative `functions_path` is resolved against
    /// the directory containing the config file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Config::from_toml_str(&text)?;
        if let Some(functions_path) = config.functions_path.take() {
            let resolved = match path.parent() {
                Some(dir) if functions_path.is_relative() => dir.join(functions_path),
                _ => functions_path,
            };
            config.functions_path = Some(resolved);
        }
        Ok(config)
    }

    /// Custom function source: the functions file (if any) followed by the
    /// inline `functions` text.
    pub fn functions_source(&self) -> Result<Option<String>> {
        let mut parts = Vec::new();
        if let Some(path) = &self.functions_path {
            parts.push(std::fs::read_to_string(path)?);
        }
        if let Some(inline) = &self.functions {
            parts.push(inline.clone());
        }
        Ok((!parts.is_empty()).then(|| parts.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.evaluation.marker, '=');
        assert_eq!(config.evaluation.out_of_range, "0");
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r##"
            functions = "fn double(x) { x * 2 }"

            [evaluation]
            marker = "#"
            max_depth = 8

            [rhai]
            max_operations = 500
            "##,
        )
        .unwrap();
        assert_eq!(config.evaluation.marker, '#');
        assert_eq!(config.evaluation.max_depth, 8);
        assert_eq!(config.evaluation.out_of_range, "0");
        assert_eq!(config.rhai.max_operations, 500);
        assert_eq!(config.rhai.max_expr_depth, 64);
        assert_eq!(
            config.functions_source().unwrap().as_deref(),
            Some("fn double(x) { x * 2 }")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = Config::from_toml_str("[evaluation]\nmax_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    /// Removes the directory on drop, including when an assertion fails.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> TempDir {
            let dir = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            TempDir(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let path = {
            let tmp = TempDir::new("gridcalc-tempdir");
            std::fs::write(tmp.0.join("scratch"), "x").unwrap();
            tmp.0.clone()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_load_resolves_functions_path_next_to_config() {
        let tmp = TempDir::new("gridcalc-config");
        let dir = &tmp.0;
        std::fs::write(dir.join("funcs.rhai"), "fn triple(x) { x * 3 }").unwrap();
        std::fs::write(dir.join("gridcalc.toml"), "functions_path = \"funcs.rhai\"").unwrap();

        let config = Config::load(&dir.join("gridcalc.toml")).unwrap();
        assert_eq!(config.functions_path, Some(dir.join("funcs.rhai")));
        assert_eq!(
            config.functions_source().unwrap().as_deref(),
            Some("fn triple(x) { x * 3 }")
        );
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/gridcalc.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
