//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lessoncheck_core::parser::LoadOptions;
use lessoncheck_core::DEFAULT_PASSING_SCORE_PERCENT;

/// Top-level lessoncheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessoncheckConfig {
    /// Pass mark for quizzes that do not set their own.
    #[serde(default = "default_passing_score")]
    pub default_passing_score: u8,
    /// Where attempt records are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory validated when no bank path is given.
    #[serde(default = "default_banks_dir")]
    pub banks_dir: PathBuf,
}

fn default_passing_score() -> u8 {
    DEFAULT_PASSING_SCORE_PERCENT
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./lessoncheck-results")
}
fn default_banks_dir() -> PathBuf {
    PathBuf::from("./banks")
}

impl Default for LessoncheckConfig {
    fn default() -> Self {
        Self {
            default_passing_score: default_passing_score(),
            output_dir: default_output_dir(),
            banks_dir: default_banks_dir(),
        }
    }
}

impl LessoncheckConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            default_passing_score: Some(self.default_passing_score),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never expanded again.
/// An unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `lessoncheck.toml` in the current directory
/// 2. `~/.config/lessoncheck/config.toml`
///
/// `LESSONCHECK_PASSING_SCORE` overrides `default_passing_score`.
pub fn load_config_from(path: Option<&Path>) -> Result<LessoncheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lessoncheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LessoncheckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LessoncheckConfig::default(),
    };

    if let Ok(value) = std::env::var("LESSONCHECK_PASSING_SCORE") {
        tracing::debug!("default pass mark overridden by LESSONCHECK_PASSING_SCORE");
        config.default_passing_score = value
            .trim()
            .parse()
            .with_context(|| format!("invalid LESSONCHECK_PASSING_SCORE: '{value}'"))?;
    }

    anyhow::ensure!(
        config.default_passing_score <= 100,
        "default_passing_score must be between 0 and 100, got {}",
        config.default_passing_score
    );

    config.output_dir = resolve_path(&config.output_dir);
    config.banks_dir = resolve_path(&config.banks_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lessoncheck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LESSONCHECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LESSONCHECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LESSONCHECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("unterminated ${oops"), "unterminated ${oops");
        assert_eq!(
            resolve_env_vars("${_LESSONCHECK_TEST_VAR}/${_LESSONCHECK_UNSET_VAR}/x"),
            "hello//x"
        );
        std::env::remove_var("_LESSONCHECK_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        std::env::set_var("_LESSONCHECK_SELF_REF", "${_LESSONCHECK_SELF_REF}");
        std::env::set_var("_LESSONCHECK_INNER", "inner");
        std::env::set_var("_LESSONCHECK_OUTER", "${_LESSONCHECK_INNER}");

        assert_eq!(
            resolve_env_vars("${_LESSONCHECK_SELF_REF}/x"),
            "${_LESSONCHECK_SELF_REF}/x"
        );
        assert_eq!(resolve_env_vars("${_LESSONCHECK_OUTER}"), "${_LESSONCHECK_INNER}");

        std::env::remove_var("_LESSONCHECK_SELF_REF");
        std::env::remove_var("_LESSONCHECK_INNER");
        std::env::remove_var("_LESSONCHECK_OUTER");
    }

    #[test]
    fn self_referencing_config_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessoncheck.toml");
        std::fs::write(&path, "output_dir = \"${_LESSONCHECK_LOOP}/results\"\n").unwrap();

        std::env::set_var("_LESSONCHECK_LOOP", "${_LESSONCHECK_LOOP}");
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_LESSONCHECK_LOOP");

        assert_eq!(config.output_dir, PathBuf::from("${_LESSONCHECK_LOOP}/results"));
    }

    #[test]
    fn default_config() {
        let config = LessoncheckConfig::default();
        assert_eq!(config.default_passing_score, 70);
        assert_eq!(config.banks_dir, PathBuf::from("./banks"));
        assert_eq!(
            config.load_options().default_passing_score,
            Some(70)
        );
    }

    #[test]
    fn parse_partial_config() {
        let config: LessoncheckConfig = toml::from_str("default_passing_score = 80\n").unwrap();
        assert_eq!(config.default_passing_score, 80);
        assert_eq!(config.output_dir, PathBuf::from("./lessoncheck-results"));
    }

    #[test]
    fn load_explicit_path_with_env_expansion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessoncheck.toml");
        std::fs::write(
            &path,
            "output_dir = \"${_LESSONCHECK_OUT}/results\"\nbanks_dir = \"lessons\"\n",
        )
        .unwrap();

        std::env::set_var("_LESSONCHECK_OUT", "/tmp/lc");
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_LESSONCHECK_OUT");

        assert_eq!(config.output_dir, PathBuf::from("/tmp/lc/results"));
        assert_eq!(config.banks_dir, PathBuf::from("lessons"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/lessoncheck.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn out_of_range_pass_mark_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessoncheck.toml");
        std::fs::write(&path, "default_passing_score = 120\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
