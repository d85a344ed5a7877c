use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

use crate::parser::align::{AlignMode, MismatchPolicy};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Run settings. Every field can be set through a `REVIEWS_*` environment
/// variable; command-line flags override both.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub align: AlignMode,
    pub on_mismatch: MismatchPolicy,
    pub db_path: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("REVIEWS"))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("output", "amazon_review.csv")?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", 30)?
            .set_default("align", "keyed")?
            .set_default("on_mismatch", "truncate")?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("REVIEWS").source(Some(source))
    }

    #[test]
    fn defaults() {
        let s = Settings::from_env(env(&[])).unwrap();
        assert_eq!(s.output, PathBuf::from("amazon_review.csv"));
        assert_eq!(s.timeout_secs, 30);
        assert_eq!(s.align, AlignMode::Keyed);
        assert_eq!(s.on_mismatch, MismatchPolicy::Truncate);
        assert!(s.db_path.is_none());
    }

    #[test]
    fn environment_overrides() {
        let s = Settings::from_env(env(&[
            ("REVIEWS_OUTPUT", "out/phone.csv"),
            ("REVIEWS_ALIGN", "positional"),
            ("REVIEWS_ON_MISMATCH", "abort"),
            ("REVIEWS_DB_PATH", "data/reviews.sqlite"),
        ]))
        .unwrap();
        assert_eq!(s.output, PathBuf::from("out/phone.csv"));
        assert_eq!(s.align, AlignMode::Positional);
        assert_eq!(s.on_mismatch, MismatchPolicy::Abort);
        assert_eq!(s.db_path, Some(PathBuf::from("data/reviews.sqlite")));
    }
}
