use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matcher::MatcherConfig;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROFILE_BOOK_PATH: &str = "profile_book.pdf";
pub const DEFAULT_ROSTER_PATH: &str = "nudge_customers.xlsx";

/// Run configuration loaded from environment variables.
/// `OPENAI_API_KEY` is the only required variable.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub profile_book_path: PathBuf,
    pub roster_path: PathBuf,
    pub matcher: MatcherConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            profile_book_path: profile_book_path_from_env(),
            roster_path: std::env::var("ROSTER_PATH")
                .unwrap_or_else(|_| DEFAULT_ROSTER_PATH.to_string())
                .into(),
            matcher: matcher_config_from_env()?,
        })
    }
}

pub fn profile_book_path_from_env() -> PathBuf {
    std::env::var("PROFILE_BOOK_PATH")
        .unwrap_or_else(|_| DEFAULT_PROFILE_BOOK_PATH.to_string())
        .into()
}

/// Matcher tuning. Unset variables keep the built-in defaults.
pub fn matcher_config_from_env() -> Result<MatcherConfig> {
    let defaults = MatcherConfig::default();
    Ok(MatcherConfig {
        before_chars: parse_var(
            "MATCH_WINDOW_BEFORE",
            std::env::var("MATCH_WINDOW_BEFORE").ok(),
            defaults.before_chars,
        )?,
        after_chars: parse_var(
            "MATCH_WINDOW_AFTER",
            std::env::var("MATCH_WINDOW_AFTER").ok(),
            defaults.after_chars,
        )?,
        keyword_bonus: parse_var(
            "MATCH_KEYWORD_BONUS",
            std::env::var("MATCH_KEYWORD_BONUS").ok(),
            defaults.keyword_bonus,
        )?,
        keywords: defaults.keywords,
    })
}

fn require_env(key: &str) -> Result<String> {
    require_value(key, std::env::var(key).ok())
}

/// An unset variable and an empty one are treated the same.
fn require_value(key: &str, raw: Option<String>) -> Result<String> {
    raw.filter(|v| !v.is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{value}'")),
        None => Ok(default),
    }
}
