use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory where uploads are staged while a request is processed.
    pub upload_dir: String,
    pub ocr_gpu: bool,
    pub ocr_language: String,
    pub tesseract_cmd: String,
    /// Size of the job offer pool scored per resume.
    pub offer_limit: i64,
    /// Technology names added to the built-in entity lexicon.
    pub extra_technologies: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let offer_limit = optional_env("OFFER_LIMIT", "10")
            .parse::<i64>()
            .context("OFFER_LIMIT must be an integer")?;
        if offer_limit < 1 {
            bail!("OFFER_LIMIT must be at least 1, got {offer_limit}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: optional_env("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            upload_dir: optional_env("UPLOAD_DIR", "static/uploads"),
            ocr_gpu: parse_flag(&optional_env("OCR_GPU", "false"))
                .context("OCR_GPU must be a boolean")?,
            ocr_language: optional_env("OCR_LANGUAGE", "eng"),
            tesseract_cmd: optional_env("TESSERACT_CMD", "tesseract"),
            offer_limit,
            extra_technologies: parse_list(&optional_env("EXTRA_TECHNOLOGIES", "")),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognized boolean '{other}'"),
    }
}

/// Comma-separated list, blanks dropped.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
