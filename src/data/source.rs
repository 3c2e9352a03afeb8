//! Location of the historical sales CSV and the one-shot fetch.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::AppError;

/// The dataset the dashboard was built around.
pub const DEFAULT_SOURCE_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

/// Environment override for the CSV location (URL or local path).
pub const SOURCE_ENV: &str = "AUTODASH_SOURCE";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where to read the sales CSV from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Interpret a user-supplied location: `http(s)://` is fetched, anything
    /// else is a local path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Resolve the source: explicit flag, then `AUTODASH_SOURCE` (`.env`
    /// honoured), then the default URL.
    pub fn resolve(explicit: Option<&str>) -> Self {
        if let Some(raw) = explicit.filter(|s| !s.trim().is_empty()) {
            return Self::parse(raw);
        }
        dotenvy::dotenv().ok();
        match std::env::var(SOURCE_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => DataSource::Url(DEFAULT_SOURCE_URL.to_string()),
        }
    }

    /// Fetch the raw CSV bytes. Called once at startup.
    pub fn fetch(&self) -> Result<Vec<u8>, AppError> {
        match self {
            DataSource::Url(url) => fetch_url(url),
            DataSource::File(path) => {
                let mut file = File::open(path).map_err(|e| {
                    AppError::input(format!("Failed to open CSV '{}': {e}", path.display()))
                })?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf).map_err(|e| {
                    AppError::data(format!("Failed to read CSV '{}': {e}", path.display()))
                })?;
                Ok(buf)
            }
        }
    }

    /// Short form for headers and status lines.
    pub fn display_name(&self) -> String {
        match self {
            DataSource::Url(url) => url
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(url.as_str())
                .to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>, AppError> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| AppError::runtime(format!("Failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| AppError::data(format!("CSV request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::data(format!(
            "CSV request failed with status {}.",
            resp.status()
        )));
    }

    let body = resp
        .bytes()
        .map_err(|e| AppError::data(format!("Failed to read CSV response body: {e}")))?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DataSource::parse("https://example.com/a.csv"),
            DataSource::Url("https://example.com/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("HTTP://example.com/a.csv"),
            DataSource::Url("HTTP://example.com/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" data/sales.csv "),
            DataSource::File(PathBuf::from("data/sales.csv"))
        );
    }

    #[test]
    fn explicit_source_wins() {
        let src = DataSource::resolve(Some("local.csv"));
        assert_eq!(src, DataSource::File(PathBuf::from("local.csv")));
    }

    #[test]
    fn display_name_is_file_name_for_urls() {
        let src = DataSource::Url(DEFAULT_SOURCE_URL.to_string());
        assert_eq!(src.display_name(), "historical_automobile_sales.csv");
    }

    #[test]
    fn fetch_reads_local_file_and_reports_missing() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "Year,Month\n1980,Jan\n").unwrap();
        let src = DataSource::File(tmp.path().to_path_buf());
        let bytes = src.fetch().unwrap();
        assert!(bytes.starts_with(b"Year,Month"));

        let missing = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = missing.fetch().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
