use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel for postings whose detail URL could not be resolved.
pub const UNKNOWN_LINK: &str = "#";
/// Fallback company name for cards with no recoverable or unmasked company.
pub const UNKNOWN_COMPANY: &str = "Unknown";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Failed to scrape data from: '{0}'")]
    RequestNotOk(String),
    #[error("Invalid search query: '{0}'")]
    InvalidQuery(&'static str),
}

/// One discovered posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub link: String,
    pub image_url: Option<String>,
    pub description: String,
}

impl JobRecord {
    /// Title, company and description glued together for text matching.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.company, self.description)
    }
}

/// Parameters of one crawl invocation.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub role: String,
    pub location: String,
    pub max_results: usize,
}

impl SearchQuery {
    pub fn new(role: impl Into<String>, location: impl Into<String>, max_results: usize) -> Self {
        Self {
            role: role.into(),
            location: location.into(),
            max_results,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::InvalidQuery("max_results must be positive"));
        }
        if self.role.trim().is_empty() {
            return Err(Error::InvalidQuery("role must not be empty"));
        }
        Ok(())
    }
}
