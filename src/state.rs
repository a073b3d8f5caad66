use crate::pagination::PAGE_SIZE;
use crate::types::{GitHubRepo, GitHubUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Page cursor of the repository listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            page_size: PAGE_SIZE,
        }
    }
}

/// Everything the rendering layer reads.
///
/// Only the explorer actor writes to it; readers get clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub query: Option<String>,
    pub profile: Option<GitHubUser>,
    pub repositories: Vec<GitHubRepo>,
    pub page: PageState,
    pub loading: bool,
    pub theme: ThemeMode,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ViewState {
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub(crate) fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }
}

/// Messages pushed to the user outside of the view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    LookupFailed { query: String, reason: String },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::LookupFailed { query, .. } => {
                write!(f, "User {} not found or network error occurred.", query)
            }
        }
    }
}
