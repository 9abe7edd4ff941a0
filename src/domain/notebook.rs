//! Notebook listing models returned by the automation bridge

use super::ids::NotebookId;
use super::job::LocationHint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A notebook known to OneNote Desktop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookInfo {
    /// Hierarchy ID of the notebook
    pub id: NotebookId,

    /// Display name
    pub name: String,

    /// Local path or URL OneNote opens the notebook from
    #[serde(default)]
    pub path: String,

    /// Last modification time reported by OneNote
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_modified: Option<DateTime<Utc>>,

    /// Whether the notebook is open in the OneNote window
    #[serde(default)]
    pub is_currently_viewed: bool,
}

impl NotebookInfo {
    /// Timeout tier of this notebook
    pub fn location_hint(&self) -> LocationHint {
        LocationHint::from_notebook_path(&self.path)
    }

    /// Whether the notebook matches a user filter by ID or case-insensitive name
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim();
        self.id.as_str() == filter || self.name.eq_ignore_ascii_case(filter)
    }
}

/// Version information about the helper and OneNote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Helper program version
    pub version: String,

    /// Whether OneNote Desktop is installed
    pub one_note_installed: bool,

    /// OneNote Desktop version, empty when not installed
    #[serde(default)]
    pub one_note_version: String,
}

// OneNote emits timestamps in several shapes; anything unparsable is dropped
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
