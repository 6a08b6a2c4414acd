use serde::{Deserialize, Serialize};

/// Which kind of Notion object receives appended bookmarks.
///
/// The two modes are mutually exclusive deployment configurations: an
/// installation points either at a page (blocks appended to its children)
/// or at a database (one row created per bookmark).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    #[default]
    Page,
    Database,
}

/// Confirmed Notion credentials: an integration API key and the id of the
/// target page or database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub target_id: String,
    #[serde(default)]
    pub mode: TargetMode,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, target_id: impl Into<String>, mode: TargetMode) -> Self {
        Self {
            api_key: api_key.into(),
            target_id: target_id.into(),
            mode,
        }
    }

    /// A credential set counts as configured only when both fields are
    /// non-empty after trimming. Partial input is never "configured".
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.target_id.trim().is_empty()
    }
}

/// One editable credential field, used to key per-field draft writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    ApiKey,
    TargetId,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::ApiKey => "api_key",
            DraftField::TargetId => "target_id",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "api_key" => Some(DraftField::ApiKey),
            "target_id" => Some(DraftField::TargetId),
            _ => None,
        }
    }
}

/// Unconfirmed, auto-persisted credential input.
///
/// Created implicitly on the first keystroke, merged field by field, and
/// cleared the instant the corresponding [`Credentials`] are confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl DraftCredentials {
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.target_id.is_none()
    }

    /// Merges one field value into the draft, replacing any previous value.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::ApiKey => self.api_key = Some(value.into()),
            DraftField::TargetId => self.target_id = Some(value.into()),
        }
    }

    pub fn field(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::ApiKey => self.api_key.as_deref(),
            DraftField::TargetId => self.target_id.as_deref(),
        }
    }
}
