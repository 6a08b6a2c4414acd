use std::fmt;

// === StorageError ===

/// Errors raised by the key-value persistence substrate.
#[derive(Debug)]
pub enum StorageError {
    /// The backing store could not be reached or opened.
    Unavailable(String),
    /// The store rejected a write or delete.
    WriteRejected(String),
    /// A stored value could not be serialized or deserialized.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::WriteRejected(msg) => write!(f, "Storage write rejected: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === ConnectionError ===

/// Failure of the read-only credential/target validation probe.
///
/// `http_status` is present when the remote responded with a non-success
/// status, and absent for pure transport failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    pub http_status: Option<u16>,
    pub message: String,
}

impl ConnectionError {
    /// The remote answered with a non-success status.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            http_status: Some(status),
            message: message.into(),
        }
    }

    /// The request never produced a status (DNS, TLS, refused connection, ...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "Connection test failed (HTTP {}): {}", status, self.message),
            None => write!(f, "Connection test failed: {}", self.message),
        }
    }
}

impl std::error::Error for ConnectionError {}

// === SyncError ===

/// Errors raised while appending a bookmark to the remote target.
#[derive(Debug)]
pub enum SyncError {
    /// The bookmark URL is not an absolute http/https URL.
    InvalidUrl(String),
    /// The remote answered the append request with a non-success status.
    RemoteRejected { status: u16, body: String },
    /// The append request never reached the remote.
    Transport(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::InvalidUrl(url) => write!(f, "Invalid bookmark URL: {}", url),
            SyncError::RemoteRejected { status, body } => {
                write!(f, "Remote rejected append (HTTP {}): {}", status, body)
            }
            SyncError::Transport(msg) => write!(f, "Append transport error: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

// === TabError ===

/// Failure of the host tab-inspection primitive.
#[derive(Debug)]
pub enum TabError {
    /// No active tab could be resolved.
    Unavailable(String),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::Unavailable(msg) => write!(f, "Active tab unavailable: {}", msg),
        }
    }
}

impl std::error::Error for TabError {}

// === SetupError ===

/// Errors from the confirm-credentials flow (validate, promote, clear draft).
#[derive(Debug)]
pub enum SetupError {
    /// One or both credential fields are empty after trimming.
    Incomplete,
    /// The pre-flight connection test failed.
    Connection(ConnectionError),
    /// Persisting the confirmed credentials (or clearing the draft) failed.
    Storage(StorageError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Incomplete => {
                write!(f, "Credentials incomplete: API key and target id are both required")
            }
            SetupError::Connection(e) => write!(f, "{}", e),
            SetupError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Incomplete => None,
            SetupError::Connection(e) => Some(e),
            SetupError::Storage(e) => Some(e),
        }
    }
}

impl From<ConnectionError> for SetupError {
    fn from(e: ConnectionError) -> Self {
        SetupError::Connection(e)
    }
}

impl From<StorageError> for SetupError {
    fn from(e: StorageError) -> Self {
        SetupError::Storage(e)
    }
}

// === CaptureError ===

/// Errors from the capture-bookmark flow.
#[derive(Debug)]
pub enum CaptureError {
    /// No confirmed credentials are stored; the session is Unconfigured.
    NotConfigured,
    /// The active tab could not be inspected.
    Tab(TabError),
    /// The append itself failed.
    Sync(SyncError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotConfigured => write!(f, "Notion target is not configured"),
            CaptureError::Tab(e) => write!(f, "{}", e),
            CaptureError::Sync(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::NotConfigured => None,
            CaptureError::Tab(e) => Some(e),
            CaptureError::Sync(e) => Some(e),
        }
    }
}

impl From<TabError> for CaptureError {
    fn from(e: TabError) -> Self {
        CaptureError::Tab(e)
    }
}

impl From<SyncError> for CaptureError {
    fn from(e: SyncError) -> Self {
        CaptureError::Sync(e)
    }
}
