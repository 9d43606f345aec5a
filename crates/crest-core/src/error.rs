use thiserror::Error;

/// A candidate record was rejected before reaching the store.
///
/// Reported to the submitting user; the store is never mutated on the
/// rejected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: name")]
    MissingName,
    #[error("missing required field: summary")]
    MissingSummary,
    #[error("missing required field: geojson")]
    MissingGeojson,
    #[error("geojson is not a FeatureCollection")]
    NotAFeatureCollection,
    #[error("geojson FeatureCollection has no features")]
    EmptyFeatures,
}

impl ValidationError {
    /// Stable machine-readable code for CLI/JSON consumers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::MissingSummary => "missing_summary",
            Self::MissingGeojson => "missing_geojson",
            Self::NotAFeatureCollection => "not_a_feature_collection",
            Self::EmptyFeatures => "empty_features",
        }
    }
}

/// Outcome of a failed remote read or write.
///
/// A missing remote file is NOT an error (`fetch` returns `Ok(None)`);
/// everything here aborts the current operation. Conflicts are distinct
/// from transport failures so the caller can choose to re-fetch and
/// re-apply. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Fingerprint mismatch on write. The remote content moved since the
    /// last fetch; re-fetch and resubmit to resolve.
    #[error("remote content conflict (HTTP {status}): {body}")]
    Conflict { status: u16, body: String },

    /// Any unexpected status. Status and body are surfaced verbatim for
    /// operator diagnosis.
    #[error("remote request failed (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// Network-level failure before a status was received.
    #[error("remote transport error: {0}")]
    Transport(String),

    /// The response arrived but its payload could not be decoded.
    #[error("remote response could not be decoded: {0}")]
    Decode(String),

    /// The write path is disabled (missing repo coordinate or token).
    #[error("remote writes are disabled: {0}")]
    ReadOnly(&'static str),
}
