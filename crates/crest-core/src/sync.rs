//! Remote content sync over a GitHub-contents-style API.
//!
//! One file, read and written whole. A fetch returns the current text and
//! its content fingerprint (the blob SHA); a put sends the full
//! replacement blob with the fingerprint as an optimistic-concurrency
//! token. The server is authoritative for conflict detection; nothing is
//! retried here.
//!
//! Configuration is an explicit value passed in at construction. The
//! client never reads the process environment.

use crate::error::SyncError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::debug;

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = "crest-cli";

/// `<owner>/<repo>` coordinate of the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse an `<owner>/<repo>` string.
    ///
    /// # Errors
    ///
    /// Fails when either side of the slash is missing.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        let Some((owner, repo)) = trimmed.split_once('/') else {
            anyhow::bail!("invalid repo slug '{trimmed}': expected <owner>/<repo>");
        };

        if owner.is_empty() || repo.is_empty() {
            anyhow::bail!("invalid repo slug '{trimmed}': expected <owner>/<repo>");
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Everything the client needs: repository coordinate, ref, file path,
/// and an optional bearer credential. No token means read-only mode.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub repo: RepoSlug,
    pub branch: String,
    pub path: String,
    pub token: Option<String>,
}

impl RemoteConfig {
    /// Whether the write path is enabled. Checked before any put.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.token.is_some()
    }
}

/// A fetched blob and the fingerprint identifying its exact version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub text: String,
    pub fingerprint: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

/// Client for one file in one repository at one ref.
pub struct ContentsClient {
    config: RemoteConfig,
}

impl ContentsClient {
    #[must_use]
    pub const fn new(config: RemoteConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Read the file and its fingerprint.
    ///
    /// A missing file is an expected outcome: `Ok(None)` means "no prior
    /// external file, start empty". Any other non-2xx status is a
    /// [`SyncError::Status`] with the body verbatim.
    ///
    /// # Errors
    ///
    /// Transport failures, unexpected statuses, and undecodable payloads.
    pub fn fetch(&self) -> Result<Option<RemoteFile>, SyncError> {
        let url = format!("{}?ref={}", contents_url(&self.config), self.config.branch);
        debug!(url, "fetching remote content");

        let mut request = ureq::get(&url)
            .set("Accept", ACCEPT_HEADER)
            .set("User-Agent", USER_AGENT);
        if let Some(token) = &self.config.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        match request.call() {
            Ok(response) => {
                let body: ContentsResponse = response
                    .into_json()
                    .map_err(|err| SyncError::Decode(err.to_string()))?;
                let text = decode_content(&body.content)?;
                Ok(Some(RemoteFile {
                    text,
                    fingerprint: body.sha,
                }))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(ureq::Error::Status(status, response)) => {
                Err(status_error(status, read_body(response)))
            }
            Err(err) => Err(SyncError::Transport(err.to_string())),
        }
    }

    /// Atomically replace the file's content.
    ///
    /// `expected_fingerprint` must be the token from the most recent
    /// fetch; omit it only when creating a file that fetch reported
    /// absent. A fingerprint mismatch surfaces as [`SyncError::Conflict`],
    /// distinct from transport failure, and is never retried here.
    ///
    /// # Errors
    ///
    /// [`SyncError::ReadOnly`] without a token, plus everything
    /// [`ContentsClient::fetch`] can report.
    pub fn put(
        &self,
        text: &str,
        message: &str,
        expected_fingerprint: Option<&str>,
    ) -> Result<(), SyncError> {
        let Some(token) = &self.config.token else {
            return Err(SyncError::ReadOnly("missing bearer token"));
        };

        let url = contents_url(&self.config);
        let body = put_body(text, message, &self.config.branch, expected_fingerprint);
        debug!(url, "writing remote content");

        let request = ureq::put(&url)
            .set("Accept", ACCEPT_HEADER)
            .set("User-Agent", USER_AGENT)
            .set("Authorization", &format!("Bearer {token}"));

        match request.send_json(body) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => {
                Err(status_error(status, read_body(response)))
            }
            Err(err) => Err(SyncError::Transport(err.to_string())),
        }
    }
}

fn contents_url(config: &RemoteConfig) -> String {
    format!(
        "https://api.github.com/repos/{}/contents/{}",
        config.repo.full_name(),
        config.path
    )
}

/// Build the PUT payload. The fingerprint key is only present when the
/// caller holds one; the API treats its absence as "create".
fn put_body(text: &str, message: &str, branch: &str, fingerprint: Option<&str>) -> JsonValue {
    let mut body = json!({
        "message": message,
        "content": BASE64.encode(text.as_bytes()),
        "branch": branch,
    });
    if let Some(sha) = fingerprint {
        body["sha"] = json!(sha);
    }
    body
}

/// The contents API wraps base64 at 60 columns; strip whitespace first.
fn decode_content(raw: &str) -> Result<String, SyncError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|err| SyncError::Decode(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| SyncError::Decode(err.to_string()))
}

/// Map a non-2xx status onto the error taxonomy. 409 is the fingerprint
/// mismatch the API reports for stale writes.
fn status_error(status: u16, body: String) -> SyncError {
    if status == 409 {
        SyncError::Conflict { status, body }
    } else {
        SyncError::Status { status, body }
    }
}

fn read_body(response: ureq::Response) -> String {
    response.into_string().unwrap_or_default()
}
