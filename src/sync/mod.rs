//! Contracts between the resource model and the transport layer.
//!
//! The model never performs network I/O. It hands the transport a
//! validated [`FileSet`] plus resource metadata, and the transport calls
//! back [`CompositeResource::mark_synced`] - through
//! [`upload_resource`] - only once the remote write is confirmed. A failed
//! or cancelled upload leaves every dirty flag untouched, so the resource
//! stays safely retryable.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::props::FileSet;
use crate::resource::CompositeResource;
use crate::util::{Error, Result};

/// Connection context for a remote store.
///
/// Passed explicitly into every transport call; there is no ambient
/// logged-in state anywhere in the model.
#[derive(Clone, Debug)]
pub struct Session {
    base_url: String,
    /// API key presented with every request.
    pub api_key: String,
}

impl Session {
    /// Create a session against an endpoint.
    ///
    /// Bare endpoints get a trailing slash patched on. Plain-http
    /// endpoints are only accepted for localhost.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let mut base_url = endpoint.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let local = base_url.starts_with("http://localhost")
            || base_url.starts_with("http://127.0.0.1");
        if !base_url.starts_with("https://") && !local {
            return Err(Error::InvalidEndpoint(base_url));
        }
        Ok(Self {
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Base endpoint URL, always slash-terminated.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API endpoint for uploads and downloads.
    pub fn api_url(&self) -> String {
        format!("{}api/", self.base_url)
    }
}

/// Remote locations assigned to uploaded files, returned on success.
#[derive(Clone, Debug)]
pub struct UploadReceipt {
    /// Id the store assigned to (or confirmed for) the resource.
    pub resource_id: String,
    /// Remote location per uploaded array key.
    pub files: BTreeMap<String, String>,
}

/// The store side of a sync, implemented by the transport layer.
///
/// `upload` must be invoked with exactly the bytes from the file set,
/// unmodified, and must only report success after the remote write is
/// durable.
pub trait RemoteStore {
    /// Write resource metadata plus the given files; returns remote
    /// locations on success.
    fn upload(
        &mut self,
        session: &Session,
        kind: &str,
        metadata: &Value,
        files: &FileSet,
    ) -> Result<UploadReceipt>;

    /// Fetch the JSON document of a stored resource.
    fn download(&self, session: &Session, resource_id: &str) -> Result<Value>;
}

/// Resolver for array payload references found in resource documents.
pub trait PayloadSource {
    /// Fetch the bytes behind a reference.
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// In-memory payload map, for tests and locally cached downloads.
impl PayloadSource for BTreeMap<String, Vec<u8>> {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.get(location).cloned().ok_or_else(|| Error::PayloadUnavailable {
            key: location.to_string(),
            reason: "not in payload map".to_string(),
        })
    }
}

/// Upload a resource's dirty files and clear its dirty state on success.
///
/// Validators run before any I/O; a validation failure or a store error
/// returns without touching dirty flags. `force` re-uploads every array
/// regardless of dirtiness.
pub fn upload_resource<R, S>(
    store: &mut S,
    session: &Session,
    resource: &mut R,
    force: bool,
) -> Result<UploadReceipt>
where
    R: CompositeResource,
    S: RemoteStore + ?Sized,
{
    let files = resource.dirty_file_set(force)?;
    debug!(
        kind = resource.kind(),
        files = files.len(),
        bytes = files.total_bytes(),
        "uploading resource"
    );

    let receipt = store.upload(session, resource.kind(), &resource.metadata(), &files)?;

    // The store confirmed the write; only now does local state match remote.
    resource.mark_synced();
    info!(resource_id = %receipt.resource_id, "resource synced");
    Ok(receipt)
}
