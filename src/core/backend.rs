use std::env;

use gethostname::gethostname;

/// Host string that selects the object-store backend.
pub const OBJECT_STORE_HOST: &str = "Amazon";
/// Host string that selects the remote file-service backend.
pub const FILE_SERVICE_HOST: &str = "Render";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    ObjectStore,
    FileService,
    Local,
}

impl Backend {
    /// Maps a free-form host string to a backend. Unrecognized strings
    /// (including plain machine hostnames) select the local filesystem,
    /// never an error.
    pub fn from_host(host: &str) -> Self {
        match host {
            OBJECT_STORE_HOST => Backend::ObjectStore,
            FILE_SERVICE_HOST => Backend::FileService,
            _ => Backend::Local,
        }
    }

    /// Short name used inside bracketed error tags.
    pub fn tag(&self) -> &'static str {
        match self {
            Backend::ObjectStore => "Store",
            Backend::FileService => "Service",
            Backend::Local => "Local",
        }
    }
}

/// Returns the platform host string when the process runs on a managed
/// platform, `None` on an ordinary machine. The Lambda marker wins over
/// the Render flag when both are present.
pub fn detected_platform() -> Option<&'static str> {
    if env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
        return Some(OBJECT_STORE_HOST);
    }
    if env::var("RENDER").is_ok_and(|v| v == "true") {
        return Some(FILE_SERVICE_HOST);
    }
    None
}

/// Resolves the host identity of the current process: a platform host
/// string when one is detected, otherwise the machine's network hostname.
///
/// The value is advisory. Dispatch always follows the `host` argument the
/// caller passes, so callers typically resolve once and thread the result
/// through. Re-derived on every call, never cached.
pub fn resolve_host() -> String {
    match detected_platform() {
        Some(platform) => platform.to_string(),
        None => gethostname().to_string_lossy().into_owned(),
    }
}
