//! Process identity.
//!
//! Every time series written by this process carries a label identifying the process instance that produced it, so
//! that series from several replicas of the same application do not collide in the backend. The identity has the form
//! `<runtime-tag>-<process-id>@<hostname>`, for example `rust-4242@web-7f9c`.
#![deny(warnings)]
#![deny(missing_docs)]

use std::{fmt, sync::Arc, sync::OnceLock};

use tracing::debug;

/// Runtime tag used as the first component of the detected identity.
pub const RUNTIME_TAG: &str = "rust";

/// Hostname used when the operating system does not provide one.
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// Identity of the running process.
///
/// Cloning is cheap: the underlying string is shared.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProcessIdentity {
    value: Arc<str>,
}

impl ProcessIdentity {
    /// Detects the identity of the current process.
    ///
    /// Uses the current process ID and the hostname reported by the operating system, falling back to
    /// [`FALLBACK_HOSTNAME`] when the hostname cannot be queried. This never fails.
    ///
    /// Prefer [`global`][Self::global] unless a fresh detection is specifically needed.
    pub fn detect() -> Self {
        let hostname = get_os_hostname().unwrap_or_else(|| {
            debug!(
                fallback = FALLBACK_HOSTNAME,
                "OS hostname unavailable. Using fallback hostname for process identity."
            );
            FALLBACK_HOSTNAME.to_string()
        });

        Self::from_parts(RUNTIME_TAG, std::process::id(), &hostname)
    }

    /// Returns the process-wide identity.
    ///
    /// Detected on first call, and identical for every caller for the remainder of the process lifetime.
    pub fn global() -> &'static Self {
        static IDENTITY: OnceLock<ProcessIdentity> = OnceLock::new();
        IDENTITY.get_or_init(Self::detect)
    }

    /// Creates an identity from its components.
    ///
    /// An empty (or all-whitespace) hostname is replaced with [`FALLBACK_HOSTNAME`].
    pub fn from_parts(runtime_tag: &str, pid: u32, hostname: &str) -> Self {
        let hostname = match hostname.trim() {
            "" => FALLBACK_HOSTNAME,
            trimmed => trimmed,
        };

        Self::fixed(format!("{}-{}@{}", runtime_tag, pid, hostname))
    }

    /// Creates an identity with a fixed value.
    pub fn fixed<V: Into<Arc<str>>>(value: V) -> Self {
        Self { value: value.into() }
    }

    /// Returns the identity as a string.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for ProcessIdentity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProcessIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn get_os_hostname() -> Option<String> {
    match hostname::get() {
        Ok(hostname) => {
            let hostname = hostname.to_string_lossy();
            let hostname = hostname.trim();
            (!hostname.is_empty()).then(|| hostname.to_string())
        }
        Err(e) => {
            debug!(error = %e, "Failed to query hostname.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_format() {
        let identity = ProcessIdentity::from_parts("rust", 4242, "web-1");
        assert_eq!(identity.as_str(), "rust-4242@web-1");
        assert_eq!(identity.to_string(), "rust-4242@web-1");
    }

    #[test]
    fn from_parts_empty_hostname_falls_back() {
        let identity = ProcessIdentity::from_parts("rust", 1, "  ");
        assert_eq!(identity.as_str(), "rust-1@localhost");
    }

    #[test]
    fn detect_uses_current_pid() {
        let identity = ProcessIdentity::detect();
        let prefix = format!("{}-{}@", RUNTIME_TAG, std::process::id());
        assert!(identity.as_str().starts_with(&prefix), "unexpected identity: {}", identity);
        assert!(identity.as_str().len() > prefix.len());
    }

    #[test]
    fn global_is_memoized() {
        let first = ProcessIdentity::global();
        let second = ProcessIdentity::global();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_is_verbatim() {
        let identity = ProcessIdentity::fixed("test-identity");
        assert_eq!(identity.as_ref(), "test-identity");
        assert_eq!(identity.clone(), identity);
    }
}
