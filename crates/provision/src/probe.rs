//! Readiness probes.
//!
//! Probes are cheap local checks run synchronously inside every status
//! request. They are injectable so the tracker is testable without any of
//! the heavy capabilities actually present.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// A readiness check for one capability.
#[async_trait]
pub trait CapabilityProbe: Send + Sync + 'static {
    /// Whether the capability is present and usable right now.
    async fn probe(&self) -> bool;
}

/// Probes for the existence of a directory (installed model assets and
/// materialized runtime components).
pub struct DirectoryProbe {
    path: PathBuf,
}

impl DirectoryProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CapabilityProbe for DirectoryProbe {
    async fn probe(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }
}

/// Probes whether a live service answers on a TCP endpoint. Suited to
/// capabilities whose readiness is a running backend rather than files on
/// disk.
pub struct EndpointProbe {
    authority: String,
    timeout: Duration,
}

impl EndpointProbe {
    /// Probe timeout; status requests must stay cheap.
    const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Build from an HTTP base URL, keeping only `host:port`.
    pub fn from_url(url: &str) -> Self {
        let stripped = url
            .trim_start_matches("http://")
            .trim_start_matches("https://");
        let authority = stripped.split('/').next().unwrap_or(stripped);
        let authority = if authority.contains(':') {
            authority.to_string()
        } else {
            format!("{authority}:80")
        };
        Self::new(authority)
    }
}

#[async_trait]
impl CapabilityProbe for EndpointProbe {
    async fn probe(&self) -> bool {
        matches!(
            tokio::time::timeout(
                self.timeout,
                tokio::net::TcpStream::connect(&self.authority),
            )
            .await,
            Ok(Ok(_))
        )
    }
}

/// Fixed-answer probe for tests.
pub struct FixedProbe(pub bool);

#[async_trait]
impl CapabilityProbe for FixedProbe {
    async fn probe(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_probe_tracks_the_directory() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("model");

        let probe = DirectoryProbe::new(&target);
        assert!(!probe.probe().await);

        tokio::fs::create_dir_all(&target).await.unwrap();
        assert!(probe.probe().await);
    }

    #[tokio::test]
    async fn directory_probe_rejects_plain_files() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("model");
        tokio::fs::write(&target, b"not a dir").await.unwrap();

        assert!(!DirectoryProbe::new(&target).probe().await);
    }

    #[tokio::test]
    async fn endpoint_probe_fails_fast_on_dead_port() {
        let probe = EndpointProbe::new("127.0.0.1:1");
        assert!(!probe.probe().await);
    }

    #[tokio::test]
    async fn endpoint_probe_connects_to_live_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = EndpointProbe::new(addr.to_string());
        assert!(probe.probe().await);
    }

    #[test]
    fn from_url_extracts_the_authority() {
        let probe = EndpointProbe::from_url("http://127.0.0.1:7860/sdapi/v1");
        assert_eq!(probe.authority, "127.0.0.1:7860");

        let defaulted = EndpointProbe::from_url("http://backend.internal/api");
        assert_eq!(defaulted.authority, "backend.internal:80");
    }
}
