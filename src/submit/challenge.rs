//! Optional anti-automation token.
//!
//! When a site key is configured, a token is requested before each
//! submission. Failing to get one never blocks the submission.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Errors from a challenge provider.
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    /// The helper program could not be started.
    #[error("could not run challenge helper: {0}")]
    Spawn(#[from] io::Error),

    /// The helper exited unsuccessfully.
    #[error("challenge helper exited with {0}")]
    Failed(ExitStatus),

    /// The helper succeeded but printed no token.
    #[error("challenge helper printed no token")]
    Empty,
}

/// Issues tokens for a site key.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    async fn token(&self, site_key: &str) -> Result<String, ChallengeError>;
}

/// Runs `<program> <site_key> submit` and takes stdout as the token.
#[derive(Debug, Clone)]
pub struct CommandChallenge {
    program: String,
}

impl CommandChallenge {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ChallengeProvider for CommandChallenge {
    async fn token(&self, site_key: &str) -> Result<String, ChallengeError> {
        let output = Command::new(&self.program)
            .arg(site_key)
            .arg("submit")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;
        if !output.status.success() {
            return Err(ChallengeError::Failed(output.status));
        }
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(ChallengeError::Empty);
        }
        Ok(token)
    }
}

/// Requests a token if a site key and a provider are both available.
///
/// Any failure, or no answer within `limit`, is logged and yields `None`.
pub async fn obtain_token(
    site_key: Option<&str>,
    provider: Option<&dyn ChallengeProvider>,
    limit: Duration,
) -> Option<String> {
    let (site_key, provider) = (site_key?, provider?);
    match tokio::time::timeout(limit, provider.token(site_key)).await {
        Ok(Ok(token)) => Some(token),
        Ok(Err(error)) => {
            tracing::debug!(%error, "continuing without challenge token");
            None
        }
        Err(_) => {
            tracing::debug!(?limit, "challenge timed out, continuing without token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use super::*;

    const LIMIT: Duration = Duration::from_secs(5);

    struct FixedProvider {
        result: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(result: Result<&'static str, ()>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChallengeProvider for FixedProvider {
        async fn token(&self, _site_key: &str) -> Result<String, ChallengeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .map(str::to_string)
                .map_err(|()| ChallengeError::Empty)
        }
    }

    #[tokio::test]
    async fn no_site_key_skips_provider() {
        let provider = FixedProvider::new(Ok("tok"));
        assert_eq!(obtain_token(None, Some(&provider), LIMIT).await, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_provider_is_none() {
        assert_eq!(obtain_token(Some("key"), None, LIMIT).await, None);
    }

    #[tokio::test]
    async fn token_is_returned() {
        let provider = FixedProvider::new(Ok("tok"));
        assert_eq!(
            obtain_token(Some("key"), Some(&provider), LIMIT).await.as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn provider_failure_is_swallowed() {
        let provider = FixedProvider::new(Err(()));
        assert_eq!(obtain_token(Some("key"), Some(&provider), LIMIT).await, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    struct StalledProvider;

    #[async_trait]
    impl ChallengeProvider for StalledProvider {
        async fn token(&self, _site_key: &str) -> Result<String, ChallengeError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_provider_times_out() {
        let started = Instant::now();
        let token = obtain_token(
            Some("key"),
            Some(&StalledProvider),
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(token, None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_stdout_becomes_token() {
        let challenge = CommandChallenge::new("echo");
        assert_eq!(challenge.token("site").await.unwrap(), "site submit");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_failure_is_error() {
        let challenge = CommandChallenge::new("false");
        assert!(matches!(
            challenge.token("site").await,
            Err(ChallengeError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn missing_command_is_spawn_error() {
        let challenge = CommandChallenge::new("pvs-contact-no-such-helper");
        assert!(matches!(
            challenge.token("site").await,
            Err(ChallengeError::Spawn(_))
        ));
    }
}
