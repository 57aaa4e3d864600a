// src/session.rs
use std::env;

/// Environment variable names matching the original CLI revision.
pub const ENV_ACCESS_TOKEN: &str = "ARENA_PERSONAL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SLUG: &str = "ARENA_CHANNEL_SLUG";
pub const ENV_BLOCK_TITLE: &str = "ARENA_BLOCK_TITLE";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Are.na access token is required (set {ENV_ACCESS_TOKEN})")]
    MissingToken,
    #[error("Are.na channel slug is required (set {ENV_CHANNEL_SLUG})")]
    MissingChannel,
}

/// Everything a monitoring session needs: where to post, as whom, and the
/// optional title stamped on every block. Validated once at startup; empty
/// credential or channel is fatal here, never mid-session.
#[derive(Debug, Clone)]
pub struct MonitorSession {
    pub access_token: String,
    pub channel_slug: String,
    pub block_title: Option<String>,
}

impl MonitorSession {
    pub fn new(
        access_token: impl Into<String>,
        channel_slug: impl Into<String>,
        block_title: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let access_token = access_token.into().trim().to_string();
        let channel_slug = channel_slug.into().trim().to_string();
        let block_title = block_title.into().trim().to_string();

        if access_token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        if channel_slug.is_empty() {
            return Err(SessionError::MissingChannel);
        }

        Ok(Self {
            access_token,
            channel_slug,
            block_title: if block_title.is_empty() {
                None
            } else {
                Some(block_title)
            },
        })
    }

    /// Build a session from environment variables. The block title is
    /// optional; token and channel slug are not.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::new(
            env::var(ENV_ACCESS_TOKEN).unwrap_or_default(),
            env::var(ENV_CHANNEL_SLUG).unwrap_or_default(),
            env::var(ENV_BLOCK_TITLE).unwrap_or_default(),
        )
    }
}
