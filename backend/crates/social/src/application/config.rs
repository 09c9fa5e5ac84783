//! Application Configuration

/// Social application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialConfig {
    /// Maximum post title length in characters
    pub max_title_length: usize,
    /// Maximum post content length in characters
    pub max_content_length: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            max_title_length: 1000,
            max_content_length: 500,
        }
    }
}
