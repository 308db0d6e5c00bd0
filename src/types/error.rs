//! Unified Error Type System
//!
//! Centralized error types for the planner, the HTTP API and the CLI.
//! Model failures carry a category so the planner can decide whether a
//! retry is worth it.
//!
//! ## Error Categories
//!
//! - **Transient**: Temporary upstream issues (retry)
//! - **RateLimit**: Provider rate limiting (wait and retry)
//! - **Network**: Connectivity issues (retry with backoff)
//! - **Auth**: Authentication failures (fail fast)
//! - **Unavailable**: Endpoint missing or down (fail)

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories used for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited - wait then retry
    RateLimit,
    /// Authentication failed - fail fast, don't retry
    Auth,
    /// Network/connectivity issues - retry with backoff
    Network,
    /// Provider unavailable
    Unavailable,
    /// Invalid request - don't retry, fix request
    BadRequest,
    /// Provider answered with a body we could not decode
    ParseError,
    /// Temporary server issues - retry
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Check if this category is worth retrying against the same provider
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Network | Self::Transient | Self::ParseError
        )
    }

    /// Get recommended retry delay for this category
    pub fn recommended_delay(&self) -> Duration {
        match self {
            Self::RateLimit => Duration::from_secs(30),
            Self::Network => Duration::from_secs(5),
            Self::Transient => Duration::from_secs(2),
            Self::ParseError => Duration::from_secs(1),
            _ => Duration::from_millis(500),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// LLM error with category, context, and retry hints
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category for retry decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
    /// Suggested wait time before retry (if applicable)
    pub retry_after: Option<Duration>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
            retry_after: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
            retry_after: None,
        }
    }

    /// Add suggested retry delay
    pub fn retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }

    /// Get recommended retry delay
    pub fn recommended_delay(&self) -> Duration {
        self.retry_after
            .unwrap_or_else(|| self.category.recommended_delay())
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps provider failures onto an [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
        {
            return LlmError::with_provider(ErrorCategory::RateLimit, message, provider)
                .retry_after(Duration::from_secs(30));
        }

        if lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
        {
            return LlmError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return LlmError::with_provider(ErrorCategory::Network, message, provider)
                .retry_after(Duration::from_secs(5));
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("overloaded")
        {
            return LlmError::with_provider(ErrorCategory::Transient, message, provider)
                .retry_after(Duration::from_secs(2));
        }

        if lower.contains("decode") || lower.contains("json") {
            return LlmError::with_provider(ErrorCategory::ParseError, message, provider)
                .retry_after(Duration::from_secs(1));
        }

        LlmError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider)
                .retry_after(Duration::from_secs(30)),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 | 422 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
                    .retry_after(Duration::from_secs(5))
            }
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum QuestError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // LLM Errors
    // -------------------------------------------------------------------------
    /// Structured LLM error with category and retry hints
    #[error("{0}")]
    Llm(LlmError),

    /// Simple LLM API error (use Llm variant for structured errors)
    #[error("{0}")]
    LlmApi(String),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Planning Errors
    // -------------------------------------------------------------------------
    #[error("请提供问题内容")]
    EmptyQuestion,

    #[error("服务端未配置完整的 {label}_API_KEY/{label}_ENDPOINT/{label}_MODEL")]
    ProviderNotConfigured { label: &'static str },

    #[error("模型返回无法解析为清单任务")]
    Unparseable { raw: String },

    /// Error reported by a remote planning server
    #[error("{0}")]
    Api(String),

    // -------------------------------------------------------------------------
    // Quest Tree Errors
    // -------------------------------------------------------------------------
    #[error("Invalid node path '{0}': expected 'root' or 'root-<i>-<j>...'")]
    InvalidPath(String),

    #[error("No node at path {0}")]
    NodeNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<LlmError> for QuestError {
    fn from(err: LlmError) -> Self {
        QuestError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, QuestError>;

impl QuestError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Llm(e) => e.is_retryable(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Minimum wait before retrying, when the failure carries one
    pub fn retry_hint(&self) -> Option<Duration> {
        match self {
            Self::Llm(e) => Some(e.recommended_delay()),
            _ => None,
        }
    }

    /// Whether the failure came from talking to the model backend
    pub fn is_model_failure(&self) -> bool {
        matches!(
            self,
            Self::Llm(_) | Self::LlmApi(_) | Self::Timeout { .. } | Self::Http(_)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_retryable() {
        assert!(ErrorCategory::RateLimit.is_retryable());
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Transient.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::BadRequest.is_retryable());
        assert!(!ErrorCategory::Unavailable.is_retryable());
    }

    #[test]
    fn test_classify_http_status() {
        let rate_limit = ErrorClassifier::classify_http_status(429, "slow down", "deepseek");
        assert_eq!(rate_limit.category, ErrorCategory::RateLimit);

        let auth = ErrorClassifier::classify_http_status(401, "bad key", "doubao");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let server = ErrorClassifier::classify_http_status(503, "busy", "doubao");
        assert_eq!(server.category, ErrorCategory::Transient);
        assert!(server.is_retryable());
    }

    #[test]
    fn test_classify_message() {
        let err = ErrorClassifier::classify("Connection timed out after 30s", "deepseek");
        assert_eq!(err.category, ErrorCategory::Network);

        let err = ErrorClassifier::classify("Something weird happened", "deepseek");
        assert_eq!(err.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::with_provider(ErrorCategory::RateLimit, "Too many requests", "deepseek");
        assert_eq!(err.to_string(), "[deepseek:RATE_LIMIT] Too many requests");
    }

    #[test]
    fn test_recommended_delay() {
        let custom =
            LlmError::new(ErrorCategory::Unknown, "x").retry_after(Duration::from_secs(9));
        assert_eq!(custom.recommended_delay(), Duration::from_secs(9));
        assert_eq!(
            LlmError::new(ErrorCategory::Network, "x").recommended_delay(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_domain_messages() {
        assert_eq!(QuestError::EmptyQuestion.to_string(), "请提供问题内容");
        assert_eq!(
            QuestError::ProviderNotConfigured { label: "VOLC" }.to_string(),
            "服务端未配置完整的 VOLC_API_KEY/VOLC_ENDPOINT/VOLC_MODEL"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(QuestError::timeout("classify", Duration::from_secs(1)).is_recoverable());
        assert!(!QuestError::EmptyQuestion.is_recoverable());
        let auth = LlmError::new(ErrorCategory::Auth, "nope");
        assert!(!QuestError::from(auth).is_recoverable());
    }

    #[test]
    fn test_retry_hint() {
        let limited = ErrorClassifier::classify_http_status(429, "slow down", "doubao");
        assert_eq!(
            QuestError::from(limited).retry_hint(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            QuestError::timeout("classify", Duration::from_secs(1)).retry_hint(),
            None
        );
    }
}
