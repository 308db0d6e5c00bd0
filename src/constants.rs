//! Global Constants
//!
//! Centralized constants for configuration defaults and fixed product text.

/// HTTP/Network constants
pub mod network {
    /// Default model request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Connection timeout for outbound requests (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;

    /// Default listening port for the API server
    pub const DEFAULT_PORT: u16 = 3001;

    /// Default bind address for the API server
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Maximum accepted request body (1 MiB)
    pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
}

/// Model provider constants
pub mod provider {
    /// Sampling temperature used for both classification and decomposition
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    /// Public DeepSeek chat completions endpoint
    pub const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

    /// Base delay for exponential backoff between retries (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Maximum delay between retries (seconds)
    pub const RETRY_MAX_DELAY_SECS: u64 = 8;
}

/// Quest tree constants
pub mod quest {
    /// Path segment naming the tree root
    pub const ROOT_SEGMENT: &str = "root";

    /// Title given to items the model returned without one
    pub const UNTITLED_TASK: &str = "未命名任务";

    /// Hint placed on a freshly accepted goal
    pub const ROOT_HINT: &str = "目标已接取：先推进主线，按需补充支线，最终挑战 BOSS。";

    /// Hint placed on a node after a stuck rescue
    pub const RESCUE_HINT: &str = "已触发弹性教程：优先执行最小可行动作。";

    /// Fraction of main quests that must be complete before the boss unlocks
    pub const BOSS_UNLOCK_RATIO: f64 = 0.8;

    /// Default file backing the CLI quest commands
    pub const DEFAULT_QUEST_FILE: &str = "quest.json";

    /// Sample goals offered when the user starts without one
    pub const SAMPLE_GOALS: &[&str] = &[
        "我想学会格式化U盘",
        "我想学会清理C盘垃圾文件",
        "我想学会搭建个人博客",
        "我想学会制作一份简历",
        "我想学会给电脑做一次系统体检",
        "我想学会用表格做月度预算",
        "我想学会整理手机相册",
    ];
}
