//! 统一错误处理模块
//!
//! 定义模拟器中所有共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum EmuError {
    // ==================== Kafka 错误 ====================
    #[error("Kafka 错误: {0}")]
    Kafka(String),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 输入错误 ====================
    #[error("未知的商品状态: {0}")]
    UnknownStatus(String),

    #[error("未知的序列策略: {0}")]
    UnknownStrategy(String),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, EmuError>;

impl EmuError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Kafka(_) => "KAFKA_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 模拟驱动本身不做重试，此标记仅作为失败日志的字段。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Kafka(_))
    }
}
