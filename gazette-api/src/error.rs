use thiserror::Error;

/// 核心错误类型，贯穿仓储层和服务层
#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("Database error: {0}")]
    Database(String),

    /// 唯一约束冲突（重复的name或slug），保存被拒绝，不重试
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&str> for GazetteError {
    fn from(err: &str) -> Self {
        GazetteError::Internal(err.to_string())
    }
}

impl From<String> for GazetteError {
    fn from(err: String) -> Self {
        GazetteError::Internal(err)
    }
}

pub type Result<T> = std::result::Result<T, GazetteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GazetteError::UniqueViolation("post.slug".to_string());
        assert_eq!(err.to_string(), "Unique constraint violation: post.slug");
    }

    #[test]
    fn test_error_from_str() {
        let err: GazetteError = "boom".into();
        assert!(matches!(err, GazetteError::Internal(_)));
    }
}
