use gazette_api::GazetteError;
use sea_orm::{DbErr, SqlErr};

/// 将sea-orm错误映射到核心错误分类
///
/// 唯一约束冲突（重复name/slug）和外键冲突需要区分出来，
/// 其余统一归为数据库错误。
pub fn map_db_err(err: DbErr) -> GazetteError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => GazetteError::UniqueViolation(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            GazetteError::ForeignKeyViolation(msg)
        }
        _ => GazetteError::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_db_error_maps_to_database() {
        let err = map_db_err(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, GazetteError::Database(_)));
    }
}
