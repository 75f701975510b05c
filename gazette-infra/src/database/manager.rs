use gazette_api::{GazetteError, Result};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

/// DatabaseManager 管理数据库连接
#[derive(Clone)]
pub struct DatabaseManager {
    mysql: Option<Arc<DatabaseConnection>>,
    postgresql: Option<Arc<DatabaseConnection>>,
}

impl DatabaseManager {
    /// 创建新的DatabaseManager
    pub async fn new(mysql_url: Option<&str>, postgresql_url: Option<&str>) -> Result<Self> {
        let mut manager = Self {
            mysql: None,
            postgresql: None,
        };

        // 连接MySQL
        if let Some(url) = mysql_url {
            let db = Database::connect(url)
                .await
                .map_err(|e| GazetteError::Database(e.to_string()))?;
            manager.mysql = Some(Arc::new(db));
        }

        // 连接PostgreSQL
        if let Some(url) = postgresql_url {
            let db = Database::connect(url)
                .await
                .map_err(|e| GazetteError::Database(e.to_string()))?;
            manager.postgresql = Some(Arc::new(db));
        }

        Ok(manager)
    }

    /// 获取MySQL连接
    pub fn mysql(&self) -> Option<Arc<DatabaseConnection>> {
        self.mysql.clone()
    }

    /// 获取PostgreSQL连接
    pub fn postgresql(&self) -> Option<Arc<DatabaseConnection>> {
        self.postgresql.clone()
    }

    /// 获取主数据库连接（优先PostgreSQL，其次MySQL）
    pub fn primary_db(&self) -> Result<Arc<DatabaseConnection>> {
        self.postgresql
            .clone()
            .or_else(|| self.mysql.clone())
            .ok_or_else(|| GazetteError::Database("No database connection available".to_string()))
    }
}
