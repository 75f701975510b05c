use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub mysql: Option<DatabaseConnectionConfig>,
    pub postgresql: Option<DatabaseConnectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConnectionConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// 相关文章查询数量
    pub related_posts_limit: u64,
    /// 列表默认分页大小
    pub page_size: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            related_posts_limit: 3,
            page_size: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_path = home_dir.join(".gazette").join("gazette.toml");

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("gazette.toml").required(false))
            .add_source(config::File::from(config_path.as_path()).required(false))
            .add_source(config::Environment::with_prefix("GAZETTE").separator("__"));

        // 如果存在.env文件，加载它
        if dotenv::dotenv().is_ok() {
            builder =
                builder.add_source(config::Environment::with_prefix("GAZETTE").separator("__"));
        }

        let config = builder.build()?;
        config.try_deserialize()
    }
}
