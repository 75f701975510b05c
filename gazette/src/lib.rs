pub mod config;
pub mod context;
pub mod error;

pub use config::Config;
pub use context::{build_context, ApplicationContext};
pub use error::{AppError, Result};

pub use gazette_api::{Clock, GazetteError, ListOptions, ListResult, SystemClock};
pub use gazette_domain::content::{category, comment, post, post_tag, tag, PostStatus};
pub use gazette_infra::{DatabaseManager, PostQuery, PostScope};
pub use gazette_service::{
    CategoryRequest, CategoryService, CommentAction, CommentRequest, CommentService, PostAction,
    PostRequest, PostService, TagRequest, TagService,
};

/// 初始化tracing订阅器
pub fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// 加载配置并装配应用上下文
pub async fn bootstrap() -> Result<ApplicationContext> {
    let config = Config::load()?;
    context::build_context(&config).await
}
