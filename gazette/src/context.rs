use gazette_api::{Clock, SystemClock};
use gazette_infra::{
    DatabaseManager, SeaOrmCategoryRepository, SeaOrmCommentRepository, SeaOrmPostRepository,
    SeaOrmTagRepository,
};
use gazette_migration::{Migrator, MigratorTrait};
use gazette_service::{
    CategoryService, CommentService, DefaultCategoryService, DefaultCommentService,
    DefaultPostService, DefaultTagService, PostService, TagService,
};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};

/// ApplicationContext 持有装配完成的服务
pub struct ApplicationContext {
    pub posts: Arc<dyn PostService>,
    pub categories: Arc<dyn CategoryService>,
    pub tags: Arc<dyn TagService>,
    pub comments: Arc<dyn CommentService>,
}

/// 按配置建立数据库连接、执行迁移并装配服务
pub async fn build_context(config: &Config) -> Result<ApplicationContext> {
    let mysql_url = config.database.mysql.as_ref().map(|c| c.url.as_str());
    let postgresql_url = config.database.postgresql.as_ref().map(|c| c.url.as_str());

    let db_manager = DatabaseManager::new(mysql_url, postgresql_url).await?;
    let primary_db = db_manager.primary_db()?;
    info!("Database connections established");

    Migrator::up(primary_db.as_ref(), None)
        .await
        .map_err(|e| AppError::Migration(e.to_string()))?;
    info!("Migrations applied");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let post_repository = Arc::new(SeaOrmPostRepository::new(primary_db.clone()));
    let category_repository = Arc::new(SeaOrmCategoryRepository::new(primary_db.clone()));
    let tag_repository = Arc::new(SeaOrmTagRepository::new(primary_db.clone()));
    let comment_repository = Arc::new(SeaOrmCommentRepository::new(primary_db.clone()));

    let posts: Arc<dyn PostService> = Arc::new(DefaultPostService::new(
        post_repository.clone(),
        clock.clone(),
    ));
    let categories: Arc<dyn CategoryService> = Arc::new(DefaultCategoryService::new(
        category_repository,
        post_repository.clone(),
        clock.clone(),
    ));
    let tags: Arc<dyn TagService> = Arc::new(DefaultTagService::new(
        tag_repository,
        post_repository.clone(),
        clock.clone(),
    ));
    let comments: Arc<dyn CommentService> = Arc::new(DefaultCommentService::new(
        comment_repository,
        post_repository,
        clock,
    ));

    info!("Application context initialized");
    Ok(ApplicationContext {
        posts,
        categories,
        tags,
        comments,
    })
}
