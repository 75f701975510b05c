use async_trait::async_trait;
use gazette_api::{ListOptions, ListResult, Result};
use gazette_domain::content::tag;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;

use crate::database::error::map_db_err;

/// TagRepository trait 定义标签的数据访问操作
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn insert(&self, tag: tag::ActiveModel) -> Result<tag::Model>;
    async fn update(&self, tag: tag::ActiveModel) -> Result<tag::Model>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn find_by_id(&self, id: i32) -> Result<Option<tag::Model>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<tag::Model>>;
    async fn list(&self, options: ListOptions) -> Result<ListResult<tag::Model>>;
}

/// SeaOrmTagRepository 使用Sea-ORM实现的Repository
pub struct SeaOrmTagRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTagRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn insert(&self, tag: tag::ActiveModel) -> Result<tag::Model> {
        tag.insert(&*self.db).await.map_err(map_db_err)
    }

    async fn update(&self, tag: tag::ActiveModel) -> Result<tag::Model> {
        tag.update(&*self.db).await.map_err(map_db_err)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        tag::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<tag::Model>> {
        tag::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<tag::Model>> {
        tag::Entity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(&self, options: ListOptions) -> Result<ListResult<tag::Model>> {
        let select = tag::Entity::find().order_by_asc(tag::Column::Name);

        let paginator = select.paginate(&*self.db, options.size() as u64);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(options.page() as u64)
            .await
            .map_err(map_db_err)?;

        Ok(ListResult::new(items, total, options.page(), options.size()))
    }
}
