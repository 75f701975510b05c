use async_trait::async_trait;
use gazette_api::{ListOptions, ListResult, Result};
use gazette_domain::content::category;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;

use crate::database::error::map_db_err;

/// CategoryRepository trait 定义分类的数据访问操作
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: category::ActiveModel) -> Result<category::Model>;
    async fn update(&self, category: category::ActiveModel) -> Result<category::Model>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<category::Model>>;
    async fn list(&self, options: ListOptions) -> Result<ListResult<category::Model>>;
}

/// SeaOrmCategoryRepository 使用Sea-ORM实现的Repository
pub struct SeaOrmCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn insert(&self, category: category::ActiveModel) -> Result<category::Model> {
        category.insert(&*self.db).await.map_err(map_db_err)
    }

    async fn update(&self, category: category::ActiveModel) -> Result<category::Model> {
        category.update(&*self.db).await.map_err(map_db_err)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        // 引用该分类的文章由外键SET NULL置空，不删除文章
        category::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>> {
        category::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<category::Model>> {
        category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(&self, options: ListOptions) -> Result<ListResult<category::Model>> {
        let select = category::Entity::find().order_by_asc(category::Column::Name);

        let paginator = select.paginate(&*self.db, options.size() as u64);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(options.page() as u64)
            .await
            .map_err(map_db_err)?;

        Ok(ListResult::new(items, total, options.page(), options.size()))
    }
}
