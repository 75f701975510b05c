use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gazette_api::{GazetteError, ListOptions, ListResult, Result};
use gazette_domain::content::post::{self, PostStatus};
use gazette_domain::content::post_tag;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use std::sync::Arc;

use crate::database::error::map_db_err;

/// Post查询参数
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub scope: Option<PostScope>,
    pub category_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// 文章集合的命名过滤范围
///
/// 每次查询基于传入的now重新计算，不缓存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    Published,
    Scheduled,
    Featured,
}

/// published范围：状态为published且发布时间不晚于now
pub fn published_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::Status.eq(PostStatus::Published))
        .add(post::Column::PublishDate.lte(now))
}

/// scheduled范围：状态为published且发布时间在now之后
pub fn scheduled_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::Status.eq(PostStatus::Published))
        .add(post::Column::PublishDate.gt(now))
}

/// featured范围：published范围内且is_featured为真
pub fn featured_condition(now: DateTime<Utc>) -> Condition {
    published_condition(now).add(post::Column::IsFeatured.eq(true))
}

fn scope_condition(scope: PostScope, now: DateTime<Utc>) -> Condition {
    match scope {
        PostScope::Published => published_condition(now),
        PostScope::Scheduled => scheduled_condition(now),
        PostScope::Featured => featured_condition(now),
    }
}

// 默认排序：发布时间倒序，创建时间倒序
fn default_order(select: Select<post::Entity>) -> Select<post::Entity> {
    select
        .order_by_desc(post::Column::PublishDate)
        .order_by_desc(post::Column::CreatedAt)
}

/// 相关文章查询：当前已发布、排除自身、同分类（如有）、
/// 共享至少一个标签（如有标签），去重
pub(crate) fn related_query(
    origin: &post::Model,
    tag_ids: Vec<i32>,
    limit: u64,
    now: DateTime<Utc>,
) -> Select<post::Entity> {
    let mut select = post::Entity::find()
        .filter(published_condition(now))
        .filter(post::Column::Id.ne(origin.id));

    if let Some(category_id) = origin.category_id {
        select = select.filter(post::Column::CategoryId.eq(category_id));
    }

    if !tag_ids.is_empty() {
        select = select
            .join(JoinType::InnerJoin, post::Relation::PostTag.def())
            .filter(post_tag::Column::TagId.is_in(tag_ids))
            .distinct();
    }

    default_order(select).limit(limit)
}

/// PostRepository trait 定义文章的数据访问操作
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: post::ActiveModel) -> Result<post::Model>;
    async fn update(&self, post: post::ActiveModel) -> Result<post::Model>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn find_by_id(&self, id: i32) -> Result<Option<post::Model>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<post::Model>>;
    async fn list(&self, query: PostQuery, now: DateTime<Utc>) -> Result<ListResult<post::Model>>;
    async fn related(
        &self,
        origin: &post::Model,
        limit: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<post::Model>>;
    async fn increment_view_count(&self, id: i32) -> Result<post::Model>;
    async fn tag_ids(&self, post_id: i32) -> Result<Vec<i32>>;
    async fn replace_tags(&self, post_id: i32, tag_ids: &[i32]) -> Result<()>;
    async fn update_status(
        &self,
        ids: &[i32],
        status: PostStatus,
        now: DateTime<Utc>,
    ) -> Result<u64>;
    async fn update_featured(
        &self,
        ids: &[i32],
        is_featured: bool,
        now: DateTime<Utc>,
    ) -> Result<u64>;
    async fn count_by_category(&self, category_id: i32) -> Result<u64>;
    async fn count_by_tag(&self, tag_id: i32) -> Result<u64>;
}

/// SeaOrmPostRepository 使用Sea-ORM实现的Repository
pub struct SeaOrmPostRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPostRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn insert(&self, post: post::ActiveModel) -> Result<post::Model> {
        post.insert(&*self.db).await.map_err(map_db_err)
    }

    async fn update(&self, post: post::ActiveModel) -> Result<post::Model> {
        post.update(&*self.db).await.map_err(map_db_err)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        post::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<post::Model>> {
        post::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<post::Model>> {
        post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(&self, query: PostQuery, now: DateTime<Utc>) -> Result<ListResult<post::Model>> {
        let mut select = post::Entity::find();

        if let Some(scope) = query.scope {
            select = select.filter(scope_condition(scope, now));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(post::Column::CategoryId.eq(category_id));
        }
        if let Some(tag_id) = query.tag_id {
            select = select
                .join(JoinType::InnerJoin, post::Relation::PostTag.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        let select = default_order(select);
        let page = query.page.unwrap_or(0);
        let size = query.size.unwrap_or(ListOptions::DEFAULT_SIZE);

        let paginator = select.paginate(&*self.db, size as u64);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator
            .fetch_page(page as u64)
            .await
            .map_err(map_db_err)?;

        Ok(ListResult::new(items, total, page, size))
    }

    async fn related(
        &self,
        origin: &post::Model,
        limit: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<post::Model>> {
        let tag_ids = self.tag_ids(origin.id).await?;
        related_query(origin, tag_ids, limit, now)
            .all(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn increment_view_count(&self, id: i32) -> Result<post::Model> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| GazetteError::NotFound(format!("post {}", id)))?;

        // 读-改-写，不加锁；并发自增可能丢失更新
        let update = post::ActiveModel {
            id: ActiveValue::Unchanged(current.id),
            view_count: ActiveValue::Set(current.view_count + 1),
            ..Default::default()
        };
        update.update(&*self.db).await.map_err(map_db_err)
    }

    async fn tag_ids(&self, post_id: i32) -> Result<Vec<i32>> {
        let pairs = post_tag::Entity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(pairs.into_iter().map(|pair| pair.tag_id).collect())
    }

    async fn replace_tags(&self, post_id: i32, tag_ids: &[i32]) -> Result<()> {
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if !tag_ids.is_empty() {
            let links: Vec<post_tag::ActiveModel> = tag_ids
                .iter()
                .map(|tag_id| post_tag::ActiveModel {
                    post_id: ActiveValue::Set(post_id),
                    tag_id: ActiveValue::Set(*tag_id),
                })
                .collect();
            post_tag::Entity::insert_many(links)
                .exec(&*self.db)
                .await
                .map_err(map_db_err)?;
        }

        Ok(())
    }

    async fn update_status(
        &self,
        ids: &[i32],
        status: PostStatus,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let result = post::Entity::update_many()
            .col_expr(post::Column::Status, Expr::value(status))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.is_in(ids.to_vec()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected)
    }

    async fn update_featured(
        &self,
        ids: &[i32],
        is_featured: bool,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let result = post::Entity::update_many()
            .col_expr(post::Column::IsFeatured, Expr::value(is_featured))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.is_in(ids.to_vec()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected)
    }

    async fn count_by_category(&self, category_id: i32) -> Result<u64> {
        post::Entity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_by_tag(&self, tag_id: i32) -> Result<u64> {
        post_tag::Entity::find()
            .filter(post_tag::Column::TagId.eq(tag_id))
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}
