use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gazette_api::{Clock, GazetteError, ListResult, Result};
use gazette_domain::content::constant;
use gazette_domain::content::post::{self, PostStatus};
use gazette_domain::content::slug::is_valid_slug;
use gazette_infra::{PostQuery, PostRepository};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Post写入请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// 为空时保存钩子由title派生
    pub slug: Option<String>,

    /// 原始Markdown内容，按不透明字符串处理
    pub content: String,

    #[validate(length(max = 60))]
    pub meta_title: Option<String>,

    #[validate(length(max = 160))]
    pub meta_description: Option<String>,

    pub author_id: i64,
    pub category_id: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub status: Option<PostStatus>,
    pub publish_date: Option<DateTime<Utc>>,
    pub featured_image_id: Option<i64>,
    pub allow_comments: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Post服务trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// 创建文章，未指定的字段取默认值（draft、发布时间为当前时间）
    async fn create(&self, request: PostRequest) -> Result<post::Model>;

    /// 更新文章并以请求中的标签集合为准重建关联
    async fn update(&self, id: i32, request: PostRequest) -> Result<post::Model>;

    async fn delete(&self, id: i32) -> Result<()>;

    async fn get(&self, id: i32) -> Result<Option<post::Model>>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<post::Model>>;

    async fn list(&self, query: PostQuery) -> Result<ListResult<post::Model>>;

    /// 发布文章（保留已设置的发布时间，未来时间即为定时发布）
    async fn publish(&self, id: i32) -> Result<post::Model>;

    /// 取消发布，状态回到draft
    async fn unpublish(&self, id: i32) -> Result<post::Model>;

    /// 浏览数加一，只持久化view_count一列
    async fn increment_view_count(&self, id: i32) -> Result<post::Model>;

    /// 相关文章：当前已发布、同分类、共享标签，默认最多3篇
    async fn related_posts(&self, id: i32, limit: Option<u64>) -> Result<Vec<post::Model>>;
}

/// 默认Post服务实现
pub struct DefaultPostService<R: PostRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: PostRepository> DefaultPostService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn require(&self, id: i32) -> Result<post::Model> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GazetteError::NotFound(format!("post {}", id)))
    }
}

fn validate_request(request: &PostRequest) -> Result<()> {
    request
        .validate()
        .map_err(|e| GazetteError::Validation(e.to_string()))?;

    if let Some(slug) = &request.slug {
        if !slug.is_empty() && !is_valid_slug(slug) {
            return Err(GazetteError::Validation(format!("invalid slug: {}", slug)));
        }
    }

    Ok(())
}

#[async_trait]
impl<R: PostRepository> PostService for DefaultPostService<R> {
    async fn create(&self, request: PostRequest) -> Result<post::Model> {
        validate_request(&request)?;
        let now = self.clock.now();

        let post = post::ActiveModel {
            title: Set(request.title.clone()),
            slug: match &request.slug {
                Some(slug) => Set(slug.clone()),
                None => NotSet,
            },
            content: Set(request.content.clone()),
            meta_title: match &request.meta_title {
                Some(meta) => Set(meta.clone()),
                None => NotSet,
            },
            meta_description: match &request.meta_description {
                Some(meta) => Set(meta.clone()),
                None => NotSet,
            },
            author_id: Set(request.author_id),
            category_id: Set(request.category_id),
            status: Set(request.status.unwrap_or_default()),
            publish_date: Set(request.publish_date.unwrap_or(now)),
            featured_image_id: Set(request.featured_image_id),
            view_count: Set(0),
            allow_comments: Set(request.allow_comments.unwrap_or(true)),
            is_featured: Set(request.is_featured.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = self.repository.insert(post).await?;
        if !request.tag_ids.is_empty() {
            self.repository
                .replace_tags(created.id, &request.tag_ids)
                .await?;
        }

        info!(post = created.id, slug = %created.slug, "post created");
        Ok(created)
    }

    async fn update(&self, id: i32, request: PostRequest) -> Result<post::Model> {
        validate_request(&request)?;
        let existing = self.require(id).await?;
        let now = self.clock.now();

        let mut post = existing.into_active_model();
        post.title = Set(request.title.clone());
        // 显式清空的slug/meta由保存钩子重新派生
        if let Some(slug) = &request.slug {
            post.slug = Set(slug.clone());
        }
        if let Some(meta) = &request.meta_title {
            post.meta_title = Set(meta.clone());
        }
        if let Some(meta) = &request.meta_description {
            post.meta_description = Set(meta.clone());
        }
        post.content = Set(request.content.clone());
        post.author_id = Set(request.author_id);
        post.category_id = Set(request.category_id);
        post.featured_image_id = Set(request.featured_image_id);
        if let Some(status) = request.status {
            post.status = Set(status);
        }
        if let Some(publish_date) = request.publish_date {
            post.publish_date = Set(publish_date);
        }
        if let Some(allow_comments) = request.allow_comments {
            post.allow_comments = Set(allow_comments);
        }
        if let Some(is_featured) = request.is_featured {
            post.is_featured = Set(is_featured);
        }
        post.updated_at = Set(now);

        let updated = self.repository.update(post).await?;
        self.repository.replace_tags(id, &request.tag_ids).await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        // 评论由外键级联删除
        self.repository.delete(id).await?;
        info!(post = id, "post deleted");
        Ok(())
    }

    async fn get(&self, id: i32) -> Result<Option<post::Model>> {
        self.repository.find_by_id(id).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<post::Model>> {
        self.repository.find_by_slug(slug).await
    }

    async fn list(&self, query: PostQuery) -> Result<ListResult<post::Model>> {
        self.repository.list(query, self.clock.now()).await
    }

    async fn publish(&self, id: i32) -> Result<post::Model> {
        let existing = self.require(id).await?;
        let mut post = existing.into_active_model();
        post.status = Set(PostStatus::Published);
        post.updated_at = Set(self.clock.now());

        let published = self.repository.update(post).await?;
        info!(post = id, "post published");
        Ok(published)
    }

    async fn unpublish(&self, id: i32) -> Result<post::Model> {
        let existing = self.require(id).await?;
        let mut post = existing.into_active_model();
        post.status = Set(PostStatus::Draft);
        post.updated_at = Set(self.clock.now());

        let unpublished = self.repository.update(post).await?;
        info!(post = id, "post unpublished");
        Ok(unpublished)
    }

    async fn increment_view_count(&self, id: i32) -> Result<post::Model> {
        self.repository.increment_view_count(id).await
    }

    async fn related_posts(&self, id: i32, limit: Option<u64>) -> Result<Vec<post::Model>> {
        let origin = self.require(id).await?;
        let limit = limit.unwrap_or(constant::DEFAULT_RELATED_LIMIT);
        self.repository
            .related(&origin, limit, self.clock.now())
            .await
    }
}
