use async_trait::async_trait;
use gazette_api::{Clock, GazetteError, ListOptions, ListResult, Result};
use gazette_domain::content::slug::is_valid_slug;
use gazette_domain::content::tag;
use gazette_infra::{PostRepository, TagRepository};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Tag写入请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// 为空时保存钩子由name派生
    pub slug: Option<String>,
}

/// Tag服务trait
#[async_trait]
pub trait TagService: Send + Sync {
    async fn create(&self, request: TagRequest) -> Result<tag::Model>;
    async fn update(&self, id: i32, request: TagRequest) -> Result<tag::Model>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn get(&self, id: i32) -> Result<Option<tag::Model>>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<tag::Model>>;
    async fn list(&self, options: ListOptions) -> Result<ListResult<tag::Model>>;
    /// 携带该标签的文章数
    async fn count_posts(&self, id: i32) -> Result<u64>;
}

pub struct DefaultTagService<T: TagRepository, P: PostRepository> {
    tags: Arc<T>,
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<T: TagRepository, P: PostRepository> DefaultTagService<T, P> {
    pub fn new(tags: Arc<T>, posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { tags, posts, clock }
    }
}

fn validate_request(request: &TagRequest) -> Result<()> {
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
impl<T: TagRepository, P: PostRepository> TagService for DefaultTagService<T, P> {
    async fn create(&self, request: TagRequest) -> Result<tag::Model> {
        validate_request(&request)?;

        let tag = tag::ActiveModel {
            name: Set(request.name.clone()),
            slug: match &request.slug {
                Some(slug) => Set(slug.clone()),
                None => NotSet,
            },
            created_at: Set(self.clock.now()),
            ..Default::default()
        };

        self.tags.insert(tag).await
    }

    async fn update(&self, id: i32, request: TagRequest) -> Result<tag::Model> {
        validate_request(&request)?;
        let existing = self
            .tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| GazetteError::NotFound(format!("tag {}", id)))?;

        let mut tag = existing.into_active_model();
        tag.name = Set(request.name.clone());
        if let Some(slug) = &request.slug {
            tag.slug = Set(slug.clone());
        }

        self.tags.update(tag).await
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.tags.delete(id).await
    }

    async fn get(&self, id: i32) -> Result<Option<tag::Model>> {
        self.tags.find_by_id(id).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<tag::Model>> {
        self.tags.find_by_slug(slug).await
    }

    async fn list(&self, options: ListOptions) -> Result<ListResult<tag::Model>> {
        self.tags.list(options).await
    }

    async fn count_posts(&self, id: i32) -> Result<u64> {
        self.posts.count_by_tag(id).await
    }
}
