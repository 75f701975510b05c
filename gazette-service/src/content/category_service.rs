use async_trait::async_trait;
use gazette_api::{Clock, GazetteError, ListOptions, ListResult, Result};
use gazette_domain::content::category;
use gazette_domain::content::slug::is_valid_slug;
use gazette_infra::{CategoryRepository, PostRepository};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Category写入请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// 为空时保存钩子由name派生
    pub slug: Option<String>,

    pub description: Option<String>,
}

/// Category服务trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, request: CategoryRequest) -> Result<category::Model>;
    async fn update(&self, id: i32, request: CategoryRequest) -> Result<category::Model>;
    /// 删除分类；引用它的文章category置空，文章本身保留
    async fn delete(&self, id: i32) -> Result<()>;
    async fn get(&self, id: i32) -> Result<Option<category::Model>>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<category::Model>>;
    async fn list(&self, options: ListOptions) -> Result<ListResult<category::Model>>;
    /// 该分类下的文章数
    async fn count_posts(&self, id: i32) -> Result<u64>;
}

pub struct DefaultCategoryService<C: CategoryRepository, P: PostRepository> {
    categories: Arc<C>,
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C: CategoryRepository, P: PostRepository> DefaultCategoryService<C, P> {
    pub fn new(categories: Arc<C>, posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            categories,
            posts,
            clock,
        }
    }
}

fn validate_request(request: &CategoryRequest) -> Result<()> {
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
impl<C: CategoryRepository, P: PostRepository> CategoryService for DefaultCategoryService<C, P> {
    async fn create(&self, request: CategoryRequest) -> Result<category::Model> {
        validate_request(&request)?;
        let now = self.clock.now();

        let category = category::ActiveModel {
            name: Set(request.name.clone()),
            slug: match &request.slug {
                Some(slug) => Set(slug.clone()),
                None => NotSet,
            },
            description: Set(request.description.clone().unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        self.categories.insert(category).await
    }

    async fn update(&self, id: i32, request: CategoryRequest) -> Result<category::Model> {
        validate_request(&request)?;
        let existing = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| GazetteError::NotFound(format!("category {}", id)))?;

        let mut category = existing.into_active_model();
        category.name = Set(request.name.clone());
        if let Some(slug) = &request.slug {
            category.slug = Set(slug.clone());
        }
        if let Some(description) = &request.description {
            category.description = Set(description.clone());
        }
        category.updated_at = Set(self.clock.now());

        self.categories.update(category).await
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.categories.delete(id).await
    }

    async fn get(&self, id: i32) -> Result<Option<category::Model>> {
        self.categories.find_by_id(id).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<category::Model>> {
        self.categories.find_by_slug(slug).await
    }

    async fn list(&self, options: ListOptions) -> Result<ListResult<category::Model>> {
        self.categories.list(options).await
    }

    async fn count_posts(&self, id: i32) -> Result<u64> {
        self.posts.count_by_category(id).await
    }
}
