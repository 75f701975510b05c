use async_trait::async_trait;
use gazette_api::{Clock, GazetteError, Result};
use gazette_domain::content::comment;
use gazette_infra::{CommentRepository, PostRepository};
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// 访客提交的评论请求
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentRequest {
    pub post_id: i32,

    #[validate(length(min = 1, max = 100))]
    pub author_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(length(min = 1))]
    pub content: String,
}

/// Comment服务trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// 提交评论，进入待审核状态
    async fn submit(&self, request: CommentRequest) -> Result<comment::Model>;

    async fn delete(&self, id: i32) -> Result<()>;

    async fn get(&self, id: i32) -> Result<Option<comment::Model>>;

    /// 某篇文章的评论，按创建时间升序
    async fn list_for_post(&self, post_id: i32, approved_only: bool)
        -> Result<Vec<comment::Model>>;

    /// 审核通过
    async fn approve(&self, id: i32) -> Result<()>;
}

pub struct DefaultCommentService<C: CommentRepository, P: PostRepository> {
    comments: Arc<C>,
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C: CommentRepository, P: PostRepository> DefaultCommentService<C, P> {
    pub fn new(comments: Arc<C>, posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            posts,
            clock,
        }
    }
}

#[async_trait]
impl<C: CommentRepository, P: PostRepository> CommentService for DefaultCommentService<C, P> {
    async fn submit(&self, request: CommentRequest) -> Result<comment::Model> {
        request
            .validate()
            .map_err(|e| GazetteError::Validation(e.to_string()))?;

        let post = self
            .posts
            .find_by_id(request.post_id)
            .await?
            .ok_or_else(|| GazetteError::NotFound(format!("post {}", request.post_id)))?;

        if !post.allow_comments {
            return Err(GazetteError::Validation(
                "comments are disabled for this post".to_string(),
            ));
        }

        let comment = comment::ActiveModel {
            post_id: Set(request.post_id),
            author_name: Set(request.author_name.clone()),
            email: Set(request.email.clone()),
            website: Set(request.website.clone()),
            content: Set(request.content.clone()),
            is_approved: Set(false),
            created_at: Set(self.clock.now()),
            ..Default::default()
        };

        let created = self.comments.insert(comment).await?;
        info!(comment = created.id, post = created.post_id, "comment submitted");
        Ok(created)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.comments.delete(id).await
    }

    async fn get(&self, id: i32) -> Result<Option<comment::Model>> {
        self.comments.find_by_id(id).await
    }

    async fn list_for_post(
        &self,
        post_id: i32,
        approved_only: bool,
    ) -> Result<Vec<comment::Model>> {
        self.comments.list_by_post(post_id, approved_only).await
    }

    async fn approve(&self, id: i32) -> Result<()> {
        let affected = self.comments.set_approved(&[id], true).await?;
        if affected == 0 {
            return Err(GazetteError::NotFound(format!("comment {}", id)));
        }
        Ok(())
    }
}
