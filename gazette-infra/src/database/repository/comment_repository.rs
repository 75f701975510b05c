use async_trait::async_trait;
use gazette_api::Result;
use gazette_domain::content::comment;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use crate::database::error::map_db_err;

/// CommentRepository trait 定义评论的数据访问操作
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: comment::ActiveModel) -> Result<comment::Model>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn find_by_id(&self, id: i32) -> Result<Option<comment::Model>>;
    /// 列出某篇文章的评论，按创建时间升序
    async fn list_by_post(&self, post_id: i32, approved_only: bool)
        -> Result<Vec<comment::Model>>;
    async fn set_approved(&self, ids: &[i32], approved: bool) -> Result<u64>;
}

/// SeaOrmCommentRepository 使用Sea-ORM实现的Repository
pub struct SeaOrmCommentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCommentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn insert(&self, comment: comment::ActiveModel) -> Result<comment::Model> {
        comment.insert(&*self.db).await.map_err(map_db_err)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        comment::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<comment::Model>> {
        comment::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list_by_post(
        &self,
        post_id: i32,
        approved_only: bool,
    ) -> Result<Vec<comment::Model>> {
        let mut select = comment::Entity::find().filter(comment::Column::PostId.eq(post_id));
        if approved_only {
            select = select.filter(comment::Column::IsApproved.eq(true));
        }
        select
            .order_by_asc(comment::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn set_approved(&self, ids: &[i32], approved: bool) -> Result<u64> {
        let result = comment::Entity::update_many()
            .col_expr(comment::Column::IsApproved, Expr::value(approved))
            .filter(comment::Column::Id.is_in(ids.to_vec()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected)
    }
}
