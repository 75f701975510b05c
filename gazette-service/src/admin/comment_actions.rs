use gazette_api::Result;
use gazette_infra::CommentRepository;
use tracing::info;

/// 管理端对选中评论的批量审核操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Approve,
    Disapprove,
}

impl CommentAction {
    pub async fn apply<R: CommentRepository>(&self, repository: &R, ids: &[i32]) -> Result<u64> {
        let approved = matches!(self, CommentAction::Approve);
        let affected = repository.set_approved(ids, approved).await?;

        info!(action = ?self, affected, "bulk comment action applied");
        Ok(affected)
    }
}
