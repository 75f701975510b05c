use chrono::{DateTime, Utc};
use gazette_api::Result;
use gazette_domain::content::post::PostStatus;
use gazette_infra::PostRepository;
use tracing::info;

/// 管理端对选中文章的批量操作
///
/// 每个动作是 选中集合 -> 受影响行数 的命令，由外部调度器分发。
/// 批量更新走单条UPDATE，不经过逐行保存钩子。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    MakePublished,
    MakeDraft,
    MakeFeatured,
    RemoveFeatured,
}

impl PostAction {
    pub async fn apply<R: PostRepository>(
        &self,
        repository: &R,
        ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let affected = match self {
            PostAction::MakePublished => {
                repository
                    .update_status(ids, PostStatus::Published, now)
                    .await?
            }
            PostAction::MakeDraft => {
                repository.update_status(ids, PostStatus::Draft, now).await?
            }
            PostAction::MakeFeatured => repository.update_featured(ids, true, now).await?,
            PostAction::RemoveFeatured => repository.update_featured(ids, false, now).await?,
        };

        info!(action = ?self, affected, "bulk post action applied");
        Ok(affected)
    }
}
