use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

use super::constant;
use super::slug::{derive_slug, needs_derivation};

/// Post实体，对应数据库中的post表
///
/// content字段为原始Markdown文本，编辑与渲染由外部组件负责，
/// 此处按不透明字符串处理。author_id与featured_image_id引用外部
/// 协作方（用户、媒体）的记录。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(Some(200))")]
    pub title: String,

    #[sea_orm(column_type = "String(Some(200))", unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "String(Some(60))")]
    pub meta_title: String,

    #[sea_orm(column_type = "String(Some(160))")]
    pub meta_description: String,

    pub author_id: i64,

    #[sea_orm(nullable)]
    pub category_id: Option<i32>,

    pub status: PostStatus,

    pub publish_date: DateTimeUtc,

    #[sea_orm(nullable)]
    pub featured_image_id: Option<i64>,

    pub view_count: i32,

    pub allow_comments: bool,

    pub is_featured: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// PostStatus表示文章的发布状态
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

impl Model {
    /// 已发布：状态为published且发布时间不晚于now
    ///
    /// 每次调用基于传入的now重新计算，不缓存。定时文章在发布时间
    /// 到达前不可见。
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published && self.publish_date <= now
    }

    /// 定时发布：状态为published且发布时间在now之后
    pub fn is_scheduled(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published && self.publish_date > now
    }
}

/// meta_title为空时由title截取前60个字符派生
pub fn derive_meta_title(title: &str) -> String {
    truncate_chars(title, constant::META_TITLE_MAX)
}

/// meta_description为空时由title截取前160个字符派生
pub fn derive_meta_description(title: &str) -> String {
    truncate_chars(title, constant::META_DESCRIPTION_MAX)
}

// 按字符截断，避免多字节字符处的字节切割
fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,

    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// 保存前派生slug与meta字段
    ///
    /// 仅在title参与本次保存时派生；部分字段更新（如view_count自增）
    /// 不触碰slug和meta。已设置的meta字段不会被覆盖。
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let title = match &self.title {
            ActiveValue::Set(t) | ActiveValue::Unchanged(t) => Some(t.clone()),
            ActiveValue::NotSet => None,
        };

        if let Some(title) = title {
            if needs_derivation(&self.slug, insert) {
                self.slug = ActiveValue::Set(derive_slug(&title));
            }
            if needs_derivation(&self.meta_title, insert) {
                self.meta_title = ActiveValue::Set(derive_meta_title(&title));
            }
            if needs_derivation(&self.meta_description, insert) {
                self.meta_description = ActiveValue::Set(derive_meta_description(&title));
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::Set, DatabaseBackend, MockDatabase};

    fn sample_post(status: PostStatus, publish_date: DateTime<Utc>) -> Model {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Model {
            id: 1,
            title: "Sample".to_string(),
            slug: "sample".to_string(),
            content: String::new(),
            meta_title: "Sample".to_string(),
            meta_description: "Sample".to_string(),
            author_id: 1,
            category_id: None,
            status,
            publish_date,
            featured_image_id: None,
            view_count: 0,
            allow_comments: true,
            is_featured: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_published_post_with_past_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let post = sample_post(PostStatus::Published, now - Duration::days(1));
        assert!(post.is_published(now));
        assert!(!post.is_scheduled(now));
    }

    #[test]
    fn test_published_post_with_future_date_is_scheduled() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let post = sample_post(PostStatus::Published, now + Duration::days(1));
        assert!(!post.is_published(now));
        assert!(post.is_scheduled(now));
    }

    #[test]
    fn test_predicates_false_for_draft_and_archived() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        for status in [PostStatus::Draft, PostStatus::Archived] {
            let post = sample_post(status, now - Duration::days(1));
            assert!(!post.is_published(now));
            assert!(!post.is_scheduled(now));
        }
    }

    #[test]
    fn test_predicates_never_both_true() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        for delta in [-2i64, -1, 0, 1, 2] {
            let post = sample_post(PostStatus::Published, now + Duration::hours(delta));
            assert!(!(post.is_published(now) && post.is_scheduled(now)));
        }
    }

    #[test]
    fn test_derive_meta_title_truncates_to_60_chars() {
        let title = "x".repeat(100);
        let meta = derive_meta_title(&title);
        assert_eq!(meta.chars().count(), 60);
    }

    #[test]
    fn test_derive_meta_description_truncates_to_160_chars() {
        let title = "y".repeat(200);
        let meta = derive_meta_description(&title);
        assert_eq!(meta.chars().count(), 160);
    }

    #[test]
    fn test_derive_meta_handles_multibyte_titles() {
        let title = "日志".repeat(50);
        let meta = derive_meta_title(&title);
        assert_eq!(meta.chars().count(), 60);
    }

    #[test]
    fn test_short_title_kept_whole() {
        assert_eq!(derive_meta_title("Short"), "Short");
        assert_eq!(derive_meta_description("Short"), "Short");
    }

    #[tokio::test]
    async fn test_before_save_derives_slug_and_meta() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let post = ActiveModel {
            title: Set("My First Post".to_string()),
            ..Default::default()
        };

        let saved = ActiveModelBehavior::before_save(post, &db, true)
            .await
            .unwrap();
        assert_eq!(saved.slug.unwrap(), "my-first-post");
        assert_eq!(saved.meta_title.unwrap(), "My First Post");
        assert_eq!(saved.meta_description.unwrap(), "My First Post");
    }

    #[tokio::test]
    async fn test_before_save_keeps_explicit_meta_on_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let post = ActiveModel {
            title: Set("My First Post".to_string()),
            meta_title: Set("Custom meta".to_string()),
            ..Default::default()
        };

        let saved = ActiveModelBehavior::before_save(post, &db, true)
            .await
            .unwrap();
        assert_eq!(saved.meta_title.unwrap(), "Custom meta");
        // 插入时未提供的字段仍然派生
        assert_eq!(saved.meta_description.unwrap(), "My First Post");
    }

    #[tokio::test]
    async fn test_before_save_does_not_touch_stored_meta_on_update() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let post = ActiveModel {
            id: Set(1),
            title: Set("New Title".to_string()),
            meta_title: ActiveValue::Unchanged("Old meta".to_string()),
            ..Default::default()
        };

        let saved = ActiveModelBehavior::before_save(post, &db, false)
            .await
            .unwrap();
        // 已存储的非空meta不被改写；未参与本次保存的列保持NotSet
        assert_eq!(saved.meta_title.unwrap(), "Old meta");
        assert!(saved.meta_description.is_not_set());
    }

    #[tokio::test]
    async fn test_before_save_skips_partial_update() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let post = ActiveModel {
            id: Set(1),
            view_count: Set(6),
            ..Default::default()
        };

        let saved = ActiveModelBehavior::before_save(post, &db, false)
            .await
            .unwrap();
        assert!(saved.slug.is_not_set());
        assert!(saved.meta_title.is_not_set());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&PostStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
