use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Comment实体，对应数据库中的comment表
///
/// 访客提交的评论默认未审核（is_approved=false），经管理端批准后
/// 才对外可见。按创建时间升序排列。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub post_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub author_name: String,

    #[sea_orm(column_type = "String(Some(254))")]
    pub email: String,

    #[sea_orm(column_type = "String(Some(200))", nullable)]
    pub website: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub is_approved: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_comment_serialization() {
        let comment = Model {
            id: 1,
            post_id: 42,
            author_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            website: None,
            content: "Nice write-up".to_string(),
            is_approved: false,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(json.contains("\"is_approved\":false"));
    }
}
