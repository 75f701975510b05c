#[cfg(test)]
mod tests {
    use crate::database::repository::post_repository::{
        featured_condition, published_condition, related_query, scheduled_condition,
    };
    use crate::database::repository::{PostRepository, SeaOrmPostRepository};
    use chrono::{DateTime, TimeZone, Utc};
    use gazette_domain::content::post::{self, PostStatus};
    use sea_orm::{
        DatabaseBackend, DbBackend, EntityTrait, MockDatabase, QueryFilter, QueryTrait,
        Transaction,
    };
    use std::sync::Arc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample_post(view_count: i32) -> post::Model {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        post::Model {
            id: 1,
            title: "Sample".to_string(),
            slug: "sample".to_string(),
            content: String::new(),
            meta_title: "Sample".to_string(),
            meta_description: "Sample".to_string(),
            author_id: 1,
            category_id: Some(7),
            status: PostStatus::Published,
            publish_date: created,
            featured_image_id: None,
            view_count,
            allow_comments: true,
            is_featured: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_published_scope_sql() {
        let sql = post::Entity::find()
            .filter(published_condition(fixed_now()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""post"."status" = 'published'"#));
        assert!(sql.contains(r#""post"."publish_date" <="#));
    }

    #[test]
    fn test_scheduled_scope_sql() {
        let sql = post::Entity::find()
            .filter(scheduled_condition(fixed_now()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""post"."status" = 'published'"#));
        assert!(sql.contains(r#""post"."publish_date" >"#));
    }

    #[test]
    fn test_featured_scope_sql() {
        let sql = post::Entity::find()
            .filter(featured_condition(fixed_now()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""post"."status" = 'published'"#));
        assert!(sql.contains(r#""post"."publish_date" <="#));
        assert!(sql.contains(r#""post"."is_featured" = TRUE"#));
    }

    #[test]
    fn test_related_query_sql_with_category_and_tags() {
        let origin = sample_post(0);
        let sql = related_query(&origin, vec![1, 2], 3, fixed_now())
            .build(DbBackend::Postgres)
            .to_string();

        // 当前已发布、排除自身、同分类、共享标签去重、默认排序、limit
        assert!(sql.starts_with("SELECT DISTINCT"));
        assert!(sql.contains(r#""post"."status" = 'published'"#));
        assert!(sql.contains(r#""post"."id" <> 1"#));
        assert!(sql.contains(r#""post"."category_id" = 7"#));
        assert!(sql.contains(r#"INNER JOIN "post_tag""#));
        assert!(sql.contains(r#""post_tag"."tag_id" IN (1, 2)"#));
        assert!(sql.contains(r#"ORDER BY "post"."publish_date" DESC, "post"."created_at" DESC"#));
        assert!(sql.contains("LIMIT 3"));
    }

    #[test]
    fn test_related_query_sql_without_tags() {
        let origin = post::Model {
            category_id: None,
            ..sample_post(0)
        };
        let sql = related_query(&origin, vec![], 3, fixed_now())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(!sql.contains("DISTINCT"));
        assert!(!sql.contains("JOIN"));
        assert!(!sql.contains(r#""category_id" ="#));
    }

    #[tokio::test]
    async fn test_increment_view_count_updates_single_column() {
        let before = sample_post(5);
        let after = sample_post(6);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![before]])
                .append_query_results([vec![after]])
                .into_connection(),
        );
        let repo = SeaOrmPostRepository::new(db.clone());

        let updated = repo.increment_view_count(1).await.unwrap();
        assert_eq!(updated.view_count, 6);

        drop(repo);
        let log = match Arc::try_unwrap(db) {
            Ok(conn) => conn.into_transaction_log(),
            Err(_) => panic!("mock connection still shared"),
        };
        assert_eq!(log.len(), 2);

        // UPDATE仅设置view_count一列
        assert_eq!(
            log[1],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"UPDATE "post" SET "view_count" = $1 WHERE "post"."id" = $2 RETURNING "id", "title", "slug", "content", "meta_title", "meta_description", "author_id", "category_id", "status", "publish_date", "featured_image_id", "view_count", "allow_comments", "is_featured", "created_at", "updated_at""#,
                [6i32.into(), 1i32.into()]
            )
        );
    }
}
