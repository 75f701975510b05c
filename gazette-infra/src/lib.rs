pub mod database;

pub use database::manager::DatabaseManager;
pub use database::repository::{
    CategoryRepository, CommentRepository, PostQuery, PostRepository, PostScope, TagRepository,
    SeaOrmCategoryRepository, SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmTagRepository,
};
