pub mod category_repository;
pub mod comment_repository;
pub mod post_repository;
pub mod tag_repository;

pub use category_repository::{CategoryRepository, SeaOrmCategoryRepository};
pub use comment_repository::{CommentRepository, SeaOrmCommentRepository};
pub use post_repository::{PostQuery, PostRepository, PostScope, SeaOrmPostRepository};
pub use tag_repository::{SeaOrmTagRepository, TagRepository};
