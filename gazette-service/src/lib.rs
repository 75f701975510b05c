pub mod admin;
pub mod content;

pub use admin::{CommentAction, PostAction};

pub use content::{
    CategoryRequest, CategoryService, DefaultCategoryService,
    CommentRequest, CommentService, DefaultCommentService,
    DefaultPostService, PostRequest, PostService,
    DefaultTagService, TagRequest, TagService,
};
