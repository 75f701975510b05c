pub mod category;
pub mod comment;
pub mod post;
pub mod post_tag;
pub mod slug;
pub mod tag;

pub use post::PostStatus;
pub use slug::{derive_slug, is_valid_slug};

/// 内容管理相关的常量
pub mod constant {
    /// meta_title的最大长度（按字符计）
    pub const META_TITLE_MAX: usize = 60;

    /// meta_description的最大长度（按字符计）
    pub const META_DESCRIPTION_MAX: usize = 160;

    /// 相关文章查询的默认数量
    pub const DEFAULT_RELATED_LIMIT: u64 = 3;
}
