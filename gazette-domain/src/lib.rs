pub mod content;

pub use content::{category, comment, post, post_tag, tag};
pub use content::{PostStatus, derive_slug, is_valid_slug};
