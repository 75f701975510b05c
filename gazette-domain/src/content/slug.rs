use sea_orm::ActiveValue;

/// 由名称/标题派生slug（小写，非字母数字替换为连字符）
pub fn derive_slug(input: &str) -> String {
    slug::slugify(input)
}

/// 检查slug是否为合法的URL标识
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 200 {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// 保存钩子使用：判断字段本次保存是否需要派生
///
/// 值为空白时派生；NotSet仅在插入时视为空（更新时表示该列不参与本次保存，
/// 不能覆盖已存储的值）。
pub fn needs_derivation(value: &ActiveValue<String>, insert: bool) -> bool {
    match value {
        ActiveValue::Set(s) | ActiveValue::Unchanged(s) => s.trim().is_empty(),
        ActiveValue::NotSet => insert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug() {
        assert_eq!(derive_slug("Hello World"), "hello-world");
        assert_eq!(derive_slug("  Rust & SeaORM!  "), "rust-seaorm");
        assert_eq!(derive_slug("Tips -- 2025"), "tips-2025");
    }

    #[test]
    fn test_derive_slug_matches_standard_transform() {
        // 连续的非字母数字字符折叠为单个连字符，首尾不留连字符
        let derived = derive_slug("A   B...C!");
        assert_eq!(derived, "a-b-c");
        assert!(is_valid_slug(&derived));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("hello-world-42"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Hello"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn test_needs_derivation() {
        assert!(needs_derivation(&ActiveValue::NotSet, true));
        assert!(!needs_derivation(&ActiveValue::NotSet, false));
        assert!(needs_derivation(&ActiveValue::Set("  ".to_string()), false));
        assert!(!needs_derivation(&ActiveValue::Set("hello".to_string()), true));
        assert!(!needs_derivation(
            &ActiveValue::Unchanged("hello".to_string()),
            false
        ));
    }
}
