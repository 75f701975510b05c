use serde::{Deserialize, Serialize};

/// ListOptions 用于分页查询
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListOptions {
    pub const DEFAULT_SIZE: u32 = 10;

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(Self::DEFAULT_SIZE)
    }
}

/// ListResult 包含查询结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, size: u32) -> Self {
        Self {
            items,
            total,
            page,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_default() {
        let options = ListOptions::default();
        assert_eq!(options.page(), 0);
        assert_eq!(options.size(), ListOptions::DEFAULT_SIZE);
    }

    #[test]
    fn test_list_result() {
        let items = vec![1, 2, 3];
        let result = ListResult::new(items.clone(), 3, 0, 10);
        assert_eq!(result.items, items);
        assert_eq!(result.total, 3);
        assert_eq!(result.page, 0);
        assert_eq!(result.size, 10);
    }
}
