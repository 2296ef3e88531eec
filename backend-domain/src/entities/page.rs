use serde::{Deserialize, Serialize};

use crate::value_objects::PageWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub records: T,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(records: T, total: i64, window: PageWindow) -> Self {
        Self {
            records,
            total,
            page: window.page,
            page_size: window.limit,
        }
    }
}
