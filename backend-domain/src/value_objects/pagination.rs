// Pagination value objects

/// Default and hard maximum page size for one kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: i64,
    pub max_size: i64,
}

impl PageLimits {
    pub const PLAYER_RECORDS: PageLimits = PageLimits {
        default_size: 100,
        max_size: 1000,
    };
    pub const CHANGE_LOGS: PageLimits = PageLimits {
        default_size: 50,
        max_size: 500,
    };
    pub const SESSIONS: PageLimits = PageLimits {
        default_size: 50,
        max_size: 500,
    };
    pub const IDENTITIES: PageLimits = PageLimits {
        default_size: 100,
        max_size: 1000,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>, limits: PageLimits) -> Self {
        let page = page.filter(|value| *value > 0).unwrap_or(1);
        let page_size = match page_size {
            Some(size) if size > 0 => size.min(limits.max_size),
            _ => limits.default_size,
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Resolves the requested page against the matching row count.
    /// A page starting at or past `total` falls back to page 1.
    pub fn window(&self, total: i64) -> PageWindow {
        let offset = (self.page - 1).saturating_mul(self.page_size);
        if offset >= total {
            PageWindow {
                page: 1,
                limit: self.page_size,
                offset: 0,
            }
        } else {
            PageWindow {
                page: self.page,
                limit: self.page_size,
                offset,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_fall_back_to_default_and_clamp_to_cap() {
        let limits = PageLimits::CHANGE_LOGS;
        assert_eq!(PageRequest::new(None, None, limits).page_size(), 50);
        assert_eq!(PageRequest::new(None, Some(0), limits).page_size(), 50);
        assert_eq!(PageRequest::new(None, Some(-3), limits).page_size(), 50);
        assert_eq!(PageRequest::new(None, Some(10_000), limits).page_size(), 500);
        assert_eq!(PageRequest::new(Some(0), None, limits).page(), 1);
        assert_eq!(PageRequest::new(Some(-2), None, limits).page(), 1);
    }

    #[test]
    fn out_of_range_page_resets_to_first() {
        let request = PageRequest::new(Some(5), Some(10), PageLimits::SESSIONS);
        assert_eq!(
            request.window(25),
            PageWindow {
                page: 1,
                limit: 10,
                offset: 0
            }
        );
        assert_eq!(
            request.window(41),
            PageWindow {
                page: 5,
                limit: 10,
                offset: 40
            }
        );
    }

    #[test]
    fn empty_result_reports_first_page() {
        let request = PageRequest::new(Some(3), None, PageLimits::IDENTITIES);
        assert_eq!(request.window(0).page, 1);
        assert_eq!(request.window(0).offset, 0);
    }
}
