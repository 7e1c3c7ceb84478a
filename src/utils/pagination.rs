use serde_json::{json, Value};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Normalized `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        PageRequest {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// The `pagination` block of a list response; `total_key` names the
    /// total, e.g. `totalTickets`.
    pub fn summary(&self, total: i64, total_key: &str) -> Value {
        let limit = self.limit as i64;
        let page = self.page as i64;
        let total_pages = (total + limit - 1) / limit;

        let mut summary = json!({
            "currentPage": page,
            "totalPages": total_pages,
            "hasNext": page * limit < total,
            "hasPrev": page > 1,
        });
        summary[total_key] = json!(total);
        summary
    }
}
