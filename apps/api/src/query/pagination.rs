use serde::Serialize;

/// Offset/limit window passed straight through to `OFFSET`/`LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: i64 = 20;

    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// One window of results plus the total row count of the unpaged query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            content,
            total,
            offset: request.offset,
            limit: request.limit,
        }
    }

    /// Whether rows exist beyond this window
    pub fn has_next(&self) -> bool {
        self.offset + (self.content.len() as i64) < self.total
    }
}
