use std::fmt;

/// Limit and offset carried by an example object
///
/// Mirrors the `limit`/`offset` members added to generated example classes:
/// `limit(n)` sets only the limit, `limit_with_offset(offset, n)` sets both,
/// and the most recent call wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    limit: Option<u32>,
    offset: Option<u32>,
}

impl PageWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit_with_offset(&mut self, offset: u32, limit: u32) -> &mut Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn get_limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<u32> {
        self.offset
    }

    /// SQL the limit clause evaluates to; `None` when no limit is set
    pub fn to_sql(&self) -> Option<String> {
        let limit = self.limit?;
        Some(match self.offset {
            Some(offset) => format!("limit {}, {}", offset, limit),
            None => format!("limit {}", limit),
        })
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_sql() {
            Some(sql) => f.write_str(&sql),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut page = PageWindow::new();
        page.limit(5);
        assert_eq!(page.get_limit(), Some(5));
        assert_eq!(page.get_offset(), None);
        assert_eq!(page.to_sql().as_deref(), Some("limit 5"));

        page.limit_with_offset(10, 5);
        assert_eq!(page.get_offset(), Some(10));
        assert_eq!(page.get_limit(), Some(5));
        assert_eq!(page.to_string(), "limit 10, 5");
    }

    #[test]
    fn test_unset_window_renders_nothing() {
        let page = PageWindow::new();
        assert_eq!(page.to_sql(), None);
        assert_eq!(page.to_string(), "");
    }
}
