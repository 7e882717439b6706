use url::form_urlencoded;

/// Query parameters accepted by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Field filters such as `courseId`, `status` or `academicYear`, in insertion order
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a field filter; a later value for the same field replaces the earlier one
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let field = field.into();
        self.filters.retain(|(f, _)| *f != field);
        self.filters.push((field, value.into()));
        self
    }

    /// Parse a `key=value` pair as given on the command line
    pub fn parse_filter(raw: &str) -> Option<(String, String)> {
        let (key, value) = raw.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.trim().to_string()))
    }

    /// True when the query selects the plain, complete first listing
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.filters.is_empty() && self.page.unwrap_or(1) <= 1
    }

    /// Append the query string to a collection path
    pub fn to_path(&self, base: &str) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(search) = &self.search {
            serializer.append_pair("search", search);
        }
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        for (field, value) in &self.filters {
            serializer.append_pair(field, value);
        }

        let query = serializer.finish();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }
}
