use crate::models::Searchable;

/// Selection of the type filter; `All` matches every record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(String),
}

impl KindFilter {
    /// Parse a selection, where `"all"` (or nothing) selects every record
    pub fn parse(selection: Option<&str>) -> Self {
        match selection.map(str::trim) {
            None | Some("") | Some("all") => KindFilter::All,
            Some(kind) => KindFilter::Only(kind.to_string()),
        }
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(selected) => record.kind() == Some(selected.as_str()),
        }
    }
}

/// Free-text filter plus type filter, combined with logical AND
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    needle: Option<String>,
    kind: KindFilter,
}

impl RecordFilter {
    pub fn new(search: Option<&str>, kind: KindFilter) -> Self {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Self { needle, kind }
    }

    /// Case-insensitive substring match against any display field
    pub fn matches_text<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        self.matches_text(record) && self.kind.matches(record)
    }

    /// Keep matching records, preserving their order
    pub fn apply<'a, T: Searchable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Owned variant of [`RecordFilter::apply`]
    pub fn retain<T: Searchable>(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
