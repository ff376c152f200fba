//! Query-string builder for the content API's bracketed parameter syntax.

use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Contains,
    ContainsI,
    StartsWith,
}

impl FilterOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Contains => "$contains",
            Self::ContainsI => "$containsi",
            Self::StartsWith => "$startsWith",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordered list of query pairs such as `filters[slug][$eq]=my-guide`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pairs: Vec<(String, String)>,
    fields: usize,
    populate: usize,
    sort: usize,
    or_clauses: usize,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `filters[a][b]...[$op]=value` for a field path such as `["category", "slug"]`.
    #[must_use]
    pub fn filter(mut self, path: &[&str], op: FilterOp, value: impl ToString) -> Self {
        let mut key = String::from("filters");
        for segment in path {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        key.push('[');
        key.push_str(op.as_str());
        key.push(']');
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Matches when any of `fields` satisfies `op` against `value`:
    /// `filters[$or][n][field][$op]=value`.
    #[must_use]
    pub fn any_of(mut self, fields: &[&str], op: FilterOp, value: &str) -> Self {
        for field in fields {
            let key = format!("filters[$or][{}][{field}][{}]", self.or_clauses, op.as_str());
            self.pairs.push((key, value.to_string()));
            self.or_clauses += 1;
        }
        self
    }

    #[must_use]
    pub fn fields(mut self, names: &[&str]) -> Self {
        for name in names {
            self.pairs
                .push((format!("fields[{}]", self.fields), (*name).to_string()));
            self.fields += 1;
        }
        self
    }

    #[must_use]
    pub fn populate(mut self, relations: &[&str]) -> Self {
        for relation in relations {
            self.pairs
                .push((format!("populate[{}]", self.populate), (*relation).to_string()));
            self.populate += 1;
        }
        self
    }

    #[must_use]
    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.pairs.push((
            format!("sort[{}]", self.sort),
            format!("{field}:{}", order.as_str()),
        ));
        self.sort += 1;
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.pairs
            .push(("pagination[pageSize]".to_string(), size.to_string()));
        self
    }

    /// Offset paging; the content API does not allow mixing it with `pageSize`.
    #[must_use]
    pub fn start_limit(mut self, start: u32, limit: u32) -> Self {
        self.pairs
            .push(("pagination[start]".to_string(), start.to_string()));
        self.pairs
            .push(("pagination[limit]".to_string(), limit.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded form of the pairs; identical queries yield identical keys.
    pub fn cache_key(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}
