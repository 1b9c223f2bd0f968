//! Select query model: paging, field lists, sorting, filter queries and
//! facet descriptors. This is plain field accumulation; the wire mapping
//! lives in [`crate::request`] and [`crate::response`].

use serde::{Deserialize, Serialize};

/// Sort direction for a single sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sort {
    Asc,
    Desc,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

/// A requested facet. The key doubles as the request identifier and the
/// lookup key for the matching [`crate::response::FacetResult`], so keys
/// must be unique within one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facet {
    /// Term counts over one indexed field.
    Field { key: String, field: String },
    /// A single count for an arbitrary query.
    Query { key: String, query: String },
}

impl Facet {
    pub fn key(&self) -> &str {
        match self {
            Facet::Field { key, .. } | Facet::Query { key, .. } => key,
        }
    }
}

/// A select (search) query under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    query: String,
    start: u32,
    rows: u32,
    fields: Vec<String>,
    sort_fields: Vec<(String, Sort)>,
    filter_queries: Vec<String>,
    facets: Vec<Facet>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            query: "*:*".into(),
            start: 0,
            rows: 10,
            fields: vec!["*".into(), "score".into()],
            sort_fields: Vec::new(),
            filter_queries: Vec::new(),
            facets: Vec::new(),
        }
    }
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main query string. Surrounding whitespace is trimmed.
    pub fn set_query(&mut self, query: impl AsRef<str>) -> &mut Self {
        self.query = query.as_ref().trim().to_string();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_start(&mut self, start: u32) -> &mut Self {
        self.start = start;
        self
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn set_rows(&mut self, rows: u32) -> &mut Self {
        self.rows = rows;
        self
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn add_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.fields.push(field.into());
        self
    }

    pub fn add_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add fields from a comma-separated list; entries are trimmed and
    /// empties dropped.
    pub fn add_fields_csv(&mut self, list: &str) -> &mut Self {
        self.add_fields(
            list.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from),
        )
    }

    /// Remove a field from the list; unknown names are ignored silently.
    pub fn remove_field(&mut self, field: &str) -> &mut Self {
        self.fields.retain(|f| f != field);
        self
    }

    pub fn set_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.clear();
        self.add_fields(fields)
    }

    pub fn clear_fields(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Add a sort field. Re-adding an existing field updates its direction
    /// in place, keeping the original position.
    pub fn add_sort_field(&mut self, field: impl Into<String>, order: Sort) -> &mut Self {
        let field = field.into();
        if let Some(entry) = self.sort_fields.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = order;
        } else {
            self.sort_fields.push((field, order));
        }
        self
    }

    pub fn add_sort_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, Sort)>,
        S: Into<String>,
    {
        for (field, order) in fields {
            self.add_sort_field(field, order);
        }
        self
    }

    /// Remove a sort field; unknown names are ignored silently.
    pub fn remove_sort_field(&mut self, field: &str) -> &mut Self {
        self.sort_fields.retain(|(f, _)| f != field);
        self
    }

    pub fn set_sort_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, Sort)>,
        S: Into<String>,
    {
        self.sort_fields.clear();
        self.add_sort_fields(fields)
    }

    pub fn clear_sort_fields(&mut self) -> &mut Self {
        self.sort_fields.clear();
        self
    }

    pub fn sort_fields(&self) -> &[(String, Sort)] {
        &self.sort_fields
    }

    pub fn add_filter_query(&mut self, fq: impl Into<String>) -> &mut Self {
        self.filter_queries.push(fq.into());
        self
    }

    pub fn clear_filter_queries(&mut self) -> &mut Self {
        self.filter_queries.clear();
        self
    }

    pub fn filter_queries(&self) -> &[String] {
        &self.filter_queries
    }

    pub fn add_facet(&mut self, facet: Facet) -> &mut Self {
        self.facets.push(facet);
        self
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_conventions() {
        let q = SelectQuery::new();
        assert_eq!(q.query(), "*:*");
        assert_eq!(q.start(), 0);
        assert_eq!(q.rows(), 10);
        assert_eq!(q.fields(), ["*", "score"]);
    }

    #[test]
    fn set_query_trims_whitespace() {
        let mut q = SelectQuery::new();
        q.set_query(" *:* ");
        assert_eq!(q.query(), "*:*");
    }

    #[test]
    fn field_list_add_remove_set_clear() {
        let mut q = SelectQuery::new();
        q.clear_fields();
        q.add_fields(["field1", "field2"]);
        assert_eq!(q.fields(), ["field1", "field2"]);

        q.remove_field("field1");
        assert_eq!(q.fields(), ["field2"]);

        q.set_fields(["field3", "field4"]);
        assert_eq!(q.fields(), ["field3", "field4"]);

        q.clear_fields();
        assert!(q.fields().is_empty());
    }

    #[test]
    fn csv_fields_are_split_and_trimmed() {
        let mut q = SelectQuery::new();
        q.clear_fields();
        q.add_fields_csv("field1, field2");
        assert_eq!(q.fields(), ["field1", "field2"]);
    }

    #[test]
    fn sort_fields_keep_order_and_replace_in_place() {
        let mut q = SelectQuery::new();
        q.add_sort_field("field1", Sort::Desc);
        q.add_sort_field("field2", Sort::Asc);
        q.add_sort_field("field1", Sort::Asc);
        assert_eq!(
            q.sort_fields(),
            [("field1".to_string(), Sort::Asc), ("field2".to_string(), Sort::Asc)]
        );
    }

    #[test]
    fn removing_unknown_sort_field_is_silent() {
        let mut q = SelectQuery::new();
        q.add_sort_fields([("field1", Sort::Desc), ("field2", Sort::Asc)]);
        q.remove_sort_field("invalidfield");
        assert_eq!(q.sort_fields().len(), 2);

        q.remove_sort_field("field1");
        assert_eq!(q.sort_fields(), [("field2".to_string(), Sort::Asc)]);
    }

    #[test]
    fn set_sort_fields_replaces_all() {
        let mut q = SelectQuery::new();
        q.add_sort_fields([("field1", Sort::Desc), ("field2", Sort::Asc)]);
        q.set_sort_fields([("field3", Sort::Asc)]);
        assert_eq!(q.sort_fields(), [("field3".to_string(), Sort::Asc)]);

        q.clear_sort_fields();
        assert!(q.sort_fields().is_empty());
    }

    #[test]
    fn facet_key_accessor_covers_both_variants() {
        let field = Facet::Field {
            key: "f1".into(),
            field: "color".into(),
        };
        let query = Facet::Query {
            key: "q1".into(),
            query: "price:[1 TO 10]".into(),
        };
        assert_eq!(field.key(), "f1");
        assert_eq!(query.key(), "q1");
    }
}
