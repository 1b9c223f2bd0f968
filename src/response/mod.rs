//! Mapping of decoded select responses into typed results.
//!
//! The transport layer hands this module an already-decoded JSON tree; the
//! work here is shape mapping only. Required response-header scalars are
//! hard errors when absent, while optional sections (`response.docs`, a
//! facet key the engine did not count) silently yield empty data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::query::{Facet, SelectQuery};

/// One facet section of a select response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FacetResult {
    /// Term/count pairs in payload order.
    Field(Vec<(String, u64)>),
    /// The count for one facet query.
    Query(u64),
}

/// Extract the facet results requested by `facets` from a decoded payload.
///
/// Returns a fresh map keyed by facet key. A key the payload has no section
/// for simply produces no entry; the engine omits facets that matched
/// nothing. Counts are lenient too: a non-numeric field-facet count maps to
/// 0, and a non-numeric query-facet count is treated as absent.
pub fn extract_facets(data: &Value, facets: &[Facet]) -> HashMap<String, FacetResult> {
    let mut results = HashMap::new();
    for facet in facets {
        match facet {
            Facet::Field { key, .. } => {
                let values = data
                    .get("facet_counts")
                    .and_then(|c| c.get("facet_fields"))
                    .and_then(|f| f.get(key))
                    .and_then(Value::as_array);
                if let Some(values) = values {
                    // The engine flattens field facets into an alternating
                    // [term, count, term, count, ...] array.
                    let pairs = values
                        .chunks_exact(2)
                        .map(|pair| (stringify_term(&pair[0]), pair[1].as_u64().unwrap_or(0)))
                        .collect();
                    results.insert(key.clone(), FacetResult::Field(pairs));
                }
            }
            Facet::Query { key, .. } => {
                let count = data
                    .get("facet_counts")
                    .and_then(|c| c.get("facet_queries"))
                    .and_then(|q| q.get(key))
                    .and_then(Value::as_u64);
                if let Some(count) = count {
                    results.insert(key.clone(), FacetResult::Query(count));
                }
            }
        }
    }
    results
}

fn stringify_term(term: &Value) -> String {
    match term {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Caller-chosen document shape, built from one entry of `response.docs`.
pub trait FromDocument: Sized {
    fn from_fields(fields: serde_json::Map<String, Value>) -> Self;
}

/// Caller-chosen result shape, built from the assembled response parts.
pub trait FromSelect<D>: Sized {
    fn from_parts(
        status: i64,
        query_time: i64,
        num_found: u64,
        documents: Vec<D>,
        facets: HashMap<String, FacetResult>,
    ) -> Self;
}

/// Default document shape: field name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: serde_json::Map<String, Value>,
}

impl Document {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &serde_json::Map<String, Value> {
        &self.fields
    }
}

impl FromDocument for Document {
    fn from_fields(fields: serde_json::Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Default result shape for a select response.
#[derive(Debug, Clone, Serialize)]
pub struct SelectResult<D> {
    pub status: i64,
    pub query_time: i64,
    pub num_found: u64,
    pub documents: Vec<D>,
    pub facets: HashMap<String, FacetResult>,
}

impl<D> FromSelect<D> for SelectResult<D> {
    fn from_parts(
        status: i64,
        query_time: i64,
        num_found: u64,
        documents: Vec<D>,
        facets: HashMap<String, FacetResult>,
    ) -> Self {
        Self {
            status,
            query_time,
            num_found,
            documents,
            facets,
        }
    }
}

/// Assemble a typed result from a decoded select response.
///
/// The document and result shapes are type parameters, so callers can
/// substitute their own without touching the assembly logic. For the
/// defaults use [`select_result`].
pub fn assemble_select_result<D, R>(query: &SelectQuery, data: &Value) -> Result<R>
where
    D: FromDocument,
    R: FromSelect<D>,
{
    let documents: Vec<D> = data
        .get("response")
        .and_then(|r| r.get("docs"))
        .and_then(Value::as_array)
        .map(|docs| {
            docs.iter()
                .map(|doc| D::from_fields(doc.as_object().cloned().unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();

    let facets = extract_facets(data, query.facets());

    // A well-formed engine response always carries these three scalars.
    let status = data
        .get("responseHeader")
        .and_then(|h| h.get("status"))
        .and_then(Value::as_i64)
        .ok_or(Error::MalformedResponse("responseHeader.status"))?;
    let query_time = data
        .get("responseHeader")
        .and_then(|h| h.get("QTime"))
        .and_then(Value::as_i64)
        .ok_or(Error::MalformedResponse("responseHeader.QTime"))?;
    let num_found = data
        .get("response")
        .and_then(|r| r.get("numFound"))
        .and_then(Value::as_u64)
        .ok_or(Error::MalformedResponse("response.numFound"))?;

    tracing::debug!(
        status = status,
        query_time = query_time,
        num_found = num_found,
        documents = documents.len(),
        facets = facets.len(),
        "assembled select result"
    );

    Ok(R::from_parts(status, query_time, num_found, documents, facets))
}

/// [`assemble_select_result`] with the default [`Document`] and
/// [`SelectResult`] shapes.
pub fn select_result(query: &SelectQuery, data: &Value) -> Result<SelectResult<Document>> {
    assemble_select_result(query, data)
}
