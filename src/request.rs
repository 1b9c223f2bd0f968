//! Request envelopes: the method, uri and body a transport adapter needs to
//! execute a query. Opening connections and moving bytes is the adapter's
//! job; these types stop at strings.
//!
//! Every request carries `wt=json` so the engine answers with JSON, the
//! cheapest format for [`crate::response`] to consume.

use crate::query::{Facet, SelectQuery};
use crate::update::{Command, serialize_update};

/// HTTP method a request must be sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Build a relative uri from a handler path and query parameters. Parameter
/// values are percent-encoded; repeated keys stay repeated.
pub fn build_uri(handler: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return handler.to_string();
    }
    let query_string = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{handler}?{query_string}")
}

/// An update request: raw XML POST body, `update` handler.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    body: String,
}

impl UpdateRequest {
    pub fn new(commands: &[Command]) -> Self {
        Self {
            body: serialize_update(commands),
        }
    }

    /// Update bodies are raw POST data, so POST is mandatory.
    pub fn method(&self) -> Method {
        Method::Post
    }

    pub fn uri(&self) -> String {
        build_uri("update", &[("wt".to_string(), "json".to_string())])
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A select request: everything rides in the query string.
#[derive(Debug, Clone)]
pub struct SelectRequest {
    params: Vec<(String, String)>,
}

impl SelectRequest {
    pub fn new(query: &SelectQuery) -> Self {
        let mut params: Vec<(String, String)> = vec![
            ("q".into(), query.query().to_string()),
            ("start".into(), query.start().to_string()),
            ("rows".into(), query.rows().to_string()),
            ("fl".into(), query.fields().join(",")),
        ];

        if !query.sort_fields().is_empty() {
            let sort = query
                .sort_fields()
                .iter()
                .map(|(field, order)| format!("{field} {}", order.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("sort".into(), sort));
        }

        for fq in query.filter_queries() {
            params.push(("fq".into(), fq.clone()));
        }

        if !query.facets().is_empty() {
            params.push(("facet".into(), "true".into()));
            for facet in query.facets() {
                // The {!key=...} local param ties the response section back
                // to the descriptor key.
                match facet {
                    Facet::Field { key, field } => {
                        params.push(("facet.field".into(), format!("{{!key={key}}}{field}")));
                    }
                    Facet::Query { key, query } => {
                        params.push(("facet.query".into(), format!("{{!key={key}}}{query}")));
                    }
                }
            }
        }

        params.push(("wt".into(), "json".into()));
        Self { params }
    }

    pub fn method(&self) -> Method {
        Method::Get
    }

    pub fn uri(&self) -> String {
        build_uri("select", &self.params)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Sort;

    fn param<'a>(req: &'a SelectRequest, key: &str) -> Vec<&'a str> {
        req.params()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn build_uri_encodes_values_and_keeps_repeats() {
        let uri = build_uri(
            "select",
            &[
                ("q".into(), "price:[1 TO 10]".into()),
                ("fq".into(), "cat:a".into()),
                ("fq".into(), "cat:b".into()),
            ],
        );
        assert_eq!(
            uri,
            "select?q=price%3A%5B1%20TO%2010%5D&fq=cat%3Aa&fq=cat%3Ab"
        );
    }

    #[test]
    fn build_uri_without_params_is_bare_handler() {
        assert_eq!(build_uri("update", &[]), "update");
    }

    #[test]
    fn update_request_is_post_with_json_wire_param() {
        let req = UpdateRequest::new(&[Command::Rollback]);
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.uri(), "update?wt=json");
        assert_eq!(req.body(), "<update><rollback/></update>");
    }

    #[test]
    fn select_request_carries_paging_fields_and_sort() {
        let mut query = SelectQuery::new();
        query
            .set_query("title:rust")
            .set_start(20)
            .set_rows(50)
            .add_sort_field("price", Sort::Desc)
            .add_sort_field("name", Sort::Asc)
            .add_filter_query("in_stock:true");

        let req = SelectRequest::new(&query);
        assert_eq!(req.method(), Method::Get);
        assert_eq!(param(&req, "q"), ["title:rust"]);
        assert_eq!(param(&req, "start"), ["20"]);
        assert_eq!(param(&req, "rows"), ["50"]);
        assert_eq!(param(&req, "fl"), ["*,score"]);
        assert_eq!(param(&req, "sort"), ["price desc,name asc"]);
        assert_eq!(param(&req, "fq"), ["in_stock:true"]);
        assert_eq!(param(&req, "wt"), ["json"]);
    }

    #[test]
    fn select_request_maps_facets_to_local_params() {
        let mut query = SelectQuery::new();
        query
            .add_facet(Facet::Field {
                key: "f1".into(),
                field: "color".into(),
            })
            .add_facet(Facet::Query {
                key: "q1".into(),
                query: "price:[* TO 100]".into(),
            });

        let req = SelectRequest::new(&query);
        assert_eq!(param(&req, "facet"), ["true"]);
        assert_eq!(param(&req, "facet.field"), ["{!key=f1}color"]);
        assert_eq!(param(&req, "facet.query"), ["{!key=q1}price:[* TO 100]"]);
    }

    #[test]
    fn select_request_without_facets_omits_facet_params() {
        let req = SelectRequest::new(&SelectQuery::new());
        assert!(param(&req, "facet").is_empty());
        assert!(param(&req, "facet.field").is_empty());
    }
}
