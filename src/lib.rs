//! Client-side mapping layer for Apache Solr: builds update/select requests
//! (XML bodies and URL parameters) and maps decoded JSON responses into typed
//! results. HTTP transport is out of scope; everything here stops at strings
//! and `serde_json::Value` trees.

pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod update;

pub use error::Error;
pub use query::{Facet, SelectQuery, Sort};
pub use request::{Method, SelectRequest, UpdateRequest};
pub use response::{Document, FacetResult, FromDocument, FromSelect, SelectResult};
pub use update::Command;
