use thiserror::Error;

/// Errors surfaced while mapping a decoded Solr response.
///
/// Request building is infallible: unsupported command and facet variants
/// are unrepresentable because [`crate::update::Command`] and
/// [`crate::query::Facet`] are matched exhaustively.
#[derive(Debug, Error)]
pub enum Error {
    /// A scalar every well-formed Solr response carries was absent or had
    /// the wrong type. The payload path is included verbatim.
    #[error("malformed response: missing or mistyped `{0}`")]
    MalformedResponse(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
