//! Update commands and their XML wire serialization.
//!
//! Solr applies update operations in the order they appear inside the
//! `<update>` body, so serialization preserves command order exactly: no
//! reordering, no deduplication, no batching.

mod xml;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::update::xml::{attrib, bool_attrib, escape_text};

/// One document destined for the index, as an ordered field list plus
/// optional boosts. Field names are assumed pre-validated; values are
/// escaped at serialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<(String, String)>,
    boost: Option<f32>,
    field_boosts: HashMap<String, f32>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Repeated names are legal (multi-valued fields) and
    /// keep their insertion order on the wire.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn set_boost(&mut self, boost: f32) -> &mut Self {
        self.boost = Some(boost);
        self
    }

    pub fn set_field_boost(&mut self, name: impl Into<String>, boost: f32) -> &mut Self {
        self.field_boosts.insert(name.into(), boost);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn boost(&self) -> Option<f32> {
        self.boost
    }

    pub fn field_boost(&self, name: &str) -> Option<f32> {
        self.field_boosts.get(name).copied()
    }
}

/// A single update operation. Exactly one variant per command; the
/// serializer matches exhaustively, so an unsupported command cannot reach
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Add {
        documents: Vec<Document>,
        overwrite: Option<bool>,
        commit_within: Option<u32>,
    },
    Delete {
        ids: Vec<String>,
        queries: Vec<String>,
    },
    Optimize {
        wait_flush: Option<bool>,
        wait_searcher: Option<bool>,
        max_segments: Option<u32>,
    },
    Commit {
        wait_flush: Option<bool>,
        wait_searcher: Option<bool>,
        expunge_deletes: Option<bool>,
    },
    Rollback,
}

/// Serialize a command sequence into a single `<update>` document body.
///
/// An empty sequence yields `<update></update>`, which Solr accepts as a
/// no-op.
pub fn serialize_update(commands: &[Command]) -> String {
    let mut xml = String::from("<update>");
    for command in commands {
        match command {
            Command::Add {
                documents,
                overwrite,
                commit_within,
            } => write_add(&mut xml, documents, *overwrite, *commit_within),
            Command::Delete { ids, queries } => write_delete(&mut xml, ids, queries),
            Command::Optimize {
                wait_flush,
                wait_searcher,
                max_segments,
            } => {
                xml.push_str("<optimize");
                xml.push_str(&bool_attrib("waitFlush", *wait_flush));
                xml.push_str(&bool_attrib("waitSearcher", *wait_searcher));
                xml.push_str(&attrib("maxSegments", *max_segments));
                xml.push_str("/>");
            }
            Command::Commit {
                wait_flush,
                wait_searcher,
                expunge_deletes,
            } => {
                xml.push_str("<commit");
                xml.push_str(&bool_attrib("waitFlush", *wait_flush));
                xml.push_str(&bool_attrib("waitSearcher", *wait_searcher));
                xml.push_str(&bool_attrib("expungeDeletes", *expunge_deletes));
                xml.push_str("/>");
            }
            Command::Rollback => xml.push_str("<rollback/>"),
        }
    }
    xml.push_str("</update>");

    tracing::debug!(
        commands = commands.len(),
        bytes = xml.len(),
        "serialized update body"
    );
    xml
}

fn write_add(
    xml: &mut String,
    documents: &[Document],
    overwrite: Option<bool>,
    commit_within: Option<u32>,
) {
    xml.push_str("<add");
    xml.push_str(&bool_attrib("overwrite", overwrite));
    xml.push_str(&attrib("commitWithin", commit_within));
    xml.push('>');

    for doc in documents {
        xml.push_str("<doc");
        xml.push_str(&attrib("boost", doc.boost()));
        xml.push('>');

        for (name, value) in doc.fields() {
            xml.push_str("<field name=\"");
            xml.push_str(name);
            xml.push('"');
            xml.push_str(&attrib("boost", doc.field_boost(name)));
            xml.push('>');
            xml.push_str(&escape_text(value));
            xml.push_str("</field>");
        }

        xml.push_str("</doc>");
    }

    xml.push_str("</add>");
}

fn write_delete(xml: &mut String, ids: &[String], queries: &[String]) {
    // Ids always precede queries on the wire, whatever order the caller
    // accumulated them in.
    xml.push_str("<delete>");
    for id in ids {
        xml.push_str("<id>");
        xml.push_str(&escape_text(id));
        xml.push_str("</id>");
    }
    for query in queries {
        xml.push_str("<query>");
        xml.push_str(&escape_text(query));
        xml.push_str("</query>");
    }
    xml.push_str("</delete>");
}
