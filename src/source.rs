//! Where flow documents come from: the lookup seam a host implements, plus
//! an in-memory source for tests and embedding.

use crate::flow::FlowDocument;

/// The result of asking a source for a flow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(FlowDocument),
    /// No entry matches the identifier.
    NotFound,
    /// The entry exists but its author has not published it.
    NotPublished,
}

/// A lookup seam resolving a flow identifier to a document.
///
/// Identifiers are opaque here; the bundled source accepts either an exact
/// id or a slug. Publication is a gating flag the source enforces, not the
/// engine.
pub trait DocumentSource {
    fn fetch_flow_document(&self, identifier: &str) -> FetchOutcome;
}

struct SourceEntry {
    id: String,
    slug: String,
    published: bool,
    document: FlowDocument,
}

/// An in-process document source backed by a list of registered flows.
#[derive(Default)]
pub struct MemoryDocumentSource {
    entries: Vec<SourceEntry>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under an id and a slug.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        slug: impl Into<String>,
        published: bool,
        document: FlowDocument,
    ) {
        self.entries.push(SourceEntry {
            id: id.into(),
            slug: slug.into(),
            published,
            document,
        });
    }
}

impl DocumentSource for MemoryDocumentSource {
    /// Resolves by exact id first; only when no id matches does the slug
    /// get a turn.
    fn fetch_flow_document(&self, identifier: &str) -> FetchOutcome {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.id == identifier)
            .or_else(|| self.entries.iter().find(|entry| entry.slug == identifier));
        match entry {
            Some(entry) if entry.published => FetchOutcome::Found(entry.document.clone()),
            Some(_) => FetchOutcome::NotPublished,
            None => FetchOutcome::NotFound,
        }
    }
}
