//! Documents and datasets.
//!
//! A [`Dataset`] is a user-curated, stably ordered list of [`DocumentRef`]s.
//! The order is significant: it decides block naming when analysing document
//! by document and the order in which documents are concatenated when
//! analysing across the whole dataset.

use serde::{Deserialize, Serialize};

use crate::term_vector::TermVector;

/// Opaque identifier of a document in the full-text index.
pub type DocumentId = String;

/// A reference to one document of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Identifier understood by the search backend.
    pub id: DocumentId,

    /// Human-readable title, used when naming per-document blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The decoded term vector, once it has been fetched.
    #[serde(default, skip)]
    pub term_vector: Option<TermVector>,
}

impl DocumentRef {
    /// Create a reference to the document with the given id.
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentRef {
            id: id.into(),
            title: None,
            term_vector: None,
        }
    }

    /// Set the document title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a decoded term vector.
    pub fn with_term_vector(mut self, tv: TermVector) -> Self {
        self.term_vector = Some(tv);
        self
    }

    /// The label used for this document in block names.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// The attached term vector, or an empty contribution if none was decoded.
    pub fn terms(&self) -> &TermVector {
        static EMPTY: TermVector = TermVector::new();
        self.term_vector.as_ref().unwrap_or(&EMPTY)
    }
}

/// Entry of a dataset file: either a bare id or an `{id, title}` object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum DatasetEntry {
    /// A bare document id.
    Id(String),
    /// A full document reference.
    Document(DocumentRef),
}

impl From<DatasetEntry> for DocumentRef {
    fn from(entry: DatasetEntry) -> Self {
        match entry {
            DatasetEntry::Id(id) => DocumentRef::new(id),
            DatasetEntry::Document(doc) => doc,
        }
    }
}

/// A stably ordered collection of documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DatasetEntry>", into = "Vec<DocumentRef>")]
pub struct Dataset {
    documents: Vec<DocumentRef>,
}

impl From<Vec<DatasetEntry>> for Dataset {
    fn from(entries: Vec<DatasetEntry>) -> Self {
        Dataset {
            documents: entries.into_iter().map(DocumentRef::from).collect(),
        }
    }
}

impl From<Dataset> for Vec<DocumentRef> {
    fn from(dataset: Dataset) -> Self {
        dataset.documents
    }
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Create a dataset from documents, keeping their order.
    pub fn from_documents(documents: Vec<DocumentRef>) -> Self {
        Dataset { documents }
    }

    /// Create a dataset from bare ids, keeping their order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dataset {
            documents: ids.into_iter().map(DocumentRef::new).collect(),
        }
    }

    /// Append a document.
    pub fn push(&mut self, document: DocumentRef) {
        self.documents.push(document);
    }

    /// Documents in dataset order.
    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    /// Mutable access to the documents, for attaching term vectors.
    pub fn documents_mut(&mut self) -> &mut [DocumentRef] {
        &mut self.documents
    }

    /// Ids in dataset order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.id.as_str())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the dataset has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
