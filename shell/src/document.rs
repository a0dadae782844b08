//! Document metadata (title and description).

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Title and description of the document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Document title
    pub title: String,
    /// Meta description
    pub description: String,
}

impl Metadata {
    /// Metadata for a page titled `page_title` in an app named `app_title`
    #[must_use]
    pub fn for_page(app_title: &str, page_title: &str) -> Self {
        Self {
            title: format!("{app_title} - {page_title}"),
            description: page_title.to_string(),
        }
    }
}

/// Receiver of metadata updates
pub trait MetadataSink: Send + Sync {
    /// Replaces the document metadata
    fn update_metadata(&self, metadata: &Metadata);
}

/// In-memory document head
///
/// Clones share the same head.
#[derive(Clone, Debug, Default)]
pub struct Document {
    head: Arc<Mutex<Head>>,
}

#[derive(Debug, Default)]
struct Head {
    metadata: Metadata,
    updates: usize,
}

impl Document {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current metadata
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.head().metadata.clone()
    }

    /// Current title
    #[must_use]
    pub fn title(&self) -> String {
        self.head().metadata.title.clone()
    }

    /// How many times the metadata has been written
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.head().updates
    }

    fn head(&self) -> std::sync::MutexGuard<'_, Head> {
        self.head.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MetadataSink for Document {
    fn update_metadata(&self, metadata: &Metadata) {
        let mut head = self.head();
        head.metadata = metadata.clone();
        head.updates += 1;
        tracing::debug!(title = %metadata.title, "Document metadata updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_updates() {
        let document = Document::new();
        assert_eq!(document.update_count(), 0);

        document.update_metadata(&Metadata::for_page("Todo App", "Upcoming"));

        assert_eq!(document.title(), "Todo App - Upcoming");
        assert_eq!(document.metadata().description, "Upcoming");
        assert_eq!(document.update_count(), 1);
    }
}
