use crate::models::Document;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory document index, one ordered collection per open session.
///
/// Nothing here is persisted: a collection lives exactly as long as its
/// session (or the process), which is the ephemerality contract of the
/// library.
#[derive(Clone, Default)]
pub struct LibraryIndex {
    sessions: Arc<DashMap<String, Vec<Document>>>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the library for a session key, creating an empty collection on
    /// first use. Presenting the same key again reopens the same library.
    /// Returns the current document count.
    pub fn open_session(&self, key: &str) -> usize {
        self.sessions.entry(key.to_string()).or_default().len()
    }

    pub fn session_exists(&self, key: &str) -> bool {
        self.sessions.contains_key(key)
    }

    /// Close a session and drop its collection. Returns the storage keys of
    /// the dropped documents so the blob store can release them.
    pub fn close_session(&self, key: &str) -> Vec<String> {
        self.sessions
            .remove(key)
            .map(|(_, docs)| docs.into_iter().map(|d| d.storage_key).collect())
            .unwrap_or_default()
    }

    /// Collections are kept newest first.
    pub fn insert(&self, key: &str, document: Document) {
        self.sessions
            .entry(key.to_string())
            .or_default()
            .insert(0, document);
    }

    pub fn list(&self, key: &str) -> Vec<Document> {
        self.sessions
            .get(key)
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    pub fn find(&self, key: &str, id: &str) -> Option<Document> {
        self.sessions
            .get(key)?
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Remove exactly the document whose id matches. Returns it when found.
    pub fn remove(&self, key: &str, id: &str) -> Option<Document> {
        let mut docs = self.sessions.get_mut(key)?;
        let pos = docs.iter().position(|d| d.id == id)?;
        Some(docs.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CATEGORY;

    fn doc(title: &str) -> Document {
        Document::new(
            title.to_string(),
            String::new(),
            String::new(),
            DEFAULT_CATEGORY.to_string(),
            vec![],
            format!("{}.txt", title),
            "text/plain".to_string(),
            10,
            format!("blob-{}", title),
        )
    }

    #[test]
    fn reopening_a_session_keeps_its_documents() {
        let index = LibraryIndex::new();
        assert_eq!(index.open_session("abcd"), 0);
        index.insert("abcd", doc("Notes"));
        assert_eq!(index.open_session("abcd"), 1);
    }

    #[test]
    fn insert_keeps_newest_first() {
        let index = LibraryIndex::new();
        index.open_session("abcd");
        index.insert("abcd", doc("first"));
        index.insert("abcd", doc("second"));
        let docs = index.list("abcd");
        assert_eq!(docs[0].title, "second");
        assert_eq!(docs[1].title, "first");
    }

    #[test]
    fn remove_deletes_exactly_one_matching_entry() {
        let index = LibraryIndex::new();
        index.open_session("abcd");
        index.insert("abcd", doc("keep"));
        index.insert("abcd", doc("drop"));
        let target = index.list("abcd")[0].clone();

        let removed = index.remove("abcd", &target.id).unwrap();
        assert_eq!(removed.id, target.id);

        let remaining = index.list("abcd");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "keep");
        assert!(index.remove("abcd", &target.id).is_none());
    }

    #[test]
    fn closing_a_session_drops_the_collection() {
        let index = LibraryIndex::new();
        index.open_session("abcd");
        index.insert("abcd", doc("Notes"));
        let keys = index.close_session("abcd");
        assert_eq!(keys, vec!["blob-Notes"]);
        assert!(!index.session_exists("abcd"));
        assert!(index.list("abcd").is_empty());
    }

    #[test]
    fn sessions_are_isolated() {
        let index = LibraryIndex::new();
        index.open_session("abcd");
        index.open_session("wxyz");
        index.insert("abcd", doc("mine"));
        assert!(index.list("wxyz").is_empty());
    }
}
