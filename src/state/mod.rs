use crate::dnd::{DragHover, DragSource};
use crate::models::{BookmarkNode, FolderPathEntry};
use leptos::prelude::*;

/// The browser's bookmarks-bar folder. Opaque but stable across Chromium
/// hosts, and the panel's landing view.
pub(crate) const ROOT_FOLDER_ID: &str = "1";

/// All transient UI state for one popup lifetime.
///
/// Constructed when the panel mounts and discarded with it; nothing here is
/// persisted. The host store remains the single writer for durable data, so
/// every mutation re-fetches instead of patching these signals in place.
#[derive(Clone)]
pub(crate) struct PanelState {
    /// The folder currently shown; default parent for new items.
    pub current_folder: RwSignal<String>,

    /// Breadcrumb from root to `current_folder`.
    pub folder_path: RwSignal<Vec<FolderPathEntry>>,

    /// Children of the current folder exactly as the host returned them.
    /// Never reordered locally; host order is authoritative.
    pub entries: RwSignal<Vec<BookmarkNode>>,

    pub search_query: RwSignal<String>,
    pub search_results: RwSignal<Vec<BookmarkNode>>,

    pub loading: RwSignal<bool>,

    /// Non-blocking failure banner for host-call errors.
    pub notice: RwSignal<Option<String>>,

    /// In-flight drag, if any. Both cleared unconditionally at dragend.
    pub drag: RwSignal<Option<DragSource>>,
    pub drag_hover: RwSignal<Option<DragHover>>,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            current_folder: RwSignal::new(ROOT_FOLDER_ID.to_string()),
            folder_path: RwSignal::new(vec![]),
            entries: RwSignal::new(vec![]),
            search_query: RwSignal::new(String::new()),
            search_results: RwSignal::new(vec![]),
            loading: RwSignal::new(false),
            notice: RwSignal::new(None),
            drag: RwSignal::new(None),
            drag_hover: RwSignal::new(None),
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct PanelContext(pub PanelState);

/// Append a breadcrumb entry unless it is already the last one, so
/// re-rendering the same folder (after a mutation) never duplicates it.
pub(crate) fn push_entry(path: &mut Vec<FolderPathEntry>, id: &str, title: &str) {
    if path.last().map(|e| e.id.as_str()) == Some(id) {
        return;
    }
    path.push(FolderPathEntry {
        id: id.to_string(),
        title: title.to_string(),
    });
}

/// Ascend one level: drop the last entry and return the id to show next.
/// At depth ≤ 1 there is nowhere to go and the path is left untouched.
pub(crate) fn pop_entry(path: &mut Vec<FolderPathEntry>) -> Option<String> {
    if path.len() <= 1 {
        return None;
    }
    path.pop();
    path.last().map(|e| e.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> FolderPathEntry {
        FolderPathEntry {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn push_entry_is_idempotent_for_rerenders() {
        let mut path = vec![entry("1", "Bookmarks Bar")];
        push_entry(&mut path, "4", "Work");
        push_entry(&mut path, "4", "Work");
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].id, "4");
    }

    #[test]
    fn push_entry_appends_on_descent() {
        let mut path = vec![];
        push_entry(&mut path, "1", "Bookmarks Bar");
        push_entry(&mut path, "4", "Work");
        push_entry(&mut path, "9", "Projects");
        let ids: Vec<&str> = path.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "9"]);
    }

    #[test]
    fn pop_entry_ascends_to_parent() {
        let mut path = vec![entry("1", "Root"), entry("4", "A"), entry("9", "B")];
        assert_eq!(pop_entry(&mut path), Some("4".to_string()));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn pop_entry_at_root_is_a_noop() {
        let mut path = vec![entry("1", "Root")];
        assert_eq!(pop_entry(&mut path), None);
        assert_eq!(path.len(), 1);

        let mut empty: Vec<FolderPathEntry> = vec![];
        assert_eq!(pop_entry(&mut empty), None);
    }
}
