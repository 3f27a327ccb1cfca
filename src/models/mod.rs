use serde::{Deserialize, Serialize};

/// One node of the host bookmark tree.
///
/// The host store is the system of record; we only keep whatever the last
/// fetch returned. A node with a `url` is a leaf bookmark, a node without
/// one is a folder. IDs are opaque and host-assigned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BookmarkNode {
    pub id: String,

    /// The host may omit `title` for some synthetic roots.
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Present on folder nodes returned by a subtree fetch; absent on
    /// search results and on leaf bookmarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    /// Bookmark rows with an empty title fall back to showing the URL.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.url.as_deref().unwrap_or(&self.title)
        } else {
            &self.title
        }
    }
}

/// One breadcrumb step, root first. Consecutive entries are parent→child
/// in the host tree; the last entry is the folder currently shown.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FolderPathEntry {
    pub id: String,
    pub title: String,
}

/// The focused browser tab, used only to prefill the add-bookmark form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ActiveTab {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_is_node_without_url() {
        let folder = BookmarkNode {
            id: "2".to_string(),
            title: "Reading".to_string(),
            url: None,
            children: Some(vec![]),
        };
        assert!(folder.is_folder());

        let bookmark = BookmarkNode {
            id: "3".to_string(),
            title: "Docs".to_string(),
            url: Some("https://example.org/docs".to_string()),
            children: None,
        };
        assert!(!bookmark.is_folder());
    }

    #[test]
    fn display_title_falls_back_to_url_when_blank() {
        let bookmark = BookmarkNode {
            id: "7".to_string(),
            title: "   ".to_string(),
            url: Some("https://example.org".to_string()),
            children: None,
        };
        assert_eq!(bookmark.display_title(), "https://example.org");
    }

    #[test]
    fn node_tolerates_extra_host_fields() {
        // chrome.bookmarks nodes carry fields we never look at.
        let json = r#"{
            "id": "12",
            "parentId": "1",
            "index": 3,
            "dateAdded": 1712102400000,
            "title": "Foo Site",
            "url": "https://foo.example"
        }"#;
        let node: BookmarkNode = serde_json::from_str(json).expect("node should parse");
        assert_eq!(node.id, "12");
        assert_eq!(node.url.as_deref(), Some("https://foo.example"));
        assert!(node.children.is_none());
    }
}
