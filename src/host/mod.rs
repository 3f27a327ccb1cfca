//! Typed async wrappers over the host browser's bookmark and tab APIs.
//!
//! The popup never owns durable state: every call here goes straight to
//! `chrome.bookmarks.*` / `chrome.tabs.*` and the result is decoded into the
//! crate's models. Payloads cross the JS boundary as JSON text because the
//! host hands us plain data objects and serde_json already knows our shapes.

use crate::dnd::MoveDestination;
use crate::models::{ActiveTab, BookmarkNode};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HostErrorKind {
    /// The host promise rejected (invalid id, store busy, permission denied).
    Rejected,
    /// The host fulfilled but the payload did not match the contract.
    Parse,
    /// `chrome.*` is missing; the popup was opened outside an extension.
    Unavailable,
}

#[derive(Clone, Debug)]
pub(crate) struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl HostError {
    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: HostErrorKind::Parse,
            message: e.to_string(),
        }
    }
}

pub(crate) type HostResult<T> = Result<T, HostError>;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "getSubTree")]
    fn bookmarks_get_sub_tree(id: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "search")]
    fn bookmarks_search(query: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "create")]
    fn bookmarks_create(details: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "update")]
    fn bookmarks_update(id: &str, changes: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "move")]
    fn bookmarks_move(id: &str, destination: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "remove")]
    fn bookmarks_remove(id: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "bookmarks"], js_name = "removeTree")]
    fn bookmarks_remove_tree(id: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = "query")]
    fn tabs_query(query_info: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = "create")]
    fn tabs_create(props: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

fn extension_api_present() -> bool {
    matches!(
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("chrome")),
        Ok(v) if !v.is_undefined() && !v.is_null()
    )
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

fn host_error_from_js(ctx: &str, err: JsValue) -> HostError {
    if !extension_api_present() {
        return HostError {
            kind: HostErrorKind::Unavailable,
            message: format!("{ctx}: extension APIs are not available here"),
        };
    }
    HostError {
        kind: HostErrorKind::Rejected,
        message: format!("{ctx}: {}", js_error_message(&err)),
    }
}

async fn run(ctx: &'static str, call: Result<js_sys::Promise, JsValue>) -> HostResult<JsValue> {
    let promise = call.map_err(|e| host_error_from_js(ctx, e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| host_error_from_js(ctx, e))
}

pub(crate) fn json_from_js(value: &JsValue) -> HostResult<serde_json::Value> {
    let text = js_sys::JSON::stringify(value).map_err(|e| HostError::parse(js_error_message(&e)))?;
    serde_json::from_str(&String::from(text)).map_err(HostError::parse)
}

fn js_from_serialize<T: Serialize>(value: &T) -> HostResult<JsValue> {
    let text = serde_json::to_string(value).map_err(HostError::parse)?;
    js_sys::JSON::parse(&text).map_err(|e| HostError::parse(js_error_message(&e)))
}

/* ---- wire shapes (chrome uses camelCase keys) ---- */

#[derive(Serialize, Clone, Debug)]
struct CreateDetails<'a> {
    #[serde(rename = "parentId")]
    parent_id: &'a str,
    title: &'a str,
    /// Absent `url` creates a folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize, Clone, Debug)]
struct UpdateChanges<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize, Clone, Debug)]
struct MoveArgs<'a> {
    #[serde(rename = "parentId")]
    parent_id: &'a str,
    /// Omitted index means "append at the end of the new parent".
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<u32>,
}

#[derive(Serialize, Clone, Debug)]
struct ActiveTabQuery {
    active: bool,
    #[serde(rename = "currentWindow")]
    current_window: bool,
}

#[derive(Serialize, Clone, Debug)]
struct NewTabProps<'a> {
    url: &'a str,
}

/* ---- payload decoding (pure, also exercised by native tests) ---- */

/// `getSubTree` fulfills with a one-element array holding the folder node.
pub(crate) fn decode_subtree(data: serde_json::Value) -> HostResult<BookmarkNode> {
    let mut nodes: Vec<BookmarkNode> = serde_json::from_value(data).map_err(HostError::parse)?;
    if nodes.is_empty() {
        return Err(HostError::parse("getSubTree returned no nodes"));
    }
    Ok(nodes.remove(0))
}

pub(crate) fn decode_nodes(data: serde_json::Value) -> HostResult<Vec<BookmarkNode>> {
    serde_json::from_value(data).map_err(HostError::parse)
}

pub(crate) fn decode_node(data: serde_json::Value) -> HostResult<BookmarkNode> {
    serde_json::from_value(data).map_err(HostError::parse)
}

/// `tabs.query({active, currentWindow})` fulfills with an array; the focused
/// tab is the first element.
pub(crate) fn decode_active_tab(data: serde_json::Value) -> HostResult<ActiveTab> {
    let mut tabs: Vec<ActiveTab> = serde_json::from_value(data).map_err(HostError::parse)?;
    if tabs.is_empty() {
        return Err(HostError::parse("no focused tab"));
    }
    Ok(tabs.remove(0))
}

/* ---- host operations ---- */

pub(crate) async fn get_subtree(folder_id: &str) -> HostResult<BookmarkNode> {
    let value = run("bookmarks.getSubTree", bookmarks_get_sub_tree(folder_id)).await?;
    decode_subtree(json_from_js(&value)?)
}

pub(crate) async fn search(query: &str) -> HostResult<Vec<BookmarkNode>> {
    let value = run("bookmarks.search", bookmarks_search(query)).await?;
    decode_nodes(json_from_js(&value)?)
}

pub(crate) async fn create(
    parent_id: &str,
    title: &str,
    url: Option<&str>,
) -> HostResult<BookmarkNode> {
    let details = js_from_serialize(&CreateDetails {
        parent_id,
        title,
        url,
    })?;
    let value = run("bookmarks.create", bookmarks_create(&details)).await?;
    decode_node(json_from_js(&value)?)
}

pub(crate) async fn update(id: &str, title: &str, url: Option<&str>) -> HostResult<BookmarkNode> {
    let changes = js_from_serialize(&UpdateChanges { title, url })?;
    let value = run("bookmarks.update", bookmarks_update(id, &changes)).await?;
    decode_node(json_from_js(&value)?)
}

pub(crate) async fn move_node(id: &str, destination: &MoveDestination) -> HostResult<BookmarkNode> {
    let args = js_from_serialize(&MoveArgs {
        parent_id: &destination.parent_id,
        index: destination.index.map(|i| i as u32),
    })?;
    let value = run("bookmarks.move", bookmarks_move(id, &args)).await?;
    decode_node(json_from_js(&value)?)
}

/// Removes a single node; the host rejects this for non-empty folders.
pub(crate) async fn remove(id: &str) -> HostResult<()> {
    run("bookmarks.remove", bookmarks_remove(id)).await?;
    Ok(())
}

/// Removes a folder and everything beneath it.
pub(crate) async fn remove_subtree(id: &str) -> HostResult<()> {
    run("bookmarks.removeTree", bookmarks_remove_tree(id)).await?;
    Ok(())
}

pub(crate) async fn query_active_tab() -> HostResult<ActiveTab> {
    let query = js_from_serialize(&ActiveTabQuery {
        active: true,
        current_window: true,
    })?;
    let value = run("tabs.query", tabs_query(&query)).await?;
    decode_active_tab(json_from_js(&value)?)
}

pub(crate) async fn open_in_new_tab(url: &str) -> HostResult<()> {
    let props = js_from_serialize(&NewTabProps { url })?;
    run("tabs.create", tabs_create(&props)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_subtree_takes_root_and_keeps_child_order() {
        // Shape observed from chrome.bookmarks.getSubTree("1").
        let json = serde_json::json!([{
            "id": "1",
            "title": "Bookmarks Bar",
            "children": [
                { "id": "10", "title": "Work", "dateGroupModified": 1712102400000i64 },
                { "id": "11", "title": "Foo Site", "url": "https://foo.example", "index": 1 },
                { "id": "12", "title": "Bar Site", "url": "https://bar.example", "index": 2 }
            ]
        }]);

        let root = decode_subtree(json).expect("subtree should decode");
        assert_eq!(root.id, "1");
        let children = root.children.expect("root should keep children");
        let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "11", "12"]);
        assert!(children[0].is_folder());
        assert!(!children[1].is_folder());
    }

    #[test]
    fn decode_subtree_rejects_empty_payload() {
        let err = decode_subtree(serde_json::json!([])).unwrap_err();
        assert_eq!(err.kind, HostErrorKind::Parse);
    }

    #[test]
    fn decode_active_tab_takes_first_result() {
        let json = serde_json::json!([
            { "id": 77, "url": "https://foo.example/page", "title": "Foo", "active": true }
        ]);
        let tab = decode_active_tab(json).expect("tab should decode");
        assert_eq!(tab.url, "https://foo.example/page");
        assert_eq!(tab.title, "Foo");
    }

    #[test]
    fn create_details_serialize_to_chrome_keys() {
        let v = serde_json::to_value(CreateDetails {
            parent_id: "1",
            title: "Docs",
            url: Some("https://example.org"),
        })
        .expect("should serialize");
        assert_eq!(v["parentId"], "1");
        assert_eq!(v["url"], "https://example.org");

        // Folder create: no url key at all, not a null.
        let v = serde_json::to_value(CreateDetails {
            parent_id: "1",
            title: "New folder",
            url: None,
        })
        .expect("should serialize");
        assert!(v.get("url").is_none());
    }

    #[test]
    fn move_args_omit_index_for_append_semantics() {
        let v = serde_json::to_value(MoveArgs {
            parent_id: "42",
            index: None,
        })
        .expect("should serialize");
        assert_eq!(v["parentId"], "42");
        assert!(v.get("index").is_none());

        let v = serde_json::to_value(MoveArgs {
            parent_id: "1",
            index: Some(3),
        })
        .expect("should serialize");
        assert_eq!(v["index"], 3);
    }
}
