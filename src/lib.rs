mod app;
mod components;
mod dnd;
mod glyphs;
mod host;
mod models;
mod panel;
mod state;
mod util;

pub use app::App;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::host;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn subtree_payload_crosses_the_js_boundary() {
        let js = js_sys::JSON::parse(
            r#"[{
                "id": "1",
                "title": "Bookmarks Bar",
                "children": [
                    { "id": "9", "title": "Foo", "url": "https://foo.example" },
                    { "id": "10", "title": "Work" }
                ]
            }]"#,
        )
        .expect("payload should parse as JS");

        let data = host::json_from_js(&js).expect("should cross the boundary");
        let root = host::decode_subtree(data).expect("should decode");
        assert_eq!(root.id, "1");

        let children = root.children.expect("children should survive");
        assert_eq!(children.len(), 2);
        assert!(!children[0].is_folder());
        assert!(children[1].is_folder());
    }

    #[wasm_bindgen_test]
    fn active_tab_payload_crosses_the_js_boundary() {
        let js = js_sys::JSON::parse(
            r#"[{ "id": 3, "active": true, "title": "Foo", "url": "https://foo.example/x" }]"#,
        )
        .expect("payload should parse as JS");

        let data = host::json_from_js(&js).expect("should cross the boundary");
        let tab = host::decode_active_tab(data).expect("should decode");
        assert_eq!(tab.url, "https://foo.example/x");
    }
}
