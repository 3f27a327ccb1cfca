use crate::glyphs::IconTheme;
use crate::panel::BookmarkPanel;
use crate::state::{PanelContext, PanelState};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // One controller state per popup lifetime; discarded when it closes.
    provide_context(PanelContext(PanelState::new()));

    // IMPORTANT: Leptos CSR requires the `csr` feature on `leptos`.
    view! { <BookmarkPanel theme=IconTheme::Svg /> }
}
