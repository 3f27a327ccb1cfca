use leptos::prelude::*;

/// How row glyphs are rendered. The panel is parameterized by this instead
/// of duplicating the whole controller per skin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconTheme {
    /// Inline SVG glyphs (default skin).
    #[default]
    Svg,
    /// Emoji glyphs rendered into the same row layout.
    Emoji,
}

impl IconTheme {
    pub fn folder_glyph(self) -> AnyView {
        match self {
            IconTheme::Svg => view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    width="16"
                    height="16"
                    viewBox="0 0 24 24"
                    fill="currentColor"
                    class="shrink-0 text-muted-foreground"
                    aria-hidden="true"
                >
                    <path d="M20 6h-8l-2-2H4c-1.1 0-1.99.9-1.99 2L2 18c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V8c0-1.1-.9-2-2-2zm0 12H4V8h16v10z" />
                </svg>
            }
            .into_any(),
            IconTheme::Emoji => view! { <span class="shrink-0 text-sm leading-none">"📁"</span> }
                .into_any(),
        }
    }

    /// Fallback glyph for bookmark rows whose site icon is missing or whose
    /// URL could not be parsed.
    pub fn bookmark_glyph(self) -> AnyView {
        match self {
            IconTheme::Svg => view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    width="16"
                    height="16"
                    viewBox="0 0 24 24"
                    fill="currentColor"
                    class="shrink-0 text-muted-foreground"
                    aria-hidden="true"
                >
                    <path d="M17 3H7c-1.1 0-2 .9-2 2v16l7-3 7 3V5c0-1.1-.9-2-2-2z" />
                </svg>
            }
            .into_any(),
            IconTheme::Emoji => view! { <span class="shrink-0 text-sm leading-none">"🔖"</span> }
                .into_any(),
        }
    }

    pub fn back_glyph(self) -> AnyView {
        match self {
            IconTheme::Svg => view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    width="12"
                    height="12"
                    viewBox="0 0 24 24"
                    fill="currentColor"
                    class="shrink-0"
                    aria-hidden="true"
                >
                    <path d="M20 11H7.83l5.59-5.59L12 4l-8 8 8 8 1.41-1.41L7.83 13H20v-2z" />
                </svg>
            }
            .into_any(),
            IconTheme::Emoji => view! { <span class="shrink-0 text-sm leading-none">"↩"</span> }
                .into_any(),
        }
    }
}
