use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::dnd::{self, DragHover, DragSource};
use crate::host;
use crate::glyphs::IconTheme;
use crate::models::BookmarkNode;
use crate::state::{self, PanelContext};
use crate::util;
use icons::X;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

/// What the save button will do when pressed. Consulted at submit time so an
/// aborted edit can never leak into the next create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormMode {
    Create,
    Edit(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BookmarkSave {
    Create {
        parent_id: String,
        title: String,
        url: String,
    },
    Update {
        id: String,
        title: String,
        url: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FolderSave {
    Create { parent_id: String, name: String },
    Rename { id: String, name: String },
}

/// `None` when a required field is blank: submission is then a silent
/// no-op, not a surfaced validation error.
pub(crate) fn bookmark_save_command(
    mode: &FormMode,
    current_folder: &str,
    title: &str,
    url: &str,
) -> Option<BookmarkSave> {
    if title.trim().is_empty() || url.trim().is_empty() {
        return None;
    }

    Some(match mode {
        FormMode::Create => BookmarkSave::Create {
            parent_id: current_folder.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        },
        FormMode::Edit(id) => BookmarkSave::Update {
            id: id.clone(),
            title: title.to_string(),
            url: url.to_string(),
        },
    })
}

pub(crate) fn folder_save_command(
    mode: &FormMode,
    current_folder: &str,
    name: &str,
) -> Option<FolderSave> {
    if name.trim().is_empty() {
        return None;
    }

    Some(match mode {
        FormMode::Create => FolderSave::Create {
            parent_id: current_folder.to_string(),
            name: name.to_string(),
        },
        FormMode::Edit(id) => FolderSave::Rename {
            id: id.clone(),
            name: name.to_string(),
        },
    })
}

/// Host search returns folders too; only leaf bookmarks are shown.
pub(crate) fn visible_search_rows(results: &[BookmarkNode]) -> Vec<BookmarkNode> {
    results.iter().filter(|n| !n.is_folder()).cloned().collect()
}

/// Row-level actions, provided once by `BookmarkPanel` so rows stay dumb.
#[derive(Clone, Copy)]
pub(crate) struct PanelActions {
    pub enter_folder: Callback<String>,
    pub go_back: Callback<()>,
    pub open_bookmark: Callback<String>,
    pub open_edit_bookmark: Callback<BookmarkNode>,
    pub open_edit_folder: Callback<BookmarkNode>,
    pub open_delete: Callback<BookmarkNode>,
    pub refresh: Callback<()>,
}

#[component]
pub fn BookmarkPanel(#[prop(optional)] theme: IconTheme) -> impl IntoView {
    let panel = expect_context::<PanelContext>().0;

    let current_folder = panel.current_folder;
    let folder_path = panel.folder_path;
    let entries = panel.entries;
    let search_query = panel.search_query;
    let search_results = panel.search_results;
    let loading = panel.loading;
    let notice = panel.notice;

    // Every navigation and every mutation re-fetches from the host store;
    // nothing is patched locally, so there is no staleness to manage.
    let load_folder = move |id: String| {
        loading.set(true);
        spawn_local(async move {
            match host::get_subtree(&id).await {
                Ok(folder) => {
                    let children = folder.children.unwrap_or_default();
                    folder_path.update(|p| state::push_entry(p, &folder.id, &folder.title));
                    current_folder.set(folder.id);
                    entries.set(children);
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    // Search guard: keystrokes can outrun the host, so a stale response must
    // never overwrite a newer one (or leak into the folder view).
    let search_seq: RwSignal<u64> = RwSignal::new(0);

    let run_search = move |q: String| {
        let seq = search_seq.get_untracked() + 1;
        search_seq.set(seq);
        spawn_local(async move {
            match host::search(&q).await {
                Ok(results) => {
                    if search_seq.get_untracked() == seq {
                        search_results.set(results);
                    }
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    // After a mutation the authoritative view is the current folder. If the
    // user was searching, dropping the query re-renders it via the search
    // effect; otherwise reload directly.
    let refresh_after_mutation = move || {
        if util::normalize_query(&search_query.get_untracked()).is_some() {
            search_query.set(String::new());
        } else {
            load_folder(current_folder.get_untracked());
        }
    };

    // Search effect: a non-empty query runs a host search, an emptied query
    // falls straight back to the folder view. The previous-run flag keeps the
    // initial mount from issuing a redundant folder load.
    Effect::new(move |prev: Option<bool>| match util::normalize_query(&search_query.get()) {
        Some(q) => {
            run_search(q);
            true
        }
        None => {
            // Invalidate any in-flight search before leaving search mode.
            search_seq.set(search_seq.get_untracked() + 1);
            search_results.set(Vec::new());
            if prev == Some(true) {
                load_folder(current_folder.get_untracked());
            }
            false
        }
    });

    // Initial render: land on the bookmarks bar.
    Effect::new(move |_| {
        load_folder(state::ROOT_FOLDER_ID.to_string());
    });

    let in_search = move || util::normalize_query(&search_query.get()).is_some();

    let go_back = move || {
        let mut parent = None;
        folder_path.update(|p| parent = state::pop_entry(p));
        if let Some(id) = parent {
            current_folder.set(id.clone());
            load_folder(id);
        }
    };

    // Bookmark dialog
    let bm_open = RwSignal::new(false);
    let bm_mode: RwSignal<FormMode> = RwSignal::new(FormMode::Create);
    let bm_title = RwSignal::new(String::new());
    let bm_url = RwSignal::new(String::new());
    let bm_saving = RwSignal::new(false);
    let bm_title_ref: NodeRef<html::Input> = NodeRef::new();

    // Folder dialog
    let fd_open = RwSignal::new(false);
    let fd_mode: RwSignal<FormMode> = RwSignal::new(FormMode::Create);
    let fd_name = RwSignal::new(String::new());
    let fd_saving = RwSignal::new(false);
    let fd_name_ref: NodeRef<html::Input> = NodeRef::new();

    // Delete confirmation
    let del_open = RwSignal::new(false);
    let del_target: RwSignal<Option<BookmarkNode>> = RwSignal::new(None);
    let del_busy = RwSignal::new(false);

    let close_bookmark_dialog = move || {
        bm_open.set(false);
        bm_mode.set(FormMode::Create);
    };

    let close_folder_dialog = move || {
        fd_open.set(false);
        fd_mode.set(FormMode::Create);
    };

    let open_add_bookmark = move || {
        bm_mode.set(FormMode::Create);
        bm_title.set(String::new());
        bm_url.set(String::new());
        // Prefill from the focused tab; if the query fails the form simply
        // opens blank.
        spawn_local(async move {
            if let Ok(tab) = host::query_active_tab().await {
                bm_title.set(tab.title);
                bm_url.set(tab.url);
            }
            bm_open.set(true);
        });
    };

    let open_add_folder = move || {
        fd_mode.set(FormMode::Create);
        fd_name.set(String::new());
        fd_open.set(true);
    };

    let open_edit_bookmark = move |node: BookmarkNode| {
        bm_mode.set(FormMode::Edit(node.id.clone()));
        bm_title.set(node.title);
        bm_url.set(node.url.unwrap_or_default());
        bm_open.set(true);
    };

    let open_edit_folder = move |node: BookmarkNode| {
        fd_mode.set(FormMode::Edit(node.id.clone()));
        fd_name.set(node.title);
        fd_open.set(true);
    };

    let submit_bookmark = move || {
        if bm_saving.get_untracked() {
            return;
        }

        let Some(cmd) = bookmark_save_command(
            &bm_mode.get_untracked(),
            &current_folder.get_untracked(),
            &bm_title.get_untracked(),
            &bm_url.get_untracked(),
        ) else {
            return;
        };

        bm_saving.set(true);
        spawn_local(async move {
            let res = match cmd {
                BookmarkSave::Create {
                    parent_id,
                    title,
                    url,
                } => host::create(&parent_id, &title, Some(&url)).await.map(|_| ()),
                BookmarkSave::Update { id, title, url } => {
                    host::update(&id, &title, Some(&url)).await.map(|_| ())
                }
            };
            if let Err(e) = res {
                notice.set(Some(e.to_string()));
            }
            bm_saving.set(false);
            bm_open.set(false);
            // Success or not, the next save is a plain create again.
            bm_mode.set(FormMode::Create);
            refresh_after_mutation();
        });
    };

    let submit_folder = move || {
        if fd_saving.get_untracked() {
            return;
        }

        let Some(cmd) = folder_save_command(
            &fd_mode.get_untracked(),
            &current_folder.get_untracked(),
            &fd_name.get_untracked(),
        ) else {
            return;
        };

        fd_saving.set(true);
        spawn_local(async move {
            let res = match cmd {
                FolderSave::Create { parent_id, name } => {
                    host::create(&parent_id, &name, None).await.map(|_| ())
                }
                FolderSave::Rename { id, name } => {
                    host::update(&id, &name, None).await.map(|_| ())
                }
            };
            if let Err(e) = res {
                notice.set(Some(e.to_string()));
            }
            fd_saving.set(false);
            fd_open.set(false);
            fd_mode.set(FormMode::Create);
            refresh_after_mutation();
        });
    };

    let open_delete = move |node: BookmarkNode| {
        del_target.set(Some(node));
        del_open.set(true);
    };

    let decline_delete = move || {
        // A declined confirmation is a normal cancellation: no host call,
        // nothing re-rendered.
        del_open.set(false);
        del_target.set(None);
    };

    let confirm_delete = move || {
        if del_busy.get_untracked() {
            return;
        }
        let Some(node) = del_target.get_untracked() else {
            return;
        };

        del_busy.set(true);
        spawn_local(async move {
            let res = if node.is_folder() {
                host::remove_subtree(&node.id).await
            } else {
                host::remove(&node.id).await
            };
            if let Err(e) = res {
                notice.set(Some(e.to_string()));
            }
            del_busy.set(false);
            del_open.set(false);
            del_target.set(None);
            refresh_after_mutation();
        });
    };

    provide_context(PanelActions {
        enter_folder: Callback::new(move |id: String| {
            current_folder.set(id.clone());
            load_folder(id);
        }),
        go_back: Callback::new(move |_| go_back()),
        open_bookmark: Callback::new(move |url: String| {
            spawn_local(async move {
                if let Err(e) = host::open_in_new_tab(&url).await {
                    notice.set(Some(e.to_string()));
                }
            });
        }),
        open_edit_bookmark: Callback::new(open_edit_bookmark),
        open_edit_folder: Callback::new(open_edit_folder),
        open_delete: Callback::new(open_delete),
        refresh: Callback::new(move |_| refresh_after_mutation()),
    });

    // Focus the first field once a dialog is mounted (next tick).
    Effect::new(move |_| {
        if !bm_open.get() {
            return;
        }
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                if let Some(el) = bm_title_ref.get_untracked() {
                    let _ = el.focus();
                }
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    });

    Effect::new(move |_| {
        if !fd_open.get() {
            return;
        }
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                if let Some(el) = fd_name_ref.get_untracked() {
                    let _ = el.focus();
                }
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    });

    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            if bm_open.get_untracked() {
                close_bookmark_dialog();
            }
            if fd_open.get_untracked() {
                close_folder_dialog();
            }
            if del_open.get_untracked() {
                decline_delete();
            }
        }
    });

    let breadcrumb = move || {
        folder_path
            .get()
            .iter()
            .map(|e| e.title.clone())
            .collect::<Vec<_>>()
            .join(" › ")
    };

    view! {
        <div class="w-[360px] bg-background text-foreground">
            <Card class="rounded-none border-0 shadow-none">
                <CardHeader class="w-full gap-2">
                    <div class="flex w-full items-center justify-between">
                        <CardTitle class="text-base">"Shelfmark"</CardTitle>
                        <Show when=move || loading.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                    </div>
                    <CardDescription class="truncate text-xs">{breadcrumb}</CardDescription>

                    <div class="flex w-full items-center gap-2">
                        <Input
                            r#type="search"
                            placeholder="Search bookmarks…"
                            bind_value=search_query
                            class="h-8 text-sm"
                        />
                        <Button size=ButtonSize::Sm attr:title="Add bookmark" on:click=move |_| open_add_bookmark()>
                            "+ Bookmark"
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:title="Add folder"
                            on:click=move |_| open_add_folder()
                        >
                            "+ Folder"
                        </Button>
                    </div>
                </CardHeader>

                <CardContent class="px-2">
                    <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
                        {move || notice.get().map(|msg| view! {
                            <Alert class="mb-2 flex items-center justify-between gap-2 border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{msg}</AlertDescription>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    attr:aria-label="Dismiss"
                                    on:click=move |_| notice.set(None)
                                >
                                    <X />
                                </Button>
                            </Alert>
                        })}
                    </Show>

                    <Show
                        when=move || !in_search()
                        fallback=move || view! { <SearchResults theme=theme /> }
                    >
                        <FolderList theme=theme />
                    </Show>
                </CardContent>
            </Card>

            // Bookmark create/edit dialog
            <Show when=move || bm_open.get() fallback=|| ().into_view()>
                <div
                    class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                    on:click=move |_| close_bookmark_dialog()
                >
                    <div
                        class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"
                        on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    >
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">
                                {move || match bm_mode.get() {
                                    FormMode::Create => "Add bookmark",
                                    FormMode::Edit(_) => "Edit bookmark",
                                }}
                            </div>
                            <div class="text-xs text-muted-foreground">
                                {move || match bm_mode.get() {
                                    FormMode::Create => "Saved into the current folder.",
                                    FormMode::Edit(_) => "Changes apply to this bookmark only.",
                                }}
                            </div>
                        </div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label class="text-xs" html_for="bookmark-title">"Title"</Label>
                                <Input
                                    id="bookmark-title"
                                    bind_value=bm_title
                                    class="h-8 text-sm"
                                    node_ref=bm_title_ref
                                />
                            </div>

                            <div class="space-y-1">
                                <Label class="text-xs" html_for="bookmark-url">"URL"</Label>
                                <Input
                                    id="bookmark-url"
                                    r#type="url"
                                    placeholder="https://…"
                                    bind_value=bm_url
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:disabled=move || bm_saving.get()
                                    on:click=move |_| close_bookmark_dialog()
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || bm_saving.get()
                                    on:click=move |_| submit_bookmark()
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || bm_saving.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || match (bm_saving.get(), bm_mode.get()) {
                                            (true, _) => "Saving…",
                                            (false, FormMode::Create) => "Save",
                                            (false, FormMode::Edit(_)) => "Update",
                                        }}
                                    </span>
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            // Folder create/rename dialog
            <Show when=move || fd_open.get() fallback=|| ().into_view()>
                <div
                    class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                    on:click=move |_| close_folder_dialog()
                >
                    <div
                        class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"
                        on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    >
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">
                                {move || match fd_mode.get() {
                                    FormMode::Create => "Add folder",
                                    FormMode::Edit(_) => "Rename folder",
                                }}
                            </div>
                        </div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label class="text-xs" html_for="folder-name">"Name"</Label>
                                <Input
                                    id="folder-name"
                                    bind_value=fd_name
                                    class="h-8 text-sm"
                                    node_ref=fd_name_ref
                                />
                            </div>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:disabled=move || fd_saving.get()
                                    on:click=move |_| close_folder_dialog()
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || fd_saving.get()
                                    on:click=move |_| submit_folder()
                                >
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || fd_saving.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || match (fd_saving.get(), fd_mode.get()) {
                                            (true, _) => "Saving…",
                                            (false, FormMode::Create) => "Save",
                                            (false, FormMode::Edit(_)) => "Rename",
                                        }}
                                    </span>
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            // Delete confirmation
            <Show when=move || del_open.get() fallback=|| ().into_view()>
                <div
                    class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                    on:click=move |_| decline_delete()
                >
                    <div
                        class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"
                        on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    >
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium text-destructive">
                                {move || {
                                    let folder = del_target.get().map(|n| n.is_folder()).unwrap_or(false);
                                    if folder { "Delete folder" } else { "Delete bookmark" }
                                }}
                            </div>
                            <div class="text-xs text-muted-foreground">
                                {move || match del_target.get() {
                                    Some(n) if n.is_folder() => format!(
                                        "\u{201c}{}\u{201d} and everything inside it will be removed.",
                                        n.title
                                    ),
                                    Some(n) => format!(
                                        "\u{201c}{}\u{201d} will be removed.",
                                        n.display_title()
                                    ),
                                    None => String::new(),
                                }}
                            </div>
                        </div>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || del_busy.get()
                                on:click=move |_| decline_delete()
                            >
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || del_busy.get()
                                on:click=move |_| confirm_delete()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || del_busy.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if del_busy.get() { "Deleting…" } else { "Delete" }}
                                </span>
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FolderList(theme: IconTheme) -> impl IntoView {
    let panel = expect_context::<PanelContext>().0;
    let actions = expect_context::<PanelActions>();

    let current_folder = panel.current_folder;
    let folder_path = panel.folder_path;
    let entries = panel.entries;
    let loading = panel.loading;
    let notice = panel.notice;
    let drag = panel.drag;
    let drag_hover = panel.drag_hover;

    let container_class = move || {
        let mut cls =
            String::from("flex min-h-[120px] flex-col gap-0.5 rounded-md p-1");
        if drag_hover.get() == Some(DragHover::Tail) {
            cls.push_str(" bg-primary/5 ring-1 ring-primary/30");
        }
        cls
    };

    view! {
        <div
            class=container_class
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }
                if drag.get_untracked().is_none() {
                    return;
                }

                // Below the last row means "append at the end of this folder".
                let below_last = ev
                    .current_target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|el| el.last_element_child())
                    .map(|last| (ev.client_y() as f64) > last.get_bounding_client_rect().bottom())
                    .unwrap_or(false);
                if below_last {
                    drag_hover.set(Some(DragHover::Tail));
                }
            }
            on:dragleave=move |_ev: web_sys::DragEvent| {
                drag_hover.update(|h| {
                    if matches!(h, Some(DragHover::Tail)) {
                        *h = None;
                    }
                });
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();

                let source = drag.get_untracked();
                let hover = drag_hover.get_untracked();
                // Cleanup runs before the no-op exits below so markers never stick.
                drag.set(None);
                drag_hover.set(None);

                let (Some(source), Some(DragHover::Tail)) = (source, hover) else {
                    return;
                };
                let Some(dest) = dnd::resolve_destination(
                    &entries.get_untracked(),
                    &source.id,
                    &DragHover::Tail,
                    &current_folder.get_untracked(),
                ) else {
                    return;
                };

                let refresh = actions.refresh;
                spawn_local(async move {
                    if let Err(e) = host::move_node(&source.id, &dest).await {
                        notice.set(Some(e.to_string()));
                    }
                    refresh.run(());
                });
            }
        >
            <Show when=move || (folder_path.get().len() > 1) fallback=|| ().into_view()>
                <BackRow theme=theme />
            </Show>

            {move || {
                entries
                    .get()
                    .into_iter()
                    .map(|node| view! { <EntryRow node=node theme=theme /> })
                    .collect_view()
            }}

            <Show
                when=move || entries.get().is_empty() && !loading.get()
                fallback=|| ().into_view()
            >
                <div class="px-2 py-3 text-xs text-muted-foreground">"This folder is empty."</div>
            </Show>
        </div>
    }
}

/// Synthetic first row in nested folders; never draggable, never a drop target.
#[component]
fn BackRow(theme: IconTheme) -> impl IntoView {
    let panel = expect_context::<PanelContext>().0;
    let actions = expect_context::<PanelActions>();
    let folder_path = panel.folder_path;

    let parent_title = move || {
        folder_path
            .get()
            .iter()
            .rev()
            .nth(1)
            .map(|e| e.title.clone())
            .unwrap_or_default()
    };

    view! {
        <div
            class="flex cursor-pointer items-center gap-2 rounded-md px-2 py-1.5 text-sm text-muted-foreground hover:bg-accent"
            on:click=move |_| actions.go_back.run(())
        >
            {theme.back_glyph()}
            <span class="truncate">{parent_title}</span>
        </div>
    }
}

#[component]
fn EntryRow(
    node: BookmarkNode,
    theme: IconTheme,
    #[prop(default = true)] can_drag: bool,
) -> impl IntoView {
    let panel = expect_context::<PanelContext>().0;
    let actions = expect_context::<PanelActions>();

    let current_folder = panel.current_folder;
    let entries = panel.entries;
    let notice = panel.notice;
    let drag = panel.drag;
    let drag_hover = panel.drag_hover;

    let is_folder = node.is_folder();
    let id_sv = StoredValue::new(node.id.clone());
    let url_sv = StoredValue::new(node.url.clone().unwrap_or_default());
    let title = node.display_title().to_string();
    let favicon_src = node.url.as_deref().and_then(util::favicon_url);
    let icon_failed = RwSignal::new(false);
    let node_sv = StoredValue::new(node);

    let row_class = move || {
        let mut cls = String::from(
            "group flex cursor-pointer items-center justify-between gap-2 rounded-md border-y-2 border-transparent px-2 py-1.5 text-sm hover:bg-accent",
        );
        if drag
            .get()
            .is_some_and(|d| d.id == id_sv.get_value())
        {
            cls.push_str(" opacity-50");
        }
        if let Some(DragHover::Row { id, position }) = drag_hover.get() {
            if id == id_sv.get_value() {
                match position {
                    dnd::DropPosition::Inside => {
                        cls.push_str(" bg-primary/10 ring-1 ring-primary/30")
                    }
                    dnd::DropPosition::Before => cls.push_str(" border-t-primary"),
                    dnd::DropPosition::After => cls.push_str(" border-b-primary"),
                }
            }
        }
        cls
    };

    let hover_position = move || {
        drag_hover.get().and_then(|h| match h {
            DragHover::Row { id, position } if id == id_sv.get_value() => {
                Some(position.to_string())
            }
            _ => None,
        })
    };

    let on_activate = move |_: web_sys::MouseEvent| {
        if is_folder {
            actions.enter_folder.run(id_sv.get_value());
        } else {
            let url = url_sv.get_value();
            if !url.is_empty() {
                actions.open_bookmark.run(url);
            }
        }
    };

    view! {
        <div
            class=row_class
            draggable=if can_drag { "true" } else { "false" }
            data-drop-position=hover_position
            on:click=on_activate
            on:dragstart=move |ev: web_sys::DragEvent| {
                if !can_drag {
                    return;
                }
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &id_sv.get_value());
                    dt.set_effect_allowed("move");
                }
                drag.set(Some(DragSource {
                    id: id_sv.get_value(),
                    is_folder,
                }));
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                if !can_drag {
                    return;
                }
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(dt) = ev.data_transfer() {
                    dt.set_drop_effect("move");
                }

                let Some(source) = drag.get_untracked() else {
                    return;
                };
                if source.id == id_sv.get_value() {
                    // A row is never its own drop target.
                    drag_hover.set(None);
                    return;
                }

                let Some(rect) = ev
                    .current_target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .map(|el| el.get_bounding_client_rect())
                else {
                    return;
                };

                let position = dnd::drop_position_for(
                    is_folder,
                    ev.client_y() as f64,
                    rect.top(),
                    rect.height(),
                );
                drag_hover.set(Some(DragHover::Row {
                    id: id_sv.get_value(),
                    position,
                }));
            }
            on:dragleave=move |_ev: web_sys::DragEvent| {
                let id = id_sv.get_value();
                drag_hover.update(|h| {
                    if matches!(h, Some(DragHover::Row { id: hid, .. }) if *hid == id) {
                        *h = None;
                    }
                });
            }
            on:drop=move |ev: web_sys::DragEvent| {
                if !can_drag {
                    return;
                }
                ev.prevent_default();
                ev.stop_propagation();

                let source = drag.get_untracked();
                let hover = drag_hover.get_untracked();
                // Cleanup must run even when the drop resolves to a no-op below.
                drag.set(None);
                drag_hover.set(None);

                let Some(source) = source else {
                    return;
                };
                let Some(hover) = hover else {
                    return;
                };
                let Some(dest) = dnd::resolve_destination(
                    &entries.get_untracked(),
                    &source.id,
                    &hover,
                    &current_folder.get_untracked(),
                ) else {
                    return;
                };

                let refresh = actions.refresh;
                spawn_local(async move {
                    if let Err(e) = host::move_node(&source.id, &dest).await {
                        notice.set(Some(e.to_string()));
                    }
                    refresh.run(());
                });
            }
            on:dragend=move |_ev: web_sys::DragEvent| {
                // Fires for drop and cancel alike; all drag markers must be
                // gone afterwards regardless of how the drag ended.
                drag.set(None);
                drag_hover.set(None);
            }
        >
            <div class="flex min-w-0 flex-1 items-center gap-2">
                {move || {
                    if is_folder {
                        theme.folder_glyph()
                    } else if !icon_failed.get() && favicon_src.is_some() {
                        let src = favicon_src.clone().unwrap_or_default();
                        view! {
                            <img
                                class="h-4 w-4 shrink-0 rounded-sm"
                                src=src
                                alt=""
                                loading="lazy"
                                on:error=move |_| icon_failed.set(true)
                            />
                        }
                        .into_any()
                    } else {
                        theme.bookmark_glyph()
                    }
                }}
                <span class="truncate">{title.clone()}</span>
            </div>

            <div class="hidden shrink-0 items-center gap-1 group-hover:flex">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    attr:title="Edit"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        let node = node_sv.get_value();
                        if node.is_folder() {
                            actions.open_edit_folder.run(node);
                        } else {
                            actions.open_edit_bookmark.run(node);
                        }
                    }
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="14"
                        height="14"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="text-muted-foreground"
                        aria-hidden="true"
                    >
                        <path d="M12 20h9" />
                        <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                    </svg>
                </Button>

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="text-destructive"
                    attr:title="Delete"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        actions.open_delete.run(node_sv.get_value());
                    }
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="14"
                        height="14"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        aria-hidden="true"
                    >
                        <path d="M3 6h18" />
                        <path d="M8 6V4h8v2" />
                        <path d="M19 6l-1 14H6L5 6" />
                        <path d="M10 11v6" />
                        <path d="M14 11v6" />
                    </svg>
                </Button>
            </div>
        </div>
    }
}

#[component]
fn SearchResults(theme: IconTheme) -> impl IntoView {
    let panel = expect_context::<PanelContext>().0;
    let search_query = panel.search_query;
    let search_results = panel.search_results;

    view! {
        <div class="flex flex-col gap-0.5 rounded-md p-1">
            // Always-present escape hatch back to the folder view. Clearing
            // the query is what actually flips the view; the breadcrumb is
            // untouched either way.
            <div
                class="flex cursor-pointer items-center gap-2 rounded-md px-2 py-1.5 text-sm text-muted-foreground hover:bg-accent"
                on:click=move |_| search_query.set(String::new())
            >
                {theme.back_glyph()}
                <span>"Back to folder"</span>
            </div>

            {move || {
                let rows = visible_search_rows(&search_results.get());
                if rows.is_empty() {
                    view! {
                        <div class="px-2 py-3 text-xs text-muted-foreground">
                            "No bookmarks found"
                        </div>
                    }
                    .into_any()
                } else {
                    rows.into_iter()
                        .map(|node| view! { <EntryRow node=node theme=theme can_drag=false /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: &str, title: &str, url: &str) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            url: Some(url.to_string()),
            children: None,
        }
    }

    fn folder(id: &str, title: &str) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            children: None,
        }
    }

    #[test]
    fn empty_required_fields_are_a_silent_noop() {
        assert_eq!(
            bookmark_save_command(&FormMode::Create, "1", "", "https://foo.example"),
            None
        );
        assert_eq!(
            bookmark_save_command(&FormMode::Create, "1", "Foo", "   "),
            None
        );
        assert_eq!(folder_save_command(&FormMode::Create, "1", ""), None);
    }

    #[test]
    fn create_mode_parents_at_current_folder() {
        let cmd = bookmark_save_command(&FormMode::Create, "42", "Foo", "https://foo.example")
            .expect("should produce a command");
        assert_eq!(
            cmd,
            BookmarkSave::Create {
                parent_id: "42".to_string(),
                title: "Foo".to_string(),
                url: "https://foo.example".to_string(),
            }
        );
    }

    #[test]
    fn edit_mode_updates_then_mode_reset_creates() {
        // One edit cycle: Edit("9") saves as an update...
        let mode = FormMode::Edit("9".to_string());
        let cmd = bookmark_save_command(&mode, "1", "New title", "https://new.example")
            .expect("should produce a command");
        assert!(matches!(cmd, BookmarkSave::Update { ref id, .. } if id == "9"));

        // ...and once the mode is restored, the next save is a plain create,
        // never an update against the previously edited node.
        let mode = FormMode::Create;
        let cmd = bookmark_save_command(&mode, "1", "Another", "https://other.example")
            .expect("should produce a command");
        assert!(matches!(cmd, BookmarkSave::Create { .. }));
    }

    #[test]
    fn folder_rename_targets_the_node_id() {
        let mode = FormMode::Edit("7".to_string());
        let cmd = folder_save_command(&mode, "1", "Archive").expect("should produce a command");
        assert_eq!(
            cmd,
            FolderSave::Rename {
                id: "7".to_string(),
                name: "Archive".to_string(),
            }
        );
    }

    #[test]
    fn search_rows_suppress_folder_results() {
        let results = vec![
            bookmark("5", "Foo Site", "https://foo.example"),
            folder("6", "Foo Folder"),
        ];
        let rows = visible_search_rows(&results);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "5");
    }

    #[test]
    fn zero_matches_leave_no_rows() {
        assert!(visible_search_rows(&[]).is_empty());
        // Folder-only results render as "no results" too.
        assert!(visible_search_rows(&[folder("6", "Foo Folder")]).is_empty());
    }
}
