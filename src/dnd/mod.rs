//! Drop-target resolution for drag-and-drop reordering.
//!
//! Geometry and index bookkeeping live here as plain functions so the whole
//! engine is testable without a DOM; the panel only feeds in pointer
//! coordinates and the fetched child list.

use crate::models::BookmarkNode;
use strum::{AsRefStr, Display};

/// Vertical band around a folder row's midpoint that selects `Inside`.
/// Deliberately narrow; treat as a UX tuning knob, not a contract.
pub(crate) const FOLDER_INSIDE_BAND_PX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum DropPosition {
    Before,
    After,
    Inside,
}

/// Captured at dragstart; cleared unconditionally at dragend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DragSource {
    pub id: String,
    pub is_folder: bool,
}

/// The candidate target under the pointer while a drag is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DragHover {
    Row { id: String, position: DropPosition },
    /// Pointer is below the last row: append at the end of the current folder.
    Tail,
}

/// Where the host should move the dragged node. `index: None` delegates
/// placement to the host (append semantics when entering a folder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MoveDestination {
    pub parent_id: String,
    pub index: Option<usize>,
}

/// Classify the pointer against a row's vertical extent.
///
/// Folder rows accept `Inside` within the midpoint band; everything else is
/// a before/after split at the midpoint.
pub(crate) fn drop_position_for(
    target_is_folder: bool,
    pointer_y: f64,
    rect_top: f64,
    rect_height: f64,
) -> DropPosition {
    let mid = rect_top + rect_height / 2.0;

    if target_is_folder && (pointer_y - mid).abs() < FOLDER_INSIDE_BAND_PX {
        DropPosition::Inside
    } else if pointer_y < mid {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

/// Resolve the hover target into a concrete `(parent, index)` move, or
/// `None` when the drop is a no-op (self-drop, vanished row).
///
/// Sibling indexes are computed against the fetched child list, which is the
/// order the host rendered, so `Before` maps to the target's own index and
/// `After` to the slot just past it.
pub(crate) fn resolve_destination(
    children: &[BookmarkNode],
    dragged_id: &str,
    hover: &DragHover,
    current_folder: &str,
) -> Option<MoveDestination> {
    match hover {
        DragHover::Tail => Some(MoveDestination {
            parent_id: current_folder.to_string(),
            index: Some(children.len()),
        }),
        DragHover::Row { id, position } => {
            if id == dragged_id {
                return None;
            }

            if *position == DropPosition::Inside {
                return Some(MoveDestination {
                    parent_id: id.clone(),
                    index: None,
                });
            }

            let target_index = children.iter().position(|n| n.id == *id)?;
            let index = if *position == DropPosition::Before {
                target_index
            } else {
                target_index + 1
            };

            Some(MoveDestination {
                parent_id: current_folder.to_string(),
                index: Some(index),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: &str) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: format!("node {id}"),
            url: Some(format!("https://example.org/{id}")),
            children: None,
        }
    }

    fn folder(id: &str) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: format!("folder {id}"),
            url: None,
            children: None,
        }
    }

    fn five_children() -> Vec<BookmarkNode> {
        vec![
            bookmark("a"),
            bookmark("b"),
            bookmark("c"),
            folder("d"),
            bookmark("e"),
        ]
    }

    #[test]
    fn folder_midpoint_band_selects_inside() {
        // Row from y=100 to y=130, midpoint 115.
        assert_eq!(drop_position_for(true, 115.0, 100.0, 30.0), DropPosition::Inside);
        assert_eq!(drop_position_for(true, 106.0, 100.0, 30.0), DropPosition::Inside);
        assert_eq!(drop_position_for(true, 124.9, 100.0, 30.0), DropPosition::Inside);

        // Exactly on the band edge falls through to before/after.
        assert_eq!(drop_position_for(true, 105.0, 100.0, 30.0), DropPosition::Before);
        assert_eq!(drop_position_for(true, 125.0, 100.0, 30.0), DropPosition::After);
    }

    #[test]
    fn bookmark_rows_never_resolve_inside() {
        assert_eq!(drop_position_for(false, 115.0, 100.0, 30.0), DropPosition::After);
        assert_eq!(drop_position_for(false, 114.9, 100.0, 30.0), DropPosition::Before);
    }

    #[test]
    fn before_uses_target_index_after_increments() {
        let children = five_children();

        let hover = DragHover::Row {
            id: "c".to_string(),
            position: DropPosition::Before,
        };
        let dest = resolve_destination(&children, "a", &hover, "1").expect("should resolve");
        assert_eq!(dest.parent_id, "1");
        assert_eq!(dest.index, Some(2));

        let hover = DragHover::Row {
            id: "c".to_string(),
            position: DropPosition::After,
        };
        let dest = resolve_destination(&children, "a", &hover, "1").expect("should resolve");
        assert_eq!(dest.index, Some(3));
    }

    #[test]
    fn inside_folder_delegates_index_to_host() {
        let children = five_children();
        let hover = DragHover::Row {
            id: "d".to_string(),
            position: DropPosition::Inside,
        };
        let dest = resolve_destination(&children, "a", &hover, "1").expect("should resolve");
        assert_eq!(dest.parent_id, "d");
        assert_eq!(dest.index, None);
    }

    #[test]
    fn tail_appends_at_child_count() {
        let children = five_children();
        let dest =
            resolve_destination(&children, "a", &DragHover::Tail, "1").expect("should resolve");
        assert_eq!(dest.parent_id, "1");
        assert_eq!(dest.index, Some(5));
    }

    #[test]
    fn self_drop_and_unknown_target_are_noops() {
        let children = five_children();

        let hover = DragHover::Row {
            id: "a".to_string(),
            position: DropPosition::Before,
        };
        assert_eq!(resolve_destination(&children, "a", &hover, "1"), None);

        let hover = DragHover::Row {
            id: "zzz".to_string(),
            position: DropPosition::After,
        };
        assert_eq!(resolve_destination(&children, "a", &hover, "1"), None);
    }

    #[test]
    fn position_labels_render_lowercase() {
        // Used verbatim in data attributes on the rows.
        assert_eq!(DropPosition::Before.to_string(), "before");
        assert_eq!(DropPosition::Inside.as_ref(), "inside");
    }
}
