use tracing::{debug, warn};

use crate::gesture::{DragDropListener, DragGesture};
use crate::utils::shift_vec;

/// [DraggableList] owns the ordered items of a reorderable list and the index currently hovered
/// by a drag. Items are identified by position only.
///
/// The first and last rows are pinned: they can neither be dragged nor receive a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableList<T> {
    items: Vec<T>,
    hover_index: Option<usize>,
}

impl<T> DraggableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            hover_index: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the row a drag is currently over, if any.
    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    /// Moves the item at `from` to `to` and clears the hover index. Returns `false` without
    /// changing the list if either index is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        self.hover_index = None;
        match shift_vec(from, to, &mut self.items) {
            Ok(()) => {
                debug!(from, to, "moved list item");
                from != to
            }
            Err(err) => {
                warn!("ignoring move: {err}");
                false
            }
        }
    }

    pub fn set_hover_index(&mut self, index: usize) {
        self.hover_index = Some(index);
    }

    pub fn clear_hover_index(&mut self) {
        self.hover_index = None;
    }

    pub fn is_draggable(&self, index: usize) -> bool {
        self.is_interior(index)
    }

    pub fn is_droppable(&self, index: usize) -> bool {
        self.is_interior(index)
    }

    fn is_interior(&self, index: usize) -> bool {
        index != 0 && index < self.items.len().saturating_sub(1)
    }

    /// Gesture adapter for the row at `index` carrying the current capability flags.
    pub fn gesture(&self, index: usize) -> DragGesture {
        DragGesture {
            index,
            can_drag: self.is_draggable(index),
            can_drop: self.is_droppable(index),
            list_len: self.items.len(),
        }
    }
}

impl<T> From<Vec<T>> for DraggableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> DragDropListener for DraggableList<T> {
    fn hover_changed(&mut self, index: usize) {
        self.set_hover_index(index);
    }

    fn hover_cleared(&mut self) {
        self.clear_hover_index();
    }

    fn dropped(&mut self, source: usize, target: usize) {
        self.move_item(source, target);
    }
}
