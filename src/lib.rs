//! A reorderable drag and drop list for egui.
//!
//! [DraggableList] owns the items and the hovered drop index, [DragGesture] turns the drag
//! events of one row into notifications for the list and [DragDropUi] draws the list with egui
//! and feeds pointer input through the gestures. The first and last rows of a list are pinned.

pub use gesture::{
    Callbacks, DataTransfer, DefaultAction, DragContext, DragDropListener, DragEvent, DragGesture,
    DragMarker, TextTransfer, VisualFeedback,
};
pub use list::DraggableList;
pub use payload::PayloadError;
pub use state::{DragDropConfig, DragDropResponse, DragDropUi, DragIndices, Handle, Placeholder};
pub use utils::ShiftError;

mod gesture;
mod list;
pub mod payload;
mod state;
pub mod utils;
