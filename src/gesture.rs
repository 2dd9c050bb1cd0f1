//! Per-row translation of drag lifecycle events into list notifications.
//!
//! A [DragGesture] knows nothing about how rows are drawn. The host feeds it [DragEvent]s and
//! hands it three capabilities: a [DataTransfer] to carry the source index between rows, a
//! [VisualFeedback] to mark the dragged row and a [DragDropListener] that receives the
//! resulting notifications. The returned [DefaultAction] tells the host whether the native
//! default handling of the event has to be suppressed.

use tracing::{debug, warn};

use crate::payload::{decode_index, encode_index};

/// Receiver of the notifications emitted by [DragGesture].
pub trait DragDropListener {
    fn hover_changed(&mut self, index: usize);
    fn hover_cleared(&mut self);
    /// The row at `source` was dropped on the row at `target`.
    fn dropped(&mut self, source: usize, target: usize);
}

/// Plain text storage shared by all rows for the duration of one drag.
pub trait DataTransfer {
    fn set_text(&mut self, text: String);
    fn text(&self) -> Option<&str>;
}

/// Marks rows as being dragged, e.g. by toggling a style.
pub trait VisualFeedback {
    fn set_dragged(&mut self, index: usize, dragged: bool);
}

impl VisualFeedback for () {
    fn set_dragged(&mut self, _index: usize, _dragged: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    DragStart,
    DragOver,
    DragLeave,
    Drop,
    /// Sent to the source row once the drag is over, whether or not it was dropped.
    DragEnd,
}

/// Whether the host should let its native default behaviour for the event run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

/// [DragGesture] is the drag adapter of a single row.
///
/// `can_drag` and `can_drop` are decided by the owner of the list on every render, the adapter
/// only reads them. `list_len` bounds the source index accepted from a drop payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub index: usize,
    pub can_drag: bool,
    pub can_drop: bool,
    pub list_len: usize,
}

/// The capabilities a [DragGesture] needs to handle an event.
pub struct DragContext<'a> {
    pub transfer: &'a mut dyn DataTransfer,
    pub feedback: &'a mut dyn VisualFeedback,
    pub listener: &'a mut dyn DragDropListener,
}

impl DragGesture {
    pub fn handle(&self, event: DragEvent, cx: &mut DragContext) -> DefaultAction {
        match event {
            DragEvent::DragStart => self.on_drag_start(cx.transfer, cx.feedback),
            DragEvent::DragOver => self.on_drag_over(cx.listener),
            DragEvent::DragLeave => self.on_drag_leave(cx.listener),
            DragEvent::Drop => self.on_drop(cx.transfer, cx.feedback, cx.listener),
            DragEvent::DragEnd => self.on_drag_end(cx.feedback),
        }
    }

    pub fn on_drag_start(
        &self,
        transfer: &mut dyn DataTransfer,
        feedback: &mut dyn VisualFeedback,
    ) -> DefaultAction {
        if self.can_drag {
            debug!(index = self.index, "drag started");
            transfer.set_text(encode_index(self.index));
            feedback.set_dragged(self.index, true);
        }
        DefaultAction::Allow
    }

    pub fn on_drag_over(&self, listener: &mut dyn DragDropListener) -> DefaultAction {
        if !self.can_drop {
            return DefaultAction::Allow;
        }
        listener.hover_changed(self.index);
        DefaultAction::Prevent
    }

    pub fn on_drag_leave(&self, listener: &mut dyn DragDropListener) -> DefaultAction {
        listener.hover_cleared();
        DefaultAction::Allow
    }

    pub fn on_drop(
        &self,
        transfer: &mut dyn DataTransfer,
        feedback: &mut dyn VisualFeedback,
        listener: &mut dyn DragDropListener,
    ) -> DefaultAction {
        if !self.can_drop {
            return DefaultAction::Prevent;
        }

        match decode_index(transfer.text(), self.list_len) {
            Ok(source) => {
                debug!(source, row = self.index, "dropped");
                listener.dropped(source, self.index);
                listener.hover_cleared();
                feedback.set_dragged(source, false);
            }
            Err(err) => {
                warn!(row = self.index, "ignoring drop: {err}");
                listener.hover_cleared();
            }
        }
        DefaultAction::Prevent
    }

    pub fn on_drag_end(&self, feedback: &mut dyn VisualFeedback) -> DefaultAction {
        feedback.set_dragged(self.index, false);
        DefaultAction::Allow
    }
}

/// In-process [DataTransfer].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextTransfer {
    text: Option<String>,
}

impl TextTransfer {
    pub fn clear(&mut self) {
        self.text = None;
    }
}

impl DataTransfer for TextTransfer {
    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// [VisualFeedback] remembering the single row currently marked as dragged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragMarker {
    dragged: Option<usize>,
}

impl DragMarker {
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn is_dragged(&self, index: usize) -> bool {
        self.dragged == Some(index)
    }
}

impl VisualFeedback for DragMarker {
    fn set_dragged(&mut self, index: usize, dragged: bool) {
        if dragged {
            self.dragged = Some(index);
        } else if self.dragged == Some(index) {
            self.dragged = None;
        }
    }
}

/// [DragDropListener] made of three closures.
pub struct Callbacks<H, C, D> {
    pub on_hover_changed: H,
    pub on_hover_cleared: C,
    pub on_dropped: D,
}

impl<H, C, D> DragDropListener for Callbacks<H, C, D>
where
    H: FnMut(usize),
    C: FnMut(),
    D: FnMut(usize, usize),
{
    fn hover_changed(&mut self, index: usize) {
        (self.on_hover_changed)(index)
    }

    fn hover_cleared(&mut self) {
        (self.on_hover_cleared)()
    }

    fn dropped(&mut self, source: usize, target: usize) {
        (self.on_dropped)(source, target)
    }
}
