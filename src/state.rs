use egui::{self, CursorIcon, Id, Pos2, Rect, Sense, Shape, Ui, Vec2};
use tracing::debug;

use crate::gesture::{DragContext, DragEvent, DragMarker, TextTransfer};
use crate::list::DraggableList;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragIndices {
    pub source: usize,
    pub target: usize,
}

/// State of the list after a call to [DragDropUi::ui].
///
/// `CurrentDrag` is returned while a row is being dragged, `hover` being the row that would
/// receive the drop. `Completed` is returned once, in the frame a drop reordered the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragDropResponse {
    NoDrag,
    CurrentDrag { source: usize, hover: Option<usize> },
    Completed(DragIndices),
}

/// What to draw in place of the row that is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// The row contents again, greyed out.
    Disabled,
    /// Empty space the size of the dragged row.
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragDropConfig {
    /// Space between the list background and its rows.
    pub margin: f32,
    pub placeholder: Placeholder,
    /// Outline the row under the pointer when it accepts the drop.
    pub highlight_drop_target: bool,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            margin: 4.0,
            placeholder: Placeholder::Disabled,
            highlight_drop_target: true,
        }
    }
}

/// [DragDropUi] stores the state of a drag session over a [DraggableList] and draws the list.
///
/// `item_ui` should be a function to draw the ui elements for each item of the list. Its
/// arguments are:
/// - a mutable reference to the ui
/// - a [Handle] that can be used to draw the draggable part of the item ui
/// - the index of the current item
/// - a reference to the current item
///
/// The widget turns pointer input into drag events for each row's
/// [DragGesture](crate::DragGesture), so the list is already reordered when [DragDropUi::ui]
/// returns.
///
/// # Example
/// ```rust,no_run
/// use eframe::egui::{CentralPanel, Context};
/// use eframe::{App, Frame};
/// use egui_dnd_list::{DragDropUi, DraggableList};
///
/// struct DnDApp {
///     list: DraggableList<String>,
///     dnd: DragDropUi,
/// }
///
/// impl App for DnDApp {
///     fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
///         CentralPanel::default().show(ctx, |ui| {
///             self.dnd.ui(ui, &mut self.list, |ui, handle, _idx, item| {
///                 ui.horizontal(|ui| {
///                     handle.ui(ui, |ui| {
///                         ui.label("grab");
///                     });
///                     ui.label(item.as_str());
///                 });
///             });
///         });
///     }
/// }
///
/// let items = ["a", "b", "c", "d"].into_iter().map(String::from).collect::<Vec<_>>();
/// let _ = eframe::run_native(
///     "DnD Example",
///     eframe::NativeOptions::default(),
///     Box::new(|_| {
///         Box::new(DnDApp {
///             list: DraggableList::new(items),
///             dnd: DragDropUi::default(),
///         })
///     }),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct DragDropUi {
    id: Id,
    config: DragDropConfig,
    transfer: TextTransfer,
    marker: DragMarker,
    /// Row that started the current drag session
    source: Option<usize>,
    /// Row the pointer was over in the previous frame
    hovered: Option<usize>,
    /// Row whose handle reported a drag start while drawing this frame
    started: Option<usize>,
    /// Pointer position relative to the origin of the dragged widget when dragging began
    drag_delta: Option<Vec2>,
}

impl Default for DragDropUi {
    fn default() -> Self {
        Self::new("dnd_list")
    }
}

/// [Handle::ui] is used to draw the drag handle
pub struct Handle<'a> {
    state: &'a mut DragDropUi,
    id: Id,
    index: usize,
    draggable: bool,
    placeholder: bool,
}

/// The part of the item ui thats draggable. Accessible by the user with the `item_ui` parameter of [`DragDropUi::ui`]
impl<'a> Handle<'a> {
    pub fn ui(self, ui: &mut Ui, contents: impl FnOnce(&mut Ui)) {
        if self.placeholder || !self.draggable {
            // pinned rows and placeholders are drawn without the draggable stuff
            contents(ui);
            return;
        }

        // add contents to ui
        let added_contents = ui.scope(contents);
        let dragable_response = ui.interact(added_contents.response.rect, self.id, Sense::drag());

        // if pointer hovering above this widget, update pointer icon
        if dragable_response.hovered() {
            ui.output().cursor_icon = CursorIcon::Grab;
        }

        // if dragging this widget just began, store the intial pointer position relative to the widget origin
        if dragable_response.drag_started() {
            let top_left = added_contents.response.rect.min.to_vec2();
            let pointer_pos = dragable_response
                .interact_pointer_pos()
                .unwrap_or(Pos2::default())
                .to_vec2();
            self.state.drag_delta = Some(top_left - pointer_pos);
            self.state.started = Some(self.index);
        }
    }

    fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }
}

impl DragDropUi {
    pub fn new(id_source: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id_source),
            config: DragDropConfig::default(),
            transfer: TextTransfer::default(),
            marker: DragMarker::default(),
            source: None,
            hovered: None,
            started: None,
            drag_delta: None,
        }
    }

    pub fn with_config(mut self, config: DragDropConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    /// Row currently marked as dragged.
    pub fn dragged(&self) -> Option<usize> {
        self.marker.dragged()
    }

    pub fn ui<T>(
        &mut self,
        ui: &mut Ui,
        list: &mut DraggableList<T>,
        mut item_ui: impl FnMut(&mut Ui, Handle, usize, &T),
    ) -> DragDropResponse {
        let mut row_rects = Vec::with_capacity(list.len());
        let hover_index = list.hover_index();
        let session_active = self.source.is_some();

        // draw list entries
        let list_response = self.draw_list(ui, session_active, |state, ui| {
            for (idx, item) in list.items().iter().enumerate() {
                let id = state.id.with(idx);
                let draggable = list.is_draggable(idx);
                let rect = state.draw_item(ui, id, idx, |ui, handle| {
                    item_ui(ui, handle.draggable(draggable), idx, item)
                });
                if state.config.highlight_drop_target && hover_index == Some(idx) {
                    ui.painter()
                        .rect_stroke(rect, 2.0, ui.visuals().selection.stroke);
                }
                row_rects.push(rect);
            }
        });

        // a handle reported a drag start while drawing
        if let Some(idx) = self.started.take() {
            self.dispatch(list, idx, DragEvent::DragStart);
            if self.marker.is_dragged(idx) {
                self.source = Some(idx);
                self.hovered = None;
            }
        }

        let Some(source) = self.source else {
            return DragDropResponse::NoDrag;
        };

        // row under the pointer, offset so that the grabbed row's top edge decides
        let pointer_pos = ui.input().pointer.hover_pos();
        let hovering = if list_response.hovered() {
            pointer_pos.and_then(|pos| self.determine_hovering_index(pos, &row_rects))
        } else {
            None
        };

        // pointer moved to another row (or off the list)
        if hovering != self.hovered {
            if let Some(previous) = self.hovered {
                self.dispatch(list, previous, DragEvent::DragLeave);
            }
            self.hovered = hovering;
        }
        if let Some(idx) = hovering {
            self.dispatch(list, idx, DragEvent::DragOver);
        }

        // dragging in progress
        if !ui.input().pointer.any_released() {
            return DragDropResponse::CurrentDrag {
                source,
                hover: list.hover_index(),
            };
        }

        // dragging finished
        let mut response = DragDropResponse::NoDrag;
        if let Some(target) = self.hovered {
            let moved = list.gesture(target).can_drop && source != target;
            self.dispatch(list, target, DragEvent::Drop);
            if moved {
                response = DragDropResponse::Completed(DragIndices { source, target });
            }
        }
        self.dispatch(list, source, DragEvent::DragEnd);
        self.end_session();
        debug!(?response, "drag session ended");
        response
    }

    fn dispatch<T>(&mut self, list: &mut DraggableList<T>, idx: usize, event: DragEvent) {
        let gesture = list.gesture(idx);
        let mut cx = DragContext {
            transfer: &mut self.transfer,
            feedback: &mut self.marker,
            listener: list,
        };
        gesture.handle(event, &mut cx);
    }

    fn end_session(&mut self) {
        self.transfer.clear();
        self.source = None;
        self.hovered = None;
        self.drag_delta = None;
    }

    /// Draw the widget for an item using `item_body` either inline with the list or hovering
    /// depending on if its marked as dragged, then returns its rect. A dragged item leaves a
    /// placeholder in the list as chosen by [DragDropConfig::placeholder].
    fn draw_item(
        &mut self,
        ui: &mut Ui,
        id: Id,
        index: usize,
        mut item_body: impl FnMut(&mut Ui, Handle),
    ) -> Rect {
        if !self.marker.is_dragged(index) {
            // not dragged -> draw widget to ui
            let scope = ui.scope(|ui| item_body(ui, self.handle(id, index, false)));
            return scope.response.rect;
        }

        ui.output().cursor_icon = CursorIcon::Grabbing;

        // a dragged component cannot be interacted with anyway, so it is fine to draw it at the
        // pointer without allocating space for it first
        let pointer_pos = ui
            .ctx()
            .pointer_interact_pos()
            .unwrap_or(ui.next_widget_position());

        // draw hovering item at pointer position
        let hovering_item = egui::Area::new(id.with("dragged"))
            .interactable(false)
            .fixed_pos(pointer_pos + self.drag_delta.unwrap_or(Vec2::default()))
            .show(ui.ctx(), |ui| {
                ui.scope(|ui| item_body(ui, self.handle(id, index, true)))
                    .response
                    .rect
            });

        match self.config.placeholder {
            Placeholder::Disabled => {
                // disabled style for placeholder ui
                let scope = ui.scope(|ui| {
                    ui.add_enabled_ui(false, |ui| item_body(ui, self.handle(id, index, true)));
                });
                scope.response.rect
            }
            Placeholder::Blank => {
                // allocate space where the item would be
                let (_id, rect) = ui.allocate_space(hovering_item.inner.size());
                rect
            }
        }
    }

    fn handle(&mut self, id: Id, index: usize, placeholder: bool) -> Handle<'_> {
        Handle {
            state: self,
            id,
            index,
            draggable: true,
            placeholder,
        }
    }

    /// Draw the list background around `list_body`, highlighted when it is the drop target.
    fn draw_list(
        &mut self,
        ui: &mut Ui,
        is_drop_target: bool,
        list_body: impl FnOnce(&mut Self, &mut Ui),
    ) -> egui::Response {
        let margin = Vec2::splat(self.config.margin);

        let outer_rect_bounds = ui.available_rect_before_wrap();
        let inner_rect = outer_rect_bounds.shrink2(margin);
        let where_to_put_background = ui.painter().add(Shape::Noop);

        let mut content_ui = ui.child_ui(inner_rect, *ui.layout());

        list_body(self, &mut content_ui);
        let outer_rect =
            Rect::from_min_max(outer_rect_bounds.min, content_ui.min_rect().max + margin);
        let (rect, response) = ui.allocate_at_least(outer_rect.size(), Sense::hover());

        // determine list coloring depending on wherever this list is currently the drop target
        let style = if is_drop_target && response.hovered() {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().set(
            where_to_put_background,
            epaint::RectShape {
                rounding: style.rounding,
                fill: style.bg_fill,
                stroke: style.bg_stroke,
                rect,
            },
        );

        response
    }

    /// Index of the row containing the pointer, shifted by the grab offset so the dragged row's
    /// top edge is what counts. Falls back to the row with the closest top edge when the
    /// pointer is between rows.
    fn determine_hovering_index(&self, pointer_pos: Pos2, row_rects: &[Rect]) -> Option<usize> {
        let y = pointer_pos.y + self.drag_delta.map_or(0.0, |delta| delta.y);
        // find the row spanning the pointer, else the closest entry to the pointer position
        row_rects
            .iter()
            .position(|rect| rect.top() <= y && y < rect.bottom())
            .or_else(|| {
                row_rects
                    .iter()
                    .enumerate()
                    .filter(|(_, rect)| rect.x_range().contains(&pointer_pos.x))
                    .min_by(|(_, a), (_, b)| {
                        let da = (a.top() - y).abs();
                        let db = (b.top() - y).abs();
                        da.total_cmp(&db)
                    })
                    .map(|(idx, _)| idx)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{CentralPanel, Context, Event, Modifiers, PointerButton, RawInput};

    struct Harness {
        ctx: Context,
        dnd: DragDropUi,
        list: DraggableList<char>,
        rows: Vec<Rect>,
    }

    impl Harness {
        fn new() -> Self {
            let mut harness = Self {
                ctx: Context::default(),
                dnd: DragDropUi::default(),
                list: DraggableList::new(vec!['A', 'B', 'C', 'D', 'E', 'F']),
                rows: Vec::new(),
            };
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<Event>) -> DragDropResponse {
            let Self {
                ctx,
                dnd,
                list,
                rows,
            } = self;
            let mut rects = vec![Rect::NOTHING; list.len()];
            let mut response = DragDropResponse::NoDrag;

            ctx.run(
                RawInput {
                    events,
                    ..Default::default()
                },
                |ctx| {
                    CentralPanel::default().show(ctx, |ui| {
                        response = dnd.ui(ui, list, |ui, handle, idx, item| {
                            handle.ui(ui, |ui| {
                                rects[idx] = ui.label(item.to_string()).rect;
                            });
                        });
                    });
                },
            );

            // row positions are taken from the first, undisturbed frame
            if rows.is_empty() {
                *rows = rects;
            }
            response
        }

        fn row(&self, idx: usize) -> Pos2 {
            self.rows[idx].center()
        }

        fn move_to(&mut self, pos: Pos2) -> DragDropResponse {
            self.frame(vec![Event::PointerMoved(pos)])
        }

        fn button(&mut self, pos: Pos2, pressed: bool) -> DragDropResponse {
            self.frame(vec![Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::default(),
            }])
        }

        /// Hover and press the handle of row `idx`.
        fn grab(&mut self, idx: usize) -> DragDropResponse {
            let pos = self.row(idx);
            self.move_to(pos);
            self.button(pos, true)
        }

        fn assert_untouched(&self) {
            assert_eq!(self.list.items(), ['A', 'B', 'C', 'D', 'E', 'F']);
            assert_eq!(self.list.hover_index(), None);
            assert_eq!(self.dnd.dragged(), None);
        }
    }

    #[test]
    fn drag_interior_row_onto_another() {
        let mut h = Harness::new();

        let response = h.grab(2);
        assert!(matches!(response, DragDropResponse::CurrentDrag { source: 2, .. }));
        assert_eq!(h.dnd.dragged(), Some(2));

        let response = h.move_to(h.row(3));
        assert_eq!(response, DragDropResponse::CurrentDrag { source: 2, hover: Some(3) });

        // row 3 is left, row 4 takes over the hover
        let response = h.move_to(h.row(4));
        assert_eq!(response, DragDropResponse::CurrentDrag { source: 2, hover: Some(4) });

        let response = h.button(h.row(4), false);
        assert_eq!(
            response,
            DragDropResponse::Completed(DragIndices { source: 2, target: 4 })
        );
        assert_eq!(h.list.items(), ['A', 'B', 'D', 'E', 'C', 'F']);
        assert_eq!(h.list.hover_index(), None);
        assert_eq!(h.dnd.dragged(), None);

        // session is over
        assert_eq!(h.move_to(h.row(3)), DragDropResponse::NoDrag);
    }

    #[test]
    fn release_outside_list_cancels() {
        let mut h = Harness::new();
        h.grab(2);
        h.move_to(h.row(3));

        let outside = Pos2::new(h.row(2).x, h.rows[5].bottom() + 300.0);
        let response = h.move_to(outside);
        assert_eq!(response, DragDropResponse::CurrentDrag { source: 2, hover: None });
        assert_eq!(h.dnd.dragged(), Some(2));

        assert_eq!(h.button(outside, false), DragDropResponse::NoDrag);
        h.assert_untouched();
    }

    #[test]
    fn release_over_pinned_row_is_ignored() {
        let mut h = Harness::new();
        h.grab(2);
        h.move_to(h.row(4));
        assert_eq!(h.list.hover_index(), Some(4));

        // leaving row 4 clears the hover, row 5 never sets one
        let response = h.move_to(h.row(5));
        assert_eq!(response, DragDropResponse::CurrentDrag { source: 2, hover: None });

        assert_eq!(h.button(h.row(5), false), DragDropResponse::NoDrag);
        h.assert_untouched();
    }

    #[test]
    fn pinned_row_does_not_start_a_drag() {
        let mut h = Harness::new();
        assert_eq!(h.grab(0), DragDropResponse::NoDrag);
        assert_eq!(h.dnd.dragged(), None);

        assert_eq!(h.move_to(h.row(3)), DragDropResponse::NoDrag);
        assert_eq!(h.list.hover_index(), None);
        assert_eq!(h.button(h.row(3), false), DragDropResponse::NoDrag);
        h.assert_untouched();
    }

    #[test]
    fn drop_on_source_row_is_not_completed() {
        let mut h = Harness::new();
        h.grab(3);
        let nudged = h.row(3) + Vec2::new(1.0, 0.0);
        h.move_to(nudged);

        assert_eq!(h.button(nudged, false), DragDropResponse::NoDrag);
        h.assert_untouched();
    }

    #[test]
    fn hovering_index_uses_grab_offset_and_gaps() {
        let mut dnd = DragDropUi::default();
        let rows = [
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 20.0)),
            Rect::from_min_max(Pos2::new(0.0, 24.0), Pos2::new(100.0, 44.0)),
            Rect::from_min_max(Pos2::new(0.0, 48.0), Pos2::new(100.0, 68.0)),
        ];

        assert_eq!(dnd.determine_hovering_index(Pos2::new(50.0, 30.0), &rows), Some(1));
        // in the gap between rows 1 and 2, row 2's top edge is closer
        assert_eq!(dnd.determine_hovering_index(Pos2::new(50.0, 46.0), &rows), Some(2));
        // beside the list
        assert_eq!(dnd.determine_hovering_index(Pos2::new(150.0, 90.0), &rows), None);

        // grabbed 10 below the row top, so the pointer at 58 puts the row top at 48
        dnd.drag_delta = Some(Vec2::new(0.0, -10.0));
        assert_eq!(dnd.determine_hovering_index(Pos2::new(50.0, 58.0), &rows), Some(2));
        assert_eq!(dnd.determine_hovering_index(Pos2::new(50.0, 25.0), &rows), Some(0));
    }
}
