use color_hex::color_from_hex;
use eframe::egui::{self, CentralPanel, Color32, RichText};
use eframe::{App, Frame, NativeOptions};
use egui_dnd_list::{DragDropResponse, DragDropUi, DraggableList};

struct DnDApp {
    list: DraggableList<String>,
    dnd: DragDropUi,
}

impl Default for DnDApp {
    fn default() -> Self {
        let items = (1..=6).map(|i| format!("Item {i}")).collect();
        Self {
            list: DraggableList::new(items),
            dnd: DragDropUi::new("fancy_list"),
        }
    }
}

impl App for DnDApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let [r, g, b] = color_from_hex!("#e0a526");
        let pinned = Color32::from_rgb(r, g, b);

        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drag the inner items, the first and last ones stay put");
            let last = self.list.len().saturating_sub(1);
            let response = self.dnd.ui(ui, &mut self.list, |ui, handle, idx, item| {
                ui.horizontal(|ui| {
                    handle.ui(ui, |ui| {
                        ui.label("::");
                    });
                    ui.label(RichText::new(item.as_str()).color(pinned_color(idx, last, pinned)));
                });
            });

            match response {
                DragDropResponse::CurrentDrag { source, hover } => {
                    ui.label(format!("dragging {source}, over {hover:?}"));
                }
                DragDropResponse::Completed(indices) => {
                    tracing::info!(from = indices.source, to = indices.target, "list reordered");
                }
                DragDropResponse::NoDrag => {}
            }
        });
    }
}

fn pinned_color(idx: usize, last: usize, pinned: Color32) -> Color32 {
    if idx == 0 || idx == last {
        pinned
    } else {
        Color32::LIGHT_GRAY
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let _ = eframe::run_native(
        "DnD Example",
        NativeOptions::default(),
        Box::new(|_cc| Box::new(DnDApp::default())),
    );
}
