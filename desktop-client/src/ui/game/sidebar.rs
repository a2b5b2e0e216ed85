use eframe::egui::{self, Align2};
use glam::Vec2;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::event_log::EventLog;
use crate::images::ImageLibrary;
use crate::ui::widgets::{
    ACCENT_1, ACCENT_3, ACCENT_4, Area, Canvas, HIGHLIGHT, SIDEBAR, TEXT_COLOR, TILE_BG,
    draw_button, draw_text,
};

pub const SIDEBAR_X: f32 = 600.0;
pub const SETTINGS_BUTTON: Area = Area::new(610.0, 10.0, 180.0, 45.0);
pub const MAX_VISIBLE_IMAGES: usize = 4;

const FIRST_BUTTON_Y: f32 = 155.0;
const BUTTON_STEP: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarAction {
    OpenSettings,
    SelectImage(usize),
    ShowAllImages,
    Upload,
    TogglePreview,
    Reset,
}

/// Button placement of the image puzzle sidebar. Depends only on how many images exist.
#[derive(Clone, Debug, PartialEq)]
pub struct SidebarLayout {
    pub image_buttons: Vec<Area>,
    pub show_more: Option<Area>,
    pub upload: Area,
    pub preview: Area,
    pub reset: Area,
}

impl SidebarLayout {
    pub fn new(image_count: usize) -> Self {
        let mut y = FIRST_BUTTON_Y;
        let mut image_buttons = Vec::new();
        for _ in 0..image_count.min(MAX_VISIBLE_IMAGES) {
            image_buttons.push(Area::new(610.0, y, 180.0, 40.0));
            y += BUTTON_STEP;
        }

        let show_more = (image_count > MAX_VISIBLE_IMAGES).then(|| {
            let area = Area::new(610.0, y, 180.0, 45.0);
            y += BUTTON_STEP;
            area
        });

        let upload = Area::new(610.0, y, 180.0, 45.0);
        let preview = Area::new(610.0, y + BUTTON_STEP, 180.0, 45.0);
        let reset = Area::new(610.0, y + 2.0 * BUTTON_STEP, 180.0, 45.0);

        Self {
            image_buttons,
            show_more,
            upload,
            preview,
            reset,
        }
    }

    pub fn action_at(&self, point: Vec2) -> Option<SidebarAction> {
        if SETTINGS_BUTTON.contains(point) {
            return Some(SidebarAction::OpenSettings);
        }
        if let Some(index) = self.image_buttons.iter().position(|area| area.contains(point)) {
            return Some(SidebarAction::SelectImage(index));
        }
        if self.show_more.is_some_and(|area| area.contains(point)) {
            return Some(SidebarAction::ShowAllImages);
        }
        if self.upload.contains(point) {
            return Some(SidebarAction::Upload);
        }
        if self.preview.contains(point) {
            return Some(SidebarAction::TogglePreview);
        }
        if self.reset.contains(point) {
            return Some(SidebarAction::Reset);
        }
        None
    }

    pub fn draw(
        &self,
        painter: &egui::Painter,
        canvas: &Canvas,
        images: &ImageLibrary,
        selected_image: usize,
        stats: &[String],
    ) {
        painter.rect_filled(
            canvas.rect(Area::new(SIDEBAR_X, 0.0, WINDOW_WIDTH - SIDEBAR_X, WINDOW_HEIGHT)),
            0.0,
            SIDEBAR,
        );
        draw_button(painter, canvas, SETTINGS_BUTTON, ACCENT_4, "Settings");

        for (i, line) in stats.iter().enumerate() {
            draw_text(
                painter,
                canvas,
                Vec2::new(610.0, 75.0 + i as f32 * 40.0),
                Align2::LEFT_TOP,
                line,
                22.0,
                TEXT_COLOR,
            );
        }

        for (i, area) in self.image_buttons.iter().enumerate() {
            let fill = if i == selected_image { HIGHLIGHT } else { TILE_BG };
            let label = images.get(i).map(|image| image.short_name()).unwrap_or_default();
            draw_button(painter, canvas, *area, fill, &label);
        }
        if let Some(area) = self.show_more {
            draw_text(
                painter,
                canvas,
                area.center(),
                Align2::CENTER_CENTER,
                "Show more",
                18.0,
                TEXT_COLOR,
            );
        }
        draw_button(painter, canvas, self.upload, ACCENT_3, "Upload Image");
        draw_button(painter, canvas, self.preview, ACCENT_4, "Preview (P)");
        draw_button(painter, canvas, self.reset, ACCENT_1, "Reset Game");
    }
}

/// Window listing every image. Returns the index the user picked.
pub fn image_picker(ctx: &egui::Context, images: &ImageLibrary, open: &mut bool) -> Option<usize> {
    let mut picked = None;
    egui::Window::new("Choose Image")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                egui::Grid::new("image_picker_grid").num_columns(3).show(ui, |ui| {
                    for (i, image) in images.images().iter().enumerate() {
                        if ui.button(image.name.as_str()).clicked() {
                            picked = Some(i);
                        }
                        if i % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });
            });
        });
    if picked.is_some() {
        *open = false;
    }
    picked
}

/// Runs the upload dialog and reports the outcome. Returns the index of the new image.
pub fn upload_image(images: &mut ImageLibrary, event_log: &mut EventLog) -> Option<usize> {
    match images.upload_with_dialog()? {
        Ok(index) => {
            if let Some(image) = images.get(index) {
                event_log.push(format!("Image {} added", image.name));
            }
            Some(index)
        }
        Err(e) => {
            common::log_warn!("Upload failed: {}", e);
            event_log.push(format!("Upload failed: {}", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_with_few_images() {
        let layout = SidebarLayout::new(2);
        assert_eq!(layout.image_buttons.len(), 2);
        assert!(layout.show_more.is_none());
        assert_eq!(layout.upload, Area::new(610.0, 255.0, 180.0, 45.0));
        assert_eq!(layout.reset.y, 355.0);
    }

    #[test]
    fn test_layout_with_many_images() {
        let layout = SidebarLayout::new(9);
        assert_eq!(layout.image_buttons.len(), MAX_VISIBLE_IMAGES);
        assert_eq!(layout.show_more, Some(Area::new(610.0, 355.0, 180.0, 45.0)));
        assert_eq!(layout.upload.y, 405.0);
        assert!(layout.reset.y + layout.reset.h <= 550.0);
    }

    #[test]
    fn test_actions_by_position() {
        let layout = SidebarLayout::new(3);
        assert_eq!(layout.action_at(Vec2::new(700.0, 30.0)), Some(SidebarAction::OpenSettings));
        assert_eq!(layout.action_at(Vec2::new(700.0, 210.0)), Some(SidebarAction::SelectImage(1)));
        assert_eq!(layout.action_at(Vec2::new(700.0, 320.0)), Some(SidebarAction::Upload));
        assert_eq!(layout.action_at(Vec2::new(700.0, 370.0)), Some(SidebarAction::TogglePreview));
        assert_eq!(layout.action_at(Vec2::new(700.0, 420.0)), Some(SidebarAction::Reset));
        assert_eq!(layout.action_at(Vec2::new(700.0, 600.0)), None);
        assert_eq!(layout.action_at(Vec2::new(300.0, 300.0)), None);
    }
}
