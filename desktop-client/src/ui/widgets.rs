use common::games::Rgb;
use common::games::jigsaw::rect_contains;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, StrokeKind};
use glam::Vec2;

use crate::constants::TICKS_PER_SECOND;

pub const BACKGROUND: Color32 = Color32::from_rgb(249, 246, 239);
pub const SIDEBAR: Color32 = Color32::from_rgb(230, 230, 250);
pub const TILE_BG: Color32 = Color32::WHITE;
pub const ACCENT_1: Color32 = Color32::from_rgb(255, 182, 193);
pub const ACCENT_2: Color32 = Color32::from_rgb(176, 224, 230);
pub const ACCENT_3: Color32 = Color32::from_rgb(255, 250, 141);
pub const ACCENT_4: Color32 = Color32::from_rgb(197, 176, 205);
pub const SETTINGS_BG: Color32 = Color32::from_rgb(220, 220, 240);
pub const TEXT_COLOR: Color32 = Color32::from_rgb(70, 70, 70);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(152, 251, 152);
const BUTTON_BORDER: Color32 = Color32::from_rgb(200, 200, 200);

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

pub fn faded(rgb: Rgb, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(rgb.0, rgb.1, rgb.2, alpha)
}

/// Rectangle in logical screen coordinates (the 800x650 layout every game is drawn in).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Area {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        rect_contains(Vec2::new(self.x, self.y), Vec2::new(self.w, self.h), point)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Maps logical coordinates onto the panel the game is painted in.
#[derive(Clone, Copy, Debug)]
pub struct Canvas {
    origin: Pos2,
}

impl Canvas {
    pub fn new(origin: Pos2) -> Self {
        Self { origin }
    }

    pub fn pos(&self, point: Vec2) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y)
    }

    pub fn rect(&self, area: Area) -> Rect {
        Rect::from_min_size(self.pos(Vec2::new(area.x, area.y)), egui::vec2(area.w, area.h))
    }

    pub fn to_logical(&self, pos: Pos2) -> Vec2 {
        Vec2::new(pos.x - self.origin.x, pos.y - self.origin.y)
    }
}

pub fn draw_button(painter: &egui::Painter, canvas: &Canvas, area: Area, fill: Color32, label: &str) {
    let rect = canvas.rect(area);
    painter.rect_filled(rect, 10.0, fill);
    painter.rect_stroke(rect, 10.0, Stroke::new(2.0, BUTTON_BORDER), StrokeKind::Inside);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::proportional(20.0),
        TEXT_COLOR,
    );
}

pub fn draw_text(
    painter: &egui::Painter,
    canvas: &Canvas,
    at: Vec2,
    align: Align2,
    text: impl ToString,
    size: f32,
    color: Color32,
) {
    painter.text(canvas.pos(at), align, text, FontId::proportional(size), color);
}

/// Dims the area and writes a title with a subtitle below it.
pub fn draw_overlay(
    painter: &egui::Painter,
    canvas: &Canvas,
    area: Area,
    tint: Color32,
    title: &str,
    title_color: Color32,
    subtitle: &str,
) {
    painter.rect_filled(canvas.rect(area), 0.0, tint);
    let center = area.center();
    draw_text(painter, canvas, center - Vec2::new(0.0, 30.0), Align2::CENTER_CENTER, title, 48.0, title_color);
    draw_text(painter, canvas, center + Vec2::new(0.0, 30.0), Align2::CENTER_CENTER, subtitle, 24.0, TEXT_COLOR);
}

pub fn whole_seconds(ticks: u64) -> u64 {
    ticks / TICKS_PER_SECOND as u64
}

/// `m:ss`
pub fn format_clock(ticks: u64) -> String {
    let seconds = whole_seconds(ticks);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `mm:ss`
pub fn format_clock_padded(ticks: u64) -> String {
    let seconds = whole_seconds(ticks);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Raw input of one frame, already in logical coordinates.
#[derive(Debug, Default)]
pub struct FrameInput {
    pub keys: Vec<egui::Key>,
    pub pointer: Option<Vec2>,
    pub pressed_at: Option<Vec2>,
    pub released_at: Option<Vec2>,
    pub scroll: f32,
    /// Horizontal pointer movement while the secondary button is held.
    pub secondary_drag: f32,
}

impl FrameInput {
    pub fn collect(ctx: &egui::Context, canvas: &Canvas) -> Self {
        ctx.input(|i| {
            let keys = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            let interact = i.pointer.interact_pos().map(|pos| canvas.to_logical(pos));

            Self {
                keys,
                pointer: i.pointer.hover_pos().map(|pos| canvas.to_logical(pos)),
                pressed_at: interact.filter(|_| i.pointer.primary_pressed()),
                released_at: interact.filter(|_| i.pointer.primary_released()),
                scroll: i.raw_scroll_delta.y,
                secondary_drag: if i.pointer.secondary_down() {
                    i.pointer.delta().x
                } else {
                    0.0
                },
            }
        })
    }

    pub fn clicked_in(&self, area: Area) -> bool {
        self.pressed_at.is_some_and(|point| area.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_is_half_open() {
        let area = Area::new(10.0, 20.0, 30.0, 40.0);
        assert!(area.contains(Vec2::new(10.0, 20.0)));
        assert!(area.contains(Vec2::new(39.9, 59.9)));
        assert!(!area.contains(Vec2::new(40.0, 30.0)));
        assert!(!area.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_canvas_round_trip() {
        let canvas = Canvas::new(Pos2::new(5.0, 7.0));
        let pos = canvas.pos(Vec2::new(100.0, 50.0));
        assert_eq!(pos, Pos2::new(105.0, 57.0));
        assert_eq!(canvas.to_logical(pos), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_clock_formats() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(61 * 60 + 59), "1:01");
        assert_eq!(format_clock_padded(125 * 60), "02:05");
        assert_eq!(format_clock_padded(59), "00:00");
    }

    #[test]
    fn test_clicked_in() {
        let input = FrameInput {
            pressed_at: Some(Vec2::new(15.0, 15.0)),
            ..FrameInput::default()
        };
        assert!(input.clicked_in(Area::new(10.0, 10.0, 10.0, 10.0)));
        assert!(!input.clicked_in(Area::new(20.0, 10.0, 10.0, 10.0)));
        assert!(!FrameInput::default().clicked_in(Area::new(0.0, 0.0, 800.0, 650.0)));
    }
}
