use glam::Vec2;

/// Pixel geometry of the jigsaw screen: a square board above a horizontal
/// carousel of thumbnails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JigsawLayout {
    pub board_size: f32,
    pub rows: usize,
    pub cols: usize,
    pub viewport_width: f32,
    pub carousel_top: f32,
    pub carousel_height: f32,
    pub thumb_size: f32,
    pub thumb_gap: f32,
    /// A drop closer than this to the target snaps into place.
    pub snap_tolerance: f32,
}

impl Default for JigsawLayout {
    fn default() -> Self {
        Self {
            board_size: 600.0,
            rows: 4,
            cols: 4,
            viewport_width: 800.0,
            carousel_top: 550.0,
            carousel_height: 90.0,
            thumb_size: 70.0,
            thumb_gap: 10.0,
            snap_tolerance: 50.0,
        }
    }
}

impl JigsawLayout {
    pub fn piece_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn piece_size(&self) -> Vec2 {
        Vec2::new(
            self.board_size / self.cols as f32,
            self.board_size / self.rows as f32,
        )
    }

    pub fn target_of(&self, row: usize, col: usize) -> Vec2 {
        let size = self.piece_size();
        Vec2::new(col as f32 * size.x, row as f32 * size.y)
    }

    /// Horizontal distance between two neighbouring thumbnails.
    pub fn step(&self) -> f32 {
        self.thumb_size + self.thumb_gap
    }

    pub fn thumb_origin(&self, slot: usize, scroll: f32) -> Vec2 {
        Vec2::new(
            self.thumb_gap + slot as f32 * self.step() - scroll,
            self.carousel_top + self.thumb_gap,
        )
    }

    pub fn is_thumb_visible(&self, origin: Vec2) -> bool {
        origin.x > -self.thumb_size && origin.x < self.viewport_width
    }

    pub fn max_scroll(&self, carousel_len: usize) -> f32 {
        (carousel_len as f32 * self.step() - self.viewport_width).max(0.0)
    }

    /// Releases only count when made above the carousel strip.
    pub fn is_above_carousel(&self, point: Vec2) -> bool {
        point.y < self.carousel_top
    }

    pub fn screen_height(&self) -> f32 {
        self.carousel_top + self.carousel_height
    }
}

/// Half-open rectangle hit test: left/top edges inclusive, right/bottom exclusive.
pub fn rect_contains(origin: Vec2, size: Vec2, point: Vec2) -> bool {
    point.x >= origin.x
        && point.y >= origin.y
        && point.x < origin.x + size.x
        && point.y < origin.y + size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let layout = JigsawLayout::default();
        assert_eq!(layout.piece_count(), 16);
        assert_eq!(layout.piece_size(), Vec2::splat(150.0));
        assert_eq!(layout.target_of(2, 3), Vec2::new(450.0, 300.0));
        assert_eq!(layout.step(), 80.0);
        assert_eq!(layout.screen_height(), 640.0);
    }

    #[test]
    fn test_thumb_origin_moves_with_scroll() {
        let layout = JigsawLayout::default();
        assert_eq!(layout.thumb_origin(0, 0.0), Vec2::new(10.0, 560.0));
        assert_eq!(layout.thumb_origin(3, 80.0), Vec2::new(170.0, 560.0));
    }

    #[test]
    fn test_max_scroll() {
        let layout = JigsawLayout::default();
        assert_eq!(layout.max_scroll(16), 480.0);
        assert_eq!(layout.max_scroll(10), 0.0);
        assert_eq!(layout.max_scroll(0), 0.0);
    }

    #[test]
    fn test_thumb_visibility() {
        let layout = JigsawLayout::default();
        assert!(layout.is_thumb_visible(Vec2::new(-69.0, 560.0)));
        assert!(!layout.is_thumb_visible(Vec2::new(-70.0, 560.0)));
        assert!(!layout.is_thumb_visible(Vec2::new(800.0, 560.0)));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let origin = Vec2::new(10.0, 10.0);
        let size = Vec2::splat(70.0);
        assert!(rect_contains(origin, size, Vec2::new(10.0, 10.0)));
        assert!(!rect_contains(origin, size, Vec2::new(80.0, 20.0)));
    }
}
