use glam::Vec2;

use crate::games::SessionRng;
use super::layout::{JigsawLayout, rect_contains};

pub type PieceId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub row: usize,
    pub col: usize,
    /// Top-left corner of the slot the piece belongs to.
    pub target: Vec2,
    pub correct: bool,
}

/// The piece being dragged and where inside its thumbnail it was grabbed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeldPiece {
    pub id: PieceId,
    pub offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(PieceId),
    Returned(PieceId),
    NothingHeld,
}

/// Visible carousel entry as the renderer needs it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thumbnail {
    pub id: PieceId,
    pub origin: Vec2,
}

/// Pieces live either in the carousel (ordered, unplaced) or on the board.
pub struct JigsawBoard {
    layout: JigsawLayout,
    pieces: Vec<Piece>,
    carousel: Vec<PieceId>,
    placed: Vec<PieceId>,
    held: Option<HeldPiece>,
    scroll: f32,
}

impl JigsawBoard {
    pub fn new(layout: JigsawLayout) -> Self {
        let pieces: Vec<Piece> = (0..layout.piece_count())
            .map(|id| {
                let row = id / layout.cols;
                let col = id % layout.cols;
                Piece {
                    id,
                    row,
                    col,
                    target: layout.target_of(row, col),
                    correct: false,
                }
            })
            .collect();
        let carousel = pieces.iter().map(|p| p.id).collect();
        Self {
            layout,
            pieces,
            carousel,
            placed: Vec::new(),
            held: None,
            scroll: 0.0,
        }
    }

    pub fn shuffled(layout: JigsawLayout, rng: &mut SessionRng) -> Self {
        let mut board = Self::new(layout);
        rng.shuffle(&mut board.carousel);
        board
    }

    pub fn pick_up(&mut self, point: Vec2) -> Option<PieceId> {
        if self.held.is_some() || self.layout.is_above_carousel(point) {
            return None;
        }
        let size = Vec2::splat(self.layout.thumb_size);
        let thumb = self
            .visible_thumbnails()
            .find(|t| rect_contains(t.origin, size, point))?;
        self.held = Some(HeldPiece {
            id: thumb.id,
            offset: point - thumb.origin,
        });
        Some(thumb.id)
    }

    /// Releases the held piece. It snaps into its slot when the drop corner
    /// lands within the snap tolerance of the target.
    pub fn drop(&mut self, point: Vec2) -> DropOutcome {
        let Some(held) = self.held.take() else {
            return DropOutcome::NothingHeld;
        };
        if !self.layout.is_above_carousel(point) {
            return DropOutcome::Returned(held.id);
        }

        let drop_corner = point - held.offset;
        let piece = &mut self.pieces[held.id];
        if piece.correct || drop_corner.distance(piece.target) >= self.layout.snap_tolerance {
            return DropOutcome::Returned(held.id);
        }

        piece.correct = true;
        self.carousel.retain(|&id| id != held.id);
        self.placed.push(held.id);
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
        DropOutcome::Placed(held.id)
    }

    pub fn cancel_hold(&mut self) {
        self.held = None;
    }

    pub fn scroll(&mut self, delta: f32) {
        self.scroll = (self.scroll + delta).clamp(0.0, self.max_scroll());
    }

    pub fn scroll_left(&mut self) {
        self.scroll(-self.layout.step());
    }

    pub fn scroll_right(&mut self) {
        self.scroll(self.layout.step());
    }

    fn max_scroll(&self) -> f32 {
        self.layout.max_scroll(self.carousel.len())
    }

    pub fn is_complete(&self) -> bool {
        self.carousel.is_empty()
    }

    pub fn visible_thumbnails(&self) -> impl Iterator<Item = Thumbnail> + '_ {
        self.carousel
            .iter()
            .enumerate()
            .map(|(slot, &id)| Thumbnail {
                id,
                origin: self.layout.thumb_origin(slot, self.scroll),
            })
            .filter(|t| self.layout.is_thumb_visible(t.origin))
    }

    pub fn layout(&self) -> &JigsawLayout {
        &self.layout
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn carousel(&self) -> &[PieceId] {
        &self.carousel
    }

    pub fn placed(&self) -> &[PieceId] {
        &self.placed
    }

    pub fn held(&self) -> Option<HeldPiece> {
        self.held
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll
    }
}
