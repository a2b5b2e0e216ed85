mod engine;
mod layout;
mod session;
mod settings;

pub use engine::{DropOutcome, HeldPiece, JigsawBoard, Piece, PieceId, Thumbnail};
pub use layout::{JigsawLayout, rect_contains};
pub use session::{JigsawCommand, JigsawEvent, JigsawSession};
pub use settings::JigsawSettings;
