use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JigsawSettings {
    /// Deal carousel pieces in random order instead of by id.
    pub shuffle_carousel: bool,
    pub piece_sound: bool,
}

impl Default for JigsawSettings {
    fn default() -> Self {
        Self {
            shuffle_carousel: false,
            piece_sound: true,
        }
    }
}
