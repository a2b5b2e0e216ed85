mod game_type;
mod main_config;

pub use game_type::GameType;
pub use main_config::{Config, get_config_manager};
