use std::path::{Path, PathBuf};

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::jigsaw::JigsawSettings;
use common::games::sliding_puzzle::SlidingSettings;
use common::games::snake::SnakeSettings;
use common::games::sudoku::SudokuSettings;
use serde::{Deserialize, Serialize};

use super::GameType;

const CONFIG_FILE_NAME: &str = "arcade_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Config next to the executable unless an explicit path is given.
pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub last_game: Option<GameType>,
    pub images_dir: PathBuf,
    pub snake: SnakeSettings,
    pub sliding: SlidingSettings,
    pub jigsaw: JigsawSettings,
    pub sudoku: SudokuSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.images_dir.as_os_str().is_empty() {
            return Err("images_dir must not be empty".to_string());
        }
        self.snake.validate()?;
        self.sliding.validate()?;
        self.sudoku.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_game: None,
            images_dir: PathBuf::from("assets").join("images"),
            snake: SnakeSettings::default(),
            sliding: SlidingSettings::default(),
            jigsaw: JigsawSettings::default(),
            sudoku: SudokuSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_arcade_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialize_result = serializer.serialize(&default_config);
        assert!(serialize_result.is_ok());
        let serialized_string = serialize_result.unwrap();
        let deserialize_result = serializer.deserialize(&serialized_string);
        assert!(deserialize_result.is_ok());
        assert_eq!(default_config, deserialize_result.unwrap());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let content_provider = FileContentConfigProvider::new(get_temp_file_path());

        let serialized_string = serializer.serialize(&default_config).unwrap();
        assert!(content_provider.set_config_content(&serialized_string).is_ok());

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_with_manager() {
        let config = Config {
            last_game: Some(GameType::Sudoku),
            ..Config::default()
        };
        let manager = get_config_manager(Some(&get_temp_file_path()));

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_update_config_persists_last_game() {
        let path = get_temp_file_path();
        let manager = get_config_manager(Some(&path));
        let updated = manager
            .update_config(|config| config.last_game = Some(GameType::Jigsaw))
            .unwrap();
        assert_eq!(updated.last_game, Some(GameType::Jigsaw));

        let reloaded = get_config_manager(Some(&path)).get_config().unwrap();
        assert_eq!(reloaded.last_game, Some(GameType::Jigsaw));
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some(Path::new("this_file_does_not_exist.yaml")));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let path = get_temp_file_path();
        FileContentConfigProvider::new(path.clone())
            .set_config_content("last_game: Snake\nsudoku:\n  difficulty: 0.8\n")
            .unwrap();

        let config = get_config_manager(Some(&path)).get_config().unwrap();
        assert_eq!(config.last_game, Some(GameType::Snake));
        assert_eq!(config.sudoku.difficulty, 0.8);
        assert_eq!(config.snake, SnakeSettings::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            sliding:
              grid_size: 7
        "#;

        let path = get_temp_file_path();
        FileContentConfigProvider::new(path.clone())
            .set_config_content(invalid_config_content)
            .unwrap();

        let manager = get_config_manager(Some(&path));
        assert!(manager.get_config().is_err());
        assert_eq!(manager.get_config_or_default(), Config::default());
    }
}
