use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};
use crate::log_warn;

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    /// Returns the cached config, loading it on first use. A missing source yields
    /// `TConfig::default()` without caching it, so a later `set_config` still wins.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn get_config_or_default(&self) -> TConfig {
        match self.get_config() {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Using default config: {}", e);
                TConfig::default()
            }
        }
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }

    /// Applies `update` to the stored config and saves it. A source that fails to
    /// load or validate is left untouched and the error is returned.
    pub fn update_config<F>(&self, update: F) -> Result<TConfig, String>
    where
        F: FnOnce(&mut TConfig),
    {
        let mut config = self.get_config()?;
        update(&mut config);
        self.set_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryContentConfigProvider, ensure_range};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        volume: f32,
        name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                volume: 0.5,
                name: "arcade".to_string(),
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            ensure_range("volume", self.volume, 0.0, 1.0)
        }
    }

    fn memory_manager(
        content: Option<&str>,
    ) -> ConfigManager<MemoryContentConfigProvider, TestConfig> {
        ConfigManager::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager = memory_manager(None);
        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_set_then_get_returns_same_config() {
        let manager = memory_manager(None);
        let config = TestConfig {
            volume: 0.8,
            name: "snake".to_string(),
        };
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager = memory_manager(Some("volume: 3.0\nname: loud\n"));
        assert!(manager.get_config().is_err());
        assert_eq!(manager.get_config_or_default(), TestConfig::default());
    }

    #[test]
    fn test_set_invalid_config_fails() {
        let manager = memory_manager(None);
        let config = TestConfig {
            volume: -1.0,
            ..TestConfig::default()
        };
        assert!(manager.set_config(&config).is_err());
    }

    #[test]
    fn test_update_config_persists_change() {
        let manager = memory_manager(None);
        let updated = manager.update_config(|c| c.volume = 0.1).unwrap();
        assert_eq!(updated.volume, 0.1);
        assert_eq!(manager.get_config().unwrap().volume, 0.1);
    }

    #[test]
    fn test_update_config_keeps_invalid_content() {
        let content = "volume: 1.5\nname: my_custom_name\n";
        let manager = memory_manager(Some(content));

        assert!(manager.update_config(|c| c.volume = 0.2).is_err());
        assert_eq!(
            manager.config_content_provider.get_config_content().unwrap(),
            Some(content.to_string())
        );
    }

    #[test]
    fn test_file_provider_missing_file_returns_none() {
        let provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml");
        assert_eq!(provider.get_config_content().unwrap(), None);
    }

    #[test]
    fn test_file_provider_round_trip() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_arcade_config_{}.yaml", random_number));
        let manager: ConfigManager<_, TestConfig, _> = ConfigManager::from_yaml_file(path.clone());

        let config = TestConfig {
            volume: 0.3,
            name: "jigsaw".to_string(),
        };
        manager.set_config(&config).unwrap();

        let reloaded: ConfigManager<_, TestConfig, _> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(reloaded.get_config().unwrap(), config);
        let _ = std::fs::remove_file(path);
    }
}
