use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tilelink_core::{Coord, GameConfig, SessionConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Small,
    Classic,
    Large,
}

impl Preset {
    pub const fn game_config(self) -> GameConfig {
        match self {
            Self::Small => GameConfig::small(),
            Self::Classic => GameConfig::classic(),
            Self::Large => GameConfig::large(),
        }
    }
}

/// Contents of a `--config` file; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub session: SessionConfig,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Command line overrides applied on top of the settings file, in order: preset, then individual fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub preset: Option<Preset>,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub kinds: Option<u8>,
    pub no_border: bool,
}

impl Overrides {
    pub fn apply(&self, base: GameConfig) -> GameConfig {
        let base = self.preset.map_or(base, Preset::game_config);
        let size = (
            self.rows.unwrap_or(base.size.0),
            self.cols.unwrap_or(base.size.1),
        );
        let kinds = self.kinds.unwrap_or(base.kinds);
        let border = base.border && !self.no_border;
        GameConfig::new(size, kinds, border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_toml("[game]\nkinds = 5\n").unwrap();

        assert_eq!(settings.game.kinds, 5);
        assert_eq!(settings.game.size, GameConfig::classic().size);
        assert_eq!(settings.session, SessionConfig::default());
    }

    #[test]
    fn full_settings_parse() {
        let text = r#"
            [game]
            size = [4, 6]
            kinds = 3
            border = false

            [session]
            match_score = 25
            path_display_ticks = 30
        "#;

        let settings = Settings::from_toml(text).unwrap();

        assert_eq!(settings.game, GameConfig::new((4, 6), 3, false));
        assert_eq!(settings.session.match_score, 25);
        assert_eq!(settings.session.path_display_ticks, 30);
        assert_eq!(settings.session.hint_display_ticks, 120);
    }

    #[test]
    fn bad_settings_are_reported() {
        assert!(Settings::from_toml("[game]\nkinds = \"many\"\n").is_err());
    }

    #[test]
    fn overrides_clamp_and_drop_border() {
        let overrides = Overrides {
            preset: Some(Preset::Small),
            cols: Some(0),
            no_border: true,
            ..Default::default()
        };

        let config = overrides.apply(GameConfig::classic());

        assert_eq!(config.size, (6, 1));
        assert_eq!(config.kinds, 4);
        assert!(!config.border);
    }
}
