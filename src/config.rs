use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::engine::Pacing;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "ASCII_DIALOGUE_CONFIG";
/// Overrides `log_file`.
pub const LOG_ENV: &str = "ASCII_DIALOGUE_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub char_delay_ms: u64,
    pub blink_period_ms: u64,
    pub target_fps: u32,
    pub characters_path: String,
    pub dialogue_path: String,
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_advance")]
    pub advance: Vec<String>,
    #[serde(default = "default_quit")]
    pub quit: Vec<String>,
}

fn default_advance() -> Vec<String> {
    vec!["Enter".into(), "Space".into(), "Right".into()]
}

fn default_quit() -> Vec<String> {
    vec!["q".into(), "Esc".into(), "Ctrl-c".into()]
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            advance: default_advance(),
            quit: default_quit(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            char_delay_ms: 75,
            blink_period_ms: 400,
            target_fps: 60,
            characters_path: "data/characters.json".into(),
            dialogue_path: "data/dialogue.json".into(),
            log_level: "warn".into(),
            log_file: None,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Load the user's config, falling back to defaults when it is missing
    /// or unreadable. `ASCII_DIALOGUE_LOG` overrides `log_file`.
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::config_path());
        if let Ok(path) = std::env::var(LOG_ENV) {
            config.log_file = Some(path);
        }
        config
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: invalid config {} ({e}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("ascii-dialogue");
        path.push("config.json");
        path
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            char_delay: Duration::from_millis(self.char_delay_ms),
            blink_period: Duration::from_millis(self.blink_period_ms.max(1)),
        }
    }

    /// Wall-clock budget for one frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl KeyBindings {
    pub fn is_advance(&self, event: &KeyEvent) -> bool {
        self.advance.iter().any(|b| matches_binding(b, event))
    }

    pub fn is_quit(&self, event: &KeyEvent) -> bool {
        self.quit.iter().any(|b| matches_binding(b, event))
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings never fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Backspace" => code == KeyCode::Backspace,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        s => {
            // F-key binding: "F1" through "F12" etc.
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}
