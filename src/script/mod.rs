//! Script store — the characters and dialogue lines to play.
//!
//! Both tables are loaded once, validated as a whole, and never mutated
//! afterwards. The playback engine only ever borrows from a `Script`.

mod error;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::types::Color;

pub use error::{LoadError, LookupError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Character {
    pub name: String,
    /// Blip frequency in Hz.
    pub tone: f32,
    /// Name tag color. Falls back to the default box style when absent.
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Static beat: boxes and name only, nothing is typed.
    Idle,
    #[default]
    Talking,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePosition {
    #[default]
    Left,
    Right,
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    #[serde(rename = "name")]
    pub speaker: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub name_pos: NamePosition,
    #[serde(default)]
    pub text_pos: TextPosition,
    #[serde(default)]
    pub autoplay: bool,
    /// Hold time before an autoplay line advances.
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub pause: Duration,
}

impl DialogueLine {
    pub fn is_idle(&self) -> bool {
        self.mood == Mood::Idle
    }
}

fn deserialize_millis<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(d).map(Duration::from_millis)
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    characters: HashMap<String, Character>,
    lines: Vec<DialogueLine>,
}

impl Script {
    /// Load and cross-check both data files.
    pub fn load(characters: impl AsRef<Path>, dialogue: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::new(load_characters(characters)?, load_dialogue(dialogue)?)
    }

    /// Build a script from already-parsed tables, resolving every speaker.
    pub fn new(
        characters: HashMap<String, Character>,
        lines: Vec<DialogueLine>,
    ) -> Result<Self, LoadError> {
        check_text(&lines)?;
        let script = Script { characters, lines };
        for (i, line) in script.lines.iter().enumerate() {
            script
                .character(&line.speaker)
                .map_err(|source| LoadError::Speaker { line: i + 1, source })?;
        }
        log::debug!(
            "loaded script: {} characters, {} lines",
            script.characters.len(),
            script.lines.len()
        );
        Ok(script)
    }

    pub fn character(&self, name: &str) -> Result<&Character, LookupError> {
        self.characters.get(name).ok_or_else(|| LookupError {
            name: name.to_string(),
        })
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&DialogueLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn load_characters(path: impl AsRef<Path>) -> Result<HashMap<String, Character>, LoadError> {
    let path = path.as_ref();
    parse_characters(&read(path)?, &path.display().to_string())
}

pub fn load_dialogue(path: impl AsRef<Path>) -> Result<Vec<DialogueLine>, LoadError> {
    let path = path.as_ref();
    parse_dialogue(&read(path)?, &path.display().to_string())
}

/// Parse a JSON array of character records keyed by name.
///
/// `origin` names the source in error messages.
pub fn parse_characters(json: &str, origin: &str) -> Result<HashMap<String, Character>, LoadError> {
    let list: Vec<Character> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let mut characters = HashMap::with_capacity(list.len());
    for character in list {
        if !character.tone.is_finite() || character.tone <= 0.0 {
            return Err(LoadError::InvalidTone {
                name: character.name,
                tone: character.tone,
            });
        }
        if characters.contains_key(&character.name) {
            return Err(LoadError::DuplicateCharacter { name: character.name });
        }
        characters.insert(character.name.clone(), character);
    }
    Ok(characters)
}

/// Parse a JSON array of dialogue line records, in playback order.
pub fn parse_dialogue(json: &str, origin: &str) -> Result<Vec<DialogueLine>, LoadError> {
    let lines: Vec<DialogueLine> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    check_text(&lines)?;
    Ok(lines)
}

fn check_text(lines: &[DialogueLine]) -> Result<(), LoadError> {
    match lines.iter().position(|l| !l.is_idle() && l.text.is_empty()) {
        Some(i) => Err(LoadError::EmptyText { line: i + 1 }),
        None => Ok(()),
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
