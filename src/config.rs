use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Things a key in normal mode can do
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Action {
    Undo,
    Redo,
    CursorUp,
    CursorDown,
    MoveItemUp,
    MoveItemDown,
    /// Pick up the selected slot to drop it anywhere in the list
    GrabItem,
    EditItem,
    Rename,
    NewList,
    DeleteList,
    NextList,
    PrevList,
    Close,
    Quit,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name.to_lowercase().as_str() {
            "undo" => Action::Undo,
            "redo" => Action::Redo,
            "up" | "cursor_up" => Action::CursorUp,
            "down" | "cursor_down" => Action::CursorDown,
            "move_up" => Action::MoveItemUp,
            "move_down" => Action::MoveItemDown,
            "grab" | "grab_item" => Action::GrabItem,
            "edit" => Action::EditItem,
            "rename" => Action::Rename,
            "new" => Action::NewList,
            "delete" => Action::DeleteList,
            "next" | "next_list" => Action::NextList,
            "prev" | "prev_list" => Action::PrevList,
            "close" => Action::Close,
            "quit" => Action::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Single-character bindings for normal mode
pub struct KeyTable {
    map: HashMap<char, Action>,
}

impl KeyTable {
    pub fn get(&self, c: char) -> Option<Action> {
        self.map.get(&c).copied()
    }

    pub fn bind(&mut self, c: char, action: Action) {
        self.map.insert(c, action);
    }

    /// Apply `key = "action"` overrides from the config file
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Result<Self, String> {
        for (key, name) in overrides {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format!("Key binding must be a single character: '{}'", key)),
            };
            let action = Action::from_name(name)
                .ok_or_else(|| format!("Unknown action '{}' for key '{}'", name, key))?;
            self.bind(c, action);
        }
        Ok(self)
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self {
            map: HashMap::from([
                ('u', Action::Undo),
                ('U', Action::Redo),
                ('k', Action::CursorUp),
                ('j', Action::CursorDown),
                ('K', Action::MoveItemUp),
                ('J', Action::MoveItemDown),
                ('m', Action::GrabItem),
                ('i', Action::EditItem),
                ('r', Action::Rename),
                ('n', Action::NewList),
                ('d', Action::DeleteList),
                (']', Action::NextList),
                ('[', Action::PrevList),
                ('c', Action::Close),
                ('q', Action::Quit),
            ]),
        }
    }
}

/// Contents of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub store_path: Option<PathBuf>,
    pub theme: Option<String>,
    pub theme_file: Option<PathBuf>,
    pub keys: HashMap<String, String>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}

pub struct AppConfig {
    pub keys: KeyTable,
    pub store_path: PathBuf,
    pub theme: Option<String>,
    pub theme_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            keys: KeyTable::default(),
            store_path: default_store_path(),
            theme: None,
            theme_file: None,
        }
    }

    pub fn from_config_file(file: ConfigFile) -> Result<Self, String> {
        let defaults = Self::new();
        Ok(Self {
            keys: defaults.keys.with_overrides(&file.keys)?,
            store_path: file.store_path.unwrap_or(defaults.store_path),
            theme: file.theme,
            theme_file: file.theme_file,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `$HOME/.topfive.csv`, or `topfive.csv` in the working directory without a home
pub fn default_store_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".topfive.csv"),
        None => PathBuf::from("topfive.csv"),
    }
}
