use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Origin {
    Standard,
    Flatpak,
}

impl Origin {
    /// Flatpak exports live under a directory tree with "flatpak" somewhere in its path.
    pub fn from_dir(dir: &str) -> Self {
        if dir.to_lowercase().contains("flatpak") {
            Origin::Flatpak
        } else {
            Origin::Standard
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Origin::Standard => "[Standard]",
            Origin::Flatpak => "[Flatpak]",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub path: PathBuf,   // Absolute path, also the identity
    pub label: String,   // File name plus origin tag
    pub icon: String,    // Raw Icon= value, empty when absent
    pub origin: Origin,
}

impl Entry {
    pub fn new(path: PathBuf, file_name: &str, icon: String, origin: Origin) -> Self {
        Self {
            label: format!("{} {}", file_name, origin.tag()),
            path,
            icon,
            origin,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|s| s.to_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LauncherSpec {
    pub name: String,
    pub icon: Option<PathBuf>,
    pub members: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLauncher {
    pub script_path: PathBuf,
    pub desktop_path: PathBuf,
}
