use std::path::{Path, PathBuf};

const SUBDIRS: [&str; 7] = [
    "hicolor/48x48/apps",
    "hicolor/scalable/apps",
    "hicolor/32x32/apps",
    "hicolor/64x64/apps",
    "Adwaita/48x48/apps",
    "Adwaita/scalable/apps",
    "",
];

const EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];

/// Turns an `Icon=` value into a loadable file, if one can be found.
pub struct IconResolver {
    icon_theme_paths: Vec<PathBuf>,
}

impl Default for IconResolver {
    fn default() -> Self {
        let mut paths = Vec::new();
        if let Some(home) = directories::BaseDirs::new() {
            paths.push(home.data_dir().join("icons"));
        }
        paths.push(PathBuf::from("/usr/share/icons"));
        paths.push(PathBuf::from("/usr/share/pixmaps"));
        Self::new(paths)
    }
}

impl IconResolver {
    pub fn new(icon_theme_paths: Vec<PathBuf>) -> Self {
        Self { icon_theme_paths }
    }

    /// A miss is `None`, never an error.
    pub fn resolve(&self, icon_ref: &str) -> Option<PathBuf> {
        if icon_ref.is_empty() {
            return None;
        }
        let path = Path::new(icon_ref);
        if path.is_file() {
            return Some(path.to_path_buf());
        }

        for root in &self.icon_theme_paths {
            if !root.exists() { continue; }

            for sub in SUBDIRS {
                let dir = root.join(sub);
                if !dir.exists() { continue; }

                for ext in EXTENSIONS {
                    let file_path = dir.join(format!("{}.{}", icon_ref, ext));
                    if file_path.is_file() {
                        return Some(file_path);
                    }
                }
            }
        }
        None
    }
}
