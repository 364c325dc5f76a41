use crate::model::{Entry, Origin};
use crate::sources::Source;
use directories::BaseDirs;
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Marker line written into every launcher this tool generates.
pub const CREATED_BY_LINE: &str = "X-Created-By=LauncherCreator";

pub struct DesktopSource {
    pub dirs: Vec<PathBuf>,
}

impl DesktopSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// User apps, system apps, user flatpak exports, system flatpak exports. In that order.
    pub fn default_dirs() -> Vec<PathBuf> {
        let home = BaseDirs::new().map(|b| b.home_dir().to_path_buf());
        Self::dirs_for_home(home.as_deref())
    }

    pub fn dirs_for_home(home: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(home) = home {
            dirs.push(home.join(".local/share/applications"));
        }
        dirs.push(PathBuf::from("/usr/share/applications"));
        if let Some(home) = home {
            dirs.push(home.join(".local/share/flatpak/exports/share/applications"));
        }
        dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/applications"));
        dirs
    }
}

impl Default for DesktopSource {
    fn default() -> Self {
        Self::new(Self::default_dirs())
    }
}

impl Source for DesktopSource {
    fn scan(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for dir in &self.dirs {
            if !dir.exists() {
                continue;
            }
            debug!("Scanning desktop files in {:?}", dir);
            let origin = Origin::from_dir(&dir.to_string_lossy());

            let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
            for dent in walker.into_iter().flatten() {
                if !dent.file_type().is_file() {
                    continue;
                }
                let path = dent.path();
                if path.extension().and_then(|s| s.to_str()) != Some("desktop") {
                    continue;
                }
                let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                if !seen.insert(path.clone()) {
                    continue;
                }

                let file_name = dent.file_name().to_string_lossy().to_string();
                let icon = read_field(&path, "Icon=").unwrap_or_default();
                entries.push(Entry::new(path, &file_name, icon, origin));
            }
        }
        info!("DesktopSource: found {} entries", entries.len());
        entries
    }
}

/// First line starting with `key`, remainder trimmed.
pub fn first_field(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(key))
        .map(|value| value.trim().to_string())
}

/// Unreadable files count as "field absent".
pub fn read_field(path: &Path, key: &str) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => first_field(&String::from_utf8_lossy(&bytes), key),
        Err(e) => {
            debug!("Could not read {:?}: {}", path, e);
            None
        }
    }
}

/// Raw `Exec=` value of a desktop file, or an empty string.
pub fn extract_exec_command(path: &Path) -> String {
    read_field(path, "Exec=").unwrap_or_default()
}

/// Removes the `%U %u %F %f` field codes and trims what is left.
pub fn strip_field_codes(command: &str) -> String {
    ["%U", "%u", "%F", "%f"]
        .iter()
        .fold(command.to_string(), |acc, code| acc.replace(code, ""))
        .trim()
        .to_string()
}

pub fn is_created_by_us(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .any(|line| line.trim() == CREATED_BY_LINE),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn first_icon_line_wins_and_is_trimmed() {
        let content = "[Desktop Entry]\nName=Foo\nIcon=  foo-icon  \nIcon=second\n";
        assert_eq!(first_field(content, "Icon="), Some("foo-icon".to_string()));
    }

    #[test]
    fn missing_icon_is_none() {
        assert_eq!(first_field("[Desktop Entry]\nName=Foo\n", "Icon="), None);
    }

    #[test]
    fn prefix_must_start_the_line() {
        assert_eq!(first_field("TryExec=foo\n X-Icon=bar\n", "Exec="), None);
        assert_eq!(first_field("TryExec=foo\n X-Icon=bar\n", "Icon="), None);
    }

    #[test]
    fn exec_is_extracted_raw() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "mpv.desktop", "[Desktop Entry]\nExec= mpv %U \n");
        assert_eq!(extract_exec_command(&path), "mpv %U");
    }

    #[test]
    fn exec_of_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(extract_exec_command(&tmp.path().join("nope.desktop")), "");
    }

    #[test]
    fn field_codes_are_stripped() {
        assert_eq!(strip_field_codes("mpv %U"), "mpv");
        assert_eq!(strip_field_codes("app %f --flag %F %u"), "app  --flag");
        assert_eq!(strip_field_codes("vlc --fullscreen"), "vlc --fullscreen");
        assert_eq!(strip_field_codes("%U"), "");
    }

    #[test]
    fn scan_dedups_by_absolute_path_not_file_name() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a/applications");
        let b = tmp.path().join("b/applications");
        write(&a, "foo.desktop", "Icon=a\n");
        write(&b, "foo.desktop", "Icon=b\n");

        let source = DesktopSource::new(vec![a.clone(), b.clone(), a.clone()]);
        let entries = source.scan();

        assert_eq!(entries.len(), 2);
        let paths: HashSet<_> = entries.iter().map(|e| e.path.clone()).collect();
        assert!(paths.contains(&a.join("foo.desktop")));
        assert!(paths.contains(&b.join("foo.desktop")));
    }

    #[test]
    fn scan_skips_missing_dirs_and_other_extensions() {
        let tmp = TempDir::new().unwrap();
        let apps = tmp.path().join("applications");
        write(&apps, "foo.desktop", "[Desktop Entry]\n");
        write(&apps, "notes.txt", "Icon=x\n");
        fs::create_dir_all(apps.join("nested.desktop")).unwrap();

        let source = DesktopSource::new(vec![tmp.path().join("missing"), apps]);
        let entries = source.scan();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "foo.desktop [Standard]");
        assert_eq!(entries[0].icon, "");
    }

    #[test]
    fn scan_classifies_flatpak_by_directory() {
        let tmp = TempDir::new().unwrap();
        let flat = tmp.path().join("flatpak/exports/share/applications");
        let std_dir = tmp.path().join("share/applications");
        write(&flat, "org.foo.Bar.desktop", "Icon=org.foo.Bar\n");
        write(&std_dir, "foo.desktop", "Icon=foo\n");

        let entries = DesktopSource::new(vec![std_dir, flat]).scan();

        let flatpak = entries.iter().find(|e| e.label.starts_with("org.foo.Bar")).unwrap();
        assert_eq!(flatpak.origin, Origin::Flatpak);
        assert_eq!(flatpak.label, "org.foo.Bar.desktop [Flatpak]");
        assert_eq!(flatpak.icon, "org.foo.Bar");

        let standard = entries.iter().find(|e| e.label.starts_with("foo")).unwrap();
        assert_eq!(standard.origin, Origin::Standard);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_listed_without_icon() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let apps = tmp.path().join("applications");
        let path = write(&apps, "locked.desktop", "Icon=secret\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        let entries = DesktopSource::new(vec![apps]).scan();
        assert_eq!(entries.len(), 1);
        // Root can still read mode 000 files.
        if fs::read(&path).is_err() {
            assert_eq!(entries[0].icon, "");
        }
    }

    #[test]
    fn default_dirs_are_in_fixed_order() {
        let dirs = DesktopSource::dirs_for_home(Some(Path::new("/home/u")));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/home/u/.local/share/applications"),
                PathBuf::from("/usr/share/applications"),
                PathBuf::from("/home/u/.local/share/flatpak/exports/share/applications"),
                PathBuf::from("/var/lib/flatpak/exports/share/applications"),
            ]
        );
    }

    #[test]
    fn created_marker_is_detected() {
        let tmp = TempDir::new().unwrap();
        let ours = write(tmp.path(), "ours.desktop", "[Desktop Entry]\nX-Created-By=LauncherCreator\n");
        let theirs = write(tmp.path(), "theirs.desktop", "[Desktop Entry]\nName=Other\n");
        assert!(is_created_by_us(&ours));
        assert!(!is_created_by_us(&theirs));
    }
}
