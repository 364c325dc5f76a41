use crate::error::{GenerationError, RemovalError};
use crate::model::{Entry, GeneratedLauncher, LauncherSpec};
use crate::sources::desktop::{CREATED_BY_LINE, extract_exec_command, strip_field_codes};
use directories::BaseDirs;
use log::{debug, info};
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Where generated files go.
#[derive(Debug, Clone)]
pub struct Layout {
    pub home: PathBuf,
    pub applications_dir: PathBuf,
}

impl Layout {
    pub fn new(home: PathBuf) -> Self {
        let applications_dir = home.join(".local/share/applications");
        Self { home, applications_dir }
    }

    pub fn from_env() -> Option<Self> {
        BaseDirs::new().map(|b| Self::new(b.home_dir().to_path_buf()))
    }

    pub fn script_path(&self, name: &str) -> PathBuf {
        self.home.join(format!("launch_{}.sh", name))
    }

    pub fn desktop_path(&self, name: &str) -> PathBuf {
        self.applications_dir.join(format!("{}.desktop", name))
    }
}

pub fn build_script(members: &[PathBuf]) -> String {
    let mut script = String::from("#!/bin/bash\n");
    for member in members {
        let command = strip_field_codes(&extract_exec_command(member));
        if command.is_empty() {
            debug!("No Exec command in {:?}, skipping", member);
            continue;
        }
        script.push_str(&format!("{} &\n", command));
    }
    script
}

pub fn build_desktop_entry(name: &str, script_path: &Path, icon: Option<&str>) -> String {
    let mut content = String::from("[Desktop Entry]\nType=Application\n");
    content.push_str(&format!("Name={}\n", name));
    content.push_str(&format!("Exec={}\n", script_path.display()));
    if let Some(icon) = icon {
        content.push_str(&format!("Icon={}\n", icon));
    }
    content.push_str("Terminal=false\nCategories=Utility;\n");
    content.push_str(&format!("{}\n", CREATED_BY_LINE));
    content
}

fn write_executable(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)?;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o100);
    fs::set_permissions(path, perms)
}

pub fn generate(layout: &Layout, spec: &LauncherSpec) -> Result<GeneratedLauncher, GenerationError> {
    let name = spec.name.trim();
    if name.is_empty() {
        return Err(GenerationError::Validation("Please enter a name for your launcher.".into()));
    }
    if spec.members.is_empty() {
        return Err(GenerationError::Validation("Please select at least one application.".into()));
    }
    let icon = spec
        .icon
        .as_ref()
        .map(|p| p.to_string_lossy().trim().to_string())
        .filter(|p| !p.is_empty());

    let script_path = layout.script_path(name);
    write_executable(&script_path, &build_script(&spec.members))
        .map_err(|source| GenerationError::ScriptWrite { path: script_path.clone(), source })?;
    info!("Wrote launch script {:?}", script_path);

    let desktop_path = layout.desktop_path(name);
    fs::create_dir_all(&layout.applications_dir)
        .and_then(|_| write_executable(&desktop_path, &build_desktop_entry(name, &script_path, icon.as_deref())))
        .map_err(|source| GenerationError::DesktopWrite { path: desktop_path.clone(), source })?;
    info!("Wrote desktop entry {:?}", desktop_path);

    Ok(GeneratedLauncher { script_path, desktop_path })
}

/// Deletes only the desktop file; the launch script is not tracked back.
pub fn remove(entry: &Entry) -> Result<(), RemovalError> {
    fs::remove_file(&entry.path).map_err(|source| RemovalError { path: entry.path.clone(), source })?;
    info!("Removed launcher {:?}", entry.path);
    Ok(())
}
