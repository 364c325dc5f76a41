use crate::config::Config;
use crate::matcher::FuzzyMatcher;
use crate::model::{Entry, Origin};
use crate::sources::Source;
use crate::sources::desktop::{is_created_by_us, read_field};
use regex::Regex;
use std::path::Path;

/// Scan results for one interaction plus the current view over them.
pub struct AppState {
    pub config: Config,
    pub entries: Vec<Entry>,
    pub filtered_indices: Vec<usize>,
    pub query: String,
    pub created_only: bool,
    matcher: FuzzyMatcher,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entries: Vec::new(),
            filtered_indices: Vec::new(),
            query: String::new(),
            created_only: false,
            matcher: FuzzyMatcher::new(),
        }
    }

    pub fn refresh(&mut self, source: &dyn Source) {
        self.set_entries(source.scan());
    }

    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.update_filter();
    }

    pub fn update_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.update_filter();
    }

    pub fn set_created_only(&mut self, created_only: bool) {
        self.created_only = created_only;
        self.update_filter();
    }

    pub fn update_filter(&mut self) {
        let filter = &self.config.filter;
        let regexes: Vec<Regex> = filter
            .blacklist
            .iter()
            .filter_map(|s| match Regex::new(s) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("Ignoring invalid blacklist pattern '{}': {}", s, e);
                    None
                }
            })
            .collect();

        let visible = |e: &Entry| {
            let path = e.path.to_string_lossy();
            if !filter.whitelist.is_empty()
                && !filter.whitelist.iter().any(|w| e.label.contains(w.as_str()) || path.contains(w.as_str()))
            {
                return false;
            }
            !regexes.iter().any(|re| re.is_match(&e.label) || re.is_match(&path))
        };

        let mut indices: Vec<usize> = (0..self.entries.len())
            .filter(|&i| visible(&self.entries[i]))
            .filter(|&i| !self.created_only || is_created_by_us(&self.entries[i].path))
            .collect();

        if self.query.is_empty() {
            indices.sort_by(|&a, &b| self.entries[a].label.cmp(&self.entries[b].label));
        } else {
            let labels: Vec<&str> = indices.iter().map(|&i| self.entries[i].label.as_str()).collect();
            let scores = self.matcher.score_all(&self.query, &labels);
            let mut scored: Vec<(usize, u32)> = indices
                .iter()
                .zip(scores)
                .filter_map(|(&i, score)| score.map(|s| (i, s)))
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            indices = scored.into_iter().map(|(i, _)| i).collect();
        }

        log::info!("AppState: query='{}', filtered_count={}", self.query, indices.len());
        self.filtered_indices = indices;
    }

    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.filtered_indices.iter().map(|&i| &self.entries[i])
    }

    /// An existing path, or the file name of a scanned entry. First match wins.
    pub fn resolve(&self, app: &str) -> Option<Entry> {
        let as_path = Path::new(app);
        if as_path.is_file() {
            let abs = std::path::absolute(as_path).ok()?;
            if let Some(found) = self.entries.iter().find(|e| e.path == abs) {
                return Some(found.clone());
            }
            let dir = abs.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
            let file_name = abs.file_name()?.to_string_lossy().to_string();
            let icon = read_field(&abs, "Icon=").unwrap_or_default();
            return Some(Entry::new(abs, &file_name, icon, Origin::from_dir(&dir)));
        }
        self.entries.iter().find(|e| e.file_name() == Some(app)).cloned()
    }

    /// Like `resolve`, but only ever returns an entry from the last scan.
    /// Absolute paths match by path, anything else by file name. Nothing on disk is consulted.
    pub fn resolve_scanned(&self, app: &str) -> Option<&Entry> {
        let as_path = Path::new(app);
        if as_path.is_absolute() {
            return self.entries.iter().find(|e| e.path == as_path);
        }
        self.entries.iter().find(|e| e.file_name() == Some(app))
    }
}
