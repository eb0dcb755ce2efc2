use std::path::Path;

/// Settings for loading design documents from disk.
///
/// # Examples
///
/// ```rust
/// use couch_design::loader::LoaderConfig;
///
/// let config = LoaderConfig::new()
///     .extensions(&["json"])
///     .follow_symlinks(true)
///     .validate(false);
///
/// assert!(config.accepts(std::path::Path::new("views.json")));
/// assert!(!config.accepts(std::path::Path::new("views.js")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    extensions: Vec<String>,
    follow_symlinks: bool,
    ensure_prefix: bool,
    validate: bool,
}

impl Default for LoaderConfig {
    /// Files ending in `.js` or `.json`, symlinks not followed, ids prefixed and
    /// documents validated.
    fn default() -> Self {
        LoaderConfig {
            extensions: vec!["js".to_string(), "json".to_string()],
            follow_symlinks: false,
            ensure_prefix: true,
            validate: true,
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        LoaderConfig::default()
    }

    /// File extensions read when walking a directory, without the leading dot. An empty
    /// list reads every file.
    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }

    /// Whether to add the `_design/` prefix to ids that lack it.
    pub fn ensure_prefix(mut self, ensure_prefix: bool) -> Self {
        self.ensure_prefix = ensure_prefix;
        self
    }

    /// Whether each loaded document is checked with `DesignDocument::validate`.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn get_extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub fn is_ensure_prefix(&self) -> bool {
        self.ensure_prefix
    }

    pub fn is_validate(&self) -> bool {
        self.validate
    }

    /// Whether a file found while walking a directory is read.
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
