use crate::enums::IndexFallback;

/// Substring that selects slice files when loading a directory.
pub const DEFAULT_FILE_PATTERN: &str = "IMA";

/// Series description marker of the plastic (metal-free) phantom.
pub const PLASTIC_MARKER: &str = "PLA";

/// Loader configuration. Construct with [`LoadOptions::default`] and adjust
/// with the builder methods; the loader never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub file_pattern: String,
    pub plastic_marker: String,
    pub index_fallback: IndexFallback,
    pub parallel: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            plastic_marker: PLASTIC_MARKER.to_string(),
            index_fallback: IndexFallback::default(),
            parallel: true,
        }
    }
}

impl LoadOptions {
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    pub fn with_plastic_marker(mut self, marker: impl Into<String>) -> Self {
        self.plastic_marker = marker.into();
        self
    }

    pub fn with_index_fallback(mut self, fallback: IndexFallback) -> Self {
        self.index_fallback = fallback;
        self
    }

    /// Decode slices on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
