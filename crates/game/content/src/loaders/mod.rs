//! Content loaders for reading battle data from files.
//!
//! Skills are loaded first; encounters reference them by id.

pub mod config;
pub mod encounter;
pub mod skills;

pub use config::ConfigLoader;
pub use encounter::{CombatantSpec, Encounter, EncounterLoader, EncounterSpec};
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Directory holding the sample content shipped with this crate.
pub fn bundled_data_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Writes `content` to a temporary file that lives as long as the handle.
    pub fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}
