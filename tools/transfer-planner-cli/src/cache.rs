//! Source cache keyed by file path and validated by modification time

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing::debug;

struct CachedSource<T> {
    modified: SystemTime,
    value: Arc<T>,
}

/// Parsed sources, re-read only when the file's modification time changes
pub struct SourceCache<T> {
    entries: HashMap<PathBuf, CachedSource<T>>,
    loads: usize,
}

impl<T> SourceCache<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), loads: 0 }
    }

    /// Return the cached value for `path`, or read and parse the file when it
    /// is new or has been modified since the last load
    pub async fn load<F>(&mut self, path: &Path, parse: F) -> Result<Arc<T>>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let modified = tokio::fs::metadata(path)
            .await
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat {}", path.display()))?;

        if let Some(cached) = self.entries.get(path) {
            if cached.modified == modified {
                debug!("Source cache hit: {}", path.display());
                return Ok(cached.value.clone());
            }
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let parsed = parse(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
        let value = Arc::new(parsed);

        debug!("Source cache refreshed: {}", path.display());
        self.loads += 1;
        self.entries.insert(path.to_path_buf(), CachedSource { modified, value: value.clone() });
        Ok(value)
    }

    /// Number of file reads performed so far
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl<T> Default for SourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn parse_numbers(raw: &str) -> Result<Vec<u32>> {
        Ok(serde_json::from_str(raw)?)
    }

    #[tokio::test]
    async fn test_unchanged_file_is_served_from_cache() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let mut cache = SourceCache::new();
        let first = cache.load(file.path(), parse_numbers).await.unwrap();
        let second = cache.load(file.path(), parse_numbers).await.unwrap();

        assert_eq!(*first, vec![1, 2, 3]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
    }

    #[tokio::test]
    async fn test_modified_file_is_reloaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1]").unwrap();

        let mut cache = SourceCache::new();
        assert_eq!(*cache.load(file.path(), parse_numbers).await.unwrap(), vec![1]);

        let mut rewritten = std::fs::File::create(file.path()).unwrap();
        write!(rewritten, "[4, 5]").unwrap();
        rewritten.set_modified(SystemTime::now() + Duration::from_secs(60)).unwrap();

        assert_eq!(*cache.load(file.path(), parse_numbers).await.unwrap(), vec![4, 5]);
        assert_eq!(cache.loads(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_sources_are_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let mut cache: SourceCache<Vec<u32>> = SourceCache::new();
        assert!(cache.load(file.path(), parse_numbers).await.is_err());
        assert!(cache.load(Path::new("/no/such/source.json"), parse_numbers).await.is_err());
        assert_eq!(cache.loads(), 0);
    }
}
