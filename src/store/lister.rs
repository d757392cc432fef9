//! Object listers

use std::fs;
use std::path::PathBuf;

use crate::error::Result;

use super::ObjectLister;

/// A fixed list of keys, filtered by prefix.
#[derive(Debug, Clone, Default)]
pub struct StaticListing {
    keys: Vec<String>,
}

impl StaticListing {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl ObjectLister for StaticListing {
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Keys read from a text file, one per line (for example saved
/// `gsutil ls` output).
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
}

impl ListingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ObjectLister for ListingFile {
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.starts_with(prefix))
            .map(str::to_string)
            .collect())
    }
}

/// Regular files of one local directory. No recursion.
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    root: PathBuf,
}

impl DirectoryLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectLister for DirectoryLister {
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.root.join(prefix);
        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                keys.push(entry.path().to_string_lossy().into_owned());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_static_prefix_filter() {
        let listing = StaticListing::new(["gs://b/crams/A.cram", "gs://b/other/B.cram"]);
        assert_eq!(
            listing.list_keys("gs://b/crams/").unwrap(),
            vec!["gs://b/crams/A.cram"]
        );
        assert_eq!(listing.list_keys("").unwrap().len(), 2);
    }

    #[test]
    fn test_listing_file_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listing.txt");
        fs::write(&path, "gs://b/A.cram\n\n  gs://b/A.crai  \n").unwrap();

        let keys = ListingFile::new(&path).list_keys("gs://b/").unwrap();
        assert_eq!(keys, vec!["gs://b/A.cram", "gs://b/A.crai"]);
    }

    #[test]
    fn test_directory_is_flat() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("crams")).unwrap();
        fs::create_dir(dir.path().join("crams/nested")).unwrap();
        fs::write(dir.path().join("crams/B.cram"), "").unwrap();
        fs::write(dir.path().join("crams/A.cram"), "").unwrap();

        let keys = DirectoryLister::new(dir.path()).list_keys("crams").unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0].ends_with("A.cram"));
        assert!(keys[1].ends_with("B.cram"));
    }
}
