//! The dirty-file set handed to the transport layer.

use std::collections::BTreeMap;

use crate::codec::EncodedArray;

/// Mapping from array key to encoded bytes, in stable key order.
///
/// Keys are per-array identifiers that stay the same across syncs
/// (`"vertices"`, `"segments"`, `"data[0]"`, ...), so the transport layer
/// can pair re-uploads with the files already on the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileSet {
    files: BTreeMap<String, EncodedArray>,
}

impl FileSet {
    /// Create an empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an encoded array under a key, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, file: EncodedArray) {
        self.files.insert(key.into(), file);
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&EncodedArray> {
        self.files.get(key)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|k| k.as_str())
    }

    /// Iterate over (key, file) pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EncodedArray)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Absorb another file set, replacing entries on key collision.
    pub fn extend(&mut self, other: FileSet) {
        self.files.extend(other.files);
    }

    /// Total encoded bytes across all files.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(|f| f.bytes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn test_file_set_basic() {
        let mut files = FileSet::new();
        assert!(files.is_empty());

        files.insert("vertices", codec::encode_array(&[1.0f32, 2.0]));
        files.insert("segments", codec::encode_array(&[0i32, 1]));

        assert_eq!(files.len(), 2);
        assert!(files.contains("vertices"));
        assert_eq!(files.total_bytes(), 16);

        // BTreeMap keys come back sorted regardless of insert order.
        let keys: Vec<&str> = files.keys().collect();
        assert_eq!(keys, vec!["segments", "vertices"]);
    }

    #[test]
    fn test_extend_replaces() {
        let mut a = FileSet::new();
        a.insert("array", codec::encode_array(&[1.0f32]));

        let mut b = FileSet::new();
        b.insert("array", codec::encode_array(&[2.0f32]));
        a.extend(b);

        assert_eq!(a.len(), 1);
        assert_eq!(a.get("array"), Some(&codec::encode_array(&[2.0f32])));
    }
}
