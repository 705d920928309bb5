//! Encoding tables for map names and mode classes.
//!
//! Loaded from line-oriented two-column resources of the form
//! `DisplayName, token`. Built once at startup and read-only afterwards,
//! so a single table can be shared across analyses.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Mapping from a lowercase-trimmed encoded token to its display name.
#[derive(Debug, Clone)]
pub struct EncodingTable {
    entries: HashMap<String, String>,
}

impl EncodingTable {
    /// Parses a two-column resource. Each line is `DisplayName, token`;
    /// fields past the second are ignored. A line with fewer than two
    /// comma-separated fields is an error - the table cannot be partially
    /// built. Duplicate tokens overwrite: the last line wins.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        for (idx, line) in contents.lines().enumerate() {
            let mut fields = line.splitn(3, ',');
            let name = fields.next().unwrap_or_default().trim();
            let token = fields
                .next()
                .ok_or_else(|| {
                    anyhow!(
                        "malformed encoding line {}: {:?} (expected `DisplayName, token`)",
                        idx + 1,
                        line
                    )
                })?
                .trim();

            entries.insert(token.to_lowercase(), name.to_string());
        }

        Ok(Self { entries })
    }

    /// Loads a table from a resource file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read encoding table {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid encoding table {}", path.display()))
    }

    /// Looks up a token, case-insensitively.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .get(&token.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(token, display name)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = EncodingTable::parse("Lijiang Tower, lt\nBusan, bu\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("lt"), Some("Lijiang Tower"));
        assert_eq!(table.get("bu"), Some("Busan"));
        assert_eq!(table.get("xx"), None);
    }

    #[test]
    fn test_keys_normalized() {
        let table = EncodingTable::parse("Lijiang Tower,  LT \n").unwrap();
        assert_eq!(table.get("lt"), Some("Lijiang Tower"));
        assert_eq!(table.get(" LT"), Some("Lijiang Tower"));
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let err = EncodingTable::parse("Lijiang Tower, lt\njust one field\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn test_duplicate_token_last_wins() {
        let table = EncodingTable::parse("Old Name, lt\nNew Name, lt\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("lt"), Some("New Name"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        // Only the second field is the token; anything after it is noise.
        let table = EncodingTable::parse("King's Row, kr, legacy\n").unwrap();
        assert_eq!(table.get("kr"), Some("King's Row"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(EncodingTable::load(Path::new("does/not/exist.txt")).is_err());
    }
}
