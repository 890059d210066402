// Frontmatter reader.
//
// Recognizes only the flat `key: value` subset of YAML that docs pages use.
// Anything richer (lists, nesting, multi-line strings) needs a real YAML
// parser; values here are always plain strings.

use std::collections::HashMap;

pub const DELIMITER: &str = "---";

/// Flat key/value properties from a document's leading frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: HashMap<String, String>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.fields
    }
}

/// Result of [`read`]. `body_offset` is the 0-based index of the first line
/// after the closing delimiter, or 0 when there is no block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRead {
    pub metadata: Option<Metadata>,
    pub body_offset: usize,
}

/// Read the leading frontmatter block of `text`.
///
/// The first line must be exactly `---` and a later line must be exactly
/// `---`; otherwise the document has no metadata. A trailing `\r` is ignored
/// on delimiter and field lines. Lines without a colon are skipped, and a
/// repeated key keeps its last value.
pub fn read(text: &str) -> MetadataRead {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    if lines.next() != Some(DELIMITER) {
        return MetadataRead::default();
    }

    let mut fields = HashMap::new();
    for (index, line) in lines.enumerate() {
        if line == DELIMITER {
            // Opening delimiter is line 0, fields start at line 1.
            return MetadataRead {
                metadata: Some(Metadata { fields }),
                body_offset: index + 2,
            };
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    // Unterminated block reads as no metadata at all.
    MetadataRead::default()
}
