use serde::{Deserialize, Serialize};

/// Whether a listing entry points at a file or a subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// One entry of a directory index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryItem {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Always empty; listing rows are not mined for sizes.
    pub size: String,
    #[serde(rename = "isDirectory")]
    pub is_directory: bool,
}

impl DirectoryItem {
    pub fn new(name: String, url: String, entry_type: EntryType) -> Self {
        Self {
            name,
            url,
            entry_type,
            size: String::new(),
            is_directory: entry_type == EntryType::Directory,
        }
    }

    pub fn file(name: String, url: String) -> Self {
        Self::new(name, url, EntryType::File)
    }

    pub fn directory(name: String, url: String) -> Self {
        Self::new(name, url, EntryType::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let item = DirectoryItem::directory("sub".to_string(), "http://h/d/sub/".to_string());
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"name":"sub","url":"http://h/d/sub/","type":"directory","size":"","isDirectory":true}"#
        );
    }

    #[test]
    fn test_is_directory_mirrors_type() {
        let file = DirectoryItem::file("a.txt".to_string(), "http://h/a.txt".to_string());
        assert_eq!(file.entry_type, EntryType::File);
        assert!(!file.is_directory);
        assert!(file.size.is_empty());
    }
}
