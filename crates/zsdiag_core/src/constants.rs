//! Constant names scraped from the standard library header, for completion.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

static CONSTANT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const \w* (\w*).*//(.*)").expect("Invalid constant pattern")
});

/// Header holding the documented constants, relative to the installation.
pub const STD_CONSTANTS_PATH: &str = "std_zh/std_constants.zh";

/// A documented constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantInfo {
    pub name: String,
    pub documentation: String,
}

/// Collects `const <type> <NAME> ... // <doc>` lines.
pub fn scan_constants(text: &str) -> Vec<ConstantInfo> {
    text.lines()
        .filter_map(|line| {
            let caps = CONSTANT_PATTERN.captures(line)?;
            let name = caps.get(1)?.as_str();
            if name.is_empty() {
                return None;
            }
            Some(ConstantInfo {
                name: name.to_string(),
                documentation: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
            })
        })
        .collect()
}

/// Constants per installation directory, read once.
#[derive(Debug, Default)]
pub struct ConstantCache {
    entries: Mutex<HashMap<PathBuf, Arc<Vec<ConstantInfo>>>>,
}

impl ConstantCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the constants of `installation`, reading them on first use.
    ///
    /// A missing or unreadable header yields (and caches) an empty list.
    pub fn load(&self, installation: &Path) -> Arc<Vec<ConstantInfo>> {
        if let Some(cached) = self.entries.lock().get(installation) {
            return Arc::clone(cached);
        }

        let path = installation.join(STD_CONSTANTS_PATH);
        let constants = match fs::read_to_string(&path) {
            Ok(text) => scan_constants(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No constants header at {}", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        };

        let constants = Arc::new(constants);
        self.entries
            .lock()
            .insert(installation.to_path_buf(), Arc::clone(&constants));
        constants
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "\
const int NPC_GUY = 0; // A guy
const float PI2 = 6.2832; //Two pi
int notAConstant = 3; // ignored
const int UNDOCUMENTED = 1;
";

    #[test]
    fn test_scan_constants() {
        assert_eq!(
            scan_constants(HEADER),
            vec![
                ConstantInfo {
                    name: "NPC_GUY".to_string(),
                    documentation: "A guy".to_string(),
                },
                ConstantInfo {
                    name: "PI2".to_string(),
                    documentation: "Two pi".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_cache_reads_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("std_zh")).unwrap();
        let header = dir.path().join(STD_CONSTANTS_PATH);
        fs::write(&header, HEADER).unwrap();

        let cache = ConstantCache::new();
        assert_eq!(cache.load(dir.path()).len(), 2);

        fs::write(&header, "").unwrap();
        assert_eq!(cache.load(dir.path()).len(), 2);

        cache.clear();
        assert!(cache.load(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_header_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConstantCache::new().load(dir.path()).is_empty());
    }
}
