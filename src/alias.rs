//! Fallback lookups for countries whose names differ between the two datasets.
//!
//! Each rule maps a lowercased primary-record name to an ordered list of
//! [`Lookup`] strategies that are tried after the direct code and name lookups
//! miss. Rules can be extended at runtime from a YAML or JSON file shaped like:
//!
//! ```yaml
//! dr congo:
//!   - name: dr congo
//!   - code: COD
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{dataset, error::LoadError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    /// Consult the code index under this `cca3`.
    Code(String),
    /// Consult the name index under this spelling (lowercased on use).
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    // `- code: COD` style entries in both YAML and JSON.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    rules: BTreeMap<String, Vec<Lookup>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    pub fn empty() -> Self {
        AliasTable {
            rules: BTreeMap::new(),
        }
    }

    /// Known mismatches between the local dataset and the reference snapshot.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            "dr congo",
            vec![
                Lookup::Name("dr congo".to_string()),
                Lookup::Code("COD".to_string()),
            ],
        );
        table.insert("curacao", vec![Lookup::Name("curaçao".to_string())]);
        table.insert("reunion", vec![Lookup::Name("réunion".to_string())]);
        table
    }

    pub fn insert(&mut self, name: &str, fallbacks: Vec<Lookup>) {
        self.rules.insert(name.to_lowercase(), fallbacks);
    }

    /// Fallbacks for an already lowercased record name.
    pub fn fallbacks(&self, name: &str) -> &[Lookup] {
        self.rules.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules from `other` replace rules of the same name in `self`.
    pub fn merge(&mut self, other: AliasTable) {
        for (name, fallbacks) in other.rules {
            self.insert(&name, fallbacks);
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reads an override file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let parsed: AliasTable = if is_yaml(path) {
            let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_yaml::from_str(&raw).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            dataset::load_json(path)?
        };
        let mut table = Self::empty();
        table.merge(parsed);
        Ok(table)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_cover_known_mismatches() {
        let table = AliasTable::builtin();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.fallbacks("dr congo"),
            &[
                Lookup::Name("dr congo".to_string()),
                Lookup::Code("COD".to_string())
            ]
        );
        assert_eq!(
            table.fallbacks("curacao"),
            &[Lookup::Name("curaçao".to_string())]
        );
        assert_eq!(
            table.fallbacks("reunion"),
            &[Lookup::Name("réunion".to_string())]
        );
        assert!(table.fallbacks("france").is_empty());
    }

    #[test]
    fn yaml_rules_parse_into_ordered_lookups() {
        let parsed: AliasTable =
            serde_yaml::from_str("kosovo:\n  - code: XKX\n  - name: republic of kosovo\n")
                .expect("parse yaml");
        assert_eq!(
            parsed.fallbacks("kosovo"),
            &[
                Lookup::Code("XKX".to_string()),
                Lookup::Name("republic of kosovo".to_string())
            ]
        );
    }

    #[test]
    fn merge_replaces_rules_and_lowercases_keys() {
        let mut table = AliasTable::builtin();
        let mut overrides = AliasTable::empty();
        overrides.insert("Curacao", vec![Lookup::Code("CUW".to_string())]);
        overrides.insert("Eswatini", vec![Lookup::Name("swaziland".to_string())]);
        table.merge(overrides);

        assert_eq!(table.len(), 4);
        assert_eq!(table.fallbacks("curacao"), &[Lookup::Code("CUW".to_string())]);
        assert_eq!(
            table.fallbacks("eswatini"),
            &[Lookup::Name("swaziland".to_string())]
        );
    }

    #[test]
    fn is_yaml_checks_extension_case_insensitively() {
        assert!(is_yaml(Path::new("aliases.YAML")));
        assert!(is_yaml(Path::new("aliases.yml")));
        assert!(!is_yaml(Path::new("aliases.json")));
        assert!(!is_yaml(Path::new("aliases")));
    }
}
