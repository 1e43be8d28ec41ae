use std::collections::HashMap;

use crate::{alias::Lookup, dataset::ReferenceRecord};

/// Population lookups over the reference snapshot, keyed by `cca3` and by
/// lowercased common name. Later entries overwrite earlier ones on key clashes.
#[derive(Debug, Default, Clone)]
pub struct PopulationIndex {
    by_code: HashMap<String, Option<u64>>,
    by_name: HashMap<String, Option<u64>>,
}

impl PopulationIndex {
    pub fn build(reference: &[ReferenceRecord]) -> Self {
        let mut index = PopulationIndex {
            by_code: HashMap::with_capacity(reference.len()),
            by_name: HashMap::with_capacity(reference.len()),
        };
        for record in reference {
            index.by_code.insert(record.cca3.clone(), record.population);
            index
                .by_name
                .insert(record.name.common.to_lowercase(), record.population);
        }
        index
    }

    pub fn by_code(&self, code: &str) -> Option<u64> {
        self.by_code.get(code).copied().flatten()
    }

    pub fn by_name(&self, name: &str) -> Option<u64> {
        self.by_name.get(&name.to_lowercase()).copied().flatten()
    }

    pub fn lookup(&self, lookup: &Lookup) -> Option<u64> {
        match lookup {
            Lookup::Code(code) => self.by_code(code),
            Lookup::Name(name) => self.by_name(name),
        }
    }

    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}
