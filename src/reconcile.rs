//! The reconcile pass: fill zero populations in the primary dataset.
//!
//! Each zero-population record is resolved against the [`PopulationIndex`] in a
//! fixed order: code index, then lowercased name index, then the record's alias
//! fallbacks. The name index is only consulted when the code has no entry, and
//! the aliases only when neither index has one. A direct entry of `0` still
//! counts as found, so it ends resolution unmatched. Within an alias list a `0`
//! moves on to the next fallback. Records that already carry a population, or
//! have no `population` field at all, are never touched.

use std::fmt;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    alias::AliasTable,
    cli::{DatasetArgs, ReconcileArgs},
    dataset::{self, CountryRecord, ReferenceRecord},
    lookup::PopulationIndex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found through the code or name index.
    Direct(u64),
    /// Found through an alias fallback.
    Alias(u64),
    Unresolved,
}

impl Resolution {
    pub fn population(&self) -> Option<u64> {
        match self {
            Resolution::Direct(value) | Resolution::Alias(value) => Some(*value),
            Resolution::Unresolved => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Direct(_) => "direct",
            Resolution::Alias(_) => "alias",
            Resolution::Unresolved => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Position of the record in the primary dataset.
    pub position: usize,
    pub name: String,
    pub cca3: Option<String>,
    pub resolution: Resolution,
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolution {
            Resolution::Direct(value) => write!(f, "Updated {}: {}", self.name, value),
            Resolution::Alias(value) => {
                write!(f, "Updated (Special case) {}: {}", self.name, value)
            }
            Resolution::Unresolved => write!(f, "Could not find population for {}", self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// One entry per zero-population record, in dataset order.
    pub outcomes: Vec<RecordOutcome>,
    pub updated: usize,
    pub zero_before: usize,
    pub zero_after: usize,
}

impl ReconcileReport {
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            "Update complete.".to_string(),
            format!("Total updated: {}", self.updated),
            format!("Zeros before: {}", self.zero_before),
            format!("Zeros after: {}", self.zero_after),
        ]
    }
}

/// Resolves a population for a record with the given code and lowercased name.
pub fn resolve(
    cca3: Option<&str>,
    name: &str,
    index: &PopulationIndex,
    aliases: &AliasTable,
) -> Resolution {
    let direct = cca3
        .and_then(|code| index.by_code(code))
        .or_else(|| index.by_name(name));
    match direct {
        Some(0) => Resolution::Unresolved,
        Some(value) => Resolution::Direct(value),
        None => aliases
            .fallbacks(name)
            .iter()
            .find_map(|lookup| index.lookup(lookup).filter(|value| *value != 0))
            .map_or(Resolution::Unresolved, Resolution::Alias),
    }
}

/// Runs the pass over `records` in place and reports what changed.
pub fn reconcile(
    records: &mut [CountryRecord],
    index: &PopulationIndex,
    aliases: &AliasTable,
) -> ReconcileReport {
    let zero_before = count_zero(records);
    let mut outcomes = Vec::with_capacity(zero_before);
    let mut updated = 0usize;

    for (position, record) in records.iter_mut().enumerate() {
        if !record.has_zero_population() {
            continue;
        }
        let name = record.common_name().unwrap_or_default().to_lowercase();
        let resolution = resolve(record.cca3(), &name, index, aliases);
        if let Some(value) = resolution.population() {
            record.set_population(value);
            updated += 1;
        }
        outcomes.push(RecordOutcome {
            position,
            name: record.display_name().to_string(),
            cca3: record.cca3().map(str::to_string),
            resolution,
        });
    }

    ReconcileReport {
        outcomes,
        updated,
        zero_before,
        zero_after: count_zero(records),
    }
}

pub fn count_zero(records: &[CountryRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.has_zero_population())
        .count()
}

pub(crate) struct LoadedDatasets {
    pub primary: Vec<CountryRecord>,
    pub index: PopulationIndex,
    pub aliases: AliasTable,
}

pub(crate) fn load_datasets(args: &DatasetArgs) -> Result<LoadedDatasets> {
    let primary = dataset::load_primary(&args.primary)
        .with_context(|| format!("Loading primary dataset {:?}", args.primary))?;
    let reference: Vec<ReferenceRecord> = dataset::load_reference(&args.reference)
        .with_context(|| format!("Loading reference dataset {:?}", args.reference))?;
    let mut aliases = AliasTable::builtin();
    if let Some(path) = &args.aliases {
        let overrides = AliasTable::load(path)
            .with_context(|| format!("Loading alias rules from {path:?}"))?;
        debug!("Loaded {} alias rule(s) from {:?}", overrides.len(), path);
        aliases.merge(overrides);
    }

    let index = PopulationIndex::build(&reference);
    debug!(
        "Indexed {} reference record(s): {} code(s), {} name(s)",
        reference.len(),
        index.code_count(),
        index.name_count()
    );
    Ok(LoadedDatasets {
        primary,
        index,
        aliases,
    })
}

pub fn execute(args: &ReconcileArgs) -> Result<()> {
    info!(
        "Reconciling {:?} against {:?}",
        args.datasets.primary, args.datasets.reference
    );
    let LoadedDatasets {
        mut primary,
        index,
        aliases,
    } = load_datasets(&args.datasets)?;

    let report = reconcile(&mut primary, &index, &aliases);
    for outcome in &report.outcomes {
        println!("{outcome}");
    }

    if args.dry_run {
        info!("Dry run: no file written");
    } else {
        let destination = args.output.as_ref().unwrap_or(&args.datasets.primary);
        dataset::save_records(destination, &primary)?;
        info!("Wrote {} record(s) to {:?}", primary.len(), destination);
    }

    for line in report.summary_lines() {
        println!("{line}");
    }
    Ok(())
}
