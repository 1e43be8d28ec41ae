use anyhow::Result;
use itertools::Itertools;
use log::info;

use crate::{
    cli::AuditArgs,
    reconcile::{self, LoadedDatasets, RecordOutcome},
    table,
};

/// Resolves every zero-population record against a scratch copy of the primary
/// dataset and prints the outcome table. Nothing is written to disk.
pub fn execute(args: &AuditArgs) -> Result<()> {
    info!(
        "Auditing {:?} against {:?}",
        args.datasets.primary, args.datasets.reference
    );
    let LoadedDatasets {
        mut primary,
        index,
        aliases,
    } = reconcile::load_datasets(&args.datasets)?;
    let report = reconcile::reconcile(&mut primary, &index, &aliases);

    if report.outcomes.is_empty() {
        println!("No zero-population records found.");
        return Ok(());
    }
    let rows = table::audit_rows(&report.outcomes);
    print!("{}", table::render_table(&table::AUDIT_HEADERS, &rows));
    println!("{}", status_counts(&report.outcomes));
    Ok(())
}

/// `direct: 2, alias: 1, missing: 3`, omitting statuses with no records.
pub fn status_counts(outcomes: &[RecordOutcome]) -> String {
    let counts = outcomes
        .iter()
        .counts_by(|outcome| outcome.resolution.label());
    ["direct", "alias", "missing"]
        .iter()
        .filter_map(|label| counts.get(label).map(|count| format!("{label}: {count}")))
        .join(", ")
}
