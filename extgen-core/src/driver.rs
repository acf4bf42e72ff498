//! Pipeline driver: scan -> extract -> aggregate -> emit -> sink.

use crate::aggregate::aggregate;
use crate::emit::{Emission, emit};
use crate::errors::Result;
use crate::extract::extract;
use crate::model::candidate::CandidateMethod;
use crate::model::forest::SyntaxForest;
use crate::scan::candidates;
use crate::traits::{HostSink, SymbolResolver};
use tracing::info;

/// Run the whole transformation over a complete forest.
///
/// Every stage runs once, synchronously; callers hand in the forest only
/// after all files have been lowered.
#[tracing::instrument(level = "info", skip_all, fields(nodes = forest.len()))]
pub fn run(forest: &SyntaxForest, resolver: &dyn SymbolResolver) -> Result<Emission> {
    let matched: Vec<_> = candidates(forest).collect();
    info!(matched = matched.len(), "Scanned forest");

    let extracted: Vec<CandidateMethod> = matched
        .into_iter()
        .filter_map(|id| extract(forest, resolver, id))
        .collect();
    info!(candidates = extracted.len(), "Resolved candidates");

    let groups = aggregate(forest, extracted);
    info!(groups = groups.len(), "Grouped by container");

    let emission = emit(&groups)?;
    info!(
        groups = emission.unit.groups,
        members = emission.unit.members,
        diagnostics = emission.diagnostics.len(),
        "Rendered unit"
    );
    Ok(emission)
}

/// [`run`], then register the unit with `sink` under its fixed hint name.
///
/// The unit is registered even when it holds no groups, so a previous
/// output is always replaced.
pub fn run_into(
    forest: &SyntaxForest,
    resolver: &dyn SymbolResolver,
    sink: &mut dyn HostSink,
) -> Result<Emission> {
    let emission = run(forest, resolver)?;
    sink.add_source(emission.unit.hint_name, &emission.unit.text)?;
    Ok(emission)
}
