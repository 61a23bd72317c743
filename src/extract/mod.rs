pub mod classify;

pub use classify::classify;

use crate::data::source::{ElementSource, PbfSource};
use crate::data::types::{Category, ElementKind, InfrastructureRecord};
use crate::error::ExtractError;
use std::path::Path;

/// Counters accumulated over one extraction pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub nodes_visited: u64,
    pub ways_visited: u64,
    pub relations_visited: u64,
    pub wind_generators: u64,
    pub solar_plants: u64,
}

impl ExtractStats {
    fn visit(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Node => self.nodes_visited += 1,
            ElementKind::Way => self.ways_visited += 1,
            ElementKind::Relation => self.relations_visited += 1,
        }
    }

    fn matched(&mut self, category: Category) {
        match category {
            Category::WindGenerator => self.wind_generators += 1,
            Category::SolarPlant => self.solar_plants += 1,
        }
    }

    pub fn total_matched(&self) -> u64 {
        self.wind_generators + self.solar_plants
    }
}

/// Filter-and-collect over an element stream.
///
/// Consumes any [`ElementSource`] in a single pass, appending matching
/// elements to an ordered record sequence. Elements that match neither
/// pattern are discarded without error; that is the normal fate of almost
/// every element in an extract. After the pass the sequence is read-only.
#[derive(Debug, Default)]
pub struct Extractor {
    records: Vec<InfrastructureRecord>,
    stats: ExtractStats,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            records: Vec::new(),
            stats: ExtractStats::default(),
        }
    }

    /// Run the extraction pass over `source`.
    ///
    /// On error the pass aborts and no partial records are exposed; the
    /// extractor should be dropped.
    pub fn run<S: ElementSource>(&mut self, source: S) -> Result<(), ExtractError> {
        let records = &mut self.records;
        let stats = &mut self.stats;
        source.for_each(|element| {
            stats.visit(element.kind);
            if let Some(category) = classify(&element.tags) {
                records.push(InfrastructureRecord::from_element(element, category));
                stats.matched(category);
            }
        })?;

        log::info!(
            "Extraction pass: {} nodes, {} ways, {} relations visited; {} wind generators, {} solar plants matched",
            stats.nodes_visited,
            stats.ways_visited,
            stats.relations_visited,
            stats.wind_generators,
            stats.solar_plants
        );
        Ok(())
    }

    /// Records matched so far, in visitation order.
    pub fn records(&self) -> &[InfrastructureRecord] {
        &self.records
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    pub fn into_records(self) -> Vec<InfrastructureRecord> {
        self.records
    }
}

/// Extract all renewable-infrastructure records from a PBF file.
///
/// Fatal conditions (missing, unreadable, or malformed file) abort the pass
/// and return the error; no partial sequence is returned.
pub fn extract_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<InfrastructureRecord>, ExtractError> {
    let source = PbfSource::from_path(path)?;
    let mut extractor = Extractor::new();
    extractor.run(source)?;
    Ok(extractor.into_records())
}
