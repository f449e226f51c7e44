use std::path::Path;

use serde::Serialize;
use tracing::info;
use wings_parser::{parse_sheet, SheetKind, Table};

use crate::error::Result;
use crate::join::{join_photos, SheetRow};
use crate::outputs::{write_json_array, OutputArtifact};
use crate::photos::{build_lookup, PhotoLookup, PhotoSummary};
use crate::sheets::{normalize_collection, normalize_crispr, normalize_insectary};
use crate::sources::SheetSource;

pub const PHOTO_LOOKUP_NAME: &str = "photo_lookup";

/// The four source tables, parsed but untouched.
#[derive(Debug, Clone)]
pub struct RawSheets {
    pub photos: Table,
    pub collection: Table,
    pub crispr: Table,
    pub insectary: Table,
}

/// Per-sheet counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub sheet: SheetKind,
    pub rows_read: usize,
    pub rows_written: usize,
    pub with_photos: usize,
    pub with_dorsal: usize,
    pub with_ventral: usize,
    pub source_hash: String,
}

impl SheetSummary {
    fn new(raw: &Table, rows: &[SheetRow]) -> Self {
        Self {
            sheet: raw.kind,
            rows_read: raw.height(),
            rows_written: rows.len(),
            with_photos: rows.iter().filter(|row| row.has_photos()).count(),
            with_dorsal: rows.iter().filter(|row| row.dorsal_url.is_some()).count(),
            with_ventral: rows.iter().filter(|row| row.ventral_url.is_some()).count(),
            source_hash: raw.content_hash.clone(),
        }
    }
}

/// Joined rows for the three display sheets plus the photo lookup they were joined against.
#[derive(Debug, Clone)]
pub struct ProcessedSheets {
    pub lookup: PhotoLookup,
    pub photo_summary: PhotoSummary,
    pub collection: Vec<SheetRow>,
    pub insectary: Vec<SheetRow>,
    pub crispr: Vec<SheetRow>,
    pub summaries: Vec<SheetSummary>,
}

impl ProcessedSheets {
    pub fn rows(&self, kind: SheetKind) -> Option<&[SheetRow]> {
        match kind {
            SheetKind::Collection => Some(&self.collection),
            SheetKind::Insectary => Some(&self.insectary),
            SheetKind::Crispr => Some(&self.crispr),
            SheetKind::Photos => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub photos: PhotoSummary,
    pub sheets: Vec<SheetSummary>,
    pub artifacts: Vec<OutputArtifact>,
}

/// Fetches and parses all four sheets. Any failure aborts before a single sheet is processed.
pub fn load_sheets(source: &dyn SheetSource) -> Result<RawSheets> {
    info!(source = %source.describe(), "Loading sheets");

    let photos = parse_sheet(SheetKind::Photos, &source.fetch(SheetKind::Photos)?)?;
    let collection = parse_sheet(SheetKind::Collection, &source.fetch(SheetKind::Collection)?)?;
    let crispr = parse_sheet(SheetKind::Crispr, &source.fetch(SheetKind::Crispr)?)?;
    let insectary = parse_sheet(SheetKind::Insectary, &source.fetch(SheetKind::Insectary)?)?;

    Ok(RawSheets {
        photos,
        collection,
        crispr,
        insectary,
    })
}

/// Normalises every sheet and joins the photo groups onto the three display sheets.
pub fn process(raw: &RawSheets) -> ProcessedSheets {
    let (lookup, photo_summary) = build_lookup(&raw.photos);
    info!(
        photos = photo_summary.rows_read,
        raw_excluded = photo_summary.raw_excluded,
        identifiers = photo_summary.identifiers,
        "Grouped photos by CAM_ID"
    );

    let collection = join_photos(&normalize_collection(raw.collection.clone()), &lookup);
    let insectary = join_photos(&normalize_insectary(raw.insectary.clone()), &lookup);
    let crispr = join_photos(&normalize_crispr(raw.crispr.clone()), &lookup);

    // Summaries compare against the untouched source tables.
    let summaries = vec![
        SheetSummary::new(&raw.collection, &collection),
        SheetSummary::new(&raw.insectary, &insectary),
        SheetSummary::new(&raw.crispr, &crispr),
    ];

    ProcessedSheets {
        lookup,
        photo_summary,
        collection,
        insectary,
        crispr,
        summaries,
    }
}

/// Writes `collection.json`, `insectary.json`, `crispr.json` and, when asked, the photo lookup.
pub fn write_outputs(
    processed: &ProcessedSheets,
    dir: &Path,
    write_photo_lookup: bool,
) -> Result<Vec<OutputArtifact>> {
    let mut artifacts = Vec::with_capacity(4);
    for kind in [SheetKind::Collection, SheetKind::Insectary, SheetKind::Crispr] {
        let rows = processed.rows(kind).unwrap_or_default();
        artifacts.push(write_json_array(dir, kind.file_stem(), rows)?);
    }

    if write_photo_lookup {
        let documents = processed.lookup.to_documents();
        artifacts.push(write_json_array(dir, PHOTO_LOOKUP_NAME, &documents)?);
    }

    Ok(artifacts)
}

/// Loads, processes and writes everything.
pub fn run(source: &dyn SheetSource, output_dir: &Path, write_photo_lookup: bool) -> Result<RunReport> {
    let raw = load_sheets(source)?;
    let processed = process(&raw);
    let artifacts = write_outputs(&processed, output_dir, write_photo_lookup)?;
    info!(output_dir = %output_dir.display(), files = artifacts.len(), "Pipeline finished");

    Ok(RunReport {
        photos: processed.photo_summary,
        sheets: processed.summaries,
        artifacts,
    })
}

/// Loads and processes without writing, for match statistics.
pub fn dry_run(source: &dyn SheetSource) -> Result<RunReport> {
    let processed = process(&load_sheets(source)?);
    Ok(RunReport {
        photos: processed.photo_summary,
        sheets: processed.summaries,
        artifacts: Vec::new(),
    })
}
