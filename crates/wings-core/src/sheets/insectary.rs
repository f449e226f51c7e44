use tracing::{debug, info, warn};
use wings_parser::schema::CAM_ID;
use wings_parser::Table;

use super::{is_present, reconcile_identifier};
use crate::dates::{apply_date_rule, InPlace};

const COLLECTION_OVERRIDE: &str = "CAM_ID_CollData";
const SPECIES_SOURCES: [&str; 2] = ["SPECIES", "Species"];
const GENUS: &str = "Genus";
const SPECIES: &str = "Species";
const SUBSPECIES_FORM: &str = "Subspecies_Form";
const NO_SUBSPECIES: &str = "None";

/// Positional split of a free-text species name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub genus: String,
    /// "Genus species", not the bare epithet.
    pub species: String,
    pub subspecies_form: String,
}

/// Splits on whitespace: word 0 is the genus, words 0-1 the binomial, and every remaining word
/// is folded verbatim into the subspecies/form ("None" when there is none).
pub fn split_species(value: Option<&str>) -> Taxonomy {
    let parts: Vec<&str> = value.unwrap_or_default().split_whitespace().collect();

    let genus = parts.first().copied().unwrap_or_default().to_string();
    let species = parts.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    let subspecies_form = if parts.len() > 2 {
        parts[2..].join(" ")
    } else {
        NO_SUBSPECIES.to_string()
    };

    Taxonomy {
        genus,
        species,
        subspecies_form,
    }
}

/// Cleans the insectary sheet.
///
/// Rows without a usable `CAM_ID` are dropped before anything else, since they can be neither
/// joined nor displayed.
pub fn normalize_insectary(mut table: Table) -> Table {
    info!(rows = table.height(), "Processing insectary data");

    let before = table.height();
    match table.column_index(CAM_ID) {
        Some(idx) => table.retain_rows(|row| is_present(row[idx].as_deref())),
        None => table.retain_rows(|_| false),
    }
    debug!(dropped = before - table.height(), "Dropped insectary rows without CAM_ID");

    reconcile_identifier(&mut table, COLLECTION_OVERRIDE);
    apply_taxonomy(&mut table);
    apply_date_rule(&mut table, InPlace::Keep);

    table
}

fn apply_taxonomy(table: &mut Table) {
    let Some(source) = SPECIES_SOURCES
        .iter()
        .find_map(|name| table.column_index(name))
    else {
        warn!("Insectary sheet has no species column; skipping taxonomy split");
        return;
    };

    let splits: Vec<Taxonomy> = (0..table.height())
        .map(|row| split_species(table.get(row, source)))
        .collect();

    let genus = table.ensure_column(GENUS);
    let species = table.ensure_column(SPECIES);
    let subspecies = table.ensure_column(SUBSPECIES_FORM);
    for (row, taxonomy) in splits.into_iter().enumerate() {
        table.set(row, genus, Some(taxonomy.genus));
        table.set(row, species, Some(taxonomy.species));
        table.set(row, subspecies, Some(taxonomy.subspecies_form));
    }
}
