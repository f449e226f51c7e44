use tracing::info;
use wings_parser::schema::CAM_ID;
use wings_parser::Table;

use super::{fill_default, NA};
use crate::dates::{apply_date_rule, InPlace};

const EMERGE_DATE: &str = "Emerge_date";
const PRESERVATION_DATE: &str = "Preservation_date";
const MUTANT: &str = "Mutant";

/// Cleans the CRISPR sheet. `Emerge_date` is mirrored into `Preservation_date` before the date
/// rule runs so every sheet shares the same sort key.
pub fn normalize_crispr(mut table: Table) -> Table {
    info!(rows = table.height(), "Processing CRISPR data");

    table.copy_column(EMERGE_DATE, PRESERVATION_DATE);
    apply_date_rule(&mut table, InPlace::Keep);
    fill_default(&mut table, MUTANT, NA);
    fill_default(&mut table, CAM_ID, NA);

    table
}
