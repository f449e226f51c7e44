use tracing::info;
use wings_parser::schema::CAM_ID;
use wings_parser::Table;

use super::{fill_default, reconcile_identifier, NA};
use crate::dates::{apply_date_rule, InPlace};

const INSECTARY_OVERRIDE: &str = "CAM_ID_insectary";
const LEGACY_SPECIES: &str = "SPECIES";
const SPECIES: &str = "Species";
const ID_STATUS: &str = "ID_status";

/// Cleans the collection sheet.
///
/// Dates are rewritten in place to `DD-Mon-YY` and gain a `_formatted` companion, an insectary
/// identifier supersedes the native one, `SPECIES` becomes `Species`, and a missing `ID_status`
/// reads "NA".
pub fn normalize_collection(mut table: Table) -> Table {
    info!(rows = table.height(), "Processing collection data");

    apply_date_rule(&mut table, InPlace::Short);
    reconcile_identifier(&mut table, INSECTARY_OVERRIDE);
    table.rename_column(LEGACY_SPECIES, SPECIES);
    fill_default(&mut table, ID_STATUS, NA);
    fill_default(&mut table, CAM_ID, NA);

    table
}
