use wings_core::sheets::{
    normalize_collection, normalize_crispr, normalize_insectary, split_species, Taxonomy,
};
use wings_parser::{parse_sheet, SheetKind};

fn taxonomy(genus: &str, species: &str, subspecies_form: &str) -> Taxonomy {
    Taxonomy {
        genus: genus.to_string(),
        species: species.to_string(),
        subspecies_form: subspecies_form.to_string(),
    }
}

#[test]
fn species_split_is_positional() {
    assert_eq!(
        split_species(Some("Melinaea mothone mothone")),
        taxonomy("Melinaea", "Melinaea mothone", "mothone")
    );
    assert_eq!(
        split_species(Some("Melinaea mothone")),
        taxonomy("Melinaea", "Melinaea mothone", "None")
    );
    assert_eq!(
        split_species(Some("Heliconius  erato   hybrid form x")),
        taxonomy("Heliconius", "Heliconius erato", "hybrid form x")
    );
    assert_eq!(split_species(Some("Oleria")), taxonomy("Oleria", "Oleria", "None"));
    assert_eq!(split_species(None), taxonomy("", "", "None"));
}

#[test]
fn insectary_drops_rows_without_identifier() {
    let table = parse_sheet(
        SheetKind::Insectary,
        "CAM_ID,SPECIES\nCAM1,Melinaea mothone\nNA,Melinaea mothone\n,Melinaea mothone\n  ,Oleria\nINS2,Oleria\n",
    )
    .expect("parse failed");
    let input_rows = table.height();

    let table = normalize_insectary(table);

    assert!(table.height() <= input_rows);
    assert_eq!(table.height(), 2);
    assert_eq!(table.value(0, "CAM_ID"), Some("CAM1"));
    assert_eq!(table.value(1, "CAM_ID"), Some("INS2"));
}

#[test]
fn insectary_prefers_collection_identifier_and_splits_taxonomy() {
    let table = parse_sheet(
        SheetKind::Insectary,
        "CAM_ID,CAM_ID_CollData,SPECIES,Emerge_date\n\
         INS1,CAM77,Melinaea mothone mothone,03/04/2023\n\
         INS2,NA,Melinaea mothone,junk\n",
    )
    .expect("parse failed");

    let table = normalize_insectary(table);

    assert_eq!(table.value(0, "CAM_ID"), Some("CAM77"));
    assert_eq!(table.value(1, "CAM_ID"), Some("INS2"));
    assert_eq!(table.value(0, "Genus"), Some("Melinaea"));
    assert_eq!(table.value(0, "Species"), Some("Melinaea mothone"));
    assert_eq!(table.value(0, "Subspecies_Form"), Some("mothone"));
    assert_eq!(table.value(1, "Subspecies_Form"), Some("None"));
    assert_eq!(table.value(0, "Emerge_date"), Some("03/04/2023"));
    assert_eq!(table.value(0, "Emerge_date_formatted"), Some("03/Apr/2023"));
    assert_eq!(table.value(1, "Emerge_date"), None);
    assert_eq!(table.value(1, "Emerge_date_formatted"), None);
}

#[test]
fn insectary_without_species_column_has_no_taxonomy() {
    let table = parse_sheet(SheetKind::Insectary, "CAM_ID,Sex\nCAM1,male\n").expect("parse failed");
    let table = normalize_insectary(table);
    assert!(!table.has_column("Subspecies_Form"));
    assert!(!table.has_column("Genus"));
}

#[test]
fn collection_rules() {
    let table = parse_sheet(
        SheetKind::Collection,
        "CAM_ID,CAM_ID_insectary,SPECIES,ID_status,Preservation_date\n\
         CAM1,NA,Melinaea mothone,confirmed,01/02/2023\n\
         CAM2,CAM9,Oleria,,#VALUE!\n\
         ,,Oleria,,\n",
    )
    .expect("parse failed");

    let table = normalize_collection(table);

    assert!(table.has_column("Species"));
    assert!(!table.has_column("SPECIES"));
    assert_eq!(table.value(0, "Species"), Some("Melinaea mothone"));

    assert_eq!(table.value(0, "CAM_ID"), Some("CAM1"));
    assert_eq!(table.value(1, "CAM_ID"), Some("CAM9"));
    assert_eq!(table.value(2, "CAM_ID"), Some("NA"));

    assert_eq!(table.value(0, "ID_status"), Some("confirmed"));
    assert_eq!(table.value(1, "ID_status"), Some("NA"));

    assert_eq!(table.value(0, "Preservation_date"), Some("01-Feb-23"));
    assert_eq!(table.value(0, "Preservation_date_formatted"), Some("01/Feb/2023"));
    assert_eq!(table.value(1, "Preservation_date"), None);
    assert_eq!(table.value(1, "Preservation_date_formatted"), None);
}

#[test]
fn collection_without_status_column_gets_one() {
    let table = parse_sheet(SheetKind::Collection, "CAM_ID\nCAM1\n").expect("parse failed");
    let table = normalize_collection(table);
    assert_eq!(table.value(0, "ID_status"), Some("NA"));
}

#[test]
fn crispr_aliases_emerge_date_and_defaults_mutant() {
    let table = parse_sheet(
        SheetKind::Crispr,
        "CAM_ID,Mutant,Emerge_date\nCAM1,WntA,14/05/2023\nCAM2,,#N/A\n",
    )
    .expect("parse failed");

    let table = normalize_crispr(table);

    assert_eq!(
        table.columns(),
        [
            "CAM_ID",
            "Mutant",
            "Emerge_date",
            "Preservation_date",
            "Emerge_date_formatted",
            "Preservation_date_formatted",
        ]
    );
    assert_eq!(table.value(0, "Preservation_date"), Some("14/05/2023"));
    assert_eq!(table.value(0, "Emerge_date_formatted"), Some("14/May/2023"));
    assert_eq!(table.value(0, "Preservation_date_formatted"), Some("14/May/2023"));
    assert_eq!(table.value(1, "Preservation_date_formatted"), None);
    assert_eq!(table.value(0, "Mutant"), Some("WntA"));
    assert_eq!(table.value(1, "Mutant"), Some("NA"));
}

#[test]
fn crispr_without_emerge_date_has_no_alias() {
    let table = parse_sheet(SheetKind::Crispr, "CAM_ID\nCAM1\n").expect("parse failed");
    let table = normalize_crispr(table);
    assert!(!table.has_column("Preservation_date"));
    assert_eq!(table.value(0, "Mutant"), Some("NA"));
}
