use std::fmt;

use serde::Serialize;

/// The four tabs exported from the specimen spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Collection,
    Photos,
    Crispr,
    Insectary,
}

impl SheetKind {
    /// Fetch order. Photos come first because every other sheet joins against them.
    pub const ALL: [SheetKind; 4] = [
        SheetKind::Photos,
        SheetKind::Collection,
        SheetKind::Crispr,
        SheetKind::Insectary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::Collection => "Collection_data",
            SheetKind::Photos => "Photo_links",
            SheetKind::Crispr => "CRISPR",
            SheetKind::Insectary => "Insectary_data",
        }
    }

    /// Stem used for raw snapshots on disk and for the JSON document name.
    pub fn file_stem(&self) -> &'static str {
        match self {
            SheetKind::Collection => "collection",
            SheetKind::Photos => "photo_links",
            SheetKind::Crispr => "crispr",
            SheetKind::Insectary => "insectary",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Photos => &[PHOTO_NAME, PHOTO_URL],
            SheetKind::Collection | SheetKind::Crispr | SheetKind::Insectary => &[CAM_ID],
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const CAM_ID: &str = "CAM_ID";
pub const PHOTO_NAME: &str = "Name";
pub const PHOTO_URL: &str = "URL";
