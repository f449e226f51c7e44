use indexmap::IndexMap;
use serde::Serialize;
use wings_parser::schema::CAM_ID;
use wings_parser::Table;

use crate::photos::{PhotoEntry, PhotoLookup};

pub const PHOTOS_FIELD: &str = "all_photos";
pub const DORSAL_FIELD: &str = "URLd";
pub const VENTRAL_FIELD: &str = "URLv";

const DORSAL_MARKER: &str = "d.jpg";
const VENTRAL_MARKER: &str = "v.jpg";

/// A sheet row after the photo join. Serialises as one flat JSON object: the sheet's own
/// fields in column order followed by the derived photo fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    #[serde(flatten)]
    pub fields: IndexMap<String, Option<String>>,
    #[serde(rename = "all_photos")]
    pub photos: Option<Vec<PhotoEntry>>,
    #[serde(rename = "URLd")]
    pub dorsal_url: Option<String>,
    #[serde(rename = "URLv")]
    pub ventral_url: Option<String>,
}

impl SheetRow {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|value| value.as_deref())
    }

    pub fn has_photos(&self) -> bool {
        self.photos.as_ref().is_some_and(|photos| !photos.is_empty())
    }
}

/// First photo whose name contains `marker` (case-insensitive). Order decides ties.
pub fn first_view<'a>(photos: &'a [PhotoEntry], marker: &str) -> Option<&'a PhotoEntry> {
    photos
        .iter()
        .find(|photo| photo.name.to_ascii_lowercase().contains(marker))
}

pub fn dorsal_view(photos: &[PhotoEntry]) -> Option<&PhotoEntry> {
    first_view(photos, DORSAL_MARKER)
}

pub fn ventral_view(photos: &[PhotoEntry]) -> Option<&PhotoEntry> {
    first_view(photos, VENTRAL_MARKER)
}

/// Left-joins the photo groups onto `table` by `CAM_ID`. Every row is kept; rows without a
/// matching group get null photo fields.
pub fn join_photos(table: &Table, lookup: &PhotoLookup) -> Vec<SheetRow> {
    let derived = [PHOTOS_FIELD, DORSAL_FIELD, VENTRAL_FIELD];

    table
        .records()
        .map(|record| {
            let fields: IndexMap<String, Option<String>> = record
                .into_iter()
                .filter(|(column, _)| !derived.contains(column))
                .map(|(column, value)| (column.to_string(), value.map(str::to_string)))
                .collect();

            let photos = fields
                .get(CAM_ID)
                .and_then(|value| value.as_deref())
                .and_then(|cam_id| lookup.get(cam_id))
                .map(<[PhotoEntry]>::to_vec);

            let (dorsal_url, ventral_url) = match photos.as_deref() {
                Some(photos) => (
                    dorsal_view(photos).and_then(|photo| photo.view_url.clone()),
                    ventral_view(photos).and_then(|photo| photo.view_url.clone()),
                ),
                None => (None, None),
            };

            SheetRow {
                fields,
                photos,
                dorsal_url,
                ventral_url,
            }
        })
        .collect()
}
