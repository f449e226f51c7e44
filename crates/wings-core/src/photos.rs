use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};
use wings_parser::schema::{PHOTO_NAME, PHOTO_URL};
use wings_parser::Table;

/// Camera raw formats. They cannot be displayed and never reach the lookup.
pub const RAW_IMAGE_EXTENSIONS: [&str; 4] = [".cr2", ".cr3", ".nef", ".arw"];

static CAM_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)cam([0-9]+)").expect("valid CAM_ID regex"));

static DRIVE_VIEW_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://drive\.google\.com/file/d/([^/?#]+)/view(?:\?.*)?$")
        .expect("valid drive link regex")
});

/// One displayable row of the photo sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub display_name: String,
    pub source_url: Option<String>,
    pub view_url: Option<String>,
    pub cam_id: Option<String>,
}

/// A photo as it appears in joined rows and the lookup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "URL_to_view")]
    pub view_url: Option<String>,
}

impl From<&PhotoRecord> for PhotoEntry {
    fn from(record: &PhotoRecord) -> Self {
        Self {
            name: record.display_name.clone(),
            view_url: record.view_url.clone(),
        }
    }
}

/// Counts gathered while normalising the photo sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    pub rows_read: usize,
    pub raw_excluded: usize,
    pub unnamed: usize,
    pub without_identifier: usize,
    pub identifiers: usize,
}

/// Photos grouped by specimen identifier, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoLookup {
    groups: IndexMap<String, Vec<PhotoEntry>>,
}

impl PhotoLookup {
    pub fn from_records(records: &[PhotoRecord]) -> Self {
        let mut groups: IndexMap<String, Vec<PhotoEntry>> = IndexMap::new();
        for record in records {
            if let Some(cam_id) = &record.cam_id {
                groups
                    .entry(cam_id.clone())
                    .or_default()
                    .push(PhotoEntry::from(record));
            }
        }
        Self { groups }
    }

    pub fn get(&self, cam_id: &str) -> Option<&[PhotoEntry]> {
        self.groups.get(cam_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PhotoEntry])> {
        self.groups
            .iter()
            .map(|(cam_id, photos)| (cam_id.as_str(), photos.as_slice()))
    }

    /// Rows of the `photo_lookup.json` document.
    pub fn to_documents(&self) -> Vec<LookupDocument<'_>> {
        self.iter()
            .map(|(cam_id, photos)| LookupDocument { cam_id, photos })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct LookupDocument<'a> {
    #[serde(rename = "CAM_ID")]
    pub cam_id: &'a str,
    #[serde(rename = "Photo_URLs")]
    pub photos: &'a [PhotoEntry],
}

pub fn is_raw_image(name: &str) -> bool {
    let lower = name.trim().to_ascii_lowercase();
    RAW_IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Rewrites a Drive viewer link into a direct thumbnail link. Other URLs are returned as-is.
pub fn rewrite_view_url(url: &str) -> String {
    let trimmed = url.trim();
    match DRIVE_VIEW_PATTERN.captures(trimmed) {
        Some(caps) => format!("https://drive.google.com/thumbnail?id={}&sz=w2000", &caps[1]),
        None => trimmed.to_string(),
    }
}

/// Extracts `CAM<digits>` from anywhere in a file name, upper-casing the prefix.
pub fn extract_cam_id(name: &str) -> Option<String> {
    CAM_ID_PATTERN
        .captures(name)
        .map(|caps| format!("CAM{}", &caps[1]))
}

/// Filters the photo sheet down to displayable records and tags each with its identifier.
pub fn normalize_photos(table: &Table) -> (Vec<PhotoRecord>, PhotoSummary) {
    info!("Processing photo links");

    let mut summary = PhotoSummary {
        rows_read: table.height(),
        ..PhotoSummary::default()
    };
    let name_idx = table.column_index(PHOTO_NAME);
    let url_idx = table.column_index(PHOTO_URL);

    let mut records = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let Some(name) = name_idx.and_then(|idx| table.get(row, idx)) else {
            summary.unnamed += 1;
            continue;
        };
        if is_raw_image(name) {
            summary.raw_excluded += 1;
            continue;
        }

        let source_url = url_idx.and_then(|idx| table.get(row, idx)).map(str::to_string);
        let view_url = source_url.as_deref().map(rewrite_view_url);
        let cam_id = extract_cam_id(name);
        if cam_id.is_none() {
            summary.without_identifier += 1;
            debug!(name, "Photo name has no CAM identifier");
        }

        records.push(PhotoRecord {
            display_name: name.to_string(),
            source_url,
            view_url,
            cam_id,
        });
    }

    (records, summary)
}

/// Normalises the photo sheet and groups it by identifier.
pub fn build_lookup(table: &Table) -> (PhotoLookup, PhotoSummary) {
    let (records, mut summary) = normalize_photos(table);
    let lookup = PhotoLookup::from_records(&records);
    summary.identifiers = lookup.len();
    (lookup, summary)
}
