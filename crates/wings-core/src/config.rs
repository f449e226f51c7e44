use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use wings_parser::SheetKind;

use crate::error::Result;

pub const DEFAULT_SHEET_ID: &str = "1QZj6YgHAJ9NmFXFPCtu-i-1NDuDmAdMF2Wogts7S2_4";
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_OUTPUT_DIR: &str = "public/data";
pub const DEFAULT_CONFIG_FILE: &str = "wings.toml";

pub const ENV_SHEET_ID: &str = "WINGS_SHEET_ID";
pub const ENV_OUTPUT_DIR: &str = "WINGS_OUTPUT_DIR";

/// Tab identifiers (`gid`) inside the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetGids {
    pub collection: String,
    pub photos: String,
    pub crispr: String,
    pub insectary: String,
}

impl Default for SheetGids {
    fn default() -> Self {
        Self {
            collection: "900206579".to_string(),
            photos: "439406691".to_string(),
            crispr: "952436162".to_string(),
            insectary: "402580526".to_string(),
        }
    }
}

impl SheetGids {
    pub fn gid(&self, kind: SheetKind) -> &str {
        match kind {
            SheetKind::Collection => &self.collection,
            SheetKind::Photos => &self.photos,
            SheetKind::Crispr => &self.crispr,
            SheetKind::Insectary => &self.insectary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WingsConfig {
    pub sheet_id: String,
    /// Prefix of the CSV export endpoint; `/{sheet_id}/export` is appended.
    pub export_base_url: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub write_photo_lookup: bool,
    pub sheets: SheetGids,
}

impl Default for WingsConfig {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            export_base_url: DEFAULT_EXPORT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout_secs: 60,
            write_photo_lookup: false,
            sheets: SheetGids::default(),
        }
    }
}

impl WingsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` if given, otherwise `wings.toml` in the working directory when it exists,
    /// otherwise the built-in defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    info!(path = %default_path.display(), "Loading configuration");
                    Self::from_toml_str(&fs::read_to_string(default_path)?)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `WINGS_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sheet_id) = lookup(ENV_SHEET_ID).filter(|v| !v.trim().is_empty()) {
            self.sheet_id = sheet_id;
        }
        if let Some(output_dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(output_dir);
        }
    }

    pub fn export_url(&self, kind: SheetKind) -> String {
        format!(
            "{}/{}/export?format=csv&gid={}",
            self.export_base_url.trim_end_matches('/'),
            self.sheet_id,
            self.sheets.gid(kind)
        )
    }
}
