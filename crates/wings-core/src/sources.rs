use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::info;
use wings_parser::SheetKind;

use crate::config::WingsConfig;
use crate::error::{PipelineError, Result};

/// Somewhere the four raw sheets can be read from as CSV text.
pub trait SheetSource {
    fn describe(&self) -> String;
    fn fetch(&self, kind: SheetKind) -> Result<String>;
}

/// Downloads sheets through the spreadsheet's CSV export endpoint.
pub struct HttpSheetSource {
    client: Client,
    config: WingsConfig,
}

impl HttpSheetSource {
    pub fn new(config: &WingsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("wings/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl SheetSource for HttpSheetSource {
    fn describe(&self) -> String {
        format!("spreadsheet {}", self.config.sheet_id)
    }

    fn fetch(&self, kind: SheetKind) -> Result<String> {
        let url = self.config.export_url(kind);
        info!(sheet = kind.label(), %url, "Downloading sheet");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch {
                sheet: kind.label(),
                message: format!("server responded with {status}"),
            });
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("text/html"));
        if is_html {
            return Err(PipelineError::Fetch {
                sheet: kind.label(),
                message: "malformed response: received HTML instead of CSV (is the sheet shared publicly?)"
                    .to_string(),
            });
        }

        Ok(response.text()?)
    }
}

/// Reads `<dir>/<stem>.csv` files, as written by a snapshot.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(dir: &Path, kind: SheetKind) -> PathBuf {
        dir.join(format!("{}.csv", kind.file_stem()))
    }
}

impl SheetSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }

    fn fetch(&self, kind: SheetKind) -> Result<String> {
        let path = Self::path_for(&self.dir, kind);
        info!(sheet = kind.label(), path = %path.display(), "Reading sheet");
        Ok(fs::read_to_string(path)?)
    }
}

/// Fetches every sheet from `source` and writes the raw text under `dest`, in the layout
/// [`DirectorySource`] reads back.
pub fn snapshot(source: &dyn SheetSource, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut contents = Vec::with_capacity(SheetKind::ALL.len());
    for kind in SheetKind::ALL {
        contents.push((kind, source.fetch(kind)?));
    }

    fs::create_dir_all(dest)?;
    let mut written = Vec::with_capacity(contents.len());
    for (kind, text) in contents {
        let path = DirectorySource::path_for(dest, kind);
        fs::write(&path, text)?;
        written.push(path);
    }
    Ok(written)
}
