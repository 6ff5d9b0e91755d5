use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::region::ReferenceRow;
use crate::parsing::delimited::{parse_region_file, parse_region_text, ParseError};

/// Permendagri 72/2019 region list, dotted codes
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/kodewilayah/permendagri-72-2019/main/dist/base.csv";

/// Reference dataset could not be fetched or parsed
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch region dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Region dataset source returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse region dataset: {0}")]
    Parse(#[from] ParseError),
}

/// Where the region dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    /// Interpret a CLI/env value: `http(s)://` is a URL, anything else a path
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The flat region reference table, in dataset order
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    pub rows: Vec<ReferenceRow>,
}

impl RegionTable {
    #[must_use]
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    /// Parse a table from comma-delimited text
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the text holds no usable rows.
    pub fn from_csv(text: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_region_text(text, ',')?))
    }

    /// Load a table from a local delimited file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let delimiter = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
        {
            '\t'
        } else {
            ','
        };
        Ok(Self::new(parse_region_file(path, delimiter)?))
    }

    /// Download and parse a table
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Fetch` on network failure, `CatalogError::Status`
    /// on a non-2xx response, or `CatalogError::Parse` for unusable content.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self, CatalogError> {
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Self::from_csv(&body)
    }

    /// Load from either kind of source
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::fetch`] and [`Self::load_from_file`].
    pub async fn load(client: &reqwest::Client, source: &DatasetSource) -> Result<Self, CatalogError> {
        let started = std::time::Instant::now();
        let table = match source {
            DatasetSource::Url(url) => Self::fetch(client, url).await?,
            DatasetSource::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || Self::load_from_file(&path))
                    .await
                    .map_err(|e| {
                        CatalogError::Parse(ParseError::Io(std::io::Error::other(e)))
                    })??
            }
        };
        tracing::debug!(
            "Loaded {} region rows from {source} in {:?}",
            table.len(),
            started.elapsed()
        );
        Ok(table)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows with this exact (uppercased) name, in dataset order
    pub fn find_by_name<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a ReferenceRow> + 'n
    where
        'a: 'n,
    {
        self.rows.iter().filter(move |r| r.name == name)
    }
}
