use std::{
    collections::HashSet,
    fmt, io,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    models::{GameKind, GameRecord},
    router::Route,
};

/// Where the catalog JSON lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http(s)` URL.
    Remote(String),
}

impl CatalogSource {
    /// Interpret a configured location string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Remote(trimmed.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
            CatalogSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Failure to produce a catalog from its source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The HTTP request could not be completed.
    #[error("failed to request catalog {url}: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("catalog request to {url} returned {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status returned by the server.
        status: StatusCode,
    },
    /// The payload is not a JSON array of game records.
    #[error("failed to parse catalog {location}: {source}")]
    Parse {
        /// Source the payload came from.
        location: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the full catalog from a single static resource.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    client: Client,
}

impl CatalogLoader {
    /// Build a loader for `source`, applying `timeout` to remote requests.
    pub fn new(source: CatalogSource, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source_err| CatalogError::Http {
                url: source.to_string(),
                source: source_err,
            })?;
        Ok(Self { source, client })
    }

    /// Build a loader reusing an existing HTTP client.
    pub fn with_client(source: CatalogSource, client: Client) -> Self {
        Self { source, client }
    }

    /// Location this loader reads from.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Issue one read of the source and decode the records.
    pub async fn fetch(&self) -> Result<Vec<GameRecord>, CatalogError> {
        let payload = match &self.source {
            CatalogSource::Path(path) => read_file(path).await?,
            CatalogSource::Remote(url) => self.read_remote(url).await?,
        };
        let records = parse_catalog(&payload, &self.source.to_string())?;
        info!(source = %self.source, total = records.len(), "Catalog loaded");
        Ok(records)
    }

    async fn read_remote(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let http_err = |source| CatalogError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.bytes().await.map_err(http_err)?;
        Ok(body.to_vec())
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a catalog payload, keeping the first record for any repeated id.
///
/// Records whose id cannot be carried in a `/play/{id}` path are dropped.
pub fn parse_catalog(payload: &[u8], location: &str) -> Result<Vec<GameRecord>, CatalogError> {
    let decoded: Vec<GameRecord> =
        serde_json::from_slice(payload).map_err(|source| CatalogError::Parse {
            location: location.to_string(),
            source,
        })?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(decoded.len());
    for record in decoded {
        if !Route::is_routable_id(&record.id) {
            warn!(id = %record.id, "Skipping catalog id that cannot appear in a path");
            continue;
        }
        if !seen.insert(record.id.clone()) {
            warn!(id = %record.id, "Skipping duplicate catalog id");
            continue;
        }
        if let GameKind::Other(kind) = &record.kind {
            debug!(id = %record.id, kind = %kind, "Unrecognised game type; using download card");
        }
        records.push(record);
    }
    Ok(records)
}
