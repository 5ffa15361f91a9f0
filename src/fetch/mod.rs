//! Retrieval and on-disk caching of raw alignment documents.
//!
//! The alignment service binds its form parameters by position, not by name,
//! so the request body must list the fields in exactly the order given by
//! [`FORM_FIELD_NAMES`]. Responses are streamed into a temporary file in the
//! output directory and renamed onto the cache path only once the whole body
//! has been written. An existing cache file is never re-fetched.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::AlignmentConfig;
use crate::core::locus::Locus;
use crate::utils::validation::{validate_locus_name, ValidationError};

/// Form field names in the order the service expects them
pub const FORM_FIELD_NAMES: [&str; 9] = [
    "gene",
    "Type",
    "Reference",
    "Sequences",
    "Display",
    "Formatting",
    "Omit",
    "Printing",
    "submit",
];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Alignment service returned HTTP {status}")]
    Status { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move download into cache: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error(transparent)]
    InvalidLocus(#[from] ValidationError),
}

impl FetchError {
    /// Whether the request failed because the timeout expired
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Ordered form fields for the alignment request of `locus`
#[must_use]
pub fn form_fields(locus: &Locus) -> Vec<(&'static str, String)> {
    let values = [
        locus.name.clone(),
        locus.sequence_type.as_form_value().to_string(),
        locus.reference.clone(),
        String::new(),
        "Show All Bases".to_string(),
        "10".to_string(),
        "N".to_string(),
        "P".to_string(),
        "Align Sequences Now".to_string(),
    ];
    FORM_FIELD_NAMES.into_iter().zip(values).collect()
}

/// Issues the form POST and streams the response body somewhere
pub trait Transport {
    /// POST `fields` form-encoded, in the given order, to `url` and copy the
    /// response body into `sink`. Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on network failure, timeout, or a non-success status.
    fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError>;
}

/// Blocking HTTP transport with a bounded request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, String)],
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        let mut response = self.client.post(url).form(fields).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(std::io::copy(&mut response, sink)?)
    }
}

/// How a raw document came to be in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache file already existed; no request was made
    Cached(PathBuf),
    /// The document was downloaded in this run
    Downloaded { path: PathBuf, bytes: u64 },
}

impl FetchOutcome {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Cached(path) | Self::Downloaded { path, .. } => path,
        }
    }

    #[must_use]
    pub fn was_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// Ensures each locus has a raw document in the cache directory
pub struct Fetcher<'a> {
    config: &'a AlignmentConfig,
    transport: &'a dyn Transport,
}

impl<'a> Fetcher<'a> {
    pub fn new(config: &'a AlignmentConfig, transport: &'a dyn Transport) -> Self {
        Self { config, transport }
    }

    /// Return the cache path for `locus`, downloading the document first if
    /// it is not cached yet.
    ///
    /// The output directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the locus name is unsafe as a file name, the
    /// request fails, or the download cannot be written and moved into place.
    /// No cache file is left behind on failure.
    pub fn fetch(&self, locus: &Locus) -> Result<FetchOutcome, FetchError> {
        validate_locus_name(&locus.name)?;

        let path = self.config.cache_path(locus);
        if path.exists() {
            info!("Already downloaded {locus}");
            return Ok(FetchOutcome::Cached(path));
        }

        info!("Downloading {locus}");
        let fields = form_fields(locus);
        debug!(
            "POST {} gene={} Type={} Reference={}",
            self.config.service_url, fields[0].1, fields[1].1, fields[2].1
        );

        let mut temp = NamedTempFile::new_in(&self.config.output_dir)?;
        let bytes = self
            .transport
            .post_form(&self.config.service_url, &fields, temp.as_file_mut())?;
        temp.as_file_mut().sync_all()?;
        temp.persist(&path)?;

        info!("Downloaded {locus} ({bytes} bytes)");
        Ok(FetchOutcome::Downloaded { path, bytes })
    }
}
