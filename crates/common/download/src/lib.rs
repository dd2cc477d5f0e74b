//! Utilities for downloading a single file from Google Drive.
//!
//! This crate keeps the network side of a download away from the code that
//! decides *what* to download:
//!
//! - [`FileContentSource`] is the capability to fetch the content of a file
//!   given its id and a bearer token
//! - [`DriveClient`] implements it against the Drive v3 `files` endpoint
//! - [`FileContent`] is the streamed body, saved to disk with
//!   [`FileContent::save`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use download::DriveClient;
//! use download::FileContentSource;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DriveClient::new(download::DEFAULT_API_URL.parse()?)?;
//!
//!     let content = client.fetch_file_content("1a2b3c", "ya29.token").await?;
//!     content.save(Utf8Path::new("/tmp/secret.json")).await?;
//!
//!     Ok(())
//! }
//! ```

mod download;
mod error;

pub use crate::download::DriveClient;
pub use crate::download::FileContent;
pub use crate::download::FileContentSource;
pub use crate::download::DEFAULT_API_URL;
pub use crate::error::DownloadError;
