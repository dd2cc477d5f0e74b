use std::fmt;
use url::Url;

const SHARE_PATH_PREFIX: &str = "/file/d/";
const SHARE_PATH_SUFFIX: &str = "/view";

/// Identifies a file in Google Drive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("file-url path seems ill-formed: {url}")]
pub struct IllFormedUrl {
    url: String,
}

/// Picks the id of the file to download.
///
/// A non-empty `explicit_id` is used as is. Otherwise the id is extracted from
/// a sharable link of the form `https://drive.google.com/file/d/<ID>/view`.
/// Returns `Ok(None)` when neither input provides an id.
pub fn resolve_file_id(
    explicit_id: Option<&str>,
    share_url: Option<&str>,
) -> Result<Option<FileId>, IllFormedUrl> {
    if let Some(id) = explicit_id.filter(|id| !id.is_empty()) {
        return Ok(Some(FileId::new(id)));
    }

    match share_url.filter(|url| !url.is_empty()) {
        Some(url) => file_id_from_share_url(url),
        None => Ok(None),
    }
}

/// Extracts the file id found between `/file/d/` and `/view` in the url path.
///
/// The markers are matched as plain substrings at both ends of the path, so
/// an id which itself contains `/view` is returned together with it.
pub fn file_id_from_share_url(share_url: &str) -> Result<Option<FileId>, IllFormedUrl> {
    let ill_formed = || IllFormedUrl {
        url: share_url.to_owned(),
    };

    let url = Url::parse(share_url).map_err(|_| ill_formed())?;
    let id = url
        .path()
        .strip_prefix(SHARE_PATH_PREFIX)
        .and_then(|rest| rest.strip_suffix(SHARE_PATH_SUFFIX))
        .ok_or_else(ill_formed)?;

    Ok((!id.is_empty()).then(|| FileId::new(id)))
}
