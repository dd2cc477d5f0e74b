use crate::error::DownloadError;
use crate::error::ErrContext;
use async_trait::async_trait;
use bytes::Bytes;
use camino::Utf8Path;
use futures::stream::BoxStream;
use futures::StreamExt;
use futures::TryStreamExt;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::fmt;
use std::io;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com";

/// Fetches the content of a single remote file.
#[async_trait]
pub trait FileContentSource {
    /// Requests the content of `file_id` on behalf of the owner of `token`.
    ///
    /// Any response other than `200 OK` is rejected with
    /// [`DownloadError::UnexpectedStatus`]. Nothing is retried.
    async fn fetch_file_content(
        &self,
        file_id: &str,
        token: &str,
    ) -> Result<FileContent, DownloadError>;
}

/// The streamed body of a remote file.
pub struct FileContent {
    content_length: Option<u64>,
    body: BoxStream<'static, io::Result<Bytes>>,
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContent")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

impl FileContent {
    pub fn new(content_length: Option<u64>, body: BoxStream<'static, io::Result<Bytes>>) -> Self {
        Self {
            content_length,
            body,
        }
    }

    /// Content held fully in memory, served as a single chunk.
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            content_length: Some(content.len() as u64),
            body: futures::stream::once(async move { Ok(content) }).boxed(),
        }
    }

    /// The length announced by the server, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Streams the content into `target`, creating or truncating the file.
    ///
    /// Returns the number of bytes written. When the stream or a write fails
    /// the partially written file is left behind for the caller to remove.
    pub async fn save(mut self, target: &Utf8Path) -> Result<u64, DownloadError> {
        let mut file = tokio::fs::File::create(target)
            .await
            .context(format!("Failed to create {target}"))?;

        let mut written = 0;
        while let Some(chunk) = self.body.next().await {
            let chunk = chunk.context(format!("Failed to receive the content of {target}"))?;
            file.write_all(&chunk)
                .await
                .context(format!("Failed to write to {target}"))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .context(format!("Failed to write to {target}"))?;

        Ok(written)
    }
}

/// A client for the Drive v3 `files` endpoint.
#[derive(Debug, Clone)]
pub struct DriveClient {
    client: reqwest::Client,
    api_url: Url,
}

impl DriveClient {
    pub fn new(api_url: Url) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, api_url })
    }

    /// The url serving the raw content of `file_id`, shared drives included.
    ///
    /// The id is appended to the path as given: escapes it already carries,
    /// such as those of an id cut from a share link, are sent unchanged.
    pub fn file_content_url(&self, file_id: &str) -> Result<Url, DownloadError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| DownloadError::InvalidApiUrl {
                url: self.api_url.to_string(),
            })?
            .pop_if_empty()
            .extend(["drive", "v3", "files"]);
        let path = format!("{}/{file_id}", url.path());
        url.set_path(&path);
        url.query_pairs_mut()
            .append_pair("alt", "media")
            .append_pair("supportsAllDrives", "true");
        Ok(url)
    }
}

#[async_trait]
impl FileContentSource for DriveClient {
    async fn fetch_file_content(
        &self,
        file_id: &str,
        token: &str,
    ) -> Result<FileContent, DownloadError> {
        let url = self.file_content_url(file_id)?;
        debug!(%url, "Requesting file content");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Received response");
        if status != StatusCode::OK {
            return Err(DownloadError::UnexpectedStatus { status });
        }

        let content_length = response.content_length();
        let body = response.bytes_stream().map_err(io::Error::other).boxed();

        Ok(FileContent::new(content_length, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use camino::Utf8PathBuf;
    use mockito::Matcher;
    use rstest::rstest;
    use tempfile::TempDir;

    fn drive_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("alt".into(), "media".into()),
            Matcher::UrlEncoded("supportsAllDrives".into(), "true".into()),
        ])
    }

    fn target_in(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn file_content_url_targets_the_drive_files_endpoint() {
        let client = DriveClient::new(DEFAULT_API_URL.parse().unwrap()).unwrap();

        let url = client.file_content_url("ABC123").unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/drive/v3/files/ABC123?alt=media&supportsAllDrives=true"
        );
    }

    #[test]
    fn file_content_url_extends_a_base_path() {
        let client = DriveClient::new("http://localhost:8000/proxy/".parse().unwrap()).unwrap();

        let url = client.file_content_url("ABC123").unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/proxy/drive/v3/files/ABC123?alt=media&supportsAllDrives=true"
        );
    }

    #[rstest]
    #[case::plain("ABC123", "/drive/v3/files/ABC123")]
    #[case::escaped("AB%2DCD", "/drive/v3/files/AB%2DCD")]
    #[case::slashes("AB/view/CD", "/drive/v3/files/AB/view/CD")]
    #[case::space("AB CD", "/drive/v3/files/AB%20CD")]
    fn file_content_url_appends_the_file_id_as_given(#[case] file_id: &str, #[case] path: &str) {
        let client = DriveClient::new(DEFAULT_API_URL.parse().unwrap()).unwrap();

        let url = client.file_content_url(file_id).unwrap();

        assert_eq!(url.path(), path);
        assert_eq!(url.query(), Some("alt=media&supportsAllDrives=true"));
    }

    #[test]
    fn file_content_url_rejects_a_base_that_cannot_have_a_path() {
        let client = DriveClient::new("mailto:drive@example.com".parse().unwrap()).unwrap();

        assert_matches!(
            client.file_content_url("ABC123"),
            Err(DownloadError::InvalidApiUrl { .. })
        );
    }

    #[tokio::test]
    async fn fetches_file_content_with_bearer_token() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drive/v3/files/ABC123")
            .match_query(drive_query())
            .match_header("authorization", "Bearer secret-token")
            .match_header("accept", "application/octet-stream")
            .with_status(200)
            .with_body(b"hello")
            .create_async()
            .await;

        let client = DriveClient::new(server.url().parse()?)?;
        let content = client.fetch_file_content("ABC123", "secret-token").await?;
        assert_eq!(content.content_length(), Some(5));

        let dir = TempDir::new()?;
        let target = target_in(&dir, "downloaded.bin");
        let written = content.save(&target).await?;

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(&target)?, b"hello");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn streams_large_content_unchanged() -> anyhow::Result<()> {
        let body: Vec<u8> = (0..4 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/drive/v3/files/large")
            .match_query(drive_query())
            .with_status(200)
            .with_body(&body)
            .create_async()
            .await;

        let client = DriveClient::new(server.url().parse()?)?;
        let content = client.fetch_file_content("large", "token").await?;

        let dir = TempDir::new()?;
        let target = target_in(&dir, "large.bin");
        content.save(&target).await?;

        assert_eq!(std::fs::read(&target)?, body);
        Ok(())
    }

    #[rstest]
    #[case::not_found(404)]
    #[case::unauthorized(401)]
    #[case::server_error(500)]
    #[case::no_content(204)]
    #[case::unfollowed_redirect(302)]
    #[tokio::test]
    async fn rejects_any_status_other_than_ok(#[case] status: usize) -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drive/v3/files/ABC123")
            .match_query(drive_query())
            .with_status(status)
            .expect(1)
            .create_async()
            .await;

        let client = DriveClient::new(server.url().parse()?)?;
        let err = client
            .fetch_file_content("ABC123", "token")
            .await
            .unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16() as usize), Some(status));
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to get file from Google Drive: {status}")));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn connection_failures_are_request_errors() -> anyhow::Result<()> {
        let client = DriveClient::new("http://127.0.0.1:1".parse()?)?;

        let err = client
            .fetch_file_content("ABC123", "token")
            .await
            .unwrap_err();

        assert_matches!(err, DownloadError::Request(_));
        assert_eq!(err.status(), None);
        Ok(())
    }

    #[tokio::test]
    async fn save_truncates_an_existing_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let target = target_in(&dir, "existing.txt");
        std::fs::write(&target, "some much longer previous content")?;

        FileContent::from_bytes("new").save(&target).await?;

        assert_eq!(std::fs::read_to_string(&target)?, "new");
        Ok(())
    }

    #[tokio::test]
    async fn save_leaves_the_partial_file_when_the_stream_fails() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let target = target_in(&dir, "partial.txt");
        let body = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"first chunk")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ])
        .boxed();

        let err = FileContent::new(None, body).save(&target).await.unwrap_err();

        assert_matches!(err, DownloadError::FromIo { .. });
        assert_eq!(std::fs::read_to_string(&target)?, "first chunk");
        Ok(())
    }

    #[tokio::test]
    async fn save_reports_the_path_it_cannot_create() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let target = target_in(&dir, "missing/dir/file.txt");

        let err = FileContent::from_bytes("data").save(&target).await.unwrap_err();

        assert_eq!(err.to_string(), format!("Failed to create {target}"));
        Ok(())
    }
}
