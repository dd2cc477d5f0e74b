use async_trait::async_trait;
use bytes::Bytes;
use download::DownloadError;
use download::FileContent;
use download::FileContentSource;
use futures::StreamExt;
use std::io;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
enum Reply {
    Content(&'static [u8]),
    Status(u16),
    BrokenStream(&'static [u8]),
}

/// A Drive serving a single reply to every request, recording the requests.
#[derive(Debug)]
pub struct FakeDrive {
    reply: Reply,
    requests: Mutex<Vec<(String, String)>>,
}

impl FakeDrive {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn serving(content: &'static [u8]) -> Self {
        Self::new(Reply::Content(content))
    }

    pub fn responding_with(status: u16) -> Self {
        Self::new(Reply::Status(status))
    }

    /// Sends `content` then fails the stream.
    pub fn breaking_after(content: &'static [u8]) -> Self {
        Self::new(Reply::BrokenStream(content))
    }

    /// The (file id, token) pairs requested so far.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileContentSource for FakeDrive {
    async fn fetch_file_content(
        &self,
        file_id: &str,
        token: &str,
    ) -> Result<FileContent, DownloadError> {
        self.requests
            .lock()
            .unwrap()
            .push((file_id.to_owned(), token.to_owned()));

        match self.reply {
            Reply::Content(content) => Ok(FileContent::from_bytes(content)),
            Reply::Status(status) => Err(DownloadError::UnexpectedStatus {
                status: reqwest::StatusCode::from_u16(status).unwrap(),
            }),
            Reply::BrokenStream(content) => {
                let body = futures::stream::iter(vec![
                    Ok(Bytes::from_static(content)),
                    Err(io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        "connection reset",
                    )),
                ]);
                Ok(FileContent::new(None, body.boxed()))
            }
        }
    }
}
