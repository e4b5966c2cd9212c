//! Chunked multipart uploads
//!
//! Files and deployment archives are sent as `multipart/form-data`. Anything
//! larger than [`CHUNK_SIZE`] is split: each chunk is its own request with a
//! `Content-Range` header, and every chunk after the first carries the id of
//! the upload in `X-Appwrite-ID` so the server appends to it.

use std::ops::Range;
use std::path::Path;

use playground_core::domain::resource::Resource;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::BaasClient;
use crate::error::{ClientError, Result};

/// Maximum bytes sent in a single upload request
pub(crate) const CHUNK_SIZE: usize = 5 * 1024 * 1024;

const ID_HEADER: &str = "x-appwrite-id";

/// A multipart upload: text fields plus one file field
pub(crate) struct Upload<'a> {
    pub path: &'a str,
    pub fields: Vec<(&'static str, String)>,
    pub file_field: &'static str,
    pub file_path: &'a Path,
}

/// Splits `total` bytes into chunk ranges of at most `chunk_size`
pub(crate) fn chunk_ranges(total: usize, chunk_size: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return vec![0..0];
    }

    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}

/// `Content-Range` value for a chunk; the end offset is inclusive
pub(crate) fn content_range(range: &Range<usize>, total: usize) -> String {
    format!("bytes {}-{}/{}", range.start, range.end.saturating_sub(1), total)
}

impl BaasClient {
    pub(crate) async fn upload(&self, upload: Upload<'_>) -> Result<Resource> {
        self.upload_in_chunks(upload, CHUNK_SIZE).await
    }

    async fn upload_in_chunks(&self, upload: Upload<'_>, chunk_size: usize) -> Result<Resource> {
        let data = tokio::fs::read(upload.file_path)
            .await
            .map_err(|source| ClientError::Io {
                path: upload.file_path.display().to_string(),
                source,
            })?;

        let file_name = upload
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!(
                    "{} is not a file path",
                    upload.file_path.display()
                ))
            })?;

        let total = data.len();

        if total <= chunk_size {
            let form = build_form(&upload.fields, upload.file_field, &file_name, data);
            let response = self
                .request(Method::POST, upload.path)
                .multipart(form)
                .send()
                .await?;

            return self.handle_response(response).await;
        }

        let ranges = chunk_ranges(total, chunk_size);
        debug!(
            "Uploading {} ({} bytes) in {} chunks",
            file_name,
            total,
            ranges.len()
        );

        let mut uploaded: Option<Resource> = None;

        for range in ranges {
            let chunk = data[range.clone()].to_vec();
            let form = build_form(&upload.fields, upload.file_field, &file_name, chunk);

            let mut request = self
                .request(Method::POST, upload.path)
                .header(reqwest::header::CONTENT_RANGE, content_range(&range, total));

            if let Some(resource) = &uploaded {
                request = request.header(ID_HEADER, resource.id.as_str());
            }

            let response = request.multipart(form).send().await?;
            uploaded = Some(self.handle_response(response).await?);
        }

        uploaded.ok_or_else(|| ClientError::InvalidRequest("empty upload".to_string()))
    }
}

fn build_form(
    fields: &[(&'static str, String)],
    file_field: &'static str,
    file_name: &str,
    data: Vec<u8>,
) -> Form {
    let form = fields
        .iter()
        .fold(Form::new(), |form, (name, value)| form.text(*name, value.clone()));

    form.part(file_field, Part::bytes(data).file_name(file_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Canned, CannedServer, StatusCode};
    use reqwest::header::CONTENT_RANGE;
    use serde_json::json;

    const FILES_PATH: &str = "/storage/buckets/b1/files";

    fn file_upload(file_path: &Path) -> Upload<'_> {
        Upload {
            path: FILES_PATH,
            fields: vec![("fileId", "file1".to_string())],
            file_field: "file",
            file_path,
        }
    }

    #[test]
    fn test_chunk_ranges_cover_everything() {
        let ranges = chunk_ranges(12, 5);
        assert_eq!(ranges, vec![0..5, 5..10, 10..12]);
    }

    #[test]
    fn test_chunk_ranges_exact_multiple() {
        let ranges = chunk_ranges(10, 5);
        assert_eq!(ranges, vec![0..5, 5..10]);
    }

    #[test]
    fn test_chunk_ranges_empty_input() {
        assert_eq!(chunk_ranges(0, 5), vec![0..0]);
    }

    #[test]
    fn test_content_range_is_inclusive() {
        assert_eq!(content_range(&(0..5), 12), "bytes 0-4/12");
        assert_eq!(content_range(&(10..12), 12), "bytes 10-11/12");
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let client = BaasClient::new("http://localhost/v1");
        let err = client
            .upload(Upload {
                path: "/storage/buckets/b1/files",
                fields: vec![("fileId", "f1".to_string())],
                file_field: "file",
                file_path: Path::new("/definitely/not/here.jpg"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Io { .. }));
    }

    #[tokio::test]
    async fn test_small_file_is_sent_in_one_request() {
        let server = CannedServer::start(|_| Canned::created(json!({ "$id": "file1" })))
            .await
            .unwrap();
        let path = testing::temp_file("upload-small.txt", b"hello").unwrap();

        let file = server.client().upload(file_upload(&path)).await.unwrap();

        let requests = server.requests();
        assert_eq!(file.id, "file1");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header(CONTENT_RANGE.as_str()), None);
        assert_eq!(requests[0].header(ID_HEADER), None);

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"fileId\""));
        assert!(body.contains("filename=\"playground-"));
        assert!(body.contains("hello"));
    }

    #[tokio::test]
    async fn test_chunks_carry_range_and_upload_id() {
        let server = CannedServer::start(|_| {
            Canned::created(json!({ "$id": "file1", "chunksTotal": 3 }))
        })
        .await
        .unwrap();
        let path = testing::temp_file("upload-chunked.bin", b"0123456789").unwrap();

        let file = server
            .client()
            .upload_in_chunks(file_upload(&path), 4)
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(file.id, "file1");
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.line() == format!("POST {}", FILES_PATH)));

        let ranges: Vec<_> = requests
            .iter()
            .map(|r| r.header(CONTENT_RANGE.as_str()))
            .collect();
        assert_eq!(
            ranges,
            vec![
                Some("bytes 0-3/10"),
                Some("bytes 4-7/10"),
                Some("bytes 8-9/10")
            ]
        );

        let ids: Vec<_> = requests.iter().map(|r| r.header(ID_HEADER)).collect();
        assert_eq!(ids, vec![None, Some("file1"), Some("file1")]);

        assert!(String::from_utf8_lossy(&requests[1].body).contains("4567"));
        assert!(String::from_utf8_lossy(&requests[2].body).contains("89"));
    }

    #[tokio::test]
    async fn test_failed_chunk_stops_the_upload() {
        let server = CannedServer::start(|request| {
            match request.header(CONTENT_RANGE.as_str()) {
                Some(range) if range.starts_with("bytes 4-") => {
                    Canned::error(StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable")
                }
                _ => Canned::created(json!({ "$id": "file1" })),
            }
        })
        .await
        .unwrap();
        let path = testing::temp_file("upload-broken.bin", b"0123456789").unwrap();

        let err = server
            .client()
            .upload_in_chunks(file_upload(&path), 4)
            .await
            .unwrap_err();

        assert!(err.is_server_error());
        assert_eq!(server.requests().len(), 2);
    }
}
