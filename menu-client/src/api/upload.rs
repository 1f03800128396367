//! Image upload endpoints

use std::path::Path;

use reqwest::multipart::{Form, Part};
use shared::client::UploadResponse;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Largest image the backend accepts
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub struct UploadApi<'a, H: HttpClient> {
    http: &'a H,
}

impl<'a, H: HttpClient> UploadApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Upload a local image file, returning the stored relative URL
    pub async fn upload_image(&self, path: &Path) -> ClientResult<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Validation(format!("not a file: {}", path.display())))?
            .to_string();
        check_extension(&file_name)?;

        let len = tokio::fs::metadata(path).await?.len();
        if len == 0 {
            return Err(ClientError::Validation("file is empty".into()));
        }
        if len > MAX_UPLOAD_BYTES {
            return Err(ClientError::Api {
                code: shared::ErrorCode::FileTooLarge,
                message: format!("file too large: {} bytes (max {})", len, MAX_UPLOAD_BYTES),
                details: None,
            });
        }
        let bytes = tokio::fs::read(path).await?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime.essence_str())?;
        let form = Form::new().part("file", part);

        let resp: UploadResponse = self.http.post_multipart("upload/image", form).await?;
        tracing::info!(file = %file_name, url = %resp.url, "Image uploaded");
        Ok(resp.url)
    }

    /// Delete a stored image by its file name
    pub async fn delete_image(&self, file_name: &str) -> ClientResult<()> {
        self.http
            .delete(&format!("upload/image/{}", file_name))
            .await
    }
}

fn check_extension(file_name: &str) -> ClientResult<()> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ClientError::Api {
            code: shared::ErrorCode::UnsupportedFileFormat,
            message: format!("unsupported image type: {}", file_name),
            details: None,
        }),
    }
}
