//! Hand-built `multipart/form-data` bodies for file uploads.
//!
//! Upload bodies always have exactly two parts: the binary `file` part and a
//! `purpose` text part. Each body gets its own random boundary.

use uuid::Uuid;

/// `purpose` value sent with every upload.
pub const UPLOAD_PURPOSE: &str = "assistants";

/// Prefix of every generated boundary.
pub const BOUNDARY_PREFIX: &str = "----hire-ai-";

const CRLF: &[u8] = b"\r\n";

/// Fresh boundary: the prefix followed by 32 random hex digits.
pub fn random_boundary() -> String {
    format!("{BOUNDARY_PREFIX}{}", Uuid::new_v4().simple())
}

/// Encoded multipart body plus the boundary announced in its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Builds an upload body with a random boundary.
    pub fn file_upload(filename: &str, data: &[u8], purpose: &str) -> Self {
        Self::file_upload_with_boundary(random_boundary(), filename, data, purpose)
    }

    /// Builds an upload body with a caller-chosen boundary.
    pub fn file_upload_with_boundary(
        boundary: impl Into<String>,
        filename: &str,
        data: &[u8],
        purpose: &str,
    ) -> Self {
        let boundary = boundary.into();
        let mut bytes = Vec::with_capacity(data.len() + 256);

        push_delimiter(&mut bytes, &boundary);
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"",
                quote_filename(filename)
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(b"Content-Type: application/octet-stream");
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(CRLF);

        push_delimiter(&mut bytes, &boundary);
        bytes.extend_from_slice(b"Content-Disposition: form-data; name=\"purpose\"");
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(CRLF);
        bytes.extend_from_slice(purpose.as_bytes());
        bytes.extend_from_slice(CRLF);

        bytes.extend_from_slice(format!("--{boundary}--").as_bytes());
        bytes.extend_from_slice(CRLF);

        Self { boundary, bytes }
    }

    /// Value for the request `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[cfg(test)]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn push_delimiter(bytes: &mut Vec<u8>, boundary: &str) {
    bytes.extend_from_slice(format!("--{boundary}").as_bytes());
    bytes.extend_from_slice(CRLF);
}

// Quotes and line breaks would end the header early.
fn quote_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' => "%22".to_string(),
            '\r' | '\n' => " ".to_string(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn body_has_file_part_then_purpose_part() {
        let body = MultipartBody::file_upload_with_boundary("XYZ", "notes.txt", b"hello", "assistants");

        let expected = concat!(
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n",
            "Content-Type: application/octet-stream\r\n",
            "\r\n",
            "hello\r\n",
            "--XYZ\r\n",
            "Content-Disposition: form-data; name=\"purpose\"\r\n",
            "\r\n",
            "assistants\r\n",
            "--XYZ--\r\n",
        );
        assert_eq!(body.content_type(), "multipart/form-data; boundary=XYZ");
        assert_eq!(String::from_utf8_lossy(&body.into_bytes()), expected);
    }

    #[test]
    fn binary_payload_is_kept_verbatim() {
        let data = [0u8, 159, 146, 150, 13, 10];
        let body = MultipartBody::file_upload_with_boundary("B", "blob.bin", &data, UPLOAD_PURPOSE);

        let bytes = body.into_bytes();
        assert!(bytes.windows(data.len()).any(|window| window == data));
    }

    #[test]
    fn random_boundaries_are_prefixed_and_unique() {
        let first = random_boundary();
        let second = random_boundary();

        assert!(first.starts_with(BOUNDARY_PREFIX));
        assert_eq!(first.len(), BOUNDARY_PREFIX.len() + 32);
        assert_ne!(first, second);
    }

    #[test]
    fn filename_quotes_cannot_break_the_header() {
        let body = MultipartBody::file_upload_with_boundary("B", "a\"b\r\n.txt", b"", "p");
        let text = String::from_utf8_lossy(body.as_bytes()).into_owned();

        assert!(text.contains("filename=\"a%22b  .txt\""));
    }
}
