use bytes::Bytes;

/// A single file pulled out of a multipart request body.
///
/// Exists only for the duration of one request: built from the `file` form
/// field, handed to the storage call, and dropped once that call returns.
#[derive(Debug)]
pub struct UploadedFile {
    /// The file's bytes, buffered fully in memory
    pub bytes: Bytes,
    /// The browser-declared file name, passed through verbatim
    pub filename: String,
    /// The declared content type, defaulting to `application/octet-stream`
    pub content_type: String,
}

impl UploadedFile {
    /// Build the object key for this file: `<millisecond timestamp>_<name>`.
    ///
    /// The name is not sanitized, and two same-millisecond uploads of the
    /// same name produce the same key. Both are deliberate: the key scheme
    /// is part of the upload contract.
    pub fn object_key(&self, at_millis: i64) -> String {
        format!("{}_{}", at_millis, self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_named(name: &str) -> UploadedFile {
        UploadedFile {
            bytes: Bytes::from_static(b"content"),
            filename: name.to_string(),
            content_type: "application/octet-stream".to_string(),
        }
    }

    #[test]
    fn key_is_timestamp_then_name() {
        assert_eq!(file_named("a.txt").object_key(1700000000000), "1700000000000_a.txt");
    }

    #[test]
    fn name_passes_through_verbatim() {
        assert_eq!(file_named("../up one.txt").object_key(7), "7_../up one.txt");
        assert_eq!(file_named("").object_key(7), "7_");
    }
}
