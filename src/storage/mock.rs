use super::{ObjectStore, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

/// One captured `put_object` call.
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

/// In-memory object store for tests.
///
/// Records every put so assertions can inspect exactly what the gateway
/// forwarded, and can be armed to fail every call with a fixed message.
#[derive(Clone, Default)]
pub struct MockObjectStore {
    puts: Arc<Mutex<Vec<RecordedPut>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every put fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let store = Self::default();
        *store.fail_with.lock().unwrap() = Some(message.into());
        store
    }

    pub fn recorded_puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(StorageError::Put { message });
        }

        self.puts.lock().unwrap().push(RecordedPut {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });

        Ok(())
    }
}
