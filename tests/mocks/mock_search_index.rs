use deed_archive::error::{ApiError, ApiResult};
use deed_archive::models::{BulkSummary, DeedHit, IndexedDeed};
use deed_archive::repositories::SearchIndex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory search index for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockSearchIndex {
    reachable: bool,
    indices: Arc<Mutex<HashMap<String, Value>>>,
    documents: Arc<Mutex<HashMap<String, IndexedDeed>>>,
    hits: Arc<Mutex<Vec<DeedHit>>>,
    queries: Arc<Mutex<Vec<Value>>>,
    rejected: Arc<Mutex<Vec<String>>>,
    batch_lens: Arc<Mutex<Vec<usize>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockSearchIndex {
    pub fn new() -> Self {
        Self {
            reachable: true,
            indices: Arc::new(Mutex::new(HashMap::new())),
            documents: Arc::new(Mutex::new(HashMap::new())),
            hits: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            rejected: Arc::new(Mutex::new(Vec::new())),
            batch_lens: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A cluster that fails every call.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    pub fn with_existing_index(self, name: &str) -> Self {
        self.indices
            .lock()
            .unwrap()
            .insert(name.to_string(), Value::Null);
        self
    }

    pub fn set_hits(&self, hits: Vec<DeedHit>) {
        *self.hits.lock().unwrap() = hits;
    }

    /// Report these ids as failed items in bulk responses.
    pub fn reject_ids(&self, ids: &[&str]) {
        let mut rejected = self.rejected.lock().unwrap();
        rejected.extend(ids.iter().map(|id| id.to_string()));
    }

    /// Largest number of documents sent in one bulk call.
    pub fn max_batch_len(&self) -> usize {
        self.batch_lens.lock().unwrap().iter().copied().max().unwrap_or(0)
    }

    pub fn document(&self, id: &str) -> Option<IndexedDeed> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn created_body(&self, name: &str) -> Option<Value> {
        self.indices.lock().unwrap().get(name).cloned()
    }

    pub fn queries(&self) -> Vec<Value> {
        self.queries.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_reachable(&self) -> ApiResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(ApiError::HttpError("connection refused".to_string()))
        }
    }
}

impl Default for MockSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex for MockSearchIndex {
    fn ping(&self) -> bool {
        self.track_call("ping");
        self.reachable
    }

    fn index_exists(&self, index: &str) -> ApiResult<bool> {
        self.track_call("index_exists");
        self.check_reachable()?;
        Ok(self.indices.lock().unwrap().contains_key(index))
    }

    fn create_index(&self, index: &str, body: &Value) -> ApiResult<()> {
        self.track_call("create_index");
        self.check_reachable()?;

        let mut indices = self.indices.lock().unwrap();
        if indices.contains_key(index) {
            return Err(ApiError::ApiError {
                status: 400,
                message: format!("resource_already_exists_exception: {}", index),
            });
        }
        indices.insert(index.to_string(), body.clone());
        Ok(())
    }

    fn bulk_index(&self, _index: &str, deeds: &[IndexedDeed]) -> ApiResult<BulkSummary> {
        self.track_call("bulk_index");
        self.check_reachable()?;

        self.batch_lens.lock().unwrap().push(deeds.len());
        let rejected = self.rejected.lock().unwrap();
        let mut documents = self.documents.lock().unwrap();
        let mut summary = BulkSummary::default();
        for deed in deeds {
            if rejected.contains(&deed.document_id) {
                summary.failed += 1;
                summary.errors.push(format!("{}: rejected", deed.document_id));
            } else {
                documents.insert(deed.document_id.clone(), deed.clone());
                summary.indexed += 1;
            }
        }
        Ok(summary)
    }

    fn search(&self, _index: &str, body: &Value, size: usize) -> ApiResult<Vec<DeedHit>> {
        self.track_call("search");
        self.check_reachable()?;

        self.queries.lock().unwrap().push(body.clone());
        Ok(self.hits.lock().unwrap().iter().take(size).cloned().collect())
    }
}
