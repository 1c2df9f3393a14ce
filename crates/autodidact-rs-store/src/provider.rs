//! Document store interface and the JSONL file implementation.

use crate::error::StoreError;
use async_trait::async_trait;
use autodidact_rs_protocol::{ImprovementRecord, KnowledgeRecord, MessageRecord};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Maximum number of chat records returned by history queries.
pub const MESSAGE_HISTORY_LIMIT: usize = 50;
/// Maximum number of improvement runs returned by history queries.
pub const IMPROVEMENT_HISTORY_LIMIT: usize = 20;

#[async_trait]
/// Append-only store with three independent collections.
///
/// Records are never updated or removed. Reads return the newest records
/// first, ordered by timestamp and then by insertion order.
pub trait DocumentStore: Send + Sync {
    /// Append one side of a chat turn.
    async fn insert_message(&self, record: MessageRecord) -> Result<(), StoreError>;

    /// Append an improvement run.
    async fn insert_improvement(&self, record: ImprovementRecord) -> Result<(), StoreError>;

    /// Append knowledge extracted from an upload.
    async fn insert_knowledge(&self, record: KnowledgeRecord) -> Result<(), StoreError>;

    /// Most recent chat records, newest first.
    async fn recent_messages(&self, limit: usize) -> Result<Vec<MessageRecord>, StoreError>;

    /// Most recent improvement runs, newest first.
    async fn recent_improvements(
        &self,
        limit: usize,
    ) -> Result<Vec<ImprovementRecord>, StoreError>;
}

/// Collections kept by the store, one JSONL file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Messages,
    Improvements,
    Knowledge,
}

impl Collection {
    fn file_name(self) -> &'static str {
        match self {
            Collection::Messages => "messages.jsonl",
            Collection::Improvements => "improvements.jsonl",
            Collection::Knowledge => "knowledge.jsonl",
        }
    }
}

/// File-backed store writing one JSONL file per collection.
#[derive(Debug)]
pub struct FileDocumentStore {
    /// Root directory for collection files.
    root: PathBuf,
    /// Held for every append and every read, so readers never see half a line.
    io_lock: Mutex<()>,
}

impl FileDocumentStore {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        info!("initialized file document store (root={})", root.display());
        Ok(Self {
            root,
            io_lock: Mutex::new(()),
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    fn append<T: Serialize>(&self, collection: Collection, record: &T) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let path = self.collection_path(collection);
        let _guard = self.io_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;
        if !ends_with_newline(&mut file)? {
            // Terminate a line left unfinished by an interrupted write.
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())?;
        debug!(
            "appended record (collection={:?}, bytes={})",
            collection,
            line.len()
        );
        Ok(())
    }

    /// Decode every intact line; lines that fail to decode are logged and skipped.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(collection);
        let mut contents = String::new();
        {
            let _guard = self.io_lock.lock();
            match std::fs::File::open(&path) {
                Ok(mut file) => file.read_to_string(&mut contents)?,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
                Err(err) => return Err(err.into()),
            };
        }
        let mut records = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(err) => warn!(
                    "skipping unreadable record (collection={:?}, line={}): {err}",
                    collection,
                    idx + 1
                ),
            }
        }
        Ok(records)
    }
}

/// Whether `file` is empty or its last byte is a newline.
fn ends_with_newline(file: &mut std::fs::File) -> Result<bool, StoreError> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn insert_message(&self, record: MessageRecord) -> Result<(), StoreError> {
        self.append(Collection::Messages, &record)
    }

    async fn insert_improvement(&self, record: ImprovementRecord) -> Result<(), StoreError> {
        self.append(Collection::Improvements, &record)
    }

    async fn insert_knowledge(&self, record: KnowledgeRecord) -> Result<(), StoreError> {
        self.append(Collection::Knowledge, &record)
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<MessageRecord>, StoreError> {
        let records: Vec<MessageRecord> = self.load(Collection::Messages)?;
        let recent = newest_first(records, limit, |record| record.timestamp());
        debug!("recent messages (returned={})", recent.len());
        Ok(recent)
    }

    async fn recent_improvements(
        &self,
        limit: usize,
    ) -> Result<Vec<ImprovementRecord>, StoreError> {
        let records: Vec<ImprovementRecord> = self.load(Collection::Improvements)?;
        let recent = newest_first(records, limit, |record| {
            record.timestamp.as_str()
        });
        debug!("recent improvements (returned={})", recent.len());
        Ok(recent)
    }
}

/// Order records newest first and keep at most `limit`.
///
/// Records sharing a timestamp keep reverse insertion order, so the record
/// written last is returned first.
pub fn newest_first<T, F>(records: Vec<T>, limit: usize, timestamp: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut indexed: Vec<(usize, T)> = records.into_iter().enumerate().collect();
    indexed.sort_by(|(a_idx, a), (b_idx, b)| {
        timestamp(b)
            .cmp(timestamp(a))
            .then_with(|| b_idx.cmp(a_idx))
    });
    indexed
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect()
}
