use async_trait::async_trait;
use autodidact_rs_protocol::{ImprovementRecord, KnowledgeRecord, MessageRecord};
use autodidact_rs_store::{DocumentStore, StoreError, newest_first};
use parking_lot::Mutex;

/// In-process store with the same ordering rules as the file store.
#[derive(Default)]
pub struct MemoryStore {
    messages: Mutex<Vec<MessageRecord>>,
    improvements: Mutex<Vec<ImprovementRecord>>,
    knowledge: Mutex<Vec<KnowledgeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored message, in insertion order.
    pub fn messages(&self) -> Vec<MessageRecord> {
        self.messages.lock().clone()
    }

    pub fn improvements(&self) -> Vec<ImprovementRecord> {
        self.improvements.lock().clone()
    }

    pub fn knowledge(&self) -> Vec<KnowledgeRecord> {
        self.knowledge.lock().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_message(&self, record: MessageRecord) -> Result<(), StoreError> {
        self.messages.lock().push(record);
        Ok(())
    }

    async fn insert_improvement(&self, record: ImprovementRecord) -> Result<(), StoreError> {
        self.improvements.lock().push(record);
        Ok(())
    }

    async fn insert_knowledge(&self, record: KnowledgeRecord) -> Result<(), StoreError> {
        self.knowledge.lock().push(record);
        Ok(())
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<MessageRecord>, StoreError> {
        let records = self.messages();
        Ok(newest_first(records, limit, |record| record.timestamp()))
    }

    async fn recent_improvements(
        &self,
        limit: usize,
    ) -> Result<Vec<ImprovementRecord>, StoreError> {
        let records = self.improvements();
        Ok(newest_first(records, limit, |record| record.timestamp.as_str()))
    }
}

/// Store whose every operation fails as if the backend were down.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable("store offline".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_message(&self, _record: MessageRecord) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn insert_improvement(&self, _record: ImprovementRecord) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn insert_knowledge(&self, _record: KnowledgeRecord) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn recent_messages(&self, _limit: usize) -> Result<Vec<MessageRecord>, StoreError> {
        Err(unavailable())
    }

    async fn recent_improvements(
        &self,
        _limit: usize,
    ) -> Result<Vec<ImprovementRecord>, StoreError> {
        Err(unavailable())
    }
}
