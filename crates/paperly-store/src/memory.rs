//! In-memory paper store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use paperly_core::error::StoreError;
use paperly_core::model::{CreatorId, Paper, PaperId, PaperMetadata, ParamsSummary, Question};
use paperly_core::traits::{title_matches, PaperStore};

use crate::{check_new_paper, StoredPaper};

/// A store that keeps papers in process memory. Useful for tests and for
/// one-off practice runs that should leave nothing behind.
#[derive(Default)]
pub struct MemoryStore {
    papers: RwLock<BTreeMap<PaperId, StoredPaper>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The params summary a paper was created with.
    pub async fn params(&self, id: PaperId) -> Option<ParamsSummary> {
        self.papers.read().await.get(&id).map(|s| s.params.clone())
    }

    pub async fn len(&self) -> usize {
        self.papers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.papers.read().await.is_empty()
    }

    async fn filtered(&self, keep: impl Fn(&Paper) -> bool) -> Vec<Paper> {
        self.papers
            .read()
            .await
            .values()
            .filter(|s| keep(&s.paper))
            .map(|s| s.paper.clone())
            .collect()
    }
}

#[async_trait]
impl PaperStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create(
        &self,
        metadata: PaperMetadata,
        params: ParamsSummary,
        questions: Vec<Question>,
    ) -> Result<Paper, StoreError> {
        check_new_paper(&metadata, &questions)?;

        let mut papers = self.papers.write().await;
        let id = PaperId(papers.keys().next_back().map_or(1, |last| last.0 + 1));
        let paper = Paper::candidate(metadata, questions).persisted(id, Utc::now());
        papers.insert(
            id,
            StoredPaper {
                paper: paper.clone(),
                params,
            },
        );

        tracing::info!(%id, title = %paper.metadata().title, "paper created");
        Ok(paper)
    }

    async fn get(&self, id: PaperId) -> Result<Paper, StoreError> {
        self.papers
            .read()
            .await
            .get(&id)
            .map(|s| s.paper.clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_by_creator(&self, creator: &CreatorId) -> Result<Vec<Paper>, StoreError> {
        Ok(self.filtered(|p| &p.metadata().creator == creator).await)
    }

    async fn list_all(&self) -> Result<Vec<Paper>, StoreError> {
        Ok(self.filtered(|_| true).await)
    }

    async fn search_by_title(&self, term: &str) -> Result<Vec<Paper>, StoreError> {
        Ok(self.filtered(|p| title_matches(p, term)).await)
    }
}
