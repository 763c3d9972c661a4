//! The paper store collaborator.
//!
//! The engines never talk to storage. The CLI and the `paperly-store`
//! crate use this trait to persist what the engines produce.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::merge::{merge, MetadataOverrides};
use crate::model::{CreatorId, Paper, PaperId, PaperMetadata, ParamsSummary, Question};

/// Persistence for papers. Stored papers are never modified.
#[async_trait]
pub trait PaperStore: Send + Sync {
    /// Backend name (e.g. "memory").
    fn name(&self) -> &str;

    /// Persist a new paper and return it with its assigned id.
    async fn create(
        &self,
        metadata: PaperMetadata,
        params: ParamsSummary,
        questions: Vec<Question>,
    ) -> Result<Paper, StoreError>;

    /// Fetch one paper.
    async fn get(&self, id: PaperId) -> Result<Paper, StoreError>;

    /// Papers created by `creator`, in id order.
    async fn list_by_creator(&self, creator: &CreatorId) -> Result<Vec<Paper>, StoreError>;

    /// Every paper, in id order.
    async fn list_all(&self) -> Result<Vec<Paper>, StoreError>;

    /// Papers whose title contains `term`, ignoring case.
    async fn search_by_title(&self, term: &str) -> Result<Vec<Paper>, StoreError>;
}

/// Case-insensitive title match shared by store backends.
pub fn title_matches(paper: &Paper, term: &str) -> bool {
    paper
        .metadata()
        .title
        .to_lowercase()
        .contains(&term.trim().to_lowercase())
}

/// Merge stored papers into a new stored paper.
///
/// Papers are fetched in the given order; the first missing id aborts the
/// merge. At least two ids are required. The sources are left as they are.
pub async fn merge_stored(
    store: &dyn PaperStore,
    ids: &[PaperId],
    overrides: MetadataOverrides,
    creator: CreatorId,
) -> Result<Paper, StoreError> {
    if ids.len() < 2 {
        return Err(StoreError::Validation(format!(
            "merging needs at least two papers, got {}",
            ids.len()
        )));
    }

    let mut sources = Vec::with_capacity(ids.len());
    for &id in ids {
        sources.push(store.get(id).await?);
    }

    let candidate = merge(&sources).into_candidate(overrides, creator);
    let params = ParamsSummary::from_questions(candidate.metadata(), candidate.questions());
    let metadata = candidate.metadata().clone();
    tracing::info!(
        sources = ?ids,
        questions = candidate.questions().len(),
        "saving merged paper '{}'",
        metadata.title
    );
    store
        .create(metadata, params, candidate.into_questions())
        .await
}
