//! Directory-of-JSON-files paper store.
//!
//! Each paper lives in `<dir>/paper-<id>.json` as a pretty-printed
//! [`StoredPaper`]. Files are written once and never rewritten.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use paperly_core::error::StoreError;
use paperly_core::model::{CreatorId, Paper, PaperId, PaperMetadata, ParamsSummary, Question};
use paperly_core::traits::{title_matches, PaperStore};

use crate::{check_new_paper, StoredPaper};

const FILE_PREFIX: &str = "paper-";
const FILE_SUFFIX: &str = ".json";

/// A store backed by a directory of JSON files.
pub struct JsonStore {
    dir: PathBuf,
    /// Serializes id allocation within this process.
    create_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            create_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: PaperId) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", id.0))
    }

    /// Ids of every paper file in the directory, ascending.
    async fn ids(&self) -> Result<Vec<PaperId>, StoreError> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if let Some(id) = entry.file_name().to_str().and_then(parse_file_name) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn read(&self, id: PaperId) -> Result<StoredPaper, StoreError> {
        let content = match tokio::fs::read_to_string(self.path_for(id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Every readable paper matching `keep`, in id order.
    ///
    /// Unreadable files are skipped with a warning so one bad file does not
    /// hide the rest of the store.
    async fn filtered(&self, keep: impl Fn(&Paper) -> bool) -> Result<Vec<Paper>, StoreError> {
        let mut papers = Vec::new();
        for id in self.ids().await? {
            match self.read(id).await {
                Ok(stored) if keep(&stored.paper) => papers.push(stored.paper),
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping {}: {}", self.path_for(id).display(), e),
            }
        }
        Ok(papers)
    }

    /// The params summary a paper was created with.
    pub async fn params(&self, id: PaperId) -> Result<ParamsSummary, StoreError> {
        Ok(self.read(id).await?.params)
    }
}

/// Write a file that must not exist yet. Existing papers are never overwritten.
async fn write_new(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(contents).await?;
    file.flush().await
}

fn parse_file_name(name: &str) -> Option<PaperId> {
    name.strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)?
        .parse()
        .ok()
}

#[async_trait]
impl PaperStore for JsonStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn create(
        &self,
        metadata: PaperMetadata,
        params: ParamsSummary,
        questions: Vec<Question>,
    ) -> Result<Paper, StoreError> {
        check_new_paper(&metadata, &questions)?;

        let _guard = self.create_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;
        let id = PaperId(self.ids().await?.last().map_or(1, |last| last.0 + 1));

        let paper = Paper::candidate(metadata, questions).persisted(id, Utc::now());
        let stored = StoredPaper {
            paper: paper.clone(),
            params,
        };
        let json = serde_json::to_string_pretty(&stored)?;
        let path = self.path_for(id);
        write_new(&path, json.as_bytes()).await?;

        tracing::info!(%id, path = %path.display(), "paper created");
        Ok(paper)
    }

    async fn get(&self, id: PaperId) -> Result<Paper, StoreError> {
        Ok(self.read(id).await?.paper)
    }

    async fn list_by_creator(&self, creator: &CreatorId) -> Result<Vec<Paper>, StoreError> {
        self.filtered(|p| &p.metadata().creator == creator).await
    }

    async fn list_all(&self) -> Result<Vec<Paper>, StoreError> {
        self.filtered(|_| true).await
    }

    async fn search_by_title(&self, term: &str) -> Result<Vec<Paper>, StoreError> {
        self.filtered(|p| title_matches(p, term)).await
    }
}
