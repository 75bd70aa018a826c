use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use sled::Tree;
use tokio::sync::RwLock;
use tokio::task;
use tracing::{info, warn};

use crate::core::error::AppError;
use crate::features::polls::dto::{Question, QuestionId};

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Most recently published questions first, at most `limit` of them.
    async fn latest(&self, limit: usize) -> Result<Vec<Question>, AppError>;
    async fn get(&self, id: QuestionId) -> Result<Option<Question>, AppError>;
    async fn insert(&self, question: Question) -> Result<(), AppError>;
}

/// Fetch a question or fail with `NotFound`.
pub async fn lookup(store: &dyn QuestionStore, id: QuestionId) -> Result<Question, AppError> {
    match store.get(id).await? {
        Some(question) => Ok(question),
        None => {
            warn!(target: "polls", %id, "question not found");
            Err(AppError::not_found(format!("question {id} does not exist")))
        }
    }
}

fn newest_first(mut questions: Vec<Question>, limit: usize) -> Vec<Question> {
    questions.sort_by(|a, b| {
        b.publication_date
            .cmp(&a.publication_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    questions.truncate(limit);
    questions
}

pub struct SledQuestionStore {
    tree: Tree,
}

impl SledQuestionStore {
    pub fn new(tree: Tree) -> Self {
        Self { tree }
    }

    pub fn open(db: &sled::Db) -> Result<Self, AppError> {
        let tree = db
            .open_tree("questions")
            .map_err(|err| AppError::storage(format!("failed to open questions tree: {err}")))?;
        Ok(Self::new(tree))
    }
}

fn decode_question(bytes: &[u8]) -> Result<Question, AppError> {
    serde_json::from_slice(bytes)
        .map_err(|err| AppError::storage(format!("failed to decode stored question: {err}")))
}

#[async_trait]
impl QuestionStore for SledQuestionStore {
    async fn latest(&self, limit: usize) -> Result<Vec<Question>, AppError> {
        let tree = self.tree.clone();

        let questions = task::spawn_blocking(move || -> Result<Vec<Question>, AppError> {
            tree.iter()
                .values()
                .map(|value| {
                    let bytes = value
                        .map_err(|err| AppError::storage(format!("question scan failed: {err}")))?;
                    decode_question(&bytes)
                })
                .collect()
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))??;

        Ok(newest_first(questions, limit))
    }

    async fn get(&self, id: QuestionId) -> Result<Option<Question>, AppError> {
        let tree = self.tree.clone();

        task::spawn_blocking(move || -> Result<Option<Question>, AppError> {
            let maybe_bytes = tree
                .get(id.0.to_be_bytes())
                .map_err(|err| AppError::storage(format!("question lookup failed: {err}")))?;

            maybe_bytes.map(|bytes| decode_question(&bytes)).transpose()
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))?
    }

    async fn insert(&self, question: Question) -> Result<(), AppError> {
        let data = serde_json::to_vec(&question)
            .map_err(|err| AppError::internal(format!("failed to serialise question: {err}")))?;

        let tree = self.tree.clone();
        let key = question.id.0.to_be_bytes().to_vec();
        task::spawn_blocking(move || -> Result<(), AppError> {
            tree.insert(key, data)
                .map_err(|err| AppError::storage(format!("failed to persist question: {err}")))?;
            Ok(())
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))??;

        self.tree
            .flush_async()
            .await
            .map_err(|err| AppError::storage(format!("failed to flush questions: {err}")))?;

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionStore {
    questions: RwLock<BTreeMap<QuestionId, Question>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let map = questions
            .into_iter()
            .map(|question| (question.id, question))
            .collect();
        Self {
            questions: RwLock::new(map),
        }
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn latest(&self, limit: usize) -> Result<Vec<Question>, AppError> {
        let guard = self.questions.read().await;
        Ok(newest_first(guard.values().cloned().collect(), limit))
    }

    async fn get(&self, id: QuestionId) -> Result<Option<Question>, AppError> {
        let guard = self.questions.read().await;
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, question: Question) -> Result<(), AppError> {
        let mut guard = self.questions.write().await;
        guard.insert(question.id, question);
        Ok(())
    }
}

/// Load a JSON array of questions into `store`, returning how many were inserted.
pub async fn load_fixture(store: &dyn QuestionStore, path: &Path) -> Result<usize, AppError> {
    let raw = tokio::fs::read(path).await.map_err(|err| {
        AppError::configuration(format!("failed to read fixture {}: {err}", path.display()))
    })?;
    let questions: Vec<Question> = serde_json::from_slice(&raw).map_err(|err| {
        AppError::configuration(format!("invalid fixture {}: {err}", path.display()))
    })?;

    let count = questions.len();
    for question in questions {
        store.insert(question).await?;
    }

    info!(target: "polls", count, path = %path.display(), "loaded question fixture");
    Ok(count)
}
