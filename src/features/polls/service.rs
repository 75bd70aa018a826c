use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;
use tracing::info;

use crate::core::error::AppError;
use crate::features::polls::dto::{QuestionId, RequestContext};
use crate::features::polls::render::{ResponseRenderer, TemplateContext};
use crate::features::polls::store::{QuestionStore, lookup};

pub const LATEST_QUESTION_LIMIT: usize = 5;
pub const INDEX_TEMPLATE: &str = "polls/index.html";
pub const DETAIL_TEMPLATE: &str = "polls/detail.html";

pub struct PollViews {
    store: Arc<dyn QuestionStore>,
    renderer: Arc<dyn ResponseRenderer>,
}

impl PollViews {
    pub fn new(store: Arc<dyn QuestionStore>, renderer: Arc<dyn ResponseRenderer>) -> Self {
        Self { store, renderer }
    }

    pub async fn index(&self, request: &RequestContext) -> Result<Response, AppError> {
        let latest_question_list = self.store.latest(LATEST_QUESTION_LIMIT).await?;
        info!(target: "polls", count = latest_question_list.len(), "rendering index");

        let mut context = TemplateContext::new();
        context.insert(
            "latest_question_list".to_string(),
            to_context_value(&latest_question_list)?,
        );
        self.renderer.render(INDEX_TEMPLATE, context, request)
    }

    pub async fn detail(
        &self,
        request: &RequestContext,
        question_id: QuestionId,
    ) -> Result<Response, AppError> {
        let question = lookup(self.store.as_ref(), question_id).await?;

        let mut context = TemplateContext::new();
        context.insert("question".to_string(), to_context_value(&question)?);
        self.renderer.render(DETAIL_TEMPLATE, context, request)
    }

    pub fn results(&self, _request: &RequestContext, question_id: QuestionId) -> Response {
        self.renderer.text(results_message(question_id))
    }

    pub fn vote(&self, _request: &RequestContext, question_id: QuestionId) -> Response {
        self.renderer.text(vote_message(question_id))
    }
}

pub fn results_message(question_id: QuestionId) -> String {
    format!("You are looking at the results of question {question_id}.")
}

pub fn vote_message(question_id: QuestionId) -> String {
    format!("You are voting on question {question_id}.")
}

fn to_context_value<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|err| AppError::internal(format!("failed to build template context: {err}")))
}
