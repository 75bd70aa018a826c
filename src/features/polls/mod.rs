pub mod dto;
pub mod handler;
pub mod render;
pub mod service;
pub mod store;

pub use dto::{Question, QuestionId, RequestContext};
pub use handler::{handle_detail, handle_index, handle_results, handle_vote};
pub use render::{ResponseRenderer, TemplateContext, TeraRenderer};
pub use service::PollViews;
pub use store::{InMemoryQuestionStore, QuestionStore, SledQuestionStore, load_fixture, lookup};
