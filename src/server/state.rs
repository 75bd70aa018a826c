use std::sync::Arc;

use crate::features::polls::PollViews;

#[derive(Clone)]
pub struct AppState {
    pub views: Arc<PollViews>,
}

impl AppState {
    pub fn new(views: Arc<PollViews>) -> Self {
        Self { views }
    }
}
