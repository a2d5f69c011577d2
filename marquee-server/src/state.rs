use std::sync::Arc;

use marquee_core::TitleQueryEngine;

#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: Arc<TitleQueryEngine>,
}

impl AppState {
    pub fn new(engine: TitleQueryEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
