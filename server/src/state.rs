use std::sync::Arc;

use crate::store::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}
