/// Status of one asynchronous fetch. Each fetch owns its own state, so one
/// request finishing never changes how another is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}
