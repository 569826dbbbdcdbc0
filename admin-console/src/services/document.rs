use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default, Clone)]
struct HeadState {
    title: String,
    icon: Option<String>,
}

/// Document-level title and icon the stores and the route guard write to.
#[derive(Debug, Default)]
pub struct DocumentHead {
    state: RwLock<HeadState>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .title
            .clone()
    }

    pub fn icon(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .icon
            .clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).title = title.into();
    }

    pub fn set_icon(&self, icon: impl Into<String>) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).icon = Some(icon.into());
    }
}
