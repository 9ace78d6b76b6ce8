use super::{ChatError, ChatResult, LLMBackend};
use crate::types::ModelDescriptor;
use std::sync::Arc;

/// Reads the installed models for the model selector.
pub struct ModelDirectory<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: LLMBackend + ?Sized> ModelDirectory<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Models in server order. The selector cannot work without one, so an
    /// empty list is an error.
    pub async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>> {
        let models = self.backend.list_models().await?;
        if models.is_empty() {
            return Err(ChatError::NoModels);
        }
        Ok(models)
    }
}

/// The model to preselect: `preferred` when installed, else the first one.
pub fn default_model<'a>(
    models: &'a [ModelDescriptor],
    preferred: Option<&str>,
) -> Option<&'a ModelDescriptor> {
    preferred
        .and_then(|name| models.iter().find(|m| m.name == name))
        .or_else(|| models.first())
}
