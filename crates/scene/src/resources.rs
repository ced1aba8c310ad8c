//! Asynchronous model loading seam.
//!
//! Loading is the only suspend point in the engine. Callers take a
//! `runtime::LoadToken` before awaiting and discard the result if the token
//! went stale while the load was in flight.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// Where a model comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelSource {
    /// A model shipped with the application, by entity name.
    Bundled(String),
    /// A user-imported model file.
    File(String),
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Bundled(name) => write!(f, "bundle:{name}"),
            ModelSource::File(url) => write!(f, "{url}"),
        }
    }
}

/// A loaded, still-encoded model. Decoding belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResource {
    pub source: ModelSource,
    pub data: Arc<[u8]>,
}

impl ModelResource {
    pub fn new(source: ModelSource, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            source,
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    NotFound(ModelSource),
    Decode { source: ModelSource, reason: String },
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceError::NotFound(source) => write!(f, "model not found: {source}"),
            ResourceError::Decode { source, reason } => {
                write!(f, "failed to decode model {source}: {reason}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

pub trait ResourceLoader {
    fn load_model(
        &self,
        source: &ModelSource,
    ) -> impl Future<Output = Result<ModelResource, ResourceError>>;
}

/// Loader over an in-memory catalog, resolved without suspending.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    models: BTreeMap<ModelSource, Arc<[u8]>>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: ModelSource, data: impl Into<Arc<[u8]>>) {
        self.models.insert(source, data.into());
    }

    pub fn with_model(mut self, source: ModelSource, data: impl Into<Arc<[u8]>>) -> Self {
        self.insert(source, data);
        self
    }
}

impl ResourceLoader for CatalogLoader {
    async fn load_model(&self, source: &ModelSource) -> Result<ModelResource, ResourceError> {
        let data = self
            .models
            .get(source)
            .ok_or_else(|| ResourceError::NotFound(source.clone()))?;
        if data.is_empty() {
            return Err(ResourceError::Decode {
                source: source.clone(),
                reason: "empty payload".to_string(),
            });
        }
        Ok(ModelResource::new(source.clone(), Arc::clone(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogLoader, ModelSource, ResourceError, ResourceLoader};

    #[test]
    fn catalog_resolves_known_models() {
        let pin = ModelSource::Bundled("Pin_V2".to_string());
        let loader = CatalogLoader::new().with_model(pin.clone(), vec![1u8, 2, 3]);
        let model = pollster::block_on(loader.load_model(&pin)).expect("pin is bundled");
        assert_eq!(model.source, pin);
        assert_eq!(&*model.data, &[1, 2, 3]);
    }

    #[test]
    fn catalog_reports_missing_and_empty_models() {
        let empty = ModelSource::File("file:///tmp/empty.usdz".to_string());
        let loader = CatalogLoader::new().with_model(empty.clone(), Vec::new());

        let missing = ModelSource::Bundled("Nope".to_string());
        let err = pollster::block_on(loader.load_model(&missing)).expect_err("not bundled");
        assert_eq!(err, ResourceError::NotFound(missing));

        let err = pollster::block_on(loader.load_model(&empty)).expect_err("empty");
        assert!(matches!(err, ResourceError::Decode { .. }));
        assert!(err.to_string().contains("empty.usdz"));
    }
}
