//! Extension-based selection of property source loaders.

use std::{collections::BTreeMap, path::Path, sync::Arc};

use crate::{
    error::Error,
    loader::PropertiesPropertySourceLoader,
    property_source::PropertySource,
    resource::Resource,
    traits::PropertySourceLoader,
};

/// Maps file extensions to the loader that handles them.
///
/// The registry is consulted before any loader runs; a loader only ever sees
/// resources whose extension it declared.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, Arc<dyn PropertySourceLoader>>,
}

impl Default for LoaderRegistry {
    /// A registry with [`PropertiesPropertySourceLoader`] registered.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(PropertiesPropertySourceLoader::new());
        registry
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

impl LoaderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            loaders: BTreeMap::new(),
        }
    }

    /// Registers `loader` for each of its extensions, replacing any loader
    /// previously registered for the same extension.
    pub fn register<L: PropertySourceLoader + 'static>(&mut self, loader: L) -> &mut Self {
        let loader: Arc<dyn PropertySourceLoader> = Arc::new(loader);
        for extension in loader.file_extensions() {
            tracing::trace!(extension, "registering property source loader");
            self.loaders.insert(extension.to_string(), Arc::clone(&loader));
        }
        self
    }

    /// Sorted list of extensions with a registered loader.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.loaders.keys().map(String::as_str).collect()
    }

    /// Finds the loader for `filename` by its extension.
    pub fn loader_for(&self, filename: &str) -> Option<&dyn PropertySourceLoader> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.loaders.get(extension).map(|loader| loader.as_ref())
    }

    /// Loads `resource` with the loader registered for its extension.
    pub fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, Error> {
        let filename = resource.filename().ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "{} has no filename to infer a format from",
                resource.description()
            ))
        })?;
        let loader = self.loader_for(filename).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no loader for {}", resource.description()))
        })?;
        loader.load(name, resource)
    }
}
