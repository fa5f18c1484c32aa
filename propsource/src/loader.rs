//! Loading `.properties` and properties-as-XML resources into property sources.

use crate::{
    error::Error,
    formats::{FormatType, PropertiesFormat, XmlFormat},
    options::LoadOptions,
    property_source::PropertySource,
    resource::Resource,
    traits::{Parser, PropertySourceLoader},
};

/// Strategy to load `.properties` (and `.xml`) files into a [`PropertySource`].
///
/// # Example
///
/// ```rust
/// use propsource::{ByteResource, PropertiesPropertySourceLoader, PropertySourceLoader};
///
/// let loader = PropertiesPropertySourceLoader::new();
/// let resource = ByteResource::new("k1=v1\nk2=v2").with_filename("app.properties");
/// let sources = loader.load("test", &resource)?;
///
/// assert_eq!(sources.len(), 1);
/// assert_eq!(sources[0].name(), "test");
/// assert_eq!(sources[0].get("k2"), Some("v2"));
/// # Ok::<(), propsource::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertiesPropertySourceLoader {
    options: LoadOptions,
}

impl PropertiesPropertySourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn load_properties(
        &self,
        name: &str,
        resource: &dyn Resource,
    ) -> Result<PropertySource, Error> {
        let reader = resource.open()?;
        let source = match FormatType::for_filename(resource.filename()) {
            FormatType::Xml => XmlFormat::from_reader(reader)?.to_property_source(name),
            FormatType::Properties => {
                PropertiesFormat::from_reader_with_options(reader, &self.options)?
                    .to_property_source(name, &resource.description())
            }
        };
        Ok(source)
    }
}

impl PropertySourceLoader for PropertiesPropertySourceLoader {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["properties", "xml"]
    }

    fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, Error> {
        tracing::debug!(
            name,
            resource = %resource.description(),
            format = %FormatType::for_filename(resource.filename()),
            "loading property source"
        );
        let source = self.load_properties(name, resource)?;
        if source.is_empty() {
            tracing::debug!(name, "no properties found, skipping empty source");
            return Ok(Vec::new());
        }
        tracing::debug!(
            name,
            entries = source.len(),
            origin_tracked = source.is_origin_tracked(),
            "loaded property source"
        );
        Ok(vec![source])
    }
}
