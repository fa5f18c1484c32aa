//! File-level helpers: format inference from paths, reading a file into a
//! property source and converting between the two property file formats.

use std::path::Path;

use crate::{
    error::Error,
    formats::{FormatType, PropertiesFormat, XmlFormat},
    options::LoadOptions,
    property_source::PropertySource,
    resource::{FileResource, Resource},
    traits::Parser,
};

/// Infers a [`FormatType`] from a file path's extension.
///
/// Unlike [`FormatType::for_filename`], this only accepts the two extensions
/// the formats are known by.
///
/// # Example
/// ```rust
/// use propsource::formats::FormatType;
/// use propsource::codec::infer_format_from_extension;
/// assert_eq!(
///     infer_format_from_extension("conf/app.properties"),
///     Some(FormatType::Properties)
/// );
/// assert_eq!(infer_format_from_extension("app.xml"), Some(FormatType::Xml));
/// assert_eq!(infer_format_from_extension("app.yml"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some("properties") => Some(FormatType::Properties),
        Some("xml") => Some(FormatType::Xml),
        _ => None,
    }
}

/// Reads `path` in the given format into a source named `name`.
///
/// Unlike the loader, an empty file still yields a (empty) source.
pub fn read_property_source<P: AsRef<Path>>(
    path: P,
    name: &str,
    format_type: FormatType,
    options: &LoadOptions,
) -> Result<PropertySource, Error> {
    let resource = FileResource::new(path);
    let reader = resource.open()?;
    let source = match format_type {
        FormatType::Properties => PropertiesFormat::from_reader_with_options(reader, options)?
            .to_property_source(name, &resource.description()),
        FormatType::Xml => XmlFormat::from_reader(reader)?.to_property_source(name),
    };
    Ok(source)
}

/// Writes `source` to `path` in the given format.
pub fn write_property_source<P: AsRef<Path>>(
    source: &PropertySource,
    path: P,
    format_type: FormatType,
) -> Result<(), Error> {
    match format_type {
        FormatType::Properties => PropertiesFormat::from(source).write_to(path),
        FormatType::Xml => XmlFormat::from(source).write_to(path),
    }
}

/// Converts a property file from one format to another.
///
/// # Example
/// ```rust,no_run
/// use propsource::{convert, formats::FormatType};
/// convert(
///     "application.properties",
///     FormatType::Properties,
///     "application.xml",
///     FormatType::Xml,
/// )?;
/// # Ok::<(), propsource::Error>(())
/// ```
pub fn convert<P: AsRef<Path>>(
    input: P,
    input_format: FormatType,
    output: P,
    output_format: FormatType,
) -> Result<(), Error> {
    let name = input
        .as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let source = read_property_source(&input, &name, input_format, &LoadOptions::default())?;
    tracing::debug!(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        entries = source.len(),
        "converting {} to {}",
        input_format,
        output_format
    );
    write_property_source(&source, output, output_format)
}

/// Converts a property file, inferring both formats from the extensions.
pub fn convert_auto<P: AsRef<Path>>(input: P, output: P) -> Result<(), Error> {
    let input_format = infer_format_from_extension(&input).ok_or_else(|| {
        Error::UnsupportedFormat(format!(
            "Cannot infer input format from extension: {}",
            input.as_ref().display()
        ))
    })?;
    let output_format = infer_format_from_extension(&output).ok_or_else(|| {
        Error::UnsupportedFormat(format!(
            "Cannot infer output format from extension: {}",
            output.as_ref().display()
        ))
    })?;
    convert(input, input_format, output, output_format)
}
