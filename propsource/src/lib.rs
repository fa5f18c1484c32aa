#![forbid(unsafe_code)]
//! Loader for Java-style property files.
//!
//! Reads `.properties` and properties-as-XML resources into named, ordered,
//! immutable [`PropertySource`]s. Values read from the line-oriented format
//! remember where they were defined (resource, line and column), so a
//! configuration framework can point users at the offending line when a value
//! fails to bind.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use propsource::{FileResource, OriginLookup, PropertiesPropertySourceLoader, PropertySourceLoader};
//!
//! let loader = PropertiesPropertySourceLoader::new();
//! let sources = loader.load("applicationConfig", &FileResource::new("application.properties"))?;
//! for source in &sources {
//!     for entry in source.iter() {
//!         println!("{} = {} ({:?})", entry.key, entry.value, source.origin(entry.key));
//!     }
//! }
//! # Ok::<(), propsource::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **`.properties`** (and any name not ending in `.xml`): `key=value` lines
//!   with comments, continuations and escapes; origin-tracked
//! - **`.xml`**: `<properties><entry key="...">value</entry></properties>`;
//!   not origin-tracked

pub mod codec;
pub mod error;
pub mod formats;
pub mod loader;
pub mod options;
pub mod origin;
pub mod property_source;
pub mod registry;
pub mod resource;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{convert, convert_auto, infer_format_from_extension},
    error::Error,
    formats::FormatType,
    loader::PropertiesPropertySourceLoader,
    options::{Charset, EscapePolicy, LoadOptions},
    origin::{Location, OriginLookup, TextResourceOrigin},
    property_source::{PropertyEntry, PropertySource},
    registry::LoaderRegistry,
    resource::{ByteResource, FileResource, Resource},
    traits::{Parser, PropertySourceLoader},
};
