use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Target type of a property coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// Raw string, never fails.
    String,
    /// 32-bit signed integer.
    Int,
    /// `true` / `false`.
    Bool,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::String => write!(f, "string"),
            PropertyType::Int => write!(f, "int"),
            PropertyType::Bool => write!(f, "bool"),
        }
    }
}

/// Error type for decoding a TMX map.
///
/// Every variant is fatal: a decode either yields a complete layout or one of these.
#[derive(Debug, Error)]
pub enum MapError {
    /// The text is not well-formed XML.
    #[error("malformed TMX document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),
    /// The document has no `<map>` element.
    #[error("no <map> element found")]
    MissingMapElement,
    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{name}'")]
    MissingAttribute {
        /// Tag name of the offending element.
        element: String,
        /// Attribute that was expected.
        name: &'static str,
    },
    /// A required child element is absent.
    #[error("<{element}> is missing required child <{child}>")]
    MissingElement {
        /// Tag name of the parent element.
        element: String,
        /// Child tag that was expected.
        child: &'static str,
    },
    /// A numeric attribute could not be parsed (or is out of range).
    #[error("<{element}> attribute '{name}' is not a valid number: {value:?}")]
    InvalidNumber {
        /// Tag name of the offending element.
        element: String,
        /// Attribute name.
        name: &'static str,
        /// Raw attribute text.
        value: String,
    },
    /// A property exists but cannot be coerced to the requested type.
    #[error("property '{property}' on <{element}> is not a valid {expected}: {value:?}")]
    InvalidPropertyValue {
        /// Tag name of the element owning the property block.
        element: String,
        /// Property name.
        property: String,
        /// Requested type.
        expected: PropertyType,
        /// Raw property text.
        value: String,
    },
    /// A layer's data entry count does not match `width * height`.
    #[error("invalid layer size for layer '{layer}': expected {expected} tiles, found {found}")]
    InvalidLayerSize {
        /// Layer name.
        layer: String,
        /// `width * height`.
        expected: usize,
        /// Number of entries under `<data>`.
        found: usize,
    },
    /// Tile data uses an encoding this decoder does not read (CSV, base64, compressed).
    #[error("layer '{layer}' uses unsupported tile data encoding '{encoding}'")]
    UnsupportedEncoding {
        /// Layer name.
        layer: String,
        /// Value of the `encoding` or `compression` attribute.
        encoding: String,
    },
    /// File I/O error from the convenience loader.
    #[error("failed to read map file {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Unsupported file format (non-TMX).
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
