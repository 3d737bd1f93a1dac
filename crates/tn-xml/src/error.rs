//! Error types for tn-xml.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

use tn_topology::TopologyError;

/// Errors raised while reading or writing network documents.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("<{element}>: cannot parse {attribute}={value:?}")]
    Parse { element: String, attribute: &'static str, value: String },

    #[error("<{element}> is missing required attribute {attribute:?}")]
    MissingAttribute { element: String, attribute: &'static str },

    #[error("<{element}> is not allowed inside <{parent}>")]
    Misplaced { element: String, parent: String },

    #[error("document ends inside <{element}>")]
    Truncated { element: String },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Alias for `Result<T, XmlError>`.
pub type XmlResult<T> = Result<T, XmlError>;

/// A routes document that does not match its network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DemandError {
    #[error("flow {flow:?} references unknown junction {junction:?}")]
    UnknownJunction { flow: String, junction: String },

    #[error("flow {flow:?} ends at {end} before it begins at {begin}")]
    InvalidInterval { flow: String, begin: u32, end: u32 },

    #[error("flow {flow:?} cannot be shifted by {delta} s without overflowing")]
    IntervalOverflow { flow: String, delta: u32 },
}
