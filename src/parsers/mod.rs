pub mod jacoco;

use quick_xml::events::BytesStart;
use quick_xml::reader::Reader;

use crate::error::{ReportError, Result};
use crate::model::BundleCoverage;

/// Every input format parser implements this trait.
pub trait Parser {
    /// Parse the input bytes into a coverage tree.
    fn parse(&self, input: &[u8]) -> Result<BundleCoverage>;
}

/// Unescaped value of attribute `name`, if present.
pub(crate) fn get_attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Numeric attribute, treating absent or malformed values as zero.
pub(crate) fn get_num(e: &BytesStart<'_>, name: &[u8]) -> u64 {
    get_attr(e, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

pub(crate) fn xml_err<R>(source: quick_xml::Error, reader: &Reader<R>) -> ReportError {
    ReportError::Xml {
        source,
        position: reader.buffer_position(),
    }
}
