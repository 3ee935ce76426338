//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;

impl From<crate::ooxml::error::OoxmlError> for Error {
    fn from(err: crate::ooxml::error::OoxmlError) -> Self {
        match err {
            crate::ooxml::error::OoxmlError::Io(e) => Error::Io(e),
            crate::ooxml::error::OoxmlError::Xml(s) => Error::XmlError(s),
            crate::ooxml::error::OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
            crate::ooxml::error::OoxmlError::Fmt(e) => Error::Other(e.to_string()),
            crate::ooxml::error::OoxmlError::Other(s) => Error::Other(s),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::OoxmlError;

    #[test]
    fn test_ooxml_error_maps_to_unified_variant() {
        let err: Error = OoxmlError::Xml("unexpected end of input".to_string()).into();
        assert!(matches!(err, Error::XmlError(ref s) if s == "unexpected end of input"));

        let err: Error = OoxmlError::InvalidFormat("root".to_string()).into();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }
}
