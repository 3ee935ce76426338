//! XML text helpers shared by the document codec.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
