/// Open Packaging Conventions (OPC) touch points of the document part.
///
/// The document part does not read or write packages itself. It only needs
/// the namespace table it declares and a way to hand the relationships it
/// minted to whatever package layer persists them.
pub mod constants;
pub mod rel;

// Re-export commonly used types
pub use rel::{Relationship, Relationships};
