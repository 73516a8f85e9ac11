mod error;

/// Parsing instances and selections from their text representation
pub mod import;

/// Writing selections to their text representation
pub mod export;

#[doc(inline)]
pub use error::ParseError;
#[doc(inline)]
pub use export::{format_selection, write_selection};
#[doc(inline)]
pub use import::{parse_instance, parse_selection, read_instance, read_selection};
