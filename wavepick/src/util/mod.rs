/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

/// Log formatting shared by the binaries
pub mod logger;
