use thiserror::Error;

/// Malformed instance or solution text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("line {line}: {token:?} is not a valid {expected}")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },
    #[error("line {line}: expected {expected} tokens, found {found}")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: item {item} out of range, instance has {n_items} items")]
    ItemOutOfRange {
        line: usize,
        item: usize,
        n_items: usize,
    },
    #[error("line {line}: item {item} listed more than once")]
    DuplicateItem { line: usize, item: usize },
    #[error("line {line}: item {item} has a zero quantity")]
    ZeroQuantity { line: usize, item: usize },
    #[error("line {line}: wave lower bound {lb} exceeds upper bound {ub}")]
    InvalidWaveBounds { line: usize, lb: u64, ub: u64 },
    #[error("line {line}: quantities sum beyond {max}", max = u64::MAX)]
    QuantityOverflow { line: usize },
    #[error("line {line}: unexpected trailing content")]
    TrailingContent { line: usize },
}
