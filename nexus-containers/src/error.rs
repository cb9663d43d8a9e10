//! Error types for container operations.

use core::fmt;

/// `pop` or `peek` was called on an empty heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underflow;

impl fmt::Display for Underflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heap is empty")
    }
}

impl std::error::Error for Underflow {}

/// A positional operation was given an index outside its valid bound.
///
/// Insertion accepts `0..=len`, reads and removals accept `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
    /// Length of the container at the time of the call.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// Backing storage could not grow.
///
/// The container is left exactly as it was before the call. The value that
/// could not be inserted is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted<T>(pub T);

impl<T> Exhausted<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Exhausted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage exhausted")
    }
}

impl<T: fmt::Debug> std::error::Error for Exhausted<T> {}

/// Failure to parse the bracketed text form of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<E> {
    /// Input was not wrapped in `[` and `]`.
    MissingBrackets,
    /// An element failed to parse.
    Element(E),
    /// Storage for the parsed elements could not be reserved.
    Exhausted,
}

impl<E: fmt::Display> fmt::Display for ParseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBrackets => write!(f, "expected input enclosed in '[' and ']'"),
            Self::Element(e) => write!(f, "invalid element: {e}"),
            Self::Exhausted => write!(f, "storage exhausted"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ParseError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Underflow.to_string(), "heap is empty");
        assert_eq!(
            OutOfRange { index: 7, len: 3 }.to_string(),
            "index 7 out of range for length 3"
        );
        assert_eq!(Exhausted(5u8).to_string(), "storage exhausted");
        assert_eq!(
            ParseError::<std::num::ParseIntError>::MissingBrackets.to_string(),
            "expected input enclosed in '[' and ']'"
        );
    }

    #[test]
    fn exhausted_returns_value() {
        let err = Exhausted(String::from("rejected"));
        assert_eq!(err.into_inner(), "rejected");
    }

    #[test]
    fn parse_error_wraps_element() {
        let inner = "x".parse::<u32>().unwrap_err();
        let err: ParseError<_> = ParseError::Element(inner.clone());
        assert_eq!(err.to_string(), format!("invalid element: {inner}"));
    }
}
