use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Ways a sort call can fail. Either way the sequence is left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// `from..to` is not a valid range of a slice of length `len`.
    OutOfRange { from: usize, to: usize, len: usize },
    /// Scratch memory (pivot candidates or a merge buffer) could not be reserved.
    Alloc(TryReserveError),
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { from, to, len } => {
                write!(f, "range {from}..{to} out of bounds for slice of length {len}")
            }
            Self::Alloc(_) => f.write_str("failed to allocate sort scratch memory"),
        }
    }
}

impl Error for SortError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfRange { .. } => None,
            Self::Alloc(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for SortError {
    fn from(err: TryReserveError) -> Self {
        Self::Alloc(err)
    }
}

/// Checks `from <= to <= len`.
#[inline]
pub fn check_range(from: usize, to: usize, len: usize) -> Result<(), SortError> {
    if from <= to && to <= len {
        Ok(())
    } else {
        Err(SortError::OutOfRange { from, to, len })
    }
}
