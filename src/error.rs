use std::cell::RefCell;
use std::{error, fmt};

/// Typed failure modes, matching the taxonomy a BP reader must surface to
/// callers: bad container structure, bad names/ids, and out-of-range reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Allocation failed. Not reachable through any normal path in safe
    /// Rust (the allocator aborts on OOM); kept for API completeness with
    /// the source taxonomy.
    NoMemory,
    FileOpenError,
    CorruptedFooter,
    CorruptedVariable,
    CorruptedAttribute,
    InvalidGroup,
    InvalidGroupStruct,
    InvalidVarname,
    InvalidVarid,
    InvalidAttrname,
    InvalidAttrid,
    InvalidAttributeReference,
    NoDataAtTimestep,
    OutOfBound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoMemory => "no memory",
            Self::FileOpenError => "file open error",
            Self::CorruptedFooter => "corrupted footer",
            Self::CorruptedVariable => "corrupted variable",
            Self::CorruptedAttribute => "corrupted attribute",
            Self::InvalidGroup => "invalid group",
            Self::InvalidGroupStruct => "invalid group struct",
            Self::InvalidVarname => "invalid variable name",
            Self::InvalidVarid => "invalid variable id",
            Self::InvalidAttrname => "invalid attribute name",
            Self::InvalidAttrid => "invalid attribute id",
            Self::InvalidAttributeReference => "invalid attribute reference",
            Self::NoDataAtTimestep => "no data at timestep",
            Self::OutOfBound => "out of bound",
        })
    }
}

/// A typed error with a formatted, identifying message (group/variable/
/// attribute names and offending numeric values, per the source taxonomy).
#[derive(Debug, Clone)]
pub struct BpError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BpError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let err = Self {
            kind,
            message: message.into(),
        };
        LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err.clone()));
        err
    }
}

impl fmt::Display for BpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl error::Error for BpError {}

thread_local! {
    static LAST_ERROR: RefCell<Option<BpError>> = const { RefCell::new(None) };
}

/// Clears the per-thread "last error" slot. Every public entry point calls
/// this on entry, matching the process-global errno-reset convention of
/// the wire format's original C client library.
pub fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Reads the most recent error recorded on this thread, if any.
pub fn last_error() -> Option<BpError> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

pub type Result<T> = std::result::Result<T, BpError>;
