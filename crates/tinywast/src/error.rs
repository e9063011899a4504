use alloc::string::String;
use core::fmt::Display;
use tinywast_types::{Index, Location};

/// A tinywast error.
///
/// Plain lookups on [`Module`](crate::Module), [`Func`](crate::Func) and the
/// opcode catalogue return `Option` sentinels instead of errors; these
/// variants are produced by the passes that scan a whole module (name
/// resolution, duplicate-binding detection) and by checked downcasts.
#[derive(Debug, Clone)]
pub enum Error {
    /// A symbolic reference did not resolve in its namespace.
    UnknownName {
        /// The namespace searched, e.g. `"function"` or `"label"`.
        kind: &'static str,
        /// The `$name` that failed to resolve.
        name: String,
        /// Where the reference was written.
        loc: Location,
    },

    /// A numeric reference exceeds the size of its index space.
    IndexOutOfRange {
        /// The index space, e.g. `"table"`.
        kind: &'static str,
        /// The out-of-range index.
        index: Index,
        /// Number of entries in the index space.
        count: Index,
        /// Where the reference was written.
        loc: Location,
    },

    /// A tagged node was downcast to a variant its tag does not match.
    WrongVariant {
        /// The variant the caller asked for.
        expected: &'static str,
        /// The variant actually present.
        found: &'static str,
    },

    /// Two definitions in one namespace share a name.
    DuplicateBinding {
        /// The namespace, e.g. `"function"`.
        kind: &'static str,
        /// The shared `$name`.
        name: String,
        /// Where the name was first bound.
        first: Location,
        /// Where it was bound again.
        duplicate: Location,
    },
}

impl Error {
    pub(crate) fn wrong_variant(expected: &'static str, found: &'static str) -> Self {
        Self::WrongVariant { expected, found }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownName { kind, name, .. } => write!(f, "unknown {} {}", kind, name),
            Self::IndexOutOfRange { kind, index, count, .. } => {
                write!(f, "{} index {} out of range (max {})", kind, index, count)
            }
            Self::WrongVariant { expected, found } => write!(f, "expected {}, found {}", expected, found),
            Self::DuplicateBinding { kind, name, .. } => write!(f, "redefinition of {} {}", kind, name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized [`Result`] type for tinywast operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
