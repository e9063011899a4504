#![no_std]
#![forbid(unsafe_code)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_assignments, unused_variables))
))]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

//! Types used by [`tinywast`](https://docs.rs/tinywast): the WebAssembly value
//! and type model, typed constants, and the opcode catalogue that every other
//! component (parsers, validators, codecs, formatters) dispatches on.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// log for logging (optional).
#[cfg(feature = "logging")]
#[allow(clippy::single_component_path_imports, unused_imports)]
use log;

// noop fallback if logging is disabled.
#[cfg(not(feature = "logging"))]
#[allow(unused_imports, unused_macros)]
pub(crate) mod log {
    macro_rules! error    ( ($($tt:tt)*) => {{}} );
    pub(crate) use error;
}

mod opcode;
mod value;

pub use opcode::{Opcode, OpcodeInfo};
pub use value::{Const, ConstValue, V128};

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Display};

/// An index into one of a module's index spaces.
///
/// See <https://webassembly.github.io/spec/core/syntax/modules.html#indices>
pub type Index = u32;

/// Type of a WebAssembly value, plus the two structural markers used by
/// signatures and validation bounds.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#value-types>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValType {
    /// A 32-bit integer.
    I32,
    /// A 64-bit integer.
    I64,
    /// A 32-bit float.
    F32,
    /// A 64-bit float.
    F64,
    /// A 128-bit vector.
    V128,
    /// A reference to a function.
    FuncRef,
    /// A reference to any host value, including functions.
    AnyRef,
    /// Absence of a value. Never the type of an operand.
    Void,
    /// Wildcard, usable only as a validation bound.
    Any,
}

impl ValType {
    /// Whether this is one of the reference types.
    pub fn is_ref(&self) -> bool {
        matches!(self, Self::FuncRef | Self::AnyRef)
    }

    /// The canonical text-format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::V128 => "v128",
            Self::FuncRef => "funcref",
            Self::AnyRef => "anyref",
            Self::Void => "void",
            Self::Any => "any",
        }
    }
}

impl Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A WebAssembly external kind.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#external-types>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    /// A WebAssembly function.
    Func,
    /// A WebAssembly table.
    Table,
    /// A WebAssembly memory.
    Memory,
    /// A WebAssembly global.
    Global,
    /// A WebAssembly event (exception tag).
    Event,
}

impl ExternalKind {
    /// The text-format name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Func => "func",
            Self::Table => "table",
            Self::Memory => "memory",
            Self::Global => "global",
            Self::Event => "event",
        }
    }
}

impl Display for ExternalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source position attached to every IR node.
///
/// Purely informational: locations are carried for diagnostics and are never
/// part of any equality comparison (the type deliberately does not implement
/// `PartialEq`).
#[derive(Debug, Clone, Default)]
pub struct Location {
    /// The file the node was parsed from, if any.
    pub filename: Option<Arc<str>>,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column of the first character.
    pub first_column: u32,
    /// 1-based column one past the last character.
    pub last_column: u32,
}

impl Location {
    /// A location within a named file.
    pub fn new(filename: impl Into<Arc<str>>, line: u32, first_column: u32, last_column: u32) -> Self {
        Self { filename: Some(filename.into()), line, first_column, last_column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "{}:{}:{}", name, self.line, self.first_column),
            None => write!(f, "{}:{}", self.line, self.first_column),
        }
    }
}

/// Size limits of a table or memory.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#limits>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Initial size, in elements or pages.
    pub initial: u64,
    /// Optional maximum size.
    pub max: Option<u64>,
    /// Whether the table/memory is shared between threads.
    pub shared: bool,
    /// Whether the memory uses 64-bit addressing.
    pub is_64: bool,
}

impl Limits {
    /// Limits with an initial size only.
    pub fn at_least(initial: u64) -> Self {
        Self { initial, ..Self::default() }
    }

    /// Limits with both an initial and a maximum size.
    pub fn bounded(initial: u64, max: u64) -> Self {
        Self { initial, max: Some(max), ..Self::default() }
    }
}

/// The set of proposals an opcode belongs to, derived from its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    /// Sign-extension operators (`0xC0`..=`0xC4`).
    pub sign_extension: bool,
    /// Non-trapping float-to-int conversions.
    pub saturating_float_to_int: bool,
    /// Bulk memory operations.
    pub bulk_memory: bool,
    /// Reference types (`anyref`, table instructions).
    pub reference_types: bool,
    /// 128-bit SIMD.
    pub simd: bool,
    /// Threads and atomics.
    pub threads: bool,
}

/// The structural type of a function: parameter and result sequences.
///
/// Equality is element-wise, which is what makes signatures deduplicable in a
/// module's function-type index space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncSignature {
    pub params: Vec<ValType>,
    pub results: Vec<ValType>,
}

impl FuncSignature {
    pub fn new(params: Vec<ValType>, results: Vec<ValType>) -> Self {
        Self { params, results }
    }

    pub fn param_count(&self) -> Index {
        self.params.len() as Index
    }

    pub fn result_count(&self) -> Index {
        self.results.len() as Index
    }

    pub fn param(&self, index: Index) -> Option<ValType> {
        self.params.get(index as usize).copied()
    }

    pub fn result(&self, index: Index) -> Option<ValType> {
        self.results.get(index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn signature_equality_is_structural() {
        let a = FuncSignature::new(vec![ValType::AnyRef], vec![ValType::I32]);
        let b = FuncSignature::new(vec![ValType::AnyRef], vec![ValType::I32]);
        let c = FuncSignature::new(vec![ValType::AnyRef], vec![]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn limits_constructors() {
        let l = Limits::at_least(1);
        assert_eq!(l.initial, 1);
        assert_eq!(l.max, None);
        assert!(!l.shared);

        let l = Limits::bounded(1, 2);
        assert_eq!(l.max, Some(2));
    }

    #[test]
    fn valtype_names() {
        assert_eq!(ValType::FuncRef.name(), "funcref");
        assert_eq!(ValType::AnyRef.name(), "anyref");
        assert!(ValType::FuncRef.is_ref());
        assert!(!ValType::I32.is_ref());
    }
}
