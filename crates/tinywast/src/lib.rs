#![no_std]
#![forbid(unsafe_code)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_assignments, unused_variables))
))]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

//! In-memory IR for WebAssembly modules and wast conformance scripts.
//!
//! A [`Module`] is the typed, navigable form of a parsed module: a
//! source-ordered field list with per-kind index spaces, binding tables and
//! import counts. Function bodies are trees of [`Expr`] nodes. A [`Script`]
//! layers the wast command vocabulary (modules, actions, assertions) on top.
//!
//! Producers (text parser, binary reader) build the IR with
//! [`Module::append_field`] and leave references ([`Var`]) in whatever form
//! the source used; [`resolve_module`] then rewrites every name to its
//! index. Consumers (validator, encoder, formatter, interpreter) only ever
//! see the resolved form.
//!
//! The instruction catalogue and the value/type model live in
//! [`tinywast_types`] and are re-exported here.

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
    macro_rules! debug    ( ($($tt:tt)*) => {{}} );
    macro_rules! error    ( ($($tt:tt)*) => {{}} );
    pub(crate) use debug;
    pub(crate) use error;
}

mod binding;
mod error;
mod expr;
mod func;
mod module;
mod resolve;
mod script;
mod var;

pub use binding::{make_type_binding_reverse_mapping, Binding, BindingHash};
pub use error::{Error, Result};
pub use expr::{Block, BlockDeclaration, Expr, ExprKind, ExprList, ExprType, LoadStore};
pub use func::{Func, FuncDeclaration, FuncType, LocalTypes, LocalTypesIter};
pub use module::{
    DataSegment, ElemExpr, ElemSegment, Event, Export, Global, Import, ImportKind, Memory, Module, ModuleField,
    ModuleFieldKind, ModuleFieldType, Table, SEG_HAS_INDEX, SEG_PASSIVE, SEG_USE_ELEM_EXPRS,
};
pub use resolve::{resolve_func_types, resolve_module, resolve_script};
pub use script::{Action, ActionKind, ActionType, Command, CommandType, Script, ScriptModule, ScriptModuleType};
pub use var::Var;

pub use tinywast_types::*;
