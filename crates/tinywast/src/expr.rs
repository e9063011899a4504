use alloc::collections::LinkedList;
use alloc::string::String;
use alloc::vec::Vec;

use tinywast_types::{Const, Location, Opcode, V128};

use crate::error::{Error, Result};
use crate::func::FuncDeclaration;
use crate::var::Var;

/// An owning, ordered sequence of instructions: a function body, a block
/// body, an initializer expression or a segment offset.
///
/// A linked list keeps append, prepend and whole-list splicing
/// ([`LinkedList::append`]) O(1) without invalidating the rest of the
/// sequence; straight-line code is only ever walked front to back, so random
/// indexing is not needed.
pub type ExprList = LinkedList<Expr>;

/// The signature of a block, written the same way as a function's.
pub type BlockDeclaration = FuncDeclaration;

/// The common payload of `block` and `loop`, and the arms of `if` and `try`.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Label, if one was written.
    pub label: Option<String>,
    pub decl: BlockDeclaration,
    pub exprs: ExprList,
    /// Location of the closing `end`.
    pub end_loc: Location,
}

impl Block {
    pub fn new(exprs: ExprList) -> Self {
        Self { exprs, ..Self::default() }
    }
}

/// The immediates of the load/store-shaped instructions.
#[derive(Debug, Clone)]
pub struct LoadStore {
    pub opcode: Opcode,
    /// Alignment in bytes.
    pub align: u32,
    pub offset: u32,
}

impl LoadStore {
    pub fn new(opcode: Opcode, align: u32, offset: u32) -> Self {
        Self { opcode, align, offset }
    }

    /// The natural (full) alignment of the opcode, in bytes.
    pub fn natural_align(opcode: Opcode) -> Self {
        Self::new(opcode, opcode.memory_size(), 0)
    }
}

/// The discriminator of an [`Expr`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ExprType {
    AtomicLoad,
    AtomicNotify,
    AtomicRmw,
    AtomicRmwCmpxchg,
    AtomicStore,
    AtomicWait,
    Binary,
    Block,
    Br,
    BrIf,
    BrOnExn,
    BrTable,
    Call,
    CallIndirect,
    Compare,
    Const,
    Convert,
    DataDrop,
    Drop,
    ElemDrop,
    GlobalGet,
    GlobalSet,
    If,
    Load,
    LoadSplat,
    LocalGet,
    LocalSet,
    LocalTee,
    Loop,
    MemoryCopy,
    MemoryFill,
    MemoryGrow,
    MemoryInit,
    MemorySize,
    Nop,
    RefFunc,
    RefIsNull,
    RefNull,
    Rethrow,
    Return,
    ReturnCall,
    ReturnCallIndirect,
    Select,
    SimdLaneOp,
    SimdShuffleOp,
    Store,
    TableCopy,
    TableGet,
    TableGrow,
    TableInit,
    TableSet,
    TableSize,
    Ternary,
    Throw,
    Try,
    Unary,
    Unreachable,
}

impl ExprType {
    /// The variant's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AtomicLoad => "AtomicLoad",
            Self::AtomicNotify => "AtomicNotify",
            Self::AtomicRmw => "AtomicRmw",
            Self::AtomicRmwCmpxchg => "AtomicRmwCmpxchg",
            Self::AtomicStore => "AtomicStore",
            Self::AtomicWait => "AtomicWait",
            Self::Binary => "Binary",
            Self::Block => "Block",
            Self::Br => "Br",
            Self::BrIf => "BrIf",
            Self::BrOnExn => "BrOnExn",
            Self::BrTable => "BrTable",
            Self::Call => "Call",
            Self::CallIndirect => "CallIndirect",
            Self::Compare => "Compare",
            Self::Const => "Const",
            Self::Convert => "Convert",
            Self::DataDrop => "DataDrop",
            Self::Drop => "Drop",
            Self::ElemDrop => "ElemDrop",
            Self::GlobalGet => "GlobalGet",
            Self::GlobalSet => "GlobalSet",
            Self::If => "If",
            Self::Load => "Load",
            Self::LoadSplat => "LoadSplat",
            Self::LocalGet => "LocalGet",
            Self::LocalSet => "LocalSet",
            Self::LocalTee => "LocalTee",
            Self::Loop => "Loop",
            Self::MemoryCopy => "MemoryCopy",
            Self::MemoryFill => "MemoryFill",
            Self::MemoryGrow => "MemoryGrow",
            Self::MemoryInit => "MemoryInit",
            Self::MemorySize => "MemorySize",
            Self::Nop => "Nop",
            Self::RefFunc => "RefFunc",
            Self::RefIsNull => "RefIsNull",
            Self::RefNull => "RefNull",
            Self::Rethrow => "Rethrow",
            Self::Return => "Return",
            Self::ReturnCall => "ReturnCall",
            Self::ReturnCallIndirect => "ReturnCallIndirect",
            Self::Select => "Select",
            Self::SimdLaneOp => "SimdLaneOp",
            Self::SimdShuffleOp => "SimdShuffleOp",
            Self::Store => "Store",
            Self::TableCopy => "TableCopy",
            Self::TableGet => "TableGet",
            Self::TableGrow => "TableGrow",
            Self::TableInit => "TableInit",
            Self::TableSet => "TableSet",
            Self::TableSize => "TableSize",
            Self::Ternary => "Ternary",
            Self::Throw => "Throw",
            Self::Try => "Try",
            Self::Unary => "Unary",
            Self::Unreachable => "Unreachable",
        }
    }
}

/// The variant payload of an instruction node.
#[derive(Debug, Clone)]
pub enum ExprKind {
    AtomicLoad(LoadStore),
    AtomicNotify(LoadStore),
    AtomicRmw(LoadStore),
    AtomicRmwCmpxchg(LoadStore),
    AtomicStore(LoadStore),
    AtomicWait(LoadStore),
    Binary(Opcode),
    Block(Block),
    Br(Var),
    BrIf(Var),
    BrOnExn { label: Var, event: Var },
    BrTable { targets: Vec<Var>, default_target: Var },
    Call(Var),
    CallIndirect { decl: FuncDeclaration, table: Var },
    Compare(Opcode),
    Const(Const),
    Convert(Opcode),
    DataDrop(Var),
    Drop,
    ElemDrop(Var),
    GlobalGet(Var),
    GlobalSet(Var),
    If { then: Block, else_: ExprList, else_end_loc: Location },
    Load(LoadStore),
    LoadSplat(LoadStore),
    LocalGet(Var),
    LocalSet(Var),
    LocalTee(Var),
    Loop(Block),
    MemoryCopy,
    MemoryFill,
    MemoryGrow,
    MemoryInit(Var),
    MemorySize,
    Nop,
    RefFunc(Var),
    RefIsNull,
    RefNull,
    Rethrow,
    Return,
    ReturnCall(Var),
    ReturnCallIndirect { decl: FuncDeclaration, table: Var },
    Select,
    SimdLaneOp { opcode: Opcode, lane: u64 },
    SimdShuffleOp { opcode: Opcode, lanes: V128 },
    Store(LoadStore),
    TableCopy { dst: Var, src: Var },
    TableGet(Var),
    TableGrow(Var),
    TableInit { segment: Var, table: Var },
    TableSet(Var),
    TableSize(Var),
    Ternary(Opcode),
    Throw(Var),
    Try { block: Block, catch: ExprList },
    Unary(Opcode),
    Unreachable,
}

/// One instruction node: a type tag with its payload, plus where it was
/// written.
///
/// The IR stores what was written; no folding or evaluation happens here.
#[derive(Debug, Clone)]
pub struct Expr {
    pub loc: Location,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { loc: Location::default(), kind }
    }

    pub fn with_loc(mut self, loc: Location) -> Self {
        self.loc = loc;
        self
    }

    /// The discriminator of this node's variant.
    pub fn ty(&self) -> ExprType {
        match &self.kind {
            ExprKind::AtomicLoad(_) => ExprType::AtomicLoad,
            ExprKind::AtomicNotify(_) => ExprType::AtomicNotify,
            ExprKind::AtomicRmw(_) => ExprType::AtomicRmw,
            ExprKind::AtomicRmwCmpxchg(_) => ExprType::AtomicRmwCmpxchg,
            ExprKind::AtomicStore(_) => ExprType::AtomicStore,
            ExprKind::AtomicWait(_) => ExprType::AtomicWait,
            ExprKind::Binary(_) => ExprType::Binary,
            ExprKind::Block(_) => ExprType::Block,
            ExprKind::Br(_) => ExprType::Br,
            ExprKind::BrIf(_) => ExprType::BrIf,
            ExprKind::BrOnExn { .. } => ExprType::BrOnExn,
            ExprKind::BrTable { .. } => ExprType::BrTable,
            ExprKind::Call(_) => ExprType::Call,
            ExprKind::CallIndirect { .. } => ExprType::CallIndirect,
            ExprKind::Compare(_) => ExprType::Compare,
            ExprKind::Const(_) => ExprType::Const,
            ExprKind::Convert(_) => ExprType::Convert,
            ExprKind::DataDrop(_) => ExprType::DataDrop,
            ExprKind::Drop => ExprType::Drop,
            ExprKind::ElemDrop(_) => ExprType::ElemDrop,
            ExprKind::GlobalGet(_) => ExprType::GlobalGet,
            ExprKind::GlobalSet(_) => ExprType::GlobalSet,
            ExprKind::If { .. } => ExprType::If,
            ExprKind::Load(_) => ExprType::Load,
            ExprKind::LoadSplat(_) => ExprType::LoadSplat,
            ExprKind::LocalGet(_) => ExprType::LocalGet,
            ExprKind::LocalSet(_) => ExprType::LocalSet,
            ExprKind::LocalTee(_) => ExprType::LocalTee,
            ExprKind::Loop(_) => ExprType::Loop,
            ExprKind::MemoryCopy => ExprType::MemoryCopy,
            ExprKind::MemoryFill => ExprType::MemoryFill,
            ExprKind::MemoryGrow => ExprType::MemoryGrow,
            ExprKind::MemoryInit(_) => ExprType::MemoryInit,
            ExprKind::MemorySize => ExprType::MemorySize,
            ExprKind::Nop => ExprType::Nop,
            ExprKind::RefFunc(_) => ExprType::RefFunc,
            ExprKind::RefIsNull => ExprType::RefIsNull,
            ExprKind::RefNull => ExprType::RefNull,
            ExprKind::Rethrow => ExprType::Rethrow,
            ExprKind::Return => ExprType::Return,
            ExprKind::ReturnCall(_) => ExprType::ReturnCall,
            ExprKind::ReturnCallIndirect { .. } => ExprType::ReturnCallIndirect,
            ExprKind::Select => ExprType::Select,
            ExprKind::SimdLaneOp { .. } => ExprType::SimdLaneOp,
            ExprKind::SimdShuffleOp { .. } => ExprType::SimdShuffleOp,
            ExprKind::Store(_) => ExprType::Store,
            ExprKind::TableCopy { .. } => ExprType::TableCopy,
            ExprKind::TableGet(_) => ExprType::TableGet,
            ExprKind::TableGrow(_) => ExprType::TableGrow,
            ExprKind::TableInit { .. } => ExprType::TableInit,
            ExprKind::TableSet(_) => ExprType::TableSet,
            ExprKind::TableSize(_) => ExprType::TableSize,
            ExprKind::Ternary(_) => ExprType::Ternary,
            ExprKind::Throw(_) => ExprType::Throw,
            ExprKind::Try { .. } => ExprType::Try,
            ExprKind::Unary(_) => ExprType::Unary,
            ExprKind::Unreachable => ExprType::Unreachable,
        }
    }

    /// The payload of a `Block` node.
    pub fn as_block(&self) -> Option<&Block> {
        match &self.kind {
            ExprKind::Block(block) => Some(block),
            _ => None,
        }
    }

    /// The payload of a `Loop` node.
    pub fn as_loop(&self) -> Option<&Block> {
        match &self.kind {
            ExprKind::Loop(block) => Some(block),
            _ => None,
        }
    }

    /// The single `Var` of a var-carrying node, if this is one.
    pub fn as_var(&self) -> Option<&Var> {
        match &self.kind {
            ExprKind::Br(var)
            | ExprKind::BrIf(var)
            | ExprKind::Call(var)
            | ExprKind::ReturnCall(var)
            | ExprKind::GlobalGet(var)
            | ExprKind::GlobalSet(var)
            | ExprKind::LocalGet(var)
            | ExprKind::LocalSet(var)
            | ExprKind::LocalTee(var)
            | ExprKind::Throw(var)
            | ExprKind::RefFunc(var)
            | ExprKind::MemoryInit(var)
            | ExprKind::DataDrop(var)
            | ExprKind::ElemDrop(var)
            | ExprKind::TableGet(var)
            | ExprKind::TableSet(var)
            | ExprKind::TableGrow(var)
            | ExprKind::TableSize(var) => Some(var),
            _ => None,
        }
    }

    /// The catalogue opcode of an opcode-carrying node, if this is one.
    pub fn as_opcode(&self) -> Option<Opcode> {
        match &self.kind {
            ExprKind::Binary(opcode)
            | ExprKind::Compare(opcode)
            | ExprKind::Convert(opcode)
            | ExprKind::Unary(opcode)
            | ExprKind::Ternary(opcode) => Some(*opcode),
            ExprKind::SimdLaneOp { opcode, .. } | ExprKind::SimdShuffleOp { opcode, .. } => Some(*opcode),
            ExprKind::Load(inner)
            | ExprKind::Store(inner)
            | ExprKind::AtomicLoad(inner)
            | ExprKind::AtomicStore(inner)
            | ExprKind::AtomicRmw(inner)
            | ExprKind::AtomicRmwCmpxchg(inner)
            | ExprKind::AtomicWait(inner)
            | ExprKind::AtomicNotify(inner)
            | ExprKind::LoadSplat(inner) => Some(inner.opcode),
            _ => None,
        }
    }

    /// The constant of a `Const` node.
    pub fn as_const(&self) -> Option<&Const> {
        match &self.kind {
            ExprKind::Const(value) => Some(value),
            _ => None,
        }
    }

    /// Downcast to a `Block` node, failing with `WrongVariant` otherwise.
    pub fn expect_block(&self) -> Result<&Block> {
        self.as_block().ok_or_else(|| Error::wrong_variant(ExprType::Block.name(), self.ty().name()))
    }

    /// Downcast to an `If` node, failing with `WrongVariant` otherwise.
    pub fn expect_if(&self) -> Result<(&Block, &ExprList)> {
        match &self.kind {
            ExprKind::If { then, else_, .. } => Ok((then, else_)),
            _ => Err(Error::wrong_variant(ExprType::If.name(), self.ty().name())),
        }
    }

    /// Downcast to a `Try` node, failing with `WrongVariant` otherwise.
    pub fn expect_try(&self) -> Result<(&Block, &ExprList)> {
        match &self.kind {
            ExprKind::Try { block, catch } => Ok((block, catch)),
            _ => Err(Error::wrong_variant(ExprType::Try.name(), self.ty().name())),
        }
    }
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_append_is_a_splice() {
        let mut body = ExprList::new();
        body.push_back(Expr::new(ExprKind::Nop));
        body.push_back(Expr::new(ExprKind::Drop));

        let mut rest = ExprList::new();
        rest.push_back(Expr::new(ExprKind::Return));

        body.append(&mut rest);
        assert!(rest.is_empty());
        let types: Vec<_> = body.iter().map(Expr::ty).collect();
        assert_eq!(types, [ExprType::Nop, ExprType::Drop, ExprType::Return]);
    }

    #[test]
    fn moving_a_parent_moves_the_subtree() {
        let mut inner = ExprList::new();
        inner.push_back(Expr::new(ExprKind::Unreachable));
        let block = Block::new(inner);

        let mut body = ExprList::new();
        body.push_back(Expr::new(ExprKind::Block(block)));

        let parent = body.pop_back().unwrap();
        let block = parent.as_block().unwrap();
        assert_eq!(block.exprs.len(), 1);
        assert_eq!(block.exprs.front().unwrap().ty(), ExprType::Unreachable);
    }

    #[test]
    fn downcasts_check_the_tag() {
        let nop = Expr::new(ExprKind::Nop);
        assert_eq!(nop.ty(), ExprType::Nop);
        assert!(nop.as_block().is_none());

        let err = nop.expect_block().unwrap_err();
        assert!(matches!(err, Error::WrongVariant { expected: "Block", found: "Nop" }));

        let block = Expr::new(ExprKind::Block(Block::default()));
        assert!(block.expect_block().is_ok());
        assert!(block.expect_if().is_err());
    }

    #[test]
    fn var_and_opcode_accessors() {
        let call = Expr::new(ExprKind::Call(Var::name("$f")));
        assert_eq!(call.as_var().and_then(Var::as_name), Some("$f"));

        let add = Expr::new(ExprKind::Binary(Opcode::I32Add));
        assert_eq!(add.as_opcode(), Some(Opcode::I32Add));

        let load = Expr::new(ExprKind::Load(LoadStore::natural_align(Opcode::I32Load)));
        assert_eq!(load.as_opcode(), Some(Opcode::I32Load));
        match &load.kind {
            ExprKind::Load(inner) => assert_eq!(inner.align, 4),
            _ => unreachable!(),
        }

        let select = Expr::new(ExprKind::Select);
        assert!(select.as_var().is_none());
        assert!(select.as_opcode().is_none());
    }

    #[test]
    fn if_carries_both_arms() {
        let mut then = Block::default();
        then.label = Some("$l".into());
        then.exprs.push_back(Expr::new(ExprKind::Const(Const::i32(1))));

        let mut else_ = ExprList::new();
        else_.push_back(Expr::new(ExprKind::Const(Const::i32(2))));

        let expr = Expr::new(ExprKind::If { then, else_, else_end_loc: Location::default() });
        let (then, else_) = expr.expect_if().unwrap();
        assert_eq!(then.exprs.len(), 1);
        assert_eq!(else_.len(), 1);
        assert_eq!(then.label.as_deref(), Some("$l"));
    }
}
