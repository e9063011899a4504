use alloc::string::String;
use alloc::vec::Vec;

use tinywast_types::{ExternalKind, FuncSignature, Index, Limits, Location, ValType};

use crate::binding::{Binding, BindingHash};
use crate::error::Error;
use crate::expr::ExprList;
use crate::func::{Func, FuncDeclaration, FuncType};
use crate::var::Var;

/// Segment flag bit: the segment is passive (not copied at instantiation).
pub const SEG_PASSIVE: u8 = 1;
/// Segment flag bit: the segment carries an explicit table/memory index.
pub const SEG_HAS_INDEX: u8 = 2;
/// Segment flag bit (element segments only): items are element expressions
/// rather than a bare function-index vector.
pub const SEG_USE_ELEM_EXPRS: u8 = 4;

/// A global definition: type, mutability and initializer.
#[derive(Debug, Clone)]
pub struct Global {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub ty: ValType,
    pub mutable: bool,
    pub init_expr: ExprList,
}

impl Global {
    pub fn new(name: impl Into<String>, ty: ValType) -> Self {
        Self { name: name.into(), ty, mutable: false, init_expr: ExprList::new() }
    }
}

/// A table definition: limits plus element type.
#[derive(Debug, Clone)]
pub struct Table {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub elem_limits: Limits,
    /// `FuncRef` or `AnyRef`.
    pub elem_type: ValType,
}

impl Table {
    pub fn new(name: impl Into<String>, elem_limits: Limits, elem_type: ValType) -> Self {
        Self { name: name.into(), elem_limits, elem_type }
    }
}

/// A memory definition.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub page_limits: Limits,
}

impl Memory {
    pub fn new(name: impl Into<String>, page_limits: Limits) -> Self {
        Self { name: name.into(), page_limits }
    }
}

/// An event (exception tag): a function-style declaration describing its
/// payload.
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub decl: FuncDeclaration,
}

impl Event {
    pub fn new(name: impl Into<String>, decl: FuncDeclaration) -> Self {
        Self { name: name.into(), decl }
    }
}

/// One item of an element segment that uses element expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElemExpr {
    /// `(ref.null)`
    RefNull,
    /// `(ref.func <var>)`
    RefFunc(Var),
}

/// An element segment.
///
/// Active segments carry an offset expression and a table reference; for
/// passive segments (`flags & SEG_PASSIVE`) the offset list is empty and the
/// table reference is ignored.
#[derive(Debug, Clone)]
pub struct ElemSegment {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub table_var: Var,
    pub flags: u8,
    pub elem_type: ValType,
    pub offset: ExprList,
    pub elem_exprs: Vec<ElemExpr>,
}

impl ElemSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_var: Var::default(),
            flags: 0,
            elem_type: ValType::FuncRef,
            offset: ExprList::new(),
            elem_exprs: Vec::new(),
        }
    }

    pub fn is_passive(&self) -> bool {
        self.flags & SEG_PASSIVE != 0
    }
}

/// A data segment. Same passivity rules as [`ElemSegment`], with the memory
/// reference in place of the table reference.
#[derive(Debug, Clone)]
pub struct DataSegment {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub memory_var: Var,
    pub flags: u8,
    pub offset: ExprList,
    pub data: Vec<u8>,
}

impl DataSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), memory_var: Var::default(), flags: 0, offset: ExprList::new(), data: Vec::new() }
    }

    pub fn is_passive(&self) -> bool {
        self.flags & SEG_PASSIVE != 0
    }
}

/// The imported entity wrapped by an [`Import`].
#[derive(Debug, Clone)]
pub enum ImportKind {
    Func(Func),
    Table(Table),
    Memory(Memory),
    Global(Global),
    Event(Event),
}

/// An import: a two-level `(module, field)` name plus the imported entity.
#[derive(Debug, Clone)]
pub struct Import {
    pub module: String,
    pub field: String,
    pub kind: ImportKind,
}

impl Import {
    pub fn new(module: impl Into<String>, field: impl Into<String>, kind: ImportKind) -> Self {
        Self { module: module.into(), field: field.into(), kind }
    }

    pub fn external_kind(&self) -> ExternalKind {
        match self.kind {
            ImportKind::Func(_) => ExternalKind::Func,
            ImportKind::Table(_) => ExternalKind::Table,
            ImportKind::Memory(_) => ExternalKind::Memory,
            ImportKind::Global(_) => ExternalKind::Global,
            ImportKind::Event(_) => ExternalKind::Event,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match &self.kind {
            ImportKind::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.kind {
            ImportKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_memory(&self) -> Option<&Memory> {
        match &self.kind {
            ImportKind::Memory(memory) => Some(memory),
            _ => None,
        }
    }

    pub fn as_global(&self) -> Option<&Global> {
        match &self.kind {
            ImportKind::Global(global) => Some(global),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match &self.kind {
            ImportKind::Event(event) => Some(event),
            _ => None,
        }
    }

    fn as_func_mut(&mut self) -> Option<&mut Func> {
        match &mut self.kind {
            ImportKind::Func(func) => Some(func),
            _ => None,
        }
    }

    fn as_table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.kind {
            ImportKind::Table(table) => Some(table),
            _ => None,
        }
    }

    fn as_memory_mut(&mut self) -> Option<&mut Memory> {
        match &mut self.kind {
            ImportKind::Memory(memory) => Some(memory),
            _ => None,
        }
    }

    fn as_global_mut(&mut self) -> Option<&mut Global> {
        match &mut self.kind {
            ImportKind::Global(global) => Some(global),
            _ => None,
        }
    }

    fn as_event_mut(&mut self) -> Option<&mut Event> {
        match &mut self.kind {
            ImportKind::Event(event) => Some(event),
            _ => None,
        }
    }

    /// The binding name carried by the imported entity, empty if unnamed.
    pub fn binding_name(&self) -> &str {
        match &self.kind {
            ImportKind::Func(func) => &func.name,
            ImportKind::Table(table) => &table.name,
            ImportKind::Memory(memory) => &memory.name,
            ImportKind::Global(global) => &global.name,
            ImportKind::Event(event) => &event.name,
        }
    }
}

/// An export: local name, kind and a reference to the exported entity.
#[derive(Debug, Clone)]
pub struct Export {
    pub name: String,
    pub kind: ExternalKind,
    pub var: Var,
}

/// The discriminator of a [`ModuleField`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ModuleFieldType {
    Func,
    Global,
    Import,
    Export,
    FuncType,
    Table,
    ElemSegment,
    Memory,
    DataSegment,
    Start,
    Event,
}

/// The payload of one module field.
#[derive(Debug, Clone)]
pub enum ModuleFieldKind {
    Func(Func),
    Global(Global),
    Import(Import),
    Export(Export),
    FuncType(FuncType),
    Table(Table),
    ElemSegment(ElemSegment),
    Memory(Memory),
    DataSegment(DataSegment),
    Start(Var),
    Event(Event),
}

/// One field of a module, in source order.
#[derive(Debug, Clone)]
pub struct ModuleField {
    pub loc: Location,
    pub kind: ModuleFieldKind,
}

impl ModuleField {
    pub fn new(kind: ModuleFieldKind) -> Self {
        Self { loc: Location::default(), kind }
    }

    pub fn with_loc(mut self, loc: Location) -> Self {
        self.loc = loc;
        self
    }

    pub fn ty(&self) -> ModuleFieldType {
        match self.kind {
            ModuleFieldKind::Func(_) => ModuleFieldType::Func,
            ModuleFieldKind::Global(_) => ModuleFieldType::Global,
            ModuleFieldKind::Import(_) => ModuleFieldType::Import,
            ModuleFieldKind::Export(_) => ModuleFieldType::Export,
            ModuleFieldKind::FuncType(_) => ModuleFieldType::FuncType,
            ModuleFieldKind::Table(_) => ModuleFieldType::Table,
            ModuleFieldKind::ElemSegment(_) => ModuleFieldType::ElemSegment,
            ModuleFieldKind::Memory(_) => ModuleFieldType::Memory,
            ModuleFieldKind::DataSegment(_) => ModuleFieldType::DataSegment,
            ModuleFieldKind::Start(_) => ModuleFieldType::Start,
            ModuleFieldKind::Event(_) => ModuleFieldType::Event,
        }
    }
}

impl From<ModuleFieldKind> for ModuleField {
    fn from(kind: ModuleFieldKind) -> Self {
        Self::new(kind)
    }
}

/// A parsed module: the source-ordered field list plus, per kind, a cache of
/// field positions, a binding table, and a count of leading imports.
///
/// Caches hold positions into the field list instead of pointers; they stay
/// valid because the list is append-only through [`Module::append_field`].
/// Imports must precede in-module definitions of the same kind for the index
/// spaces to match the binary format; keeping that order is the producer's
/// job, not `append_field`'s.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub loc: Location,
    /// Binding name, empty if unnamed.
    pub name: String,

    pub(crate) fields: Vec<ModuleField>,

    pub num_func_imports: Index,
    pub num_table_imports: Index,
    pub num_memory_imports: Index,
    pub num_global_imports: Index,
    pub num_event_imports: Index,

    // Field positions, one vector per index space.
    funcs: Vec<usize>,
    tables: Vec<usize>,
    memories: Vec<usize>,
    globals: Vec<usize>,
    events: Vec<usize>,
    func_types: Vec<usize>,
    elem_segments: Vec<usize>,
    data_segments: Vec<usize>,
    imports: Vec<usize>,
    exports: Vec<usize>,
    starts: Vec<usize>,

    pub func_bindings: BindingHash,
    pub table_bindings: BindingHash,
    pub memory_bindings: BindingHash,
    pub global_bindings: BindingHash,
    pub event_bindings: BindingHash,
    pub func_type_bindings: BindingHash,
    pub elem_segment_bindings: BindingHash,
    pub data_segment_bindings: BindingHash,
    pub export_bindings: BindingHash,
}

// Generates the dual lookups of one index space: `*_index` resolves a `Var`
// to an index, the getter pair dereferences the position cache. Kinds that
// can be imported also unwrap their payload out of an `Import` field.
macro_rules! lookup_impl {
    (@common $index_fn:ident, $get_fn:ident, $get_mut_fn:ident, $at_fn:ident, $at_mut_fn:ident,
     $cache:ident, $bindings:ident, $payload:ty) => {
        /// Resolve a reference into this index space. Numeric references are
        /// returned verbatim; name misses return `None`.
        pub fn $index_fn(&self, var: &Var) -> Option<Index> {
            match var.as_index() {
                Some(index) => Some(index),
                None => self.$bindings.index_of(var.as_name().unwrap_or("")),
            }
        }

        /// Resolve a reference and dereference the cache.
        pub fn $get_fn(&self, var: &Var) -> Option<&$payload> {
            let index = self.$index_fn(var)?;
            self.$at_fn(*self.$cache.get(index as usize)?)
        }

        /// Mutable counterpart of the dereferencing lookup.
        pub fn $get_mut_fn(&mut self, var: &Var) -> Option<&mut $payload> {
            let index = self.$index_fn(var)?;
            let pos = *self.$cache.get(index as usize)?;
            self.$at_mut_fn(pos)
        }
    };

    ($index_fn:ident, $get_fn:ident, $get_mut_fn:ident, $at_fn:ident, $at_mut_fn:ident,
     $cache:ident, $bindings:ident, $payload:ty, $variant:ident, $import_as:ident, $import_as_mut:ident) => {
        lookup_impl!(@common $index_fn, $get_fn, $get_mut_fn, $at_fn, $at_mut_fn, $cache, $bindings, $payload);

        fn $at_fn(&self, pos: usize) -> Option<&$payload> {
            match &self.fields.get(pos)?.kind {
                ModuleFieldKind::$variant(payload) => Some(payload),
                ModuleFieldKind::Import(import) => import.$import_as(),
                _ => None,
            }
        }

        fn $at_mut_fn(&mut self, pos: usize) -> Option<&mut $payload> {
            match &mut self.fields.get_mut(pos)?.kind {
                ModuleFieldKind::$variant(payload) => Some(payload),
                ModuleFieldKind::Import(import) => import.$import_as_mut(),
                _ => None,
            }
        }
    };

    ($index_fn:ident, $get_fn:ident, $get_mut_fn:ident, $at_fn:ident, $at_mut_fn:ident,
     $cache:ident, $bindings:ident, $payload:ty, $variant:ident) => {
        lookup_impl!(@common $index_fn, $get_fn, $get_mut_fn, $at_fn, $at_mut_fn, $cache, $bindings, $payload);

        fn $at_fn(&self, pos: usize) -> Option<&$payload> {
            match &self.fields.get(pos)?.kind {
                ModuleFieldKind::$variant(payload) => Some(payload),
                _ => None,
            }
        }

        fn $at_mut_fn(&mut self, pos: usize) -> Option<&mut $payload> {
            match &mut self.fields.get_mut(pos)?.kind {
                ModuleFieldKind::$variant(payload) => Some(payload),
                _ => None,
            }
        }
    };
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// The fields, in source order.
    pub fn fields(&self) -> &[ModuleField] {
        &self.fields
    }

    /// Move a field into the module, updating the matching cache, binding
    /// table and import count.
    ///
    /// References carried by the field are not validated here; that is the
    /// resolver's and validator's job.
    pub fn append_field(&mut self, field: ModuleField) {
        let pos = self.fields.len();
        let loc = field.loc.clone();

        match &field.kind {
            ModuleFieldKind::Func(func) => {
                self.func_bindings.insert(&func.name, Binding::new(loc, self.funcs.len() as Index));
                self.funcs.push(pos);
            }
            ModuleFieldKind::Global(global) => {
                self.global_bindings.insert(&global.name, Binding::new(loc, self.globals.len() as Index));
                self.globals.push(pos);
            }
            ModuleFieldKind::Import(import) => {
                let name = import.binding_name();
                match import.kind {
                    ImportKind::Func(_) => {
                        self.func_bindings.insert(name, Binding::new(loc, self.funcs.len() as Index));
                        self.funcs.push(pos);
                        self.num_func_imports += 1;
                    }
                    ImportKind::Table(_) => {
                        self.table_bindings.insert(name, Binding::new(loc, self.tables.len() as Index));
                        self.tables.push(pos);
                        self.num_table_imports += 1;
                    }
                    ImportKind::Memory(_) => {
                        self.memory_bindings.insert(name, Binding::new(loc, self.memories.len() as Index));
                        self.memories.push(pos);
                        self.num_memory_imports += 1;
                    }
                    ImportKind::Global(_) => {
                        self.global_bindings.insert(name, Binding::new(loc, self.globals.len() as Index));
                        self.globals.push(pos);
                        self.num_global_imports += 1;
                    }
                    ImportKind::Event(_) => {
                        self.event_bindings.insert(name, Binding::new(loc, self.events.len() as Index));
                        self.events.push(pos);
                        self.num_event_imports += 1;
                    }
                }
                self.imports.push(pos);
            }
            ModuleFieldKind::Export(export) => {
                self.export_bindings.insert(&export.name, Binding::new(loc, self.exports.len() as Index));
                self.exports.push(pos);
            }
            ModuleFieldKind::FuncType(func_type) => {
                self.func_type_bindings.insert(&func_type.name, Binding::new(loc, self.func_types.len() as Index));
                self.func_types.push(pos);
            }
            ModuleFieldKind::Table(table) => {
                self.table_bindings.insert(&table.name, Binding::new(loc, self.tables.len() as Index));
                self.tables.push(pos);
            }
            ModuleFieldKind::ElemSegment(segment) => {
                self.elem_segment_bindings.insert(&segment.name, Binding::new(loc, self.elem_segments.len() as Index));
                self.elem_segments.push(pos);
            }
            ModuleFieldKind::Memory(memory) => {
                self.memory_bindings.insert(&memory.name, Binding::new(loc, self.memories.len() as Index));
                self.memories.push(pos);
            }
            ModuleFieldKind::DataSegment(segment) => {
                self.data_segment_bindings.insert(&segment.name, Binding::new(loc, self.data_segments.len() as Index));
                self.data_segments.push(pos);
            }
            ModuleFieldKind::Start(_) => self.starts.push(pos),
            ModuleFieldKind::Event(event) => {
                self.event_bindings.insert(&event.name, Binding::new(loc, self.events.len() as Index));
                self.events.push(pos);
            }
        }

        self.fields.push(field);
    }

    /// Move every field of `fields` into the module, in order.
    pub fn append_fields(&mut self, fields: impl IntoIterator<Item = ModuleField>) {
        for field in fields {
            self.append_field(field);
        }
    }

    pub fn func_count(&self) -> Index {
        self.funcs.len() as Index
    }

    pub fn table_count(&self) -> Index {
        self.tables.len() as Index
    }

    pub fn memory_count(&self) -> Index {
        self.memories.len() as Index
    }

    pub fn global_count(&self) -> Index {
        self.globals.len() as Index
    }

    pub fn event_count(&self) -> Index {
        self.events.len() as Index
    }

    pub fn func_type_count(&self) -> Index {
        self.func_types.len() as Index
    }

    pub fn elem_segment_count(&self) -> Index {
        self.elem_segments.len() as Index
    }

    pub fn data_segment_count(&self) -> Index {
        self.data_segments.len() as Index
    }

    pub fn import_count(&self) -> Index {
        self.imports.len() as Index
    }

    pub fn export_count(&self) -> Index {
        self.exports.len() as Index
    }

    /// The function at each index of the function index space, imports first.
    pub fn funcs(&self) -> impl Iterator<Item = &Func> {
        self.funcs.iter().filter_map(|&pos| self.func_at(pos))
    }

    /// Every function type, in index order.
    pub fn func_types(&self) -> impl Iterator<Item = &FuncType> {
        self.func_types.iter().filter_map(|&pos| self.func_type_at(pos))
    }

    /// Every import, in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter_map(|&pos| match &self.fields.get(pos)?.kind {
            ModuleFieldKind::Import(import) => Some(import),
            _ => None,
        })
    }

    /// The module's start references, in declaration order.
    pub fn starts(&self) -> impl Iterator<Item = &Var> {
        self.starts.iter().filter_map(|&pos| match &self.fields.get(pos)?.kind {
            ModuleFieldKind::Start(var) => Some(var),
            _ => None,
        })
    }

    lookup_impl!(func_index, func, func_mut, func_at, func_at_mut, funcs, func_bindings, Func, Func, as_func, as_func_mut);
    lookup_impl!(table_index, table, table_mut, table_at, table_at_mut, tables, table_bindings, Table, Table, as_table, as_table_mut);
    lookup_impl!(
        memory_index,
        memory,
        memory_mut,
        memory_at,
        memory_at_mut,
        memories,
        memory_bindings,
        Memory,
        Memory,
        as_memory,
        as_memory_mut
    );
    lookup_impl!(
        global_index,
        global,
        global_mut,
        global_at,
        global_at_mut,
        globals,
        global_bindings,
        Global,
        Global,
        as_global,
        as_global_mut
    );
    lookup_impl!(event_index, event, event_mut, event_at, event_at_mut, events, event_bindings, Event, Event, as_event, as_event_mut);
    lookup_impl!(
        func_type_index,
        func_type,
        func_type_mut,
        func_type_at,
        func_type_at_mut,
        func_types,
        func_type_bindings,
        FuncType,
        FuncType
    );
    lookup_impl!(
        elem_segment_index,
        elem_segment,
        elem_segment_mut,
        elem_segment_at,
        elem_segment_at_mut,
        elem_segments,
        elem_segment_bindings,
        ElemSegment,
        ElemSegment
    );
    lookup_impl!(
        data_segment_index,
        data_segment,
        data_segment_mut,
        data_segment_at,
        data_segment_at_mut,
        data_segments,
        data_segment_bindings,
        DataSegment,
        DataSegment
    );

    /// The export with the given (local) name.
    pub fn export(&self, name: &str) -> Option<&Export> {
        let index = self.export_bindings.index_of(name)?;
        match &self.fields.get(*self.exports.get(index as usize)?)?.kind {
            ModuleFieldKind::Export(export) => Some(export),
            _ => None,
        }
    }

    /// The index of the function type structurally equal to `sig`.
    pub fn func_type_index_by_sig(&self, sig: &FuncSignature) -> Option<Index> {
        self.func_types().position(|func_type| func_type.sig == *sig).map(|at| at as Index)
    }

    /// The function-type index a declaration refers to: its explicit type
    /// reference when present, otherwise the first type matching its inline
    /// signature.
    pub fn func_type_index_by_decl(&self, decl: &FuncDeclaration) -> Option<Index> {
        match &decl.type_var {
            Some(type_var) => self.func_type_index(type_var),
            None => self.func_type_index_by_sig(&decl.sig),
        }
    }

    /// Whether a reference into `kind`'s index space lands on an import.
    /// Imports always occupy the leading indices of a space.
    pub fn is_import(&self, kind: ExternalKind, var: &Var) -> bool {
        let looked_up = match kind {
            ExternalKind::Func => self.func_index(var).map(|index| (index, self.num_func_imports)),
            ExternalKind::Table => self.table_index(var).map(|index| (index, self.num_table_imports)),
            ExternalKind::Memory => self.memory_index(var).map(|index| (index, self.num_memory_imports)),
            ExternalKind::Global => self.global_index(var).map(|index| (index, self.num_global_imports)),
            ExternalKind::Event => self.event_index(var).map(|index| (index, self.num_event_imports)),
        };
        matches!(looked_up, Some((index, num_imports)) if index < num_imports)
    }

    /// Whether an export refers to an imported entity.
    pub fn is_import_export(&self, export: &Export) -> bool {
        self.is_import(export.kind, &export.var)
    }

    /// Scan every namespace for names bound more than once. Duplicates are
    /// legal in storage precisely so this pass can report both locations.
    pub fn find_duplicate_bindings(&self) -> Vec<Error> {
        let namespaces = [
            ("function", &self.func_bindings),
            ("table", &self.table_bindings),
            ("memory", &self.memory_bindings),
            ("global", &self.global_bindings),
            ("event", &self.event_bindings),
            ("type", &self.func_type_bindings),
            ("elem segment", &self.elem_segment_bindings),
            ("data segment", &self.data_segment_bindings),
            ("export", &self.export_bindings),
        ];

        let mut errors = Vec::new();
        for (kind, bindings) in namespaces {
            for (name, bindings) in bindings.duplicates() {
                let first = &bindings[0];
                for duplicate in &bindings[1..] {
                    errors.push(Error::DuplicateBinding {
                        kind,
                        name: name.into(),
                        first: first.loc.clone(),
                        duplicate: duplicate.loc.clone(),
                    });
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn named_func_field(name: &str) -> ModuleField {
        ModuleField::new(ModuleFieldKind::Func(Func::new(name)))
    }

    #[test]
    fn append_field_binds_names_to_positions() {
        let mut module = Module::default();
        module.append_field(named_func_field("$a"));
        module.append_field(named_func_field("$b"));

        assert_eq!(module.func_index(&Var::name("$a")), Some(0));
        assert_eq!(module.func_index(&Var::name("$b")), Some(1));
        assert_eq!(module.func_index(&Var::name("$missing")), None);
        assert_eq!(module.func(&Var::name("$b")).map(|f| f.name.as_str()), Some("$b"));
        assert_eq!(module.func_count(), 2);
    }

    #[test]
    fn numeric_references_pass_through() {
        let mut module = Module::default();
        module.append_field(named_func_field("$a"));
        // Verbatim even when out of range; dereferencing catches it.
        assert_eq!(module.func_index(&Var::index(17)), Some(17));
        assert!(module.func(&Var::index(17)).is_none());
        assert!(module.func(&Var::index(0)).is_some());
    }

    #[test]
    fn imports_precede_definitions() {
        let mut module = Module::default();
        module.append_field(ModuleField::new(ModuleFieldKind::Import(Import::new(
            "env",
            "f",
            ImportKind::Func(Func::new("$imported")),
        ))));
        module.append_field(named_func_field("$defined"));

        assert_eq!(module.num_func_imports, 1);
        assert_eq!(module.func_count(), 2);
        assert_eq!(module.import_count(), 1);
        assert!(module.is_import(ExternalKind::Func, &Var::index(0)));
        assert!(!module.is_import(ExternalKind::Func, &Var::index(1)));
        assert!(module.is_import(ExternalKind::Func, &Var::name("$imported")));
        assert_eq!(module.func(&Var::name("$imported")).map(|f| f.name.as_str()), Some("$imported"));
    }

    #[test]
    fn imported_entities_dereference_through_the_import_field() {
        let mut module = Module::default();
        module.append_field(ModuleField::new(ModuleFieldKind::Import(Import::new(
            "env",
            "t",
            ImportKind::Table(Table::new("$t", Limits::bounded(1, 8), ValType::FuncRef)),
        ))));
        module.append_field(ModuleField::new(ModuleFieldKind::Import(Import::new(
            "env",
            "g",
            ImportKind::Global(Global::new("$g", ValType::I64)),
        ))));

        let table = module.table(&Var::name("$t")).unwrap();
        assert_eq!(table.elem_limits.max, Some(8));
        assert_eq!(module.global(&Var::index(0)).map(|g| g.ty), Some(ValType::I64));
        assert!(module.is_import(ExternalKind::Table, &Var::name("$t")));
        assert_eq!(module.num_table_imports, 1);
        assert_eq!(module.num_global_imports, 1);
    }

    #[test]
    fn duplicate_bindings_resolve_to_the_first_and_are_reported() {
        let mut module = Module::default();
        module.append_field(named_func_field("$f").with_loc(Location::new("t.wat", 1, 1, 5)));
        module.append_field(named_func_field("$f").with_loc(Location::new("t.wat", 2, 1, 5)));

        assert_eq!(module.func_index(&Var::name("$f")), Some(0));

        let errors = module.find_duplicate_bindings();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            Error::DuplicateBinding { kind, name, first, duplicate } => {
                assert_eq!(*kind, "function");
                assert_eq!(name, "$f");
                assert_eq!(first.line, 1);
                assert_eq!(duplicate.line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn func_types_coalesce_by_signature() {
        let mut module = Module::default();
        let unary = FuncSignature::new(vec![ValType::I32], vec![ValType::I32]);
        let nullary = FuncSignature::new(vec![], vec![]);
        module.append_field(ModuleField::new(ModuleFieldKind::FuncType(FuncType::new("$unary", unary.clone()))));
        module.append_field(ModuleField::new(ModuleFieldKind::FuncType(FuncType::new("", nullary.clone()))));

        assert_eq!(module.func_type_index_by_sig(&unary), Some(0));
        assert_eq!(module.func_type_index_by_sig(&nullary), Some(1));
        assert_eq!(module.func_type_index(&Var::name("$unary")), Some(0));

        let by_name = FuncDeclaration::by_type(Var::name("$unary"));
        assert_eq!(module.func_type_index_by_decl(&by_name), Some(0));
        let inline = FuncDeclaration::inline(nullary);
        assert_eq!(module.func_type_index_by_decl(&inline), Some(1));
        let unknown = FuncDeclaration::inline(FuncSignature::new(vec![ValType::F64], vec![]));
        assert_eq!(module.func_type_index_by_decl(&unknown), None);
    }

    #[test]
    fn segment_flags() {
        let mut segment = ElemSegment::new("");
        assert!(!segment.is_passive());
        segment.flags = SEG_PASSIVE | SEG_USE_ELEM_EXPRS;
        assert!(segment.is_passive());
        assert_eq!(segment.flags, 0x05);

        let mut data = DataSegment::new("$d");
        data.flags = SEG_PASSIVE;
        assert!(data.is_passive());
        data.flags = SEG_HAS_INDEX;
        assert!(!data.is_passive());
    }

    #[test]
    fn exports_resolve_by_name() {
        let mut module = Module::default();
        module.append_field(named_func_field("$f"));
        module.append_field(ModuleField::new(ModuleFieldKind::Export(Export {
            name: "run".into(),
            kind: ExternalKind::Func,
            var: Var::name("$f"),
        })));

        let export = module.export("run").unwrap();
        assert_eq!(export.kind, ExternalKind::Func);
        assert!(module.export("walk").is_none());
        assert_eq!(module.export_count(), 1);
    }
}
