use alloc::string::String;
use alloc::vec::Vec;

use tinywast_types::{FuncSignature, Index, ValType};

use crate::binding::BindingHash;
use crate::expr::ExprList;
use crate::var::Var;

/// A named entry in the module's function-type index space.
#[derive(Debug, Clone, Default)]
pub struct FuncType {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub sig: FuncSignature,
}

impl FuncType {
    pub fn new(name: impl Into<String>, sig: FuncSignature) -> Self {
        Self { name: name.into(), sig }
    }
}

/// How a function-shaped entity states its type: a reference to a named
/// signature (`type_var`), an inline signature, or both.
///
/// After resolution both forms must agree when both are present; that check
/// belongs to the validator.
#[derive(Debug, Clone, Default)]
pub struct FuncDeclaration {
    /// Reference into the function-type index space, if one was written.
    pub type_var: Option<Var>,
    /// The inline signature.
    pub sig: FuncSignature,
}

impl FuncDeclaration {
    /// A declaration with an inline signature only.
    pub fn inline(sig: FuncSignature) -> Self {
        Self { type_var: None, sig }
    }

    /// A declaration referencing a named signature.
    pub fn by_type(type_var: Var) -> Self {
        Self { type_var: Some(type_var), sig: FuncSignature::default() }
    }

    pub fn has_func_type(&self) -> bool {
        self.type_var.is_some()
    }

    pub fn param_count(&self) -> Index {
        self.sig.param_count()
    }

    pub fn result_count(&self) -> Index {
        self.sig.result_count()
    }

    pub fn param(&self, index: Index) -> Option<ValType> {
        self.sig.param(index)
    }

    pub fn result(&self, index: Index) -> Option<ValType> {
        self.sig.result(index)
    }
}

/// Local declarations, stored run-length-compressed as `(type, count)` runs
/// the way the binary format writes them, while presenting an expanded view.
///
/// Every run has `count > 0`. [`LocalTypes::append_decl`] does not coalesce
/// adjacent runs of the same type; only [`LocalTypes::set`] compresses.
#[derive(Debug, Clone, Default)]
pub struct LocalTypes {
    decls: Vec<(ValType, Index)>,
}

impl LocalTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the declarations with a run-length compression of `types`.
    pub fn set(&mut self, types: &[ValType]) {
        self.decls.clear();
        for &ty in types {
            match self.decls.last_mut() {
                Some((last, count)) if *last == ty => *count += 1,
                _ => self.decls.push((ty, 1)),
            }
        }
    }

    /// Append one `(type, count)` run. Zero counts are dropped.
    pub fn append_decl(&mut self, ty: ValType, count: Index) {
        if count != 0 {
            self.decls.push((ty, count));
        }
    }

    /// The raw runs.
    pub fn decls(&self) -> &[(ValType, Index)] {
        &self.decls
    }

    /// Number of locals, i.e. the sum of all run counts.
    pub fn len(&self) -> Index {
        self.decls.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// The type of the `index`th local. Linear in the number of runs.
    pub fn get(&self, index: Index) -> Option<ValType> {
        let mut remaining = index;
        for &(ty, count) in &self.decls {
            if remaining < count {
                return Some(ty);
            }
            remaining -= count;
        }
        None
    }

    /// Iterate the expanded sequence, yielding each type once per unit of
    /// count in declaration order.
    pub fn iter(&self) -> LocalTypesIter<'_> {
        LocalTypesIter { decls: &self.decls, decl: 0, offset: 0 }
    }
}

impl<'a> IntoIterator for &'a LocalTypes {
    type Item = ValType;
    type IntoIter = LocalTypesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over the expanded local sequence: a run cursor plus an
/// intra-run offset.
#[derive(Debug, Clone)]
pub struct LocalTypesIter<'a> {
    decls: &'a [(ValType, Index)],
    decl: usize,
    offset: Index,
}

impl Iterator for LocalTypesIter<'_> {
    type Item = ValType;

    fn next(&mut self) -> Option<ValType> {
        let &(ty, count) = self.decls.get(self.decl)?;
        self.offset += 1;
        if self.offset >= count {
            self.decl += 1;
            self.offset = 0;
        }
        Some(ty)
    }
}

/// A function definition: declaration, locals, named-local bindings and body.
///
/// Parameters and locals share one index space with parameters first:
/// parameters occupy `[0, param_count)` and locals
/// `[param_count, param_count + local_count)`.
#[derive(Debug, Clone, Default)]
pub struct Func {
    /// Binding name, empty if unnamed.
    pub name: String,
    pub decl: FuncDeclaration,
    pub local_types: LocalTypes,
    /// Local names (parameters included) to their position in the shared
    /// index space.
    pub bindings: BindingHash,
    /// The body.
    pub exprs: ExprList,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn param_count(&self) -> Index {
        self.decl.param_count()
    }

    pub fn local_count(&self) -> Index {
        self.local_types.len()
    }

    pub fn param_and_local_count(&self) -> Index {
        self.param_count() + self.local_count()
    }

    pub fn result_count(&self) -> Index {
        self.decl.result_count()
    }

    /// Resolve a local reference to its position in the shared index space.
    ///
    /// Numeric references are returned verbatim; bounds are the validator's
    /// concern. Name misses return `None`.
    pub fn local_index(&self, var: &Var) -> Option<Index> {
        match var.as_index() {
            Some(index) => Some(index),
            None => self.bindings.index_of(var.as_name().unwrap_or("")),
        }
    }

    /// The type of the parameter or local at `index`.
    pub fn local_type(&self, index: Index) -> Option<ValType> {
        let num_params = self.param_count();
        if index < num_params {
            self.decl.param(index)
        } else {
            self.local_types.get(index - num_params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use alloc::vec;
    use tinywast_types::Location;
    use ValType::{F64, I32, I64};

    #[test]
    fn set_compresses_runs() {
        let mut locals = LocalTypes::new();
        locals.set(&[I32, I32, F64, I32]);
        assert_eq!(locals.decls(), &[(I32, 2), (F64, 1), (I32, 1)]);
        assert_eq!(locals.len(), 4);
    }

    #[test]
    fn set_round_trips_through_iteration() {
        let types = [I32, I32, F64, I32];
        let mut locals = LocalTypes::new();
        locals.set(&types);
        let expanded: Vec<_> = locals.iter().collect();
        assert_eq!(expanded, types);
    }

    #[test]
    fn indexing_walks_runs() {
        let mut locals = LocalTypes::new();
        locals.set(&[I32, I32, F64, I32]);
        assert_eq!(locals.get(0), Some(I32));
        assert_eq!(locals.get(1), Some(I32));
        assert_eq!(locals.get(2), Some(F64));
        assert_eq!(locals.get(3), Some(I32));
        assert_eq!(locals.get(4), None);
    }

    #[test]
    fn zero_count_decls_are_dropped() {
        let mut locals = LocalTypes::new();
        locals.append_decl(I32, 0);
        assert!(locals.is_empty());
        assert_eq!(locals.len(), 0);
        assert_eq!(locals.iter().next(), None);
    }

    #[test]
    fn append_decl_does_not_coalesce() {
        let mut locals = LocalTypes::new();
        locals.append_decl(I32, 2);
        locals.append_decl(I32, 1);
        assert_eq!(locals.decls(), &[(I32, 2), (I32, 1)]);
        assert_eq!(locals.len(), 3);
        let expanded: Vec<_> = locals.iter().collect();
        assert_eq!(expanded, [I32, I32, I32]);
    }

    fn two_param_func() -> Func {
        let mut func = Func::new("$f");
        func.decl.sig = FuncSignature::new(vec![I32, I64], vec![]);
        func.local_types.append_decl(F64, 2);
        func.bindings.insert("$x", Binding::new(Location::default(), 0));
        func.bindings.insert("$tmp", Binding::new(Location::default(), 2));
        func
    }

    #[test]
    fn params_and_locals_share_an_index_space() {
        let func = two_param_func();
        assert_eq!(func.param_and_local_count(), 4);
        assert_eq!(func.local_type(0), Some(I32));
        assert_eq!(func.local_type(1), Some(I64));
        assert_eq!(func.local_type(2), Some(F64));
        assert_eq!(func.local_type(3), Some(F64));
        assert_eq!(func.local_type(4), None);
    }

    #[test]
    fn local_index_resolves_names_and_passes_indices_through() {
        let func = two_param_func();
        assert_eq!(func.local_index(&Var::name("$x")), Some(0));
        assert_eq!(func.local_index(&Var::name("$tmp")), Some(2));
        assert_eq!(func.local_index(&Var::name("$missing")), None);
        // Numeric references come back verbatim, even out of range.
        assert_eq!(func.local_index(&Var::index(9)), Some(9));
    }
}
