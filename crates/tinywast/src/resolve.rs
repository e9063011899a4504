//! Name resolution over a parsed module or script.
//!
//! Parsers leave references in whatever form was written; these passes
//! rewrite every symbolic [`Var`] to its index using the binding tables the
//! module built up during [`Module::append_field`]. After a successful
//! [`resolve_module`] no reference in the module is in name form.
//!
//! Errors are collected rather than raised on first failure so a driver can
//! report them all at once.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;

use crate::log;
use tinywast_types::{ExternalKind, FuncSignature, Index};

use crate::binding::BindingHash;
use crate::error::Error;
use crate::expr::{Block, ExprKind, ExprList};
use crate::func::{Func, FuncDeclaration, FuncType};
use crate::module::{ElemExpr, ImportKind, Module, ModuleField, ModuleFieldKind};
use crate::script::{Action, Command, Script};
use crate::var::Var;

/// Rewrite every name-form reference in the module to index form.
///
/// Numeric references are range-checked against their index space while the
/// pass is at it; a plain lookup through [`Module`] never does that.
pub fn resolve_module(module: &mut Module) -> Result<(), Vec<Error>> {
    log::debug!("resolving names in module {:?}", module.name);

    let mut fields = mem::take(&mut module.fields);
    let mut errors = Vec::new();
    {
        let mut resolver = Resolver { module, errors: &mut errors, labels: Vec::new() };
        for field in &mut fields {
            resolver.resolve_field(field);
        }
    }
    module.fields = fields;

    if errors.is_empty() {
        Ok(())
    } else {
        log::debug!("module {:?} failed to resolve with {} errors", module.name, errors.len());
        Err(errors)
    }
}

/// Resolve every module command in a script, plus the module references of
/// actions and `register` commands.
///
/// Modules wrapped in `assert_*` commands are deliberately left alone; they
/// are often intentionally broken and are judged when the assertion runs.
pub fn resolve_script(script: &mut Script) -> Result<(), Vec<Error>> {
    let mut errors = Vec::new();

    let module_bindings = script.module_bindings.clone();
    for command in &mut script.commands {
        match command {
            Command::Module(module) => {
                if let Err(module_errors) = resolve_module(module) {
                    errors.extend(module_errors);
                }
            }
            Command::Register { var, .. } => resolve_script_var(&module_bindings, var, &mut errors),
            _ => {
                if let Some(action) = command_action_mut(command) {
                    resolve_script_var(&module_bindings, &mut action.module_var, &mut errors);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Give every inline-only signature in the module a home in the
/// function-type index space, appending implicit `FuncType` fields for
/// signatures that have none and deduplicating structurally.
///
/// Covers function and event declarations, imported ones included, and the
/// `call_indirect` declarations inside every body.
pub fn resolve_func_types(module: &mut Module) {
    let mut missing: Vec<FuncSignature> = Vec::new();
    {
        let mut note = |decl: &FuncDeclaration| {
            if decl.type_var.is_none()
                && module.func_type_index_by_sig(&decl.sig).is_none()
                && !missing.contains(&decl.sig)
            {
                missing.push(decl.sig.clone());
            }
        };

        for field in module.fields() {
            match &field.kind {
                ModuleFieldKind::Func(func) => {
                    note(&func.decl);
                    collect_expr_decls(&func.exprs, &mut note);
                }
                ModuleFieldKind::Event(event) => note(&event.decl),
                ModuleFieldKind::Import(import) => match &import.kind {
                    ImportKind::Func(func) => note(&func.decl),
                    ImportKind::Event(event) => note(&event.decl),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    for sig in missing {
        log::debug!("appending implicit func type {:?}", sig);
        module.append_field(ModuleField::new(ModuleFieldKind::FuncType(FuncType::new("", sig))));
    }
}

fn collect_expr_decls(exprs: &ExprList, note: &mut impl FnMut(&FuncDeclaration)) {
    for expr in exprs {
        match &expr.kind {
            ExprKind::CallIndirect { decl, .. } | ExprKind::ReturnCallIndirect { decl, .. } => note(decl),
            ExprKind::Block(block) | ExprKind::Loop(block) => collect_expr_decls(&block.exprs, note),
            ExprKind::If { then, else_, .. } => {
                collect_expr_decls(&then.exprs, note);
                collect_expr_decls(else_, note);
            }
            ExprKind::Try { block, catch } => {
                collect_expr_decls(&block.exprs, note);
                collect_expr_decls(catch, note);
            }
            _ => {}
        }
    }
}

fn resolve_script_var(bindings: &BindingHash, var: &mut Var, errors: &mut Vec<Error>) {
    let index = match var.as_name() {
        Some(name) => match bindings.index_of(name) {
            Some(index) => index,
            None => {
                log::error!("unknown module {}", name);
                errors.push(Error::UnknownName { kind: "module", name: name.into(), loc: var.loc.clone() });
                return;
            }
        },
        // Numeric module references address command positions; leave them to
        // the runner.
        None => return,
    };
    var.set_index(index);
}

fn command_action_mut(command: &mut Command) -> Option<&mut Action> {
    match command {
        Command::Action(action)
        | Command::AssertReturn { action, .. }
        | Command::AssertReturnFunc { action }
        | Command::AssertReturnCanonicalNan { action }
        | Command::AssertReturnArithmeticNan { action }
        | Command::AssertTrap { action, .. }
        | Command::AssertExhaustion { action, .. } => Some(action),
        _ => None,
    }
}

struct Resolver<'a> {
    module: &'a Module,
    errors: &'a mut Vec<Error>,
    /// Innermost label last. Unnamed labels occupy a slot so numeric depths
    /// stay correct.
    labels: Vec<Option<String>>,
}

impl Resolver<'_> {
    fn resolve_field(&mut self, field: &mut ModuleField) {
        match &mut field.kind {
            ModuleFieldKind::Func(func) => self.resolve_func(func),
            ModuleFieldKind::Global(global) => {
                let mut init = mem::take(&mut global.init_expr);
                self.resolve_expr_list(None, &mut init);
                global.init_expr = init;
            }
            ModuleFieldKind::Import(import) => match &mut import.kind {
                ImportKind::Func(func) => self.resolve_decl(&mut func.decl),
                ImportKind::Event(event) => self.resolve_decl(&mut event.decl),
                _ => {}
            },
            ModuleFieldKind::Export(export) => {
                let module = self.module;
                match export.kind {
                    ExternalKind::Func => {
                        self.resolve_var(&module.func_bindings, module.func_count(), "function", &mut export.var)
                    }
                    ExternalKind::Table => {
                        self.resolve_var(&module.table_bindings, module.table_count(), "table", &mut export.var)
                    }
                    ExternalKind::Memory => {
                        self.resolve_var(&module.memory_bindings, module.memory_count(), "memory", &mut export.var)
                    }
                    ExternalKind::Global => {
                        self.resolve_var(&module.global_bindings, module.global_count(), "global", &mut export.var)
                    }
                    ExternalKind::Event => {
                        self.resolve_var(&module.event_bindings, module.event_count(), "event", &mut export.var)
                    }
                }
            }
            ModuleFieldKind::FuncType(_) | ModuleFieldKind::Table(_) | ModuleFieldKind::Memory(_) => {}
            ModuleFieldKind::ElemSegment(segment) => {
                if !segment.is_passive() {
                    self.resolve_table_var(&mut segment.table_var);
                }
                let mut offset = mem::take(&mut segment.offset);
                self.resolve_expr_list(None, &mut offset);
                segment.offset = offset;
                for elem_expr in &mut segment.elem_exprs {
                    if let ElemExpr::RefFunc(var) = elem_expr {
                        self.resolve_func_var(var);
                    }
                }
            }
            ModuleFieldKind::DataSegment(segment) => {
                if !segment.is_passive() {
                    self.resolve_memory_var(&mut segment.memory_var);
                }
                let mut offset = mem::take(&mut segment.offset);
                self.resolve_expr_list(None, &mut offset);
                segment.offset = offset;
            }
            ModuleFieldKind::Start(var) => self.resolve_func_var(var),
            ModuleFieldKind::Event(event) => self.resolve_decl(&mut event.decl),
        }
    }

    fn resolve_func(&mut self, func: &mut Func) {
        self.resolve_decl(&mut func.decl);
        self.labels.clear();
        let mut exprs = mem::take(&mut func.exprs);
        self.resolve_expr_list(Some(&*func), &mut exprs);
        func.exprs = exprs;
    }

    fn resolve_expr_list(&mut self, func: Option<&Func>, exprs: &mut ExprList) {
        for expr in exprs.iter_mut() {
            match &mut expr.kind {
                ExprKind::Block(block) | ExprKind::Loop(block) => self.resolve_block(func, block),
                ExprKind::If { then, else_, .. } => {
                    self.resolve_decl(&mut then.decl);
                    self.labels.push(then.label.clone());
                    self.resolve_expr_list(func, &mut then.exprs);
                    self.resolve_expr_list(func, else_);
                    self.labels.pop();
                }
                ExprKind::Try { block, catch } => {
                    self.resolve_decl(&mut block.decl);
                    self.labels.push(block.label.clone());
                    self.resolve_expr_list(func, &mut block.exprs);
                    self.resolve_expr_list(func, catch);
                    self.labels.pop();
                }
                ExprKind::Br(var) | ExprKind::BrIf(var) => self.resolve_label_var(var),
                ExprKind::BrOnExn { label, event } => {
                    self.resolve_label_var(label);
                    self.resolve_event_var(event);
                }
                ExprKind::BrTable { targets, default_target } => {
                    for target in targets {
                        self.resolve_label_var(target);
                    }
                    self.resolve_label_var(default_target);
                }
                ExprKind::Call(var) | ExprKind::ReturnCall(var) | ExprKind::RefFunc(var) => {
                    self.resolve_func_var(var)
                }
                ExprKind::CallIndirect { decl, table } | ExprKind::ReturnCallIndirect { decl, table } => {
                    self.resolve_decl(decl);
                    self.resolve_table_var(table);
                }
                ExprKind::GlobalGet(var) | ExprKind::GlobalSet(var) => self.resolve_global_var(var),
                ExprKind::LocalGet(var) | ExprKind::LocalSet(var) | ExprKind::LocalTee(var) => {
                    self.resolve_local_var(func, var)
                }
                ExprKind::Throw(var) => self.resolve_event_var(var),
                ExprKind::MemoryInit(var) | ExprKind::DataDrop(var) => self.resolve_data_segment_var(var),
                ExprKind::ElemDrop(var) => self.resolve_elem_segment_var(var),
                ExprKind::TableInit { segment, table } => {
                    self.resolve_elem_segment_var(segment);
                    self.resolve_table_var(table);
                }
                ExprKind::TableCopy { dst, src } => {
                    self.resolve_table_var(dst);
                    self.resolve_table_var(src);
                }
                ExprKind::TableGet(var)
                | ExprKind::TableSet(var)
                | ExprKind::TableGrow(var)
                | ExprKind::TableSize(var) => self.resolve_table_var(var),
                _ => {}
            }
        }
    }

    fn resolve_block(&mut self, func: Option<&Func>, block: &mut Block) {
        self.resolve_decl(&mut block.decl);
        self.labels.push(block.label.clone());
        self.resolve_expr_list(func, &mut block.exprs);
        self.labels.pop();
    }

    fn resolve_decl(&mut self, decl: &mut FuncDeclaration) {
        let module = self.module;
        if let Some(type_var) = &mut decl.type_var {
            self.resolve_var(&module.func_type_bindings, module.func_type_count(), "type", type_var);
        }
    }

    fn resolve_func_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.func_bindings, module.func_count(), "function", var);
    }

    fn resolve_table_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.table_bindings, module.table_count(), "table", var);
    }

    fn resolve_memory_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.memory_bindings, module.memory_count(), "memory", var);
    }

    fn resolve_global_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.global_bindings, module.global_count(), "global", var);
    }

    fn resolve_event_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.event_bindings, module.event_count(), "event", var);
    }

    fn resolve_elem_segment_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.elem_segment_bindings, module.elem_segment_count(), "elem segment", var);
    }

    fn resolve_data_segment_var(&mut self, var: &mut Var) {
        let module = self.module;
        self.resolve_var(&module.data_segment_bindings, module.data_segment_count(), "data segment", var);
    }

    fn resolve_local_var(&mut self, func: Option<&Func>, var: &mut Var) {
        let Some(func) = func else {
            self.errors.push(Error::IndexOutOfRange {
                kind: "local",
                index: var.as_index().unwrap_or(0),
                count: 0,
                loc: var.loc.clone(),
            });
            return;
        };

        let index = match var.as_name() {
            Some(name) => match func.bindings.index_of(name) {
                Some(index) => index,
                None => {
                    log::error!("unknown local {}", name);
                    self.errors.push(Error::UnknownName { kind: "local", name: name.into(), loc: var.loc.clone() });
                    return;
                }
            },
            None => {
                if let Some(index) = var.as_index() {
                    let count = func.param_and_local_count();
                    if index >= count {
                        self.errors.push(Error::IndexOutOfRange { kind: "local", index, count, loc: var.loc.clone() });
                    }
                }
                return;
            }
        };
        var.set_index(index);
    }

    fn resolve_label_var(&mut self, var: &mut Var) {
        let index = match var.as_name() {
            Some(name) => {
                let depth = self.labels.iter().rev().position(|label| label.as_deref() == Some(name));
                match depth {
                    Some(depth) => depth as Index,
                    None => {
                        log::error!("unknown label {}", name);
                        self.errors.push(Error::UnknownName {
                            kind: "label",
                            name: name.into(),
                            loc: var.loc.clone(),
                        });
                        return;
                    }
                }
            }
            None => {
                if let Some(index) = var.as_index() {
                    let count = self.labels.len() as Index;
                    if index >= count {
                        self.errors.push(Error::IndexOutOfRange { kind: "label", index, count, loc: var.loc.clone() });
                    }
                }
                return;
            }
        };
        var.set_index(index);
    }

    fn resolve_var(&mut self, bindings: &BindingHash, count: Index, kind: &'static str, var: &mut Var) {
        let index = match var.as_name() {
            Some(name) => match bindings.index_of(name) {
                Some(index) => index,
                None => {
                    log::error!("unknown {} {}", kind, name);
                    self.errors.push(Error::UnknownName { kind, name: name.to_string(), loc: var.loc.clone() });
                    return;
                }
            },
            None => {
                if let Some(index) = var.as_index() {
                    if index >= count {
                        self.errors.push(Error::IndexOutOfRange { kind, index, count, loc: var.loc.clone() });
                    }
                }
                return;
            }
        };
        var.set_index(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::module::{ElemExpr, ElemSegment, Export, Global, Table};
    use alloc::vec;
    use tinywast_types::{ExternalKind, Limits, ValType};

    fn func_with_body(name: &str, body: Vec<ExprKind>) -> ModuleField {
        let mut func = Func::new(name);
        for kind in body {
            func.exprs.push_back(Expr::new(kind));
        }
        ModuleField::new(ModuleFieldKind::Func(func))
    }

    #[test]
    fn function_references_resolve_to_indices() {
        let mut module = Module::default();
        module.append_field(func_with_body("$callee", vec![]));
        module.append_field(func_with_body("$caller", vec![ExprKind::Call(Var::name("$callee"))]));
        module.append_field(ModuleField::new(ModuleFieldKind::Start(Var::name("$caller"))));

        resolve_module(&mut module).unwrap();

        let caller = module.func(&Var::index(1)).unwrap();
        let call = caller.exprs.front().unwrap();
        assert_eq!(call.as_var().and_then(Var::as_index), Some(0));
        assert_eq!(module.starts().next().and_then(Var::as_index), Some(1));
    }

    #[test]
    fn unknown_names_are_collected() {
        let mut module = Module::default();
        module.append_field(func_with_body(
            "$f",
            vec![ExprKind::Call(Var::name("$missing")), ExprKind::GlobalGet(Var::name("$nope"))],
        ));

        let errors = resolve_module(&mut module).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], Error::UnknownName { kind: "function", .. }));
        assert!(matches!(&errors[1], Error::UnknownName { kind: "global", .. }));
    }

    #[test]
    fn numeric_references_are_range_checked() {
        let mut module = Module::default();
        module.append_field(func_with_body("$f", vec![ExprKind::Call(Var::index(3))]));

        let errors = resolve_module(&mut module).unwrap_err();
        assert!(matches!(&errors[0], Error::IndexOutOfRange { kind: "function", index: 3, count: 1, .. }));
    }

    #[test]
    fn labels_resolve_to_relative_depths() {
        let mut inner = Block::default();
        inner.label = Some("$inner".into());
        inner.exprs.push_back(Expr::new(ExprKind::Br(Var::name("$inner"))));
        inner.exprs.push_back(Expr::new(ExprKind::Br(Var::name("$outer"))));

        let mut outer = Block::default();
        outer.label = Some("$outer".into());
        outer.exprs.push_back(Expr::new(ExprKind::Block(inner)));

        let mut module = Module::default();
        module.append_field(func_with_body("$f", vec![ExprKind::Block(outer)]));

        resolve_module(&mut module).unwrap();

        let func = module.func(&Var::index(0)).unwrap();
        let outer = func.exprs.front().unwrap().as_block().unwrap();
        let inner = outer.exprs.front().unwrap().as_block().unwrap();
        let depths: Vec<_> = inner.exprs.iter().map(|expr| expr.as_var().and_then(Var::as_index)).collect();
        assert_eq!(depths, [Some(0), Some(1)]);
    }

    #[test]
    fn unknown_labels_and_deep_numerics_fail() {
        let mut block = Block::default();
        block.exprs.push_back(Expr::new(ExprKind::Br(Var::name("$ghost"))));
        block.exprs.push_back(Expr::new(ExprKind::Br(Var::index(5))));

        let mut module = Module::default();
        module.append_field(func_with_body("$f", vec![ExprKind::Block(block)]));

        let errors = resolve_module(&mut module).unwrap_err();
        assert!(matches!(&errors[0], Error::UnknownName { kind: "label", .. }));
        assert!(matches!(&errors[1], Error::IndexOutOfRange { kind: "label", index: 5, count: 1, .. }));
    }

    #[test]
    fn locals_resolve_through_the_function() {
        let mut func = Func::new("$f");
        func.decl.sig = FuncSignature::new(vec![ValType::I32], vec![]);
        func.bindings.insert("$x", crate::binding::Binding::new(Default::default(), 0));
        func.exprs.push_back(Expr::new(ExprKind::LocalGet(Var::name("$x"))));
        func.exprs.push_back(Expr::new(ExprKind::LocalSet(Var::index(7))));

        let mut module = Module::default();
        module.append_field(ModuleField::new(ModuleFieldKind::Func(func)));

        let errors = resolve_module(&mut module).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], Error::IndexOutOfRange { kind: "local", index: 7, count: 1, .. }));

        let func = module.func(&Var::index(0)).unwrap();
        assert_eq!(func.exprs.front().unwrap().as_var().and_then(Var::as_index), Some(0));
    }

    #[test]
    fn segments_and_exports_resolve() {
        let mut module = Module::default();
        module.append_field(ModuleField::new(ModuleFieldKind::Table(Table::new(
            "$t",
            Limits::at_least(1),
            ValType::FuncRef,
        ))));
        module.append_field(func_with_body("$f", vec![]));

        let mut segment = ElemSegment::new("$seg");
        segment.table_var = Var::name("$t");
        segment.offset.push_back(Expr::new(ExprKind::Const(tinywast_types::Const::i32(0))));
        segment.elem_exprs.push(ElemExpr::RefFunc(Var::name("$f")));
        module.append_field(ModuleField::new(ModuleFieldKind::ElemSegment(segment)));

        module.append_field(ModuleField::new(ModuleFieldKind::Export(Export {
            name: "f".into(),
            kind: ExternalKind::Func,
            var: Var::name("$f"),
        })));

        resolve_module(&mut module).unwrap();

        let segment = module.elem_segment(&Var::name("$seg")).unwrap();
        assert_eq!(segment.table_var.as_index(), Some(0));
        assert_eq!(segment.elem_exprs, vec![ElemExpr::RefFunc(Var::index(0))]);
        assert_eq!(module.export("f").unwrap().var.as_index(), Some(0));
    }

    #[test]
    fn global_initializers_resolve() {
        let mut module = Module::default();
        let mut global = Global::new("$g", ValType::I32);
        global.init_expr.push_back(Expr::new(ExprKind::GlobalGet(Var::name("$g0"))));
        let mut imported = Global::new("$g0", ValType::I32);
        imported.init_expr = ExprList::new();
        module.append_field(ModuleField::new(ModuleFieldKind::Import(crate::module::Import::new(
            "env",
            "g0",
            ImportKind::Global(imported),
        ))));
        module.append_field(ModuleField::new(ModuleFieldKind::Global(global)));

        resolve_module(&mut module).unwrap();

        let global = module.global(&Var::name("$g")).unwrap();
        assert_eq!(global.init_expr.front().unwrap().as_var().and_then(Var::as_index), Some(0));
    }

    #[test]
    fn implicit_func_types_coalesce() {
        let mut module = Module::default();

        let sig_a = FuncSignature::new(vec![ValType::I32], vec![ValType::I32]);
        let sig_b = FuncSignature::new(vec![], vec![]);

        for name in ["$a", "$b"] {
            let mut func = Func::new(name);
            func.decl.sig = sig_a.clone();
            module.append_field(ModuleField::new(ModuleFieldKind::Func(func)));
        }
        let mut func = Func::new("$c");
        func.decl.sig = sig_b.clone();
        func.exprs.push_back(Expr::new(ExprKind::CallIndirect {
            decl: FuncDeclaration::inline(sig_a.clone()),
            table: Var::index(0),
        }));
        module.append_field(ModuleField::new(ModuleFieldKind::Func(func)));

        resolve_func_types(&mut module);

        assert_eq!(module.func_type_count(), 2);
        assert_eq!(module.func_type_index_by_sig(&sig_a), Some(0));
        assert_eq!(module.func_type_index_by_sig(&sig_b), Some(1));

        // Running the pass again appends nothing.
        resolve_func_types(&mut module);
        assert_eq!(module.func_type_count(), 2);
    }

    #[test]
    fn scripts_resolve_module_and_action_references() {
        let mut script = Script::new();
        script.append_command(Command::Module(Module::new("$m")));
        script.append_command(Command::Register { name: "m".into(), var: Var::name("$m") });
        script.append_command(Command::AssertReturn {
            action: crate::script::Action::invoke(Var::name("$m"), "f", vec![]),
            expected: vec![],
        });

        resolve_script(&mut script).unwrap();

        match &script.commands[1] {
            Command::Register { var, .. } => assert_eq!(var.as_index(), Some(0)),
            _ => unreachable!(),
        }
        match &script.commands[2] {
            Command::AssertReturn { action, .. } => assert_eq!(action.module_var.as_index(), Some(0)),
            _ => unreachable!(),
        }

        let mut broken = Script::new();
        broken.append_command(Command::Register { name: "m".into(), var: Var::name("$ghost") });
        let errors = resolve_script(&mut broken).unwrap_err();
        assert!(matches!(&errors[0], Error::UnknownName { kind: "module", .. }));
    }
}
