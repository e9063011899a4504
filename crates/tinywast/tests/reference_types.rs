//! Builds the reference-types table module end to end: three tables, an
//! active and a passive element segment, and nine functions exercising the
//! table instructions, then resolves it and checks every cross-reference.

use eyre::{eyre, Result};
use tinywast::{
    resolve_func_types, resolve_module, Const, ElemExpr, ElemSegment, Export, Expr, ExprKind, ExternalKind, Func,
    FuncSignature, Limits, Module, ModuleField, ModuleFieldKind, Table, ValType, Var, SEG_PASSIVE,
    SEG_USE_ELEM_EXPRS,
};

fn func(name: &str, params: Vec<ValType>, results: Vec<ValType>, body: Vec<ExprKind>) -> ModuleField {
    let mut func = Func::new(name);
    func.decl.sig = FuncSignature::new(params, results);
    for kind in body {
        func.exprs.push_back(Expr::new(kind));
    }
    ModuleField::new(ModuleFieldKind::Func(func))
}

fn export(name: &str, var: Var) -> ModuleField {
    ModuleField::new(ModuleFieldKind::Export(Export { name: name.into(), kind: ExternalKind::Func, var }))
}

fn build_module() -> Module {
    use ValType::{AnyRef, I32};

    let mut module = Module::new("$ref_types");

    for table in ["$t2", "$t3"] {
        module.append_field(ModuleField::new(ModuleFieldKind::Table(Table::new(
            table,
            Limits::at_least(1),
            AnyRef,
        ))));
    }
    module.append_field(ModuleField::new(ModuleFieldKind::Table(Table::new(
        "$tf",
        Limits::at_least(2),
        ValType::FuncRef,
    ))));

    // Active segment installing $sz_tf at slot 0 of the funcref table.
    let mut active = ElemSegment::new("");
    active.table_var = Var::name("$tf");
    active.offset.push_back(Expr::new(ExprKind::Const(Const::i32(0))));
    active.elem_exprs.push(ElemExpr::RefFunc(Var::name("$sz_tf")));
    module.append_field(ModuleField::new(ModuleFieldKind::ElemSegment(active)));

    // Passive segment holding a single null entry.
    let mut passive = ElemSegment::new("$null_seg");
    passive.flags = SEG_PASSIVE | SEG_USE_ELEM_EXPRS;
    passive.elem_exprs.push(ElemExpr::RefNull);
    module.append_field(ModuleField::new(ModuleFieldKind::ElemSegment(passive)));

    for (name, table) in [("$get_t2", "$t2"), ("$get_t3", "$t3")] {
        module.append_field(func(
            name,
            vec![],
            vec![AnyRef],
            vec![ExprKind::Const(Const::i32(0)), ExprKind::TableGet(Var::name(table))],
        ));
    }
    for (name, table) in [("$set_t2", "$t2"), ("$set_t3", "$t3")] {
        module.append_field(func(
            name,
            vec![AnyRef],
            vec![],
            vec![ExprKind::Const(Const::i32(0)), ExprKind::LocalGet(Var::index(0)), ExprKind::TableSet(Var::name(table))],
        ));
    }
    for (name, table) in [("$grow_t2", "$t2"), ("$grow_t3", "$t3")] {
        module.append_field(func(
            name,
            vec![AnyRef],
            vec![I32],
            vec![ExprKind::LocalGet(Var::index(0)), ExprKind::Const(Const::i32(1)), ExprKind::TableGrow(Var::name(table))],
        ));
    }
    for (name, table) in [("$sz_t2", "$t2"), ("$sz_tf", "$tf")] {
        module.append_field(func(name, vec![], vec![I32], vec![ExprKind::TableSize(Var::name(table))]));
    }
    module.append_field(func(
        "$null_tf",
        vec![],
        vec![I32],
        vec![ExprKind::Const(Const::i32(0)), ExprKind::TableGet(Var::name("$tf")), ExprKind::RefIsNull],
    ));

    for name in ["$get_t2", "$get_t3", "$set_t2", "$set_t3", "$grow_t2", "$grow_t3", "$sz_t2", "$sz_tf", "$null_tf"] {
        module.append_field(export(name.trim_start_matches('$'), Var::name(name)));
    }

    module
}

/// Walk a body and fail on any reference still in name form.
fn assert_resolved(func: &Func) -> Result<()> {
    for expr in &func.exprs {
        if let Some(var) = expr.as_var() {
            if var.is_name() {
                return Err(eyre!("unresolved reference {} in {}", var, func.name));
            }
        }
    }
    Ok(())
}

#[test]
fn builds_and_resolves() -> Result<()> {
    let mut module = build_module();

    resolve_func_types(&mut module);
    resolve_module(&mut module).map_err(|errors| eyre!("resolution failed: {:?}", errors))?;

    assert_eq!(module.table_count(), 3);
    assert_eq!(module.func_count(), 9);
    assert_eq!(module.elem_segment_count(), 2);
    assert_eq!(module.export_count(), 9);

    for func in module.funcs() {
        assert_resolved(func)?;
    }
    Ok(())
}

#[test]
fn func_types_coalesce_to_four_signatures() -> Result<()> {
    use ValType::{AnyRef, I32};

    let mut module = build_module();
    resolve_func_types(&mut module);

    assert_eq!(module.func_type_count(), 4);

    let expected = [
        FuncSignature::new(vec![], vec![AnyRef]),
        FuncSignature::new(vec![AnyRef], vec![]),
        FuncSignature::new(vec![AnyRef], vec![I32]),
        FuncSignature::new(vec![], vec![I32]),
    ];
    for sig in &expected {
        if module.func_type_index_by_sig(sig).is_none() {
            return Err(eyre!("missing signature {:?}", sig));
        }
    }
    Ok(())
}

#[test]
fn segment_shapes() -> Result<()> {
    let mut module = build_module();
    resolve_func_types(&mut module);
    resolve_module(&mut module).map_err(|errors| eyre!("resolution failed: {:?}", errors))?;

    let segments: Vec<&ElemSegment> = (0..module.elem_segment_count())
        .filter_map(|index| module.elem_segment(&Var::index(index)))
        .collect();
    assert_eq!(segments.len(), 2);

    let active = segments[0];
    assert!(!active.is_passive());
    // The funcref table is index 2, after the two anyref tables.
    assert_eq!(active.table_var.as_index(), Some(2));
    assert_eq!(active.offset.len(), 1);
    // $sz_tf is the 8th function appended.
    assert_eq!(active.elem_exprs, vec![ElemExpr::RefFunc(Var::index(7))]);

    let passive = segments[1];
    assert!(passive.is_passive());
    assert_eq!(passive.flags, 0x05);
    assert!(passive.offset.is_empty());
    assert_eq!(passive.elem_exprs, vec![ElemExpr::RefNull]);
    Ok(())
}

#[test]
fn exported_entities_resolve_to_function_indices() -> Result<()> {
    let mut module = build_module();
    resolve_func_types(&mut module);
    resolve_module(&mut module).map_err(|errors| eyre!("resolution failed: {:?}", errors))?;

    let export = module.export("null_tf").ok_or_else(|| eyre!("missing export"))?;
    assert_eq!(export.kind, ExternalKind::Func);
    assert_eq!(export.var.as_index(), Some(8));
    assert!(!module.is_import_export(export));

    let getter = module.func(&Var::index(0)).ok_or_else(|| eyre!("missing func"))?;
    assert_eq!(getter.exprs.len(), 2);
    Ok(())
}
