//! Script-level scenarios: command ordering, module bindings and the
//! bit-exact constant comparisons assertions rely on.

use eyre::{eyre, Result};
use tinywast::{
    resolve_script, Action, Command, CommandType, Const, Module, ScriptModule, ScriptModuleType, Script, Var,
};

fn two_module_script() -> Script {
    let mut script = Script::new();
    script.append_command(Command::AssertMalformed {
        module: ScriptModule::Quoted { loc: Default::default(), name: String::new(), data: b"(module".to_vec() },
        text: "unexpected eof".into(),
    });
    script.append_command(Command::Module(Module::new("$first")));
    script.append_command(Command::Register { name: "first".into(), var: Var::name("$first") });
    script.append_command(Command::Module(Module::new("$second")));
    script.append_command(Command::AssertReturn {
        action: Action::invoke(Var::name("$second"), "f", vec![Const::i32(1)]),
        expected: vec![Const::f32_bits(0x7FC0_0001)],
    });
    script
}

#[test]
fn first_module_skips_leading_assertions() -> Result<()> {
    let script = two_module_script();
    let first = script.first_module().ok_or_else(|| eyre!("no module found"))?;
    assert_eq!(first.name, "$first");
    Ok(())
}

#[test]
fn module_bindings_address_command_positions() -> Result<()> {
    let script = two_module_script();
    assert_eq!(script.module_bindings.index_of("$first"), Some(1));
    assert_eq!(script.module_bindings.index_of("$second"), Some(3));
    assert_eq!(script.module(&Var::name("$second")).map(|m| m.name.as_str()), Some("$second"));
    assert!(script.module(&Var::name("$third")).is_none());
    Ok(())
}

#[test]
fn resolution_rewrites_script_references() -> Result<()> {
    let mut script = two_module_script();
    resolve_script(&mut script).map_err(|errors| eyre!("resolution failed: {:?}", errors))?;

    match &script.commands[2] {
        Command::Register { var, .. } => assert_eq!(var.as_index(), Some(1)),
        other => return Err(eyre!("unexpected command {:?}", other.ty())),
    }
    match &script.commands[4] {
        Command::AssertReturn { action, expected } => {
            assert_eq!(action.module_var.as_index(), Some(3));
            // NaN payloads survive and compare bitwise.
            assert_eq!(expected[0], Const::f32_bits(0x7FC0_0001));
            assert_ne!(expected[0], Const::f32_bits(0x7FC0_0000));
        }
        other => return Err(eyre!("unexpected command {:?}", other.ty())),
    }
    Ok(())
}

#[test]
fn command_types_are_observable() {
    let script = two_module_script();
    let types: Vec<_> = script.commands.iter().map(Command::ty).collect();
    assert_eq!(
        types,
        [
            CommandType::AssertMalformed,
            CommandType::Module,
            CommandType::Register,
            CommandType::Module,
            CommandType::AssertReturn,
        ]
    );

    match &script.commands[0] {
        Command::AssertMalformed { module, .. } => {
            assert_eq!(module.ty(), ScriptModuleType::Quoted);
            assert!(module.as_text().is_none());
        }
        _ => unreachable!(),
    }
}
