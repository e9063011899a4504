use alloc::string::String;
use alloc::vec::Vec;

use tinywast_types::{Const, Index, Location};

use crate::binding::{Binding, BindingHash};
use crate::error::{Error, Result};
use crate::module::Module;
use crate::var::Var;

/// The discriminator of an [`Action`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Invoke,
    Get,
}

/// What an action does: invoke an exported function or read an exported
/// global.
#[derive(Debug, Clone)]
pub enum ActionKind {
    Invoke { args: Vec<Const> },
    Get,
}

/// A script action against a module instance: `(invoke ...)` or `(get ...)`.
#[derive(Debug, Clone)]
pub struct Action {
    pub loc: Location,
    /// The module acted on; resolves through [`Script::module_bindings`].
    pub module_var: Var,
    /// The export name.
    pub name: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn invoke(module_var: Var, name: impl Into<String>, args: Vec<Const>) -> Self {
        Self { loc: Location::default(), module_var, name: name.into(), kind: ActionKind::Invoke { args } }
    }

    pub fn get(module_var: Var, name: impl Into<String>) -> Self {
        Self { loc: Location::default(), module_var, name: name.into(), kind: ActionKind::Get }
    }

    pub fn ty(&self) -> ActionType {
        match self.kind {
            ActionKind::Invoke { .. } => ActionType::Invoke,
            ActionKind::Get => ActionType::Get,
        }
    }
}

/// The discriminator of a [`ScriptModule`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptModuleType {
    Text,
    Binary,
    Quoted,
}

/// A module as written in a script: already parsed, or raw binary/quoted
/// bytes whose decoding errors are deferred until the command is run.
#[derive(Debug, Clone)]
pub enum ScriptModule {
    Text(Module),
    Binary { loc: Location, name: String, data: Vec<u8> },
    Quoted { loc: Location, name: String, data: Vec<u8> },
}

impl ScriptModule {
    pub fn ty(&self) -> ScriptModuleType {
        match self {
            Self::Text(_) => ScriptModuleType::Text,
            Self::Binary { .. } => ScriptModuleType::Binary,
            Self::Quoted { .. } => ScriptModuleType::Quoted,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::Text(module) => &module.loc,
            Self::Binary { loc, .. } | Self::Quoted { loc, .. } => loc,
        }
    }

    pub fn as_text(&self) -> Option<&Module> {
        match self {
            Self::Text(module) => Some(module),
            _ => None,
        }
    }
}

/// The discriminator of a [`Command`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CommandType {
    Module,
    Action,
    Register,
    AssertMalformed,
    AssertInvalid,
    AssertUnlinkable,
    AssertUninstantiable,
    AssertReturn,
    AssertReturnFunc,
    AssertReturnCanonicalNan,
    AssertReturnArithmeticNan,
    AssertTrap,
    AssertExhaustion,
}

impl CommandType {
    /// The variant's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::Action => "Action",
            Self::Register => "Register",
            Self::AssertMalformed => "AssertMalformed",
            Self::AssertInvalid => "AssertInvalid",
            Self::AssertUnlinkable => "AssertUnlinkable",
            Self::AssertUninstantiable => "AssertUninstantiable",
            Self::AssertReturn => "AssertReturn",
            Self::AssertReturnFunc => "AssertReturnFunc",
            Self::AssertReturnCanonicalNan => "AssertReturnCanonicalNan",
            Self::AssertReturnArithmeticNan => "AssertReturnArithmeticNan",
            Self::AssertTrap => "AssertTrap",
            Self::AssertExhaustion => "AssertExhaustion",
        }
    }
}

/// One top-level script directive. Execution semantics belong to the
/// conformance runner; the IR only carries what was written.
#[derive(Debug, Clone)]
pub enum Command {
    Module(Module),
    Action(Action),
    Register { name: String, var: Var },
    AssertMalformed { module: ScriptModule, text: String },
    AssertInvalid { module: ScriptModule, text: String },
    AssertUnlinkable { module: ScriptModule, text: String },
    AssertUninstantiable { module: ScriptModule, text: String },
    AssertReturn { action: Action, expected: Vec<Const> },
    AssertReturnFunc { action: Action },
    AssertReturnCanonicalNan { action: Action },
    AssertReturnArithmeticNan { action: Action },
    AssertTrap { action: Action, text: String },
    AssertExhaustion { action: Action, text: String },
}

impl Command {
    pub fn ty(&self) -> CommandType {
        match self {
            Self::Module(_) => CommandType::Module,
            Self::Action(_) => CommandType::Action,
            Self::Register { .. } => CommandType::Register,
            Self::AssertMalformed { .. } => CommandType::AssertMalformed,
            Self::AssertInvalid { .. } => CommandType::AssertInvalid,
            Self::AssertUnlinkable { .. } => CommandType::AssertUnlinkable,
            Self::AssertUninstantiable { .. } => CommandType::AssertUninstantiable,
            Self::AssertReturn { .. } => CommandType::AssertReturn,
            Self::AssertReturnFunc { .. } => CommandType::AssertReturnFunc,
            Self::AssertReturnCanonicalNan { .. } => CommandType::AssertReturnCanonicalNan,
            Self::AssertReturnArithmeticNan { .. } => CommandType::AssertReturnArithmeticNan,
            Self::AssertTrap { .. } => CommandType::AssertTrap,
            Self::AssertExhaustion { .. } => CommandType::AssertExhaustion,
        }
    }

    pub fn as_module(&self) -> Option<&Module> {
        match self {
            Self::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn as_module_mut(&mut self) -> Option<&mut Module> {
        match self {
            Self::Module(module) => Some(module),
            _ => None,
        }
    }

    /// The action carried by this command, if it is action-shaped.
    pub fn action(&self) -> Option<&Action> {
        match self {
            Self::Action(action)
            | Self::AssertReturn { action, .. }
            | Self::AssertReturnFunc { action }
            | Self::AssertReturnCanonicalNan { action }
            | Self::AssertReturnArithmeticNan { action }
            | Self::AssertTrap { action, .. }
            | Self::AssertExhaustion { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Downcast to a module command, failing with `WrongVariant` otherwise.
    pub fn expect_module(&self) -> Result<&Module> {
        self.as_module().ok_or_else(|| Error::wrong_variant(CommandType::Module.name(), self.ty().name()))
    }
}

/// A conformance script: commands in declaration order plus a binding map
/// from module name to command position.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub commands: Vec<Command>,
    /// Module names to the position of their module command.
    pub module_bindings: BindingHash,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command, binding the module name (when the command is a
    /// named module) to the command's position.
    pub fn append_command(&mut self, command: Command) {
        if let Command::Module(module) = &command {
            self.module_bindings
                .insert(&module.name, Binding::new(module.loc.clone(), self.commands.len() as Index));
        }
        self.commands.push(command);
    }

    /// The first module in the script, scanning forward past non-module
    /// commands. `None` if the script has no module at all.
    pub fn first_module(&self) -> Option<&Module> {
        self.commands.iter().find_map(Command::as_module)
    }

    /// Mutable counterpart of [`Script::first_module`].
    pub fn first_module_mut(&mut self) -> Option<&mut Module> {
        self.commands.iter_mut().find_map(Command::as_module_mut)
    }

    /// Resolve a module reference through the binding map.
    pub fn module(&self, var: &Var) -> Option<&Module> {
        self.command_of(var)?.as_module()
    }

    /// Resolve a module reference, reporting why resolution failed.
    pub fn expect_module(&self, var: &Var) -> Result<&Module> {
        let position = match var.as_index() {
            Some(index) => index,
            None => {
                let name = var.as_name().unwrap_or("");
                self.module_bindings.index_of(name).ok_or_else(|| Error::UnknownName {
                    kind: "module",
                    name: name.into(),
                    loc: var.loc.clone(),
                })?
            }
        };
        let command = self.commands.get(position as usize).ok_or_else(|| Error::IndexOutOfRange {
            kind: "command",
            index: position,
            count: self.commands.len() as Index,
            loc: var.loc.clone(),
        })?;
        command.expect_module()
    }

    fn command_of(&self, var: &Var) -> Option<&Command> {
        let position = match var.as_index() {
            Some(index) => index,
            None => self.module_bindings.index_of(var.as_name().unwrap_or(""))?,
        };
        self.commands.get(position as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn first_module_scans_past_other_commands() {
        let mut script = Script::new();
        script.append_command(Command::Register { name: "spectest".into(), var: Var::index(0) });
        assert!(script.first_module().is_none());

        script.append_command(Command::Module(Module::new("$m")));
        script.append_command(Command::Module(Module::new("$n")));

        assert_eq!(script.first_module().map(|m| m.name.as_str()), Some("$m"));
    }

    #[test]
    fn modules_resolve_by_name_and_position() {
        let mut script = Script::new();
        script.append_command(Command::Action(Action::invoke(Var::index(0), "f", vec![])));
        script.append_command(Command::Module(Module::new("$m")));

        assert_eq!(script.module(&Var::name("$m")).map(|m| m.name.as_str()), Some("$m"));
        assert_eq!(script.module(&Var::index(1)).map(|m| m.name.as_str()), Some("$m"));
        assert!(script.module(&Var::name("$other")).is_none());
        // Position 0 is a non-module command.
        assert!(script.module(&Var::index(0)).is_none());
    }

    #[test]
    fn expect_module_reports_each_failure_mode() {
        let mut script = Script::new();
        script.append_command(Command::Action(Action::invoke(Var::index(0), "f", vec![])));
        script.append_command(Command::Module(Module::new("$m")));

        assert!(script.expect_module(&Var::name("$m")).is_ok());
        assert!(matches!(script.expect_module(&Var::name("$nope")), Err(Error::UnknownName { kind: "module", .. })));
        assert!(matches!(script.expect_module(&Var::index(9)), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(script.expect_module(&Var::index(0)), Err(Error::WrongVariant { .. })));
    }

    #[test]
    fn commands_carry_their_actions() {
        let assert_return =
            Command::AssertReturn { action: Action::invoke(Var::index(0), "get", vec![]), expected: vec![Const::i32(1)] };
        assert_eq!(assert_return.ty(), CommandType::AssertReturn);
        assert_eq!(assert_return.action().map(|a| a.name.as_str()), Some("get"));
        assert_eq!(assert_return.action().map(Action::ty), Some(ActionType::Invoke));

        let register = Command::Register { name: "m".into(), var: Var::index(0) };
        assert!(register.action().is_none());

        let nan = Command::AssertReturnCanonicalNan { action: Action::get(Var::name("$m"), "g") };
        assert_eq!(nan.ty(), CommandType::AssertReturnCanonicalNan);
        assert_eq!(nan.action().map(Action::ty), Some(ActionType::Get));
    }
}
