use alloc::string::String;
use core::fmt::{self, Display};
use tinywast_types::{Index, Location};

/// A reference to an entity within one namespace: either a numeric index or
/// a symbolic `$name`, as the text format allows both.
///
/// Parsers always produce whichever form was written; the resolution pass
/// ([`resolve_module`](crate::resolve_module)) rewrites every name to its
/// index once binding tables exist. In a resolved module no `Var` is in name
/// form.
///
/// Equality ignores the location.
#[derive(Debug, Clone)]
pub struct Var {
    pub loc: Location,
    kind: VarKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum VarKind {
    Index(Index),
    Name(String),
}

impl Var {
    /// A numeric reference.
    pub fn index(index: Index) -> Self {
        Self { loc: Location::default(), kind: VarKind::Index(index) }
    }

    /// A symbolic reference. The name includes the leading `$`.
    pub fn name(name: impl Into<String>) -> Self {
        Self { loc: Location::default(), kind: VarKind::Name(name.into()) }
    }

    pub fn with_loc(mut self, loc: Location) -> Self {
        self.loc = loc;
        self
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, VarKind::Index(_))
    }

    pub fn is_name(&self) -> bool {
        matches!(self.kind, VarKind::Name(_))
    }

    pub fn as_index(&self) -> Option<Index> {
        match self.kind {
            VarKind::Index(index) => Some(index),
            VarKind::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            VarKind::Name(name) => Some(name),
            VarKind::Index(_) => None,
        }
    }

    /// Replace the payload with an index, dropping any name.
    pub fn set_index(&mut self, index: Index) {
        self.kind = VarKind::Index(index);
    }

    /// Replace the payload with a name, dropping any index.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.kind = VarKind::Name(name.into());
    }
}

impl Default for Var {
    fn default() -> Self {
        Self::index(0)
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Var {}

impl From<Index> for Var {
    fn from(index: Index) -> Self {
        Self::index(index)
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VarKind::Index(index) => write!(f, "{}", index),
            VarKind::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_form() {
        let var = Var::index(3);
        assert!(var.is_index());
        assert!(!var.is_name());
        assert_eq!(var.as_index(), Some(3));
        assert_eq!(var.as_name(), None);
    }

    #[test]
    fn name_form() {
        let var = Var::name("$f");
        assert!(var.is_name());
        assert_eq!(var.as_name(), Some("$f"));
        assert_eq!(var.as_index(), None);
    }

    #[test]
    fn rewriting_switches_the_payload() {
        let mut var = Var::index(3);
        var.set_name("$f");
        assert!(var.is_name());
        assert_eq!(var.as_index(), None);

        let mut var = Var::name("$f");
        var.set_index(7);
        assert!(var.is_index());
        assert_eq!(var.as_name(), None);
        assert_eq!(var.as_index(), Some(7));
    }

    #[test]
    fn equality_ignores_location() {
        let a = Var::index(1);
        let b = Var::index(1).with_loc(Location::new("a.wat", 1, 2, 3));
        assert_eq!(a, b);
        assert_ne!(Var::index(1), Var::name("$1"));
    }
}
