use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use tinywast_types::{Index, Location};

/// One occurrence of a name: where it was bound and the index it binds to.
#[derive(Debug, Clone)]
pub struct Binding {
    pub loc: Location,
    pub index: Index,
}

impl Binding {
    pub fn new(loc: Location, index: Index) -> Self {
        Self { loc, index }
    }
}

/// A multi-map from `$name` to bindings within one namespace.
///
/// Duplicate names are retained rather than rejected so that a later
/// validation scan can report both locations; lookups resolve to the
/// first-inserted binding. Iteration order is name-sorted across names and
/// insertion-ordered within a name.
///
/// Empty names mean "no name" and are never inserted.
#[derive(Debug, Clone, Default)]
pub struct BindingHash {
    map: BTreeMap<String, Vec<Binding>>,
}

impl BindingHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding for `name`. A no-op for the empty name.
    pub fn insert(&mut self, name: &str, binding: Binding) {
        if name.is_empty() {
            return;
        }
        self.map.entry(name.into()).or_default().push(binding);
    }

    /// The index bound to `name`, resolving duplicates to the first-inserted
    /// binding.
    pub fn index_of(&self, name: &str) -> Option<Index> {
        self.first(name).map(|binding| binding.index)
    }

    /// The first-inserted binding for `name`.
    pub fn first(&self, name: &str) -> Option<&Binding> {
        self.map.get(name).and_then(|bindings| bindings.first())
    }

    /// All bindings recorded for `name`, in insertion order.
    pub fn bindings(&self, name: &str) -> &[Binding] {
        self.map.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All `(name, bindings)` pairs, name-sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Binding])> {
        self.map.iter().map(|(name, bindings)| (name.as_str(), bindings.as_slice()))
    }

    /// The names bound more than once, for duplicate-definition diagnostics.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[Binding])> {
        self.iter().filter(|(_, bindings)| bindings.len() > 1)
    }
}

/// Invert a binding table into `out[index] = name`, with empty strings at
/// unnamed indices. When several names share an index the lexicographically
/// first wins, which falls straight out of the sorted iteration order.
///
/// Text formatters use this to print `$name` instead of a bare index.
pub fn make_type_binding_reverse_mapping(count: usize, bindings: &BindingHash) -> Vec<String> {
    let mut out = alloc::vec![String::new(); count];
    for (name, bindings) in bindings.iter() {
        for binding in bindings {
            if let Some(slot) = out.get_mut(binding.index as usize) {
                if slot.is_empty() {
                    slot.push_str(name);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(index: Index) -> Binding {
        Binding::new(Location::default(), index)
    }

    #[test]
    fn empty_names_are_not_inserted() {
        let mut hash = BindingHash::new();
        hash.insert("", binding(0));
        assert!(hash.is_empty());
        assert_eq!(hash.index_of(""), None);
    }

    #[test]
    fn duplicates_are_retained_and_first_wins() {
        let mut hash = BindingHash::new();
        hash.insert("$f", binding(0));
        hash.insert("$f", binding(3));
        hash.insert("$g", binding(1));

        assert_eq!(hash.index_of("$f"), Some(0));
        assert_eq!(hash.bindings("$f").len(), 2);
        assert_eq!(hash.bindings("$f")[1].index, 3);

        let dups: Vec<_> = hash.duplicates().collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].0, "$f");
    }

    #[test]
    fn iteration_is_name_sorted() {
        let mut hash = BindingHash::new();
        hash.insert("$b", binding(1));
        hash.insert("$a", binding(0));
        let names: Vec<_> = hash.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["$a", "$b"]);
    }

    #[test]
    fn reverse_mapping_fills_named_slots() {
        let mut hash = BindingHash::new();
        hash.insert("$two", binding(2));
        hash.insert("$zero", binding(0));
        let mapping = make_type_binding_reverse_mapping(4, &hash);
        assert_eq!(mapping, ["$zero", "", "$two", ""]);
    }

    #[test]
    fn reverse_mapping_ties_resolve_lexicographically() {
        let mut hash = BindingHash::new();
        hash.insert("$z", binding(1));
        hash.insert("$a", binding(1));
        let mapping = make_type_binding_reverse_mapping(2, &hash);
        assert_eq!(mapping, ["", "$a"]);
    }

    #[test]
    fn reverse_mapping_ignores_out_of_range_bindings() {
        let mut hash = BindingHash::new();
        hash.insert("$far", binding(10));
        let mapping = make_type_binding_reverse_mapping(2, &hash);
        assert_eq!(mapping, ["", ""]);
    }
}
