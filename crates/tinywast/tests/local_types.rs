//! Property tests for the run-length-compressed local declarations.

use proptest::prelude::*;
use tinywast::{LocalTypes, ValType};

fn val_type() -> impl Strategy<Value = ValType> {
    prop_oneof![
        Just(ValType::I32),
        Just(ValType::I64),
        Just(ValType::F32),
        Just(ValType::F64),
        Just(ValType::V128),
        Just(ValType::FuncRef),
        Just(ValType::AnyRef),
    ]
}

proptest! {
    #[test]
    fn set_then_iterate_is_identity(types in proptest::collection::vec(val_type(), 0..64)) {
        let mut locals = LocalTypes::new();
        locals.set(&types);

        prop_assert_eq!(locals.len() as usize, types.len());
        let expanded: Vec<_> = locals.iter().collect();
        prop_assert_eq!(&expanded, &types);
    }

    #[test]
    fn indexed_access_matches_the_expansion(types in proptest::collection::vec(val_type(), 0..64)) {
        let mut locals = LocalTypes::new();
        locals.set(&types);

        for (index, &ty) in types.iter().enumerate() {
            prop_assert_eq!(locals.get(index as u32), Some(ty));
        }
        prop_assert_eq!(locals.get(types.len() as u32), None);
    }

    #[test]
    fn runs_are_maximal_after_set(types in proptest::collection::vec(val_type(), 0..64)) {
        let mut locals = LocalTypes::new();
        locals.set(&types);

        for window in locals.decls().windows(2) {
            prop_assert!(window[0].0 != window[1].0, "adjacent runs share a type: {:?}", window);
        }
        for &(_, count) in locals.decls() {
            prop_assert!(count > 0);
        }
    }

    #[test]
    fn append_decl_extends_the_expansion(ty in val_type(), count in 0u32..8, prefix in proptest::collection::vec(val_type(), 0..16)) {
        let mut locals = LocalTypes::new();
        locals.set(&prefix);
        let before = locals.len();

        locals.append_decl(ty, count);
        prop_assert_eq!(locals.len(), before + count);

        let expanded: Vec<_> = locals.iter().collect();
        prop_assert_eq!(expanded.len() as u32, before + count);
        for &got in expanded.iter().skip(before as usize) {
            prop_assert_eq!(got, ty);
        }
    }
}
