//! Property tests for artifact and grammar name derivation.

use proptest::prelude::*;

use grammar_forge::domain::services::{grammar_name_of, output_file_name, wasm_name_of_path, PathResolver};
use grammar_forge::domain::value_objects::GrammarSource;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9][a-z0-9_-]{0,15}").unwrap()
}

fn prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("./".to_string()),
        Just("../../".to_string()),
        Just("./grammars/".to_string()),
        Just("/opt/grammars/".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the derived artifact name is a pure function of the identifier.
    #[test]
    fn property_wasm_name_is_deterministic(prefix in prefix(), base in segment()) {
        let id = format!("{}{}", prefix, base);
        prop_assert_eq!(wasm_name_of_path(&id), wasm_name_of_path(&id));
    }

    /// PROPERTY: the artifact name depends only on the base name.
    #[test]
    fn property_wasm_name_ignores_directories(a in prefix(), b in prefix(), base in segment()) {
        prop_assert_eq!(
            wasm_name_of_path(&format!("{}{}", a, base)),
            wasm_name_of_path(&format!("{}{}", b, base))
        );
    }

    /// PROPERTY: distinct hyphen-free base names never share an artifact name.
    #[test]
    fn property_distinct_base_names_do_not_collide(
        a in "[a-z0-9]{1,12}",
        b in "[a-z0-9]{1,12}",
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(wasm_name_of_path(&a), wasm_name_of_path(&b));
    }

    /// PROPERTY: artifact names never contain hyphens or path separators.
    #[test]
    fn property_wasm_name_is_flat(prefix in prefix(), base in segment()) {
        let name = wasm_name_of_path(&format!("{}{}", prefix, base));
        prop_assert!(!name.contains('-'));
        prop_assert!(!name.contains('/'));
        prop_assert!(name.ends_with("_bg.wasm"));
    }

    /// PROPERTY: a tree-sitter-<g> package always yields grammar g and its output name.
    #[test]
    fn property_grammar_name_round_trip(grammar in segment()) {
        let base = format!("tree-sitter-{}", grammar);
        let parsed = grammar_name_of(&base).unwrap();
        prop_assert_eq!(&parsed, &grammar);
        prop_assert_eq!(output_file_name(&parsed), format!("{}.wasm", base));
    }

    /// PROPERTY: grammar name parsing never panics.
    #[test]
    fn property_grammar_name_never_panics(s in "(?s).{0,64}") {
        let _ = grammar_name_of(&s);
    }

    /// PROPERTY: resolver naming agrees with the default-suffix helper.
    #[test]
    fn property_resolver_matches_helper(prefix in prefix(), base in segment()) {
        let id = format!("{}{}", prefix, base);
        let source = GrammarSource::new(id.clone()).unwrap();
        prop_assert_eq!(PathResolver::default().artifact_name(&source), wasm_name_of_path(&id));
    }
}
