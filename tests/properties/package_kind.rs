//! Property tests for package classification.

use proptest::prelude::*;

use grammar_forge::domain::services::PathResolver;
use grammar_forge::domain::value_objects::{GrammarSource, PackageKind};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: construction never panics on arbitrary input.
    #[test]
    fn property_new_never_panics(s in "(?s).{0,128}") {
        let _ = GrammarSource::new(s);
    }

    /// PROPERTY: path-prefixed identifiers are local and resolve verbatim.
    #[test]
    fn property_path_prefix_is_local(
        prefix in prop_oneof![Just("./"), Just("../"), Just("/")],
        rest in "[a-z][a-z0-9-]{0,15}",
    ) {
        let id = format!("{}{}", prefix, rest);
        let source = GrammarSource::new(id.clone()).unwrap();
        prop_assert_eq!(source.kind(), PackageKind::Local);
        prop_assert_eq!(PathResolver::default().package_dir(&source), std::path::PathBuf::from(id));
    }

    /// PROPERTY: bare names are dependencies located under the dependency root.
    #[test]
    fn property_bare_name_is_dependency(name in "[a-z][a-z0-9-]{0,15}") {
        let source = GrammarSource::new(name.clone()).unwrap();
        prop_assert_eq!(source.kind(), PackageKind::Dependency);
        prop_assert_eq!(
            PathResolver::default().package_dir(&source),
            std::path::Path::new("node_modules").join(name)
        );
    }
}
