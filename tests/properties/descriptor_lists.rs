//! Property tests for descriptor dependency lists.

use std::collections::BTreeSet;

use proptest::prelude::*;

use modgate::passes::dependency_items;

fn plugin_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Za-z0-9]{0,11}").unwrap()
}

fn keys() -> Vec<String> {
    vec!["depend".to_string(), "softdepend".to_string()]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary descriptor text never panics.
    #[test]
    fn property_dependency_parsing_never_panics(s in "(?s).{0,512}") {
        let _ = dependency_items(&s, &keys());
    }

    /// PROPERTY: A block list yields exactly its bullets, whatever blank lines
    /// are interleaved, and nothing after the first unindented line.
    #[test]
    fn property_block_list_stops_at_dedent(
        items in proptest::collection::vec((plugin_name(), any::<bool>()), 1..8),
        after in proptest::collection::vec(plugin_name(), 0..4),
        indent in 1usize..6,
    ) {
        let pad = " ".repeat(indent);
        let mut content = String::from("name: Feature\nsoftdepend:\n");
        for (item, blank_before) in &items {
            if *blank_before {
                content.push('\n');
            }
            content.push_str(&format!("{pad}- {item}\n"));
        }
        content.push_str("commands:\n");
        for item in &after {
            content.push_str(&format!("{pad}- {item}\n"));
        }

        let expected: BTreeSet<String> = items.iter().map(|(i, _)| i.clone()).collect();
        prop_assert_eq!(dependency_items(&content, &keys()), expected);
    }

    /// PROPERTY: The inline and block forms declare the same dependencies.
    #[test]
    fn property_inline_and_block_forms_agree(
        items in proptest::collection::vec(plugin_name(), 1..6),
    ) {
        let inline = format!("depend: [{}]\n", items.join(", "));
        let block = format!(
            "depend:\n{}",
            items.iter().map(|i| format!("  - {i}\n")).collect::<String>()
        );
        prop_assert_eq!(dependency_items(&inline, &keys()), dependency_items(&block, &keys()));
    }
}
