//! Property tests for cross-module collision detection.

use proptest::prelude::*;

use modgate::domain::{Module, RelocationRule};
use modgate::passes::Ownership;
use modgate::Violation;

fn module(name: &str, target: &str, archive: &str) -> Module {
    Module::new(name, format!("/p/{name}")).with_shading(
        true,
        Some(archive.to_string()),
        vec![RelocationRule::new(name, "okio", target)],
    )
}

fn collisions(modules: &[&Module]) -> Vec<Violation> {
    let mut ownership = Ownership::default();
    for m in modules {
        ownership.claim(m);
    }
    let mut found = Vec::new();
    ownership.report_collisions(&mut found);
    found
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Two claimants of a target produce one collision naming both,
    /// in whatever order they are merged, regardless of other modules.
    #[test]
    fn property_collision_is_order_independent(
        others in proptest::collection::btree_set("[a-z]{3,8}", 0..5),
        swap in any::<bool>(),
        rotate in 0usize..8,
    ) {
        let a = module("first-owner", "acme.libs.shared", "A");
        let b = module("second-owner", "acme.libs.shared", "B");
        let rest: Vec<Module> = others
            .iter()
            .map(|n| module(n, &format!("acme.libs.x{n}"), n))
            .collect();

        let mut order: Vec<&Module> = if swap { vec![&b, &a] } else { vec![&a, &b] };
        order.extend(rest.iter());
        let len = order.len();
        order.rotate_left(rotate % len);

        let found = collisions(&order);
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(
            &found[0].message,
            "relocation target 'acme.libs.shared' is claimed by multiple modules: first-owner, second-owner"
        );
    }
}
