/// Catalog loading and lint integration tests.

use prompt_composer::core::catalog::{Catalog, Severity};
use std::path::Path;

#[test]
fn catalog_file_matches_builtin() {
    let from_file = Catalog::load_from_ron(Path::new("catalog/tags.ron")).unwrap();
    let builtin = Catalog::builtin().unwrap();
    assert_eq!(from_file, builtin);
}

#[test]
fn builtin_catalog_has_expected_pools() {
    let catalog = Catalog::builtin().unwrap();
    let names: Vec<String> = catalog.pools().into_iter().map(|(name, _)| name).collect();

    let expected_pools = [
        "animals.names",
        "animals.features",
        "locations.natural",
        "locations.urban",
        "locations.indoors",
        "nature.plants_flowers",
        "nature.phenomena",
        "objects.misc",
        "clothing.dresses_and_skirts",
        "clothing.inners",
        "clothing.outers",
        "clothing.bottoms",
        "clothing.footwear",
        "clothing.headwear",
        "clothing.sleeves",
        "clothing.accessories",
        "clothing.special_costumes",
        "clothing.fabrics_and_patterns",
        "actions.basic",
        "actions.poses",
        "actions.angles",
        "people.basic",
        "people.occupations",
        "people.fantasy_and_mythical",
        "hair.style",
        "hair.length",
        "hair.color",
        "eyes.color",
        "eyes.pupils_sclera",
    ];

    for pool in &expected_pools {
        assert!(names.iter().any(|n| n == pool), "Missing pool: {}", pool);
    }
}

#[test]
fn builtin_catalog_lints_clean() {
    let catalog = Catalog::builtin().unwrap();
    let issues = catalog.lint();
    assert!(
        issues.is_empty(),
        "Expected a clean catalog, got: {:?}",
        issues
    );
}

#[test]
fn builtin_expression_variants() {
    let catalog = Catalog::builtin().unwrap();
    let variants: Vec<&str> = catalog.expressions.variant_names().collect();
    for expected in ["happy", "sad", "angry", "surprised"] {
        assert!(variants.contains(&expected), "Missing variant: {}", expected);
    }
    assert!(catalog
        .expressions
        .variants
        .iter()
        .all(|v| v.tags.len() >= 2));
}

#[test]
fn default_probabilities_in_range() {
    let catalog = Catalog::builtin().unwrap();
    for (list, tags) in catalog.defaults.lists() {
        assert!(!tags.is_empty(), "defaults.{} is empty", list);
        for wt in tags {
            assert!((0.0..=1.0).contains(&wt.probability));
        }
    }
    assert!(catalog
        .lint()
        .iter()
        .all(|issue| issue.severity != Severity::Error));
}
