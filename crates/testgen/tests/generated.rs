//! Invariants of the analyses on randomly generated schemas.

use fdnorm_core::analysis::classify_relations;
use fdnorm_core::analysis::closure::{closure, is_superkey};
use fdnorm_core::analysis::cover::minimal_cover;
use fdnorm_core::analysis::decomposition::{
    decompose_bcnf, is_lossless_join, preserves_dependencies, synthesize_3nf,
};
use fdnorm_core::analysis::equivalence::are_equivalent;
use fdnorm_core::analysis::keys::candidate_keys;
use fdnorm_core::analysis::normal_form::{normal_form, NormalForm};
use fdnorm_core::{Budget, Schema};
use fdnorm_testgen::generator::generate_mult_schemas;

fn random_schemas() -> Vec<Schema> {
    generate_mult_schemas(24, 7, 6, 3, 2)
        .iter()
        .map(|generated| generated.to_builder().build().unwrap())
        .collect()
}

#[test]
fn minimal_cover_is_equivalent() {
    for schema in random_schemas() {
        let cover = minimal_cover(schema.dependencies());
        assert!(are_equivalent(schema.dependencies(), &cover));
        assert!(cover.iter().all(|fd| fd.rhs.len() == 1 && !fd.is_trivial()));
    }
}

#[test]
fn candidate_keys_are_minimal_superkeys() {
    let budget = Budget::default();
    for schema in random_schemas() {
        let keys = candidate_keys(&schema, &budget).unwrap();
        assert!(!keys.is_empty());
        for key in &keys {
            assert!(is_superkey(&schema, *key));
            assert!(key
                .iter()
                .all(|attribute| !is_superkey(&schema, key.without(attribute))));
        }
    }
}

#[test]
fn synthesis_is_lossless_preserving_and_third_normal() {
    let budget = Budget::default();
    for schema in random_schemas() {
        let decomposition = synthesize_3nf(&schema);
        assert_eq!(decomposition.attributes(), schema.attributes());
        assert!(is_lossless_join(&schema, &decomposition, &budget).unwrap());
        assert!(preserves_dependencies(&schema, &decomposition, &budget).unwrap());
        let reports = classify_relations(&schema, &decomposition, &budget).unwrap();
        assert!(reports
            .iter()
            .all(|report| report.satisfies(NormalForm::Third)));
    }
}

#[test]
fn bcnf_decomposition_is_lossless_and_boyce_codd() {
    let budget = Budget::default();
    for schema in random_schemas() {
        let decomposition = decompose_bcnf(&schema, &budget).unwrap();
        assert_eq!(decomposition.attributes(), schema.attributes());
        assert!(is_lossless_join(&schema, &decomposition, &budget).unwrap());
        let reports = classify_relations(&schema, &decomposition, &budget).unwrap();
        assert!(reports
            .iter()
            .all(|report| report.satisfies(NormalForm::BoyceCodd)));
    }
}

#[test]
fn second_normal_form_detects_every_partial_dependency() {
    let budget = Budget::default();
    for schema in random_schemas() {
        let report = normal_form(&schema, &budget).unwrap();
        let partial = report.keys.iter().any(|key| {
            key.iter().any(|dropped| {
                let subset = key.without(dropped);
                !closure(subset, schema.dependencies())
                    .difference(subset)
                    .difference(report.prime)
                    .is_empty()
            })
        });
        assert_eq!(report.satisfies(NormalForm::Second), !partial);
    }
}
