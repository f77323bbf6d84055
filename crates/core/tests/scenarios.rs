//! End-to-end scenarios over the public API.

mod common;

use common::{named, set};
use fdnorm_core::analysis::closure::closure;
use fdnorm_core::analysis::cover::minimal_cover;
use fdnorm_core::analysis::decomposition::{
    decompose_bcnf, is_lossless_join, preserves_dependencies, synthesize_3nf,
};
use fdnorm_core::analysis::equivalence::are_equivalent;
use fdnorm_core::analysis::keys::candidate_keys;
use fdnorm_core::analysis::normal_form::{normal_form, NormalForm};
use fdnorm_core::analysis::classify_relations;
use fdnorm_core::{analyze, Budget, Outcome, Problem};

/// A -> B, B -> C, C -> D: one key, already canonical, stuck at 2NF
/// because B and C are non-key determinants of non-prime attributes.
#[test]
fn chain_of_dependencies() {
    let schema = schema! { A -> B; B -> C; C -> D };
    let budget = Budget::default();

    assert_eq!(
        closure(set(&schema, "A"), schema.dependencies()),
        schema.attributes()
    );
    assert_eq!(
        named(&schema, &candidate_keys(&schema, &budget).unwrap()),
        vec!["{A}"]
    );
    assert_eq!(&minimal_cover(schema.dependencies()), schema.dependencies());

    let report = normal_form(&schema, &budget).unwrap();
    assert_eq!(report.level, NormalForm::Second);
    assert_eq!(named(&schema, &report.boyce_codd), vec!["B -> C", "C -> D"]);
}

/// A -> B, B -> A: two single-attribute keys.
#[test]
fn mutual_dependency_has_two_keys() {
    let schema = schema! { A -> B; B -> A };
    assert_eq!(
        closure(set(&schema, "A"), schema.dependencies()),
        set(&schema, "A B")
    );
    assert_eq!(
        named(&schema, &candidate_keys(&schema, &Budget::default()).unwrap()),
        vec!["{A}", "{B}"]
    );
}

/// A declared attribute outside every dependency joins every key.
#[test]
fn isolated_declared_attribute() {
    let schema = schema! { attributes: A B C; A -> B; B -> A };
    assert_eq!(
        named(&schema, &candidate_keys(&schema, &Budget::default()).unwrap()),
        vec!["{A, C}", "{B, C}"]
    );
}

/// {A -> B, B -> C} and {A -> B, A -> C, B -> C} imply each other.
#[test]
fn equivalent_dependency_sets() {
    let schema = schema! { A -> B; B -> C };
    let other = schema
        .dependency_set([(["A"], ["B"]), (["A"], ["C"]), (["B"], ["C"])])
        .unwrap();
    assert!(are_equivalent(schema.dependencies(), &other));
    assert_eq!(
        analyze(&schema, Problem::Equivalence(other), &Budget::default()).unwrap(),
        Outcome::Equivalent(true)
    );
}

/// {A, B} ⋈ {A, C} under A -> B is lossless: A determines {A, B}.
#[test]
fn two_way_lossless_join() {
    let schema = schema! { attributes: A B C; A -> B };
    let decomposition = schema
        .decomposition([vec!["A", "B"], vec!["A", "C"]])
        .unwrap();
    assert!(is_lossless_join(&schema, &decomposition, &Budget::default()).unwrap());
}

/// The worked example
/// `AB->C, C->A, BC->D, ACD->B, D->EG, BE->C, C->D, CE->G`.
#[test]
fn textbook_example() {
    let schema = schema! { A B -> C; C -> A; B C -> D; A C D -> B; D -> E G; B E -> C; C -> D; C E -> G };
    let budget = Budget::default();

    let keys = candidate_keys(&schema, &budget).unwrap();
    assert_eq!(
        named(&schema, &keys),
        vec!["{C}", "{A, B}", "{B, D}", "{B, E}"]
    );

    let cover = minimal_cover(schema.dependencies());
    assert_eq!(cover.len(), 7);
    assert!(are_equivalent(schema.dependencies(), &cover));

    let report = normal_form(&schema, &budget).unwrap();
    assert_eq!(report.level, NormalForm::First);
    assert_eq!(named(&schema, &report.second), vec!["D -> G"]);

    let synthesized = synthesize_3nf(&schema);
    assert_eq!(
        schema.named(&synthesized).to_string(),
        "{A, B, C, D} | {D, E, G} | {B, C, E}"
    );
    assert!(is_lossless_join(&schema, &synthesized, &budget).unwrap());
    assert!(preserves_dependencies(&schema, &synthesized, &budget).unwrap());
    for report in classify_relations(&schema, &synthesized, &budget).unwrap() {
        assert!(report.satisfies(NormalForm::Third));
    }

    let bcnf = decompose_bcnf(&schema, &budget).unwrap();
    assert!(is_lossless_join(&schema, &bcnf, &budget).unwrap());
    for report in classify_relations(&schema, &bcnf, &budget).unwrap() {
        assert_eq!(report.level, NormalForm::BoyceCodd);
    }
}

#[test]
fn analyze_dispatches_every_problem() {
    let schema = schema! { A -> B; B -> C };
    let budget = Budget::default();
    let decomposition = schema
        .decomposition([vec!["A", "B"], vec!["B", "C"]])
        .unwrap();

    let cases = [
        (Problem::Closure(set(&schema, "B")), "{B, C}"),
        (Problem::MinimalCover, "A -> B; B -> C"),
        (Problem::CandidateKeys, "{A}"),
        (Problem::NormalForm, "2NF\n  violates 3NF:\n    B -> C\n  violates BCNF:\n    B -> C"),
        (Problem::LosslessJoin(decomposition.clone()), "yes"),
        (Problem::DependencyPreservation(decomposition), "yes"),
        (Problem::Synthesis, "{A, B} | {B, C}"),
    ];
    for (problem, expected) in cases {
        let outcome = analyze(&schema, problem.clone(), &budget).unwrap();
        assert_eq!(
            schema.named(&outcome).to_string(),
            expected,
            "{problem:?}"
        );
    }

    let Outcome::Decomposition(bcnf) = analyze(&schema, Problem::BcnfDecomposition, &budget).unwrap()
    else {
        panic!("expected a decomposition");
    };
    assert_eq!(bcnf.len(), 2);
}
