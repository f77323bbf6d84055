//! JSON rendering of analysis results and exit-code mapping.

use fdnorm_core::analysis::decomposition::preservation::PreservationReport;
use fdnorm_core::analysis::{NormalForm, NormalFormReport};
use fdnorm_core::attribute::AttributeSet;
use fdnorm_core::dependency::FunctionalDependency;
use fdnorm_core::error::MalformedInput;
use fdnorm_core::{Error, Outcome, Problem, Schema};
use serde_json::{json, Value};

/// Exit status for a failed analysis: 2 when a search ran out of budget,
/// 1 for everything else.
#[must_use]
pub const fn exit_code(error: &Error) -> i32 {
    match error {
        Error::SearchBudgetExceeded(_) => 2,
        _ => 1,
    }
}

/// Short machine-readable name of an error kind.
#[must_use]
pub const fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::MalformedInput(MalformedInput::InvalidToken(_)) => "invalid_token",
        Error::MalformedInput(MalformedInput::EmptyLeftSide { .. }) => "empty_left_side",
        Error::MalformedInput(MalformedInput::EmptyRightSide { .. }) => "empty_right_side",
        Error::MalformedInput(MalformedInput::EmptyRelation(_)) => "empty_relation",
        Error::MalformedInput(MalformedInput::UncoveredAttributes(_)) => "uncovered_attributes",
        Error::UnknownAttribute(_) => "unknown_attribute",
        Error::TooManyAttributes { .. } => "too_many_attributes",
        Error::SearchBudgetExceeded(_) => "search_budget_exceeded",
    }
}

#[must_use]
pub fn error_json(error: &Error) -> Value {
    json!({
        "kind": error_kind(error),
        "message": error.to_string(),
    })
}

#[must_use]
pub const fn problem_name(problem: &Problem) -> &'static str {
    match problem {
        Problem::Closure(_) => "closure",
        Problem::MinimalCover => "cover",
        Problem::CandidateKeys => "keys",
        Problem::Equivalence(_) => "equivalent",
        Problem::NormalForm => "normal_form",
        Problem::LosslessJoin(_) => "lossless",
        Problem::DependencyPreservation(_) => "preserves",
        Problem::Synthesis => "synthesize",
        Problem::BcnfDecomposition => "bcnf",
    }
}

fn names(schema: &Schema, set: AttributeSet) -> Value {
    schema.universe().names_of(set).collect::<Vec<_>>().into()
}

fn dependencies<'a>(
    schema: &Schema,
    fds: impl IntoIterator<Item = &'a FunctionalDependency>,
) -> Value {
    fds.into_iter()
        .map(|fd| schema.named(fd).to_string())
        .collect::<Vec<_>>()
        .into()
}

fn sets<'a>(schema: &Schema, sets: impl IntoIterator<Item = &'a AttributeSet>) -> Value {
    sets.into_iter()
        .map(|set| names(schema, *set))
        .collect::<Vec<_>>()
        .into()
}

#[must_use]
pub fn normal_form_json(schema: &Schema, report: &NormalFormReport) -> Value {
    json!({
        "level": report.level.to_string(),
        "keys": sets(schema, &report.keys),
        "prime": names(schema, report.prime),
        "violations": {
            "2NF": dependencies(schema, report.violations(NormalForm::Second)),
            "3NF": dependencies(schema, report.violations(NormalForm::Third)),
            "BCNF": dependencies(schema, report.violations(NormalForm::BoyceCodd)),
        },
    })
}

fn preservation_json(schema: &Schema, report: &PreservationReport) -> Value {
    json!({
        "preserved": report.preserved,
        "projections": report
            .projections
            .iter()
            .map(|projection| dependencies(schema, projection))
            .collect::<Vec<_>>(),
        "lost": dependencies(schema, &report.lost),
    })
}

/// `outcome` with attribute names in place of indices.
#[must_use]
pub fn outcome_json(schema: &Schema, outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Closure(set) => names(schema, *set),
        Outcome::Cover(cover) => dependencies(schema, cover),
        Outcome::Keys(keys) => sets(schema, keys),
        Outcome::Equivalent(value) | Outcome::LosslessJoin(value) => Value::Bool(*value),
        Outcome::NormalForm(report) => normal_form_json(schema, report),
        Outcome::Preservation(report) => preservation_json(schema, report),
        Outcome::Decomposition(decomposition) => sets(schema, decomposition),
    }
}

#[cfg(test)]
mod tests {
    use fdnorm_core::error::Limit;
    use fdnorm_core::{analyze, Budget};

    use super::*;

    fn textbook() -> Schema {
        Schema::builder()
            .dependency(["A", "B"], ["C"])
            .dependency(["C"], ["A"])
            .dependency(["B", "C"], ["D"])
            .dependency(["A", "C", "D"], ["B"])
            .dependency(["D"], ["E", "G"])
            .dependency(["B", "E"], ["C"])
            .dependency(["C"], ["D"])
            .dependency(["C", "E"], ["G"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_keys_json() {
        let schema = textbook();
        let outcome = analyze(&schema, Problem::CandidateKeys, &Budget::default()).unwrap();
        assert_eq!(
            outcome_json(&schema, &outcome),
            json!([["C"], ["A", "B"], ["B", "D"], ["B", "E"]])
        );
    }

    #[test]
    fn test_normal_form_json() {
        let schema = textbook();
        let outcome = analyze(&schema, Problem::NormalForm, &Budget::default()).unwrap();
        let value = outcome_json(&schema, &outcome);
        assert_eq!(value["level"], json!("1NF"));
        assert_eq!(value["violations"]["2NF"], json!(["D -> G"]));
        assert_eq!(value["violations"]["BCNF"], json!(["D -> E", "D -> G"]));
    }

    #[test]
    fn test_synthesis_json() {
        let schema = textbook();
        let outcome = analyze(&schema, Problem::Synthesis, &Budget::default()).unwrap();
        assert_eq!(
            outcome_json(&schema, &outcome),
            json!([["A", "B", "C", "D"], ["D", "E", "G"], ["B", "C", "E"]])
        );
    }

    #[test]
    fn test_exit_codes() {
        let budget = Error::SearchBudgetExceeded(Limit::Steps { limit: 10 });
        assert_eq!(exit_code(&budget), 2);
        assert_eq!(exit_code(&Error::UnknownAttribute("Z".to_string())), 1);
        assert_eq!(error_json(&budget)["kind"], json!("search_budget_exceeded"));
    }
}
