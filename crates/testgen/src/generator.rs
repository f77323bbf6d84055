use std::collections::HashSet;
use std::fmt::Write as _;

use fdnorm_core::schema::SchemaBuilder;
use fdnorm_core::Schema;
use rand::distr::{Distribution, Uniform};
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct SchemaParams {
    pub id: u64,
    pub n_attribute: u64,
    pub n_dependency: u64,
    #[builder(default = 2)]
    pub max_lhs: u64,
    #[builder(default = 1)]
    pub max_rhs: u64,
}

/// Raw dependency as attribute names.
pub type RawDependency = (Vec<String>, Vec<String>);

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneratedSchema {
    params: SchemaParams,
    attributes: Vec<String>,
    dependencies: Vec<RawDependency>,
}

impl GeneratedSchema {
    #[must_use]
    pub const fn new(
        params: SchemaParams,
        attributes: Vec<String>,
        dependencies: Vec<RawDependency>,
    ) -> Self {
        Self {
            params,
            attributes,
            dependencies,
        }
    }

    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_params(&self) -> &SchemaParams {
        &self.params
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn dependencies(&self) -> &[RawDependency] {
        &self.dependencies
    }

    #[must_use]
    pub fn to_builder(&self) -> SchemaBuilder {
        self.dependencies.iter().fold(
            Schema::builder().attributes(self.attributes.iter().cloned()),
            |builder, (lhs, rhs)| builder.dependency(lhs.iter().cloned(), rhs.iter().cloned()),
        )
    }

    /// Renders the schema in the text format read by the parser, one
    /// statement per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "// generated schema {}", self.params.id);
        let _ = writeln!(out, "attributes: {}", self.attributes.join(" "));
        for (lhs, rhs) in &self.dependencies {
            let _ = writeln!(out, "{} -> {}", lhs.join(" "), rhs.join(" "));
        }
        out
    }
}

/// `A`..`Z`, then `A1`..`Z1`, `A2` and so on.
#[must_use]
pub fn attribute_name(index: u64) -> String {
    let letter = char::from(b'A' + u8::try_from(index % 26).unwrap_or_default());
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

fn sample_distinct<R: Rng>(
    rng: &mut R,
    range: &Uniform<u64>,
    count: u64,
    exclude: &HashSet<u64>,
) -> Vec<u64> {
    let mut picked: HashSet<u64> = HashSet::new();
    let mut ordered = Vec::new();
    while (ordered.len() as u64) < count {
        let candidate = range.sample(rng);
        if !exclude.contains(&candidate) && picked.insert(candidate) {
            ordered.push(candidate);
        }
    }
    ordered.sort_unstable();
    ordered
}

/// Generate `n_dependency` random non-trivial dependencies over
/// `n_attribute` attributes.
///
/// Each left side has between 1 and `max_lhs` attributes and each right side
/// between 1 and `max_rhs` attributes, drawn from outside the left side.
/// Every attribute is declared, so unused ones still belong to the schema.
///
/// # Panics
///
/// Panics if `n_attribute` is less than two or either side bound is zero.
#[must_use]
pub fn generate_single_schema(
    n_attribute: u64,
    n_dependency: u64,
    max_lhs: u64,
    max_rhs: u64,
) -> (Vec<String>, Vec<RawDependency>) {
    assert!(n_attribute >= 2, "a dependency needs two attributes");
    let mut random_generator = rand::rng();
    let attribute_range = Uniform::new(0, n_attribute).unwrap();
    let lhs_range = Uniform::new_inclusive(1, max_lhs.min(n_attribute - 1)).unwrap();

    let attributes = (0..n_attribute).map(attribute_name).collect();
    let dependencies = (0..n_dependency)
        .map(|_| {
            let lhs_len = lhs_range.sample(&mut random_generator);
            let lhs = sample_distinct(
                &mut random_generator,
                &attribute_range,
                lhs_len,
                &HashSet::new(),
            );
            let taken: HashSet<u64> = lhs.iter().copied().collect();
            let rhs_range = Uniform::new_inclusive(1, max_rhs.min(n_attribute - lhs_len)).unwrap();
            let rhs_len = rhs_range.sample(&mut random_generator);
            let rhs = sample_distinct(&mut random_generator, &attribute_range, rhs_len, &taken);
            (
                lhs.into_iter().map(attribute_name).collect(),
                rhs.into_iter().map(attribute_name).collect(),
            )
        })
        .collect();
    (attributes, dependencies)
}

#[must_use]
pub fn generate_mult_schemas(
    n_schema: u64,
    n_attribute: u64,
    n_dependency: u64,
    max_lhs: u64,
    max_rhs: u64,
) -> Vec<GeneratedSchema> {
    (0..n_schema)
        .into_par_iter()
        .map(|id| {
            let (attributes, dependencies) =
                generate_single_schema(n_attribute, n_dependency, max_lhs, max_rhs);
            GeneratedSchema {
                params: SchemaParams::builder()
                    .id(id)
                    .n_attribute(n_attribute)
                    .n_dependency(n_dependency)
                    .max_lhs(max_lhs)
                    .max_rhs(max_rhs)
                    .build(),
                attributes,
                dependencies,
            }
        })
        .collect()
}
