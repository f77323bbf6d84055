//! fdnorm CLI -- analyze functional dependencies and normalize schemas.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use fdnorm_core::Budget;

pub mod report;

#[derive(Debug, Parser)]
#[command(
    name = "fdnorm",
    about = "Functional dependency analysis and schema normalization"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Closure of an attribute set
    Closure(ClosureArgs),
    /// Minimal (canonical) cover of the dependencies
    Cover(SchemaArgs),
    /// All candidate keys
    Keys(SchemaArgs),
    /// Highest normal form and its violations
    NormalForm(NormalFormArgs),
    /// Whether another dependency file is equivalent to the schema's
    Equivalent(EquivalentArgs),
    /// Whether a decomposition is a lossless join
    Lossless(DecompositionArgs),
    /// Whether a decomposition preserves the dependencies
    Preserves(DecompositionArgs),
    /// Bernstein 3NF synthesis
    Synthesize(SchemaArgs),
    /// Lossless BCNF decomposition
    Bcnf(SchemaArgs),
    /// Keys, cover, normal form and both decompositions for many files
    Analyze(AnalyzeArgs),
    /// Generate random schema files
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Schema file, `-` for stdin
    pub schema: PathBuf,
    /// Read every character of a word as its own attribute (`AB -> C`)
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args)]
pub struct BudgetArgs {
    /// Widest attribute set an exponential search may branch over
    #[arg(long, default_value_t = Budget::DEFAULT_MAX_ATTRIBUTES)]
    pub max_attributes: usize,
    /// Most expansion steps one search may take
    #[arg(long, default_value_t = Budget::DEFAULT_MAX_STEPS)]
    pub max_steps: u64,
    /// Wall-clock limit per analysis, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Lift the attribute and step limits
    #[arg(long)]
    pub unlimited: bool,
}

impl BudgetArgs {
    #[must_use]
    pub fn budget(&self) -> Budget {
        let budget = if self.unlimited {
            Budget::unlimited()
        } else {
            Budget::default()
                .with_max_attributes(Some(self.max_attributes))
                .with_max_steps(Some(self.max_steps))
        };
        budget.with_timeout(self.timeout_ms.map(Duration::from_millis))
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
    /// Print the parsed schema and intermediate results
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub budget: BudgetArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ClosureArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Attributes to close, e.g. "A B"
    #[arg(long)]
    pub of: String,
}

#[derive(Debug, Args)]
pub struct NormalFormArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Classify each relation of this decomposition instead, e.g. "A B | B C"
    #[arg(long)]
    pub relations: Option<String>,
}

#[derive(Debug, Args)]
pub struct EquivalentArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// File with the dependencies to compare against
    pub other: PathBuf,
}

#[derive(Debug, Args)]
pub struct DecompositionArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Sub-relations separated by `|`, e.g. "A B C | C D"
    #[arg(long)]
    pub decomposition: String,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Schema files to analyze in parallel
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Read every character of a word as its own attribute (`AB -> C`)
    #[arg(long)]
    pub compact: bool,
    #[command(flatten)]
    pub budget: BudgetArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of schemas to generate
    #[arg(long)]
    pub n_schema: u64,
    /// Number of attributes per schema
    #[arg(long)]
    pub n_attr: u64,
    /// Number of dependencies per schema
    #[arg(long)]
    pub n_dep: u64,
    /// Largest left-hand side
    #[arg(long, default_value_t = 2)]
    pub max_lhs: u64,
    /// Largest right-hand side
    #[arg(long, default_value_t = 1)]
    pub max_rhs: u64,
    /// Output directory for generated schema files
    #[arg(long)]
    pub output_dir: PathBuf,
}
