use std::io::{self, Read as _};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use derive_more::{Display, From};
use fdnorm_cli::report::{error_json, exit_code, normal_form_json, outcome_json, problem_name};
use fdnorm_cli::{
    AnalyzeArgs, App, ClosureArgs, Command, DecompositionArgs, EquivalentArgs, GenerateArgs,
    InputArgs, NormalFormArgs, OutputArgs, SchemaArgs,
};
use fdnorm_core::analysis::classify_relations;
use fdnorm_core::analysis::decomposition::Decomposition;
use fdnorm_core::{analyze, Budget, Error, Outcome, Problem, Schema};
use fdnorm_parser::source::{compact, resolve_dependencies, DependencySource};
use fdnorm_parser::{parse_attributes, parse_decomposition, parse_dependencies, parse_schema};
use fdnorm_parser::ParseError;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Display, From)]
enum Failure {
    #[display("cannot read {}: {_1}", _0.display())]
    #[from(skip)]
    Io(PathBuf, io::Error),
    Parse(ParseError),
    Analysis(Error),
}

impl Failure {
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Analysis(error) => exit_code(error),
            Self::Io(..) | Self::Parse(_) => 1,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Analysis(error) => error_json(error),
            Self::Parse(error) => json!({
                "kind": "parse",
                "message": error.message,
                "line": error.line,
                "column": error.column,
            }),
            Self::Io(..) => json!({ "kind": "io", "message": self.to_string() }),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    match &app.command {
        Command::Closure(args) => closure(args),
        Command::Cover(args) => run_problem(args, |_| Ok(Problem::MinimalCover)),
        Command::Keys(args) => run_problem(args, |_| Ok(Problem::CandidateKeys)),
        Command::NormalForm(args) => normal_form(args),
        Command::Equivalent(args) => equivalent(args),
        Command::Lossless(args) => decomposition_problem(args, Problem::LosslessJoin),
        Command::Preserves(args) => decomposition_problem(args, Problem::DependencyPreservation),
        Command::Synthesize(args) => run_problem(args, |_| Ok(Problem::Synthesis)),
        Command::Bcnf(args) => run_problem(args, |_| Ok(Problem::BcnfDecomposition)),
        Command::Analyze(args) => analyze_files(args),
        Command::Generate(args) => generate(args),
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

fn read_input(path: &Path) -> Result<String, Failure> {
    let mut text = String::new();
    let result = if path == Path::new("-") {
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|e| Failure::Io(path.to_path_buf(), e))
}

fn tokens(words: Vec<String>, compact_mode: bool) -> Vec<String> {
    if compact_mode {
        compact(&words)
    } else {
        words
    }
}

fn load_schema(path: &Path, compact_mode: bool) -> Result<Schema, Failure> {
    let source = parse_schema(&read_input(path)?)?;
    let source = if compact_mode {
        source.compact()
    } else {
        source
    };
    Ok(source.build()?)
}

fn load_decomposition(
    schema: &Schema,
    text: &str,
    compact_mode: bool,
) -> Result<Decomposition, Failure> {
    let relations = parse_decomposition(text)?
        .into_iter()
        .map(|relation| tokens(relation, compact_mode));
    Ok(schema.decomposition(relations)?)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn fail(failure: &Failure, output: &OutputArgs) -> ! {
    if output.json {
        println!("{}", json!({ "ok": false, "error": failure.to_json() }));
    } else {
        eprintln!("error: {failure}");
    }
    process::exit(failure.exit_code());
}

fn schema_json(schema: &Schema) -> Value {
    json!({
        "attributes": schema.universe().names_of(schema.attributes()).collect::<Vec<_>>(),
        "dependencies": schema
            .dependencies()
            .iter()
            .map(|fd| schema.named(fd).to_string())
            .collect::<Vec<_>>(),
        "canonical": schema.canonical_key(),
    })
}

fn print_schema(schema: &Schema) {
    println!("attributes: {}", schema.named(&schema.attributes()));
    for fd in schema.dependencies() {
        println!("  {}", schema.named(fd));
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.replace('\n', &format!("\n{prefix}"))
}

fn print_outcome(schema: &Schema, problem: &'static str, outcome: &Outcome, output: &OutputArgs) {
    if output.json {
        let mut result = json!({
            "problem": problem,
            "ok": true,
            "result": outcome_json(schema, outcome),
        });
        if output.verbose {
            result["schema"] = schema_json(schema);
        }
        println!("{result}");
        return;
    }

    if output.verbose {
        print_schema(schema);
        match outcome {
            Outcome::NormalForm(report) => {
                println!("keys: {}", schema.named(report.keys.as_slice()));
                println!("prime: {}", schema.named(&report.prime));
            }
            Outcome::Preservation(report) => {
                for (i, projection) in report.projections.iter().enumerate() {
                    println!("projection #{i}: {}", schema.named(projection));
                }
            }
            _ => {}
        }
    }
    println!("{}", schema.named(outcome));
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run_problem(
    args: &SchemaArgs,
    problem: impl FnOnce(&Schema) -> Result<Problem, Failure>,
) {
    let InputArgs {
        schema: path,
        compact: compact_mode,
    } = &args.input;
    let schema = load_schema(path, *compact_mode).unwrap_or_else(|e| fail(&e, &args.output));
    let problem = problem(&schema).unwrap_or_else(|e| fail(&e, &args.output));
    let name = problem_name(&problem);
    match analyze(&schema, problem, &args.budget.budget()) {
        Ok(outcome) => print_outcome(&schema, name, &outcome, &args.output),
        Err(e) => fail(&e.into(), &args.output),
    }
}

fn closure(args: &ClosureArgs) {
    run_problem(&args.schema, |schema| {
        let names = tokens(parse_attributes(&args.of)?, args.schema.input.compact);
        Ok(Problem::Closure(schema.attribute_set(names)?))
    });
}

fn equivalent(args: &EquivalentArgs) {
    run_problem(&args.schema, |schema| {
        let parsed = parse_dependencies(&read_input(&args.other)?)?;
        let parsed: Vec<_> = if args.schema.input.compact {
            parsed.iter().map(DependencySource::compact).collect()
        } else {
            parsed
        };
        Ok(Problem::Equivalence(resolve_dependencies(schema, &parsed)?))
    });
}

fn decomposition_problem(args: &DecompositionArgs, problem: fn(Decomposition) -> Problem) {
    run_problem(&args.schema, |schema| {
        load_decomposition(schema, &args.decomposition, args.schema.input.compact).map(problem)
    });
}

fn normal_form(args: &NormalFormArgs) {
    let Some(relations) = &args.relations else {
        run_problem(&args.schema, |_| Ok(Problem::NormalForm));
        return;
    };

    let SchemaArgs {
        input,
        budget,
        output,
    } = &args.schema;
    let schema = load_schema(&input.schema, input.compact).unwrap_or_else(|e| fail(&e, output));
    let decomposition = load_decomposition(&schema, relations, input.compact)
        .unwrap_or_else(|e| fail(&e, output));
    let reports = classify_relations(&schema, &decomposition, &budget.budget())
        .unwrap_or_else(|e| fail(&e.into(), output));

    if output.json {
        let result: Vec<_> = decomposition
            .iter()
            .zip(&reports)
            .map(|(relation, report)| {
                json!({
                    "relation": schema.universe().names_of(*relation).collect::<Vec<_>>(),
                    "report": normal_form_json(&schema, report),
                })
            })
            .collect();
        println!(
            "{}",
            json!({ "problem": "normal_form", "ok": true, "result": result })
        );
        return;
    }

    if output.verbose {
        print_schema(&schema);
    }
    for (relation, report) in decomposition.iter().zip(&reports) {
        println!(
            "{}: {}",
            schema.named(relation),
            indent(&schema.named(report).to_string(), "  ")
        );
    }
}

const SUMMARY: [Problem; 5] = [
    Problem::CandidateKeys,
    Problem::MinimalCover,
    Problem::NormalForm,
    Problem::Synthesis,
    Problem::BcnfDecomposition,
];

fn analyze_file(
    path: &Path,
    compact_mode: bool,
    budget: &Budget,
) -> Result<(Schema, Vec<(&'static str, Outcome)>), Failure> {
    let schema = load_schema(path, compact_mode)?;
    let outcomes = SUMMARY
        .into_iter()
        .map(|problem| {
            let name = problem_name(&problem);
            analyze(&schema, problem, budget).map(|outcome| (name, outcome))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((schema, outcomes))
}

fn analyze_files(args: &AnalyzeArgs) {
    let budget = args.budget.budget();
    tracing::debug!(files = args.paths.len(), "analyzing schema files");

    let results: Vec<_> = args
        .paths
        .par_iter()
        .map(|path| (path, analyze_file(path, args.compact, &budget)))
        .collect();

    let mut status = 0;
    for (path, result) in results {
        let filename = path.display().to_string();
        match result {
            Ok((schema, outcomes)) => {
                if args.output.json {
                    let values: serde_json::Map<String, Value> = outcomes
                        .iter()
                        .map(|(name, outcome)| ((*name).to_string(), outcome_json(&schema, outcome)))
                        .collect();
                    let mut result = json!({ "file": filename, "ok": true, "results": values });
                    if args.output.verbose {
                        result["schema"] = schema_json(&schema);
                    }
                    println!("{result}");
                } else {
                    println!("{filename}:");
                    if args.output.verbose {
                        print_schema(&schema);
                    }
                    for (name, outcome) in &outcomes {
                        println!(
                            "  {name}: {}",
                            indent(&schema.named(outcome).to_string(), "  ")
                        );
                    }
                }
            }
            Err(failure) => {
                status = status.max(failure.exit_code());
                if args.output.json {
                    let result =
                        json!({ "file": filename, "ok": false, "error": failure.to_json() });
                    println!("{result}");
                } else {
                    println!("{filename}: FAIL ({failure})");
                }
            }
        }
    }

    if status != 0 {
        process::exit(status);
    }
}

fn generate(args: &GenerateArgs) {
    if args.n_attr < 2 || args.max_lhs == 0 || args.max_rhs == 0 {
        eprintln!("--n-attr must be at least 2 and --max-lhs, --max-rhs at least 1");
        process::exit(1);
    }

    fs::create_dir_all(&args.output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    let schemas = fdnorm_testgen::generator::generate_mult_schemas(
        args.n_schema,
        args.n_attr,
        args.n_dep,
        args.max_lhs,
        args.max_rhs,
    );

    for schema in &schemas {
        let path = args.output_dir.join(format!("{}.fd", schema.get_id()));
        fs::write(&path, schema.render()).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!(
        "Generated {} schemas to {}",
        schemas.len(),
        args.output_dir.display()
    );
}
