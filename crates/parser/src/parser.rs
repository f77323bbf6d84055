/// Winnow-based parser for the schema text format.
///
/// Grammar:
/// ```text
/// schema      = trivia (statement end trivia)*
/// trivia      = (WHITESPACE | ";" | comment)*
/// comment     = "//" REST_OF_LINE
/// statement   = declaration | dependency
/// declaration = "attributes" ":" list
/// dependency  = list? arrow list?
/// arrow       = "->" | "→"
/// list        = word (("," | INLINE_WS) word)*
/// end         = comment? (";" | NEWLINE | EOF)
/// word        = [A-Za-z0-9_.]+
/// ```
///
/// Sides of a dependency may be empty here; the core rejects them with a
/// dedicated error kind. Words are likewise validated by the core.
use winnow::ascii::{line_ending, multispace1, till_line_ending};
use winnow::combinator::{alt, opt, repeat, separated};
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

use crate::source::{DependencySource, SchemaSource};

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse a schema file: attribute declarations and dependencies.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input does
/// not conform to the grammar.
pub fn parse_schema(input: &str) -> Result<SchemaSource, ParseError> {
    run(input, schema_document)
}

/// Parse a list of dependencies separated by newlines or `;`.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input contains anything but
/// dependencies, comments and separators.
pub fn parse_dependencies(input: &str) -> Result<Vec<DependencySource>, ParseError> {
    run(input, dependency_document)
}

/// Parse a bare attribute list such as `A B` or `A, B`.
///
/// # Errors
///
/// Returns a [`ParseError`] on any character that is neither part of a word
/// nor a separator.
pub fn parse_attributes(input: &str) -> Result<Vec<String>, ParseError> {
    run(input, attribute_document)
}

/// Parse a decomposition: relations separated by `|`, `;` or newlines.
///
/// # Errors
///
/// Returns a [`ParseError`] when a relation is not an attribute list.
pub fn parse_decomposition(input: &str) -> Result<Vec<Vec<String>>, ParseError> {
    run(input, decomposition_document)
}

fn run<T>(
    input: &str,
    mut parser: impl FnMut(&mut &str) -> ModalResult<T>,
) -> Result<T, ParseError> {
    let original = input;
    let mut stream: &str = input;
    match parser(&mut stream) {
        Ok(value) => Ok(value),
        Err(e) => {
            let consumed = original.len().saturating_sub(stream.len());
            let (line, column) = offset_to_line_col(original, consumed);
            Err(ParseError {
                message: e.to_string(),
                line,
                column,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.chars().count() + 1, |pos| prefix[pos..].chars().count());
    (line, column)
}

// ---------------------------------------------------------------------------
// Whitespace and comments
// ---------------------------------------------------------------------------

fn inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

fn comment(input: &mut &str) -> ModalResult<()> {
    (literal("//"), till_line_ending).void().parse_next(input)
}

/// Blank space between statements. `extra` lists additional separator
/// characters that may appear on their own.
fn trivia<'i>(extra: &'static [char]) -> impl FnMut(&mut &'i str) -> ModalResult<()> {
    move |input: &mut &'i str| {
        repeat::<_, _, (), _, _>(
            0..,
            alt((
                multispace1.void(),
                take_while(1.., |c: char| extra.contains(&c)).void(),
                comment,
            )),
        )
        .parse_next(input)
    }
}

/// Closes a statement: an optional trailing comment, then a separator.
fn statement_end<'i>(
    separators: &'static [char],
) -> impl FnMut(&mut &'i str) -> ModalResult<()> {
    move |input: &mut &'i str| {
        opt_inline_ws.parse_next(input)?;
        opt(comment).parse_next(input)?;
        if input.is_empty() {
            return Ok(());
        }
        alt((
            line_ending.void(),
            take_while(1, |c: char| separators.contains(&c)).void(),
        ))
        .parse_next(input)
    }
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// Attribute word. Wider than a valid name so that the core can report the
/// exact offending token.
fn word(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '.')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

fn list_separator(input: &mut &str) -> ModalResult<()> {
    alt(((opt_inline_ws, literal(","), opt_inline_ws).void(), inline_ws)).parse_next(input)
}

fn attribute_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., word, list_separator).parse_next(input)
}

fn opt_attribute_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(0.., word, list_separator).parse_next(input)
}

fn arrow(input: &mut &str) -> ModalResult<()> {
    (
        opt_inline_ws,
        alt((literal("->"), literal("→"))),
        opt_inline_ws,
    )
        .void()
        .parse_next(input)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

enum Statement {
    Declaration(Vec<String>),
    Dependency(DependencySource),
}

fn declaration(input: &mut &str) -> ModalResult<Vec<String>> {
    literal("attributes").parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    literal(":").parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    attribute_list.parse_next(input)
}

fn dependency(input: &mut &str) -> ModalResult<DependencySource> {
    let lhs = opt_attribute_list.parse_next(input)?;
    arrow.parse_next(input)?;
    let rhs = opt_attribute_list.parse_next(input)?;
    Ok(DependencySource { lhs, rhs })
}

fn statement(input: &mut &str) -> ModalResult<Statement> {
    alt((
        declaration.map(Statement::Declaration),
        dependency.map(Statement::Dependency),
    ))
    .parse_next(input)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

const STATEMENT_SEPARATORS: &[char] = &[';'];
const RELATION_SEPARATORS: &[char] = &[';', '|'];

fn schema_document(input: &mut &str) -> ModalResult<SchemaSource> {
    let mut source = SchemaSource::default();
    loop {
        trivia(STATEMENT_SEPARATORS).parse_next(input)?;
        if input.is_empty() {
            return Ok(source);
        }
        match statement.parse_next(input)? {
            Statement::Declaration(names) => source.attributes.extend(names),
            Statement::Dependency(dependency) => source.dependencies.push(dependency),
        }
        statement_end(STATEMENT_SEPARATORS).parse_next(input)?;
    }
}

fn dependency_document(input: &mut &str) -> ModalResult<Vec<DependencySource>> {
    let mut dependencies = Vec::new();
    loop {
        trivia(STATEMENT_SEPARATORS).parse_next(input)?;
        if input.is_empty() {
            return Ok(dependencies);
        }
        dependencies.push(dependency.parse_next(input)?);
        statement_end(STATEMENT_SEPARATORS).parse_next(input)?;
    }
}

fn attribute_document(input: &mut &str) -> ModalResult<Vec<String>> {
    let mut names = Vec::new();
    loop {
        take_while(0.., |c: char| c.is_whitespace() || c == ',')
            .void()
            .parse_next(input)?;
        if input.is_empty() {
            return Ok(names);
        }
        names.push(word.parse_next(input)?);
    }
}

fn decomposition_document(input: &mut &str) -> ModalResult<Vec<Vec<String>>> {
    let mut relations = Vec::new();
    loop {
        trivia(RELATION_SEPARATORS).parse_next(input)?;
        if input.is_empty() {
            return Ok(relations);
        }
        relations.push(attribute_list.parse_next(input)?);
        statement_end(RELATION_SEPARATORS).parse_next(input)?;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    fn dep(lhs: &[&str], rhs: &[&str]) -> DependencySource {
        DependencySource {
            lhs: tokens(lhs),
            rhs: tokens(rhs),
        }
    }

    #[test]
    fn test_single_dependency() {
        let source = parse_schema("A B -> C").unwrap();
        assert!(source.attributes.is_empty());
        assert_eq!(source.dependencies, vec![dep(&["A", "B"], &["C"])]);
    }

    #[test]
    fn test_commas_and_unicode_arrow() {
        let source = parse_schema("A, B → C,D\n").unwrap();
        assert_eq!(source.dependencies, vec![dep(&["A", "B"], &["C", "D"])]);
    }

    #[test]
    fn test_declaration_and_dependencies() {
        let input = "attributes: A B C D\nA -> B\nB -> C; C -> D\n";
        let source = parse_schema(input).unwrap();
        assert_eq!(source.attributes, tokens(&["A", "B", "C", "D"]));
        assert_eq!(
            source.dependencies,
            vec![dep(&["A"], &["B"]), dep(&["B"], &["C"]), dep(&["C"], &["D"])]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let input = "// header\n\nA -> B // trailing\n\n// footer";
        let source = parse_schema(input).unwrap();
        assert_eq!(source.dependencies, vec![dep(&["A"], &["B"])]);
    }

    #[test]
    fn test_attribute_named_like_keyword() {
        let source = parse_schema("attributes -> B").unwrap();
        assert_eq!(source.dependencies, vec![dep(&["attributes"], &["B"])]);
    }

    #[test]
    fn test_empty_sides_are_kept() {
        let source = parse_schema("-> B\nA ->\n").unwrap();
        assert_eq!(
            source.dependencies,
            vec![dep(&[], &["B"]), dep(&["A"], &[])]
        );
    }

    #[test]
    fn test_invalid_words_are_kept() {
        let source = parse_schema("A_1 -> B.2").unwrap();
        assert_eq!(source.dependencies, vec![dep(&["A_1"], &["B.2"])]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_schema("").unwrap(), SchemaSource::default());
        assert_eq!(parse_schema(" \n;\n// c\n").unwrap(), SchemaSource::default());
    }

    #[test]
    fn test_parse_dependencies() {
        let fds = parse_dependencies("A -> B; B -> C\nC -> A").unwrap();
        assert_eq!(fds.len(), 3);
        assert_eq!(fds[2], dep(&["C"], &["A"]));
    }

    #[test]
    fn test_parse_dependencies_rejects_declaration() {
        let err = parse_dependencies("A -> B\nattributes: C").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_parse_attributes() {
        assert_eq!(
            parse_attributes(" A, B\nC ").unwrap(),
            tokens(&["A", "B", "C"])
        );
        assert!(parse_attributes("").unwrap().is_empty());
        assert!(parse_attributes("A -> B").is_err());
    }

    #[test]
    fn test_parse_decomposition() {
        let relations = parse_decomposition("A B | B, C\nC D; D E").unwrap();
        assert_eq!(
            relations,
            vec![
                tokens(&["A", "B"]),
                tokens(&["B", "C"]),
                tokens(&["C", "D"]),
                tokens(&["D", "E"]),
            ]
        );
    }

    #[test]
    fn test_parse_decomposition_skips_empty_relations() {
        let relations = parse_decomposition("| A B || C |").unwrap();
        assert_eq!(relations, vec![tokens(&["A", "B"]), tokens(&["C"])]);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_error_has_line_column() {
        let input = "A -> B\n@C -> D\n";
        let err = parse_schema(input).expect_err("should fail");
        assert_eq!(err.line, 2, "expected error on line 2, got: {err}");
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse_schema("A -> B @").expect_err("should fail");
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_missing_arrow() {
        let err = parse_schema("A B C").expect_err("should fail");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_parse_error_display() {
        let err = parse_schema("A -> B\n@bad\n").expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("parse error"),
            "display should contain 'parse error': {msg}"
        );
        assert!(msg.contains("line 2"), "display should contain 'line 2': {msg}");
    }

    #[test]
    fn test_offset_to_line_col_first_line() {
        let (line, col) = offset_to_line_col("hello\nworld\n", 0);
        assert_eq!(line, 1);
        assert_eq!(col, 1);
    }

    #[test]
    fn test_offset_to_line_col_second_line() {
        // "hello\n" is 6 bytes; offset 6 is start of second line.
        let (line, col) = offset_to_line_col("hello\nworld\n", 6);
        assert_eq!(line, 2);
        assert_eq!(col, 1);
    }

    #[test]
    fn test_offset_to_line_col_counts_characters() {
        let (line, col) = offset_to_line_col("A → B", "A → ".len());
        assert_eq!(line, 1);
        assert_eq!(col, 5);
    }
}
