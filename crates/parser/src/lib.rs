pub mod parser;
pub mod source;

pub use parser::{
    parse_attributes, parse_decomposition, parse_dependencies, parse_schema, ParseError,
};
pub use source::{DependencySource, SchemaSource};
