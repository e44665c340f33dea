use simple_error::SimpleError;

use super::ast::AbstractSyntaxTree;
use super::diagnostics::DiagnosticSink;

pub mod tinyc_pest_parser;

/// Parser handles interpretation of source text into the intermediate
/// representation. Tree assembly problems are reported to the diagnostic sink,
/// syntax errors are returned.
pub trait AstParser {
    fn default() -> Self;
    fn parse(self, source: &str, diagnostics: &mut dyn DiagnosticSink) -> Result<AbstractSyntaxTree, SimpleError>;
}

// Concrete Definition Export
pub use self::tinyc_pest_parser::PestTinyCParser;
