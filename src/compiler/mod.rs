pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod semantic_analyser;

use std::path::Path;
use std::fs;
use std::error::Error;

use tracing::{debug, info};

// Interface Definitions
use self::ast::{AbstractSyntaxTree, SymbolTable};
use self::diagnostics::DiagnosticSink;
use self::parser::AstParser;
use self::semantic_analyser::SemanticAnalyser;

// Concrete Definitions Re-Export
pub use self::parser::PestTinyCParser;
pub use self::semantic_analyser::DeclarationAnalyser;


/// Result of running the front end over one source: the syntax tree and the symbol
/// table the analyser built from it.
#[derive(Debug)]
pub struct FrontEndOutput {
    pub tree: AbstractSyntaxTree,
    pub symbol_table: SymbolTable
}

/// FrontEnd holds the configuration of a front end run.
/// FrontEnd takes two typed parameters defining the AstParser being used as well as the
/// SemanticAnalyser.
///
/// # Front End Diagram
/// source -> AstParser -> AbstractSyntaxTree -> SemanticAnalyser -> SymbolTable
pub struct FrontEnd<P: AstParser, A: SemanticAnalyser> {
    parser: P,
    analyser: A
}

#[allow(dead_code)] // Many of the functions on the front end act as a library interface and are not used
impl<P: AstParser, A: SemanticAnalyser> FrontEnd<P, A> {

    /// Default generates a default configuration. Default configuration is determined by
    /// the default methods of the parser and analyser.
    pub fn default() -> Self {
        FrontEnd {
            parser: P::default(),
            analyser: A::default()
        }
    }

    /// Create new front end using a preconfigured parser and analyser.
    pub fn new(parser: P, analyser: A) -> Self {
        FrontEnd {
            parser,
            analyser
        }
    }

    /// Parses and analyses a source string.
    /// Semantic problems are reported to the diagnostic sink, only syntax errors fail the call.
    pub fn compile_str(self, source: &str, diagnostics: &mut dyn DiagnosticSink) -> Result<FrontEndOutput, Box<dyn Error>> {
        let tree = self.parser.parse(source, diagnostics)?;
        debug!(nodes = tree.census().nodes, "built syntax tree");

        let symbol_table = self.analyser.analyse(&tree, diagnostics);
        info!(symbols = symbol_table.len(), diagnostics = diagnostics.reported(), "front end finished");

        Ok(FrontEndOutput {
            tree,
            symbol_table
        })
    }

    /// Reads a source file then parses and analyses it.
    /// @return: FrontEndOutput if Ok. Otherwise IO Error from a failed read or a syntax error.
    pub fn compile(self, source_filename: &Path, diagnostics: &mut dyn DiagnosticSink) -> Result<FrontEndOutput, Box<dyn Error>> {
        let source_str = fs::read_to_string(source_filename)?;
        debug!(path = %source_filename.display(), bytes = source_str.len(), "read source file");

        self.compile_str(source_str.as_str(), diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ast::{ASTNode, BinaryOperation, NodeCensus};
    use super::diagnostics::{DiagnosticKind, Diagnostics};

    type PARSER = super::PestTinyCParser;
    type ANALYSER = super::DeclarationAnalyser;

    fn run(source: &str) -> (FrontEndOutput, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::default();
        let output = front_end.compile_str(source, &mut diagnostics).unwrap();
        (output, diagnostics)
    }

    #[test]
    fn test_sample_program_end_to_end() {
        let (output, diagnostics) = run("int x = 5; x = x + 1; print(x);");
        assert!(diagnostics.is_empty());

        let expected = "\
Program:
  Declaration: int x
    Literal: 5
  Assignment: x =
    BinaryOp: +
      Identifier: x
      Literal: 1
  Print:
    Identifier: x
";
        assert_eq!(expected, output.tree.to_string());
        assert_eq!("int", output.symbol_table.lookup_symbol("x").unwrap().symbol_type());

        let census = output.tree.census();
        assert_eq!(NodeCensus { nodes: 9, strings: 5 }, census);
        assert_eq!(census, output.tree.destroy());
    }

    #[test]
    fn test_branch_end_to_end() {
        let (output, diagnostics) = run("int x = 1; if (x > 0) print('y');");
        assert!(diagnostics.is_empty());

        let statements = output.tree.root().statements().unwrap();
        assert_eq!(ASTNode::branch(
            ASTNode::binary_op(BinaryOperation::GREATER_THAN, ASTNode::identifier("x"), ASTNode::integer(0)),
            ASTNode::print(ASTNode::character('y')),
            None
        ), statements[1]);

        let dump = output.tree.to_string();
        assert!(dump.contains("    Condition:\n"));
        assert!(dump.contains("    Then:\n"));
        assert!(!dump.contains("Else:"));
    }

    #[test]
    fn test_semantic_problems_do_not_fail_compile() {
        let (output, diagnostics) = run("
            int x = 1;
            float x = 2.0;
            y = x;
        ");
        assert_eq!(3, output.tree.root().statements().unwrap().len());
        assert_eq!(1, diagnostics.count_of(DiagnosticKind::AlreadyDeclared));
        assert_eq!(1, diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier));
        assert_eq!("int", output.symbol_table.lookup_symbol("x").unwrap().symbol_type());
    }

    #[test]
    fn test_syntax_error_fails_compile() {
        let mut diagnostics = Diagnostics::new();
        let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::default();
        let error = front_end.compile_str("int x = ;", &mut diagnostics).unwrap_err();
        assert!(error.to_string().starts_with("Syntax Error"));
    }

    #[test]
    fn test_compile_demo_file() {
        let mut diagnostics = Diagnostics::new();
        let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::default();
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample.tc"));
        let output = front_end.compile(path, &mut diagnostics).unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(4, output.tree.root().statements().unwrap().len());
        let names: Vec<&str> = output.symbol_table.iter().map(|symbol| symbol.name()).collect();
        assert_eq!(vec!["marker", "x"], names);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut diagnostics = Diagnostics::new();
        let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::new(PestTinyCParser, <ANALYSER as SemanticAnalyser>::default());
        let error = front_end.compile(Path::new("does/not/exist.tc"), &mut diagnostics).unwrap_err();
        assert!(error.downcast_ref::<std::io::Error>().is_some());
    }
}
