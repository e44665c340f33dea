use std::str::FromStr;

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use simple_error::SimpleError;
use tracing::debug;

use super::AstParser;
use super::super::ast::{
    AbstractSyntaxTree,
    ASTNode,
    BinaryOperation
};
use super::super::diagnostics::DiagnosticSink;

#[derive(Parser)]
#[grammar = "tinyc.pest"]
struct TinyCParser;

type ParseResult<T> = Result<T, SimpleError>;


/// PestTinyCParser is a concrete AstParser built on the pest grammar in tinyc.pest.
/// The tree is built bottom-up through the ASTNode constructors.
pub struct PestTinyCParser;

impl PestTinyCParser {

    /// Parses a whole source string into a Program node
    fn parse_into_node_tree(source: &str, diagnostics: &mut dyn DiagnosticSink) -> ParseResult<ASTNode> {
        let mut pairs = TinyCParser::parse(Rule::program, source)
            .map_err(|error| SimpleError::new(format!("Syntax Error: {}", error)))?;

        let program = Self::next_pair(&mut pairs, "program")?;
        Self::parse_statement_list(program.into_inner(), ASTNode::program(), diagnostics)
    }

    /// Appends every statement pair onto the container in source order.
    fn parse_statement_list(pairs: Pairs<Rule>, mut container: ASTNode, diagnostics: &mut dyn DiagnosticSink) -> ParseResult<ASTNode> {
        for pair in pairs {
            if pair.as_rule() == Rule::EOI {
                continue;
            }

            let statement = Self::parse_pair_node(pair, diagnostics)?;
            if container.add_statement(statement, diagnostics).is_err() {
                return Err(SimpleError::new(format!(
                    "Statements can only be added to a program or block, not {}", container.kind_name())));
            }
        }

        Ok(container)
    }

    fn parse_pair_node(pair: Pair<Rule>, diagnostics: &mut dyn DiagnosticSink) -> ParseResult<ASTNode> {
        match pair.as_rule() {
            Rule::identifier => {
                Ok(ASTNode::identifier(pair.as_str()))
            },
            Rule::integer => {
                let value = pair.as_str().parse::<i32>()
                    .map_err(|_| SimpleError::new(format!("Integer literal '{}' is out of range", pair.as_str())))?;
                Ok(ASTNode::integer(value))
            },
            Rule::float => {
                let value = pair.as_str().parse::<f32>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| SimpleError::new(format!("Invalid float literal '{}'", pair.as_str())))?;
                Ok(ASTNode::float(value))
            },
            Rule::character => {
                let mut pair = pair.into_inner();
                let body = Self::next_pair(&mut pair, "character body")?;
                Ok(ASTNode::character(Self::unescape_character(body.as_str())?))
            },
            Rule::expression => {
                Self::parse_expression(pair, diagnostics)
            },
            Rule::declaration => {
                let mut pair = pair.into_inner();
                let var_type = Self::next_pair(&mut pair, "declaration type")?;
                let var_name = Self::next_pair(&mut pair, "declaration identifier")?;
                let initializer = match pair.next() {
                    Some(expression) => Some(Self::parse_pair_node(expression, diagnostics)?),
                    None => None
                };

                Ok(ASTNode::declaration(var_type.as_str(), var_name.as_str(), initializer))
            },
            Rule::assignment => {
                let mut pair = pair.into_inner();
                let var_name = Self::next_pair(&mut pair, "assignment identifier")?;
                let value = Self::parse_pair_node(Self::next_pair(&mut pair, "assignment value")?, diagnostics)?;

                Ok(ASTNode::assignment(var_name.as_str(), value))
            },
            Rule::print_statement => {
                let mut pair = pair.into_inner();
                let expression = Self::parse_pair_node(Self::next_pair(&mut pair, "print expression")?, diagnostics)?;

                Ok(ASTNode::print(expression))
            },
            Rule::if_statement => {
                // else keyword carries no data
                let mut pair = pair.into_inner()
                    .filter(|inner| inner.as_rule() != Rule::else_keyword);
                let condition = Self::parse_pair_node(Self::next_pair(&mut pair, "if condition")?, diagnostics)?;
                let then_branch = Self::parse_pair_node(Self::next_pair(&mut pair, "if branch")?, diagnostics)?;
                let else_branch = match pair.next() {
                    Some(item) => Some(Self::parse_pair_node(item, diagnostics)?),
                    None => None
                };

                Ok(ASTNode::branch(condition, then_branch, else_branch))
            },
            Rule::while_statement => {
                let mut pair = pair.into_inner();
                let condition = Self::parse_pair_node(Self::next_pair(&mut pair, "while condition")?, diagnostics)?;
                let body = Self::parse_pair_node(Self::next_pair(&mut pair, "while body")?, diagnostics)?;

                Ok(ASTNode::while_loop(condition, body))
            },
            Rule::block => {
                // A block's statements are collected as a program and then moved into the block
                let statements = Self::parse_statement_list(pair.into_inner(), ASTNode::program(), diagnostics)?;
                statements.into_block()
                    .map_err(|node| SimpleError::new(format!("Cannot convert {} into a block", node.kind_name())))
            },
            rule => {
                Err(SimpleError::new(format!("Unexpected grammar rule {:?} while building syntax tree", rule)))
            }
        }
    }

    /// Folds the flat operand/operator list of an expression into a tree of binary operations.
    /// Operators of equal precedence associate to the left.
    fn parse_expression(pair: Pair<Rule>, diagnostics: &mut dyn DiagnosticSink) -> ParseResult<ASTNode> {
        let mut operands: Vec<ASTNode> = Vec::new();
        let mut operators: Vec<BinaryOperation> = Vec::new();

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::binary_operator => {
                    let op = BinaryOperation::from_str(item.as_str())
                        .map_err(|_| SimpleError::new(format!("Unknown binary operator '{}'", item.as_str())))?;

                    while operators.last().map_or(false, |top| top.precedence() >= op.precedence()) {
                        Self::reduce_top(&mut operands, &mut operators)?;
                    }
                    operators.push(op);
                },
                _ => operands.push(Self::parse_pair_node(item, diagnostics)?)
            }
        }

        while !operators.is_empty() {
            Self::reduce_top(&mut operands, &mut operators)?;
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(expression), true) => Ok(expression),
            _ => Err(SimpleError::new("Malformed expression"))
        }
    }

    fn reduce_top(operands: &mut Vec<ASTNode>, operators: &mut Vec<BinaryOperation>) -> ParseResult<()> {
        let op = operators.pop().ok_or_else(|| SimpleError::new("Missing binary operator"))?;
        let rhs = operands.pop().ok_or_else(|| SimpleError::new("Missing right operand"))?;
        let lhs = operands.pop().ok_or_else(|| SimpleError::new("Missing left operand"))?;

        operands.push(ASTNode::binary_op(op, lhs, rhs));
        Ok(())
    }

    /// Converts the body of a character literal, including escapes, into its char value.
    fn unescape_character(body: &str) -> ParseResult<char> {
        let mut chars = body.chars();
        let value = match (chars.next(), chars.next()) {
            (Some('\\'), Some('n')) => '\n',
            (Some('\\'), Some('t')) => '\t',
            (Some('\\'), Some('0')) => '\0',
            (Some('\\'), Some('\\')) => '\\',
            (Some('\\'), Some('\'')) => '\'',
            (Some('\\'), Some(other)) => {
                return Err(SimpleError::new(format!("Unknown character escape '\\{}'", other)))
            },
            (Some(value), None) => value,
            _ => return Err(SimpleError::new(format!("Invalid character literal '{}'", body)))
        };

        Ok(value)
    }

    fn next_pair<'i, I: Iterator<Item = Pair<'i, Rule>>>(pairs: &mut I, expected: &str) -> ParseResult<Pair<'i, Rule>> {
        pairs.next()
            .ok_or_else(|| SimpleError::new(format!("Malformed parse tree, expected {}", expected)))
    }
}

/// AstParser Trait Concrete Implementation
impl AstParser for PestTinyCParser {
    fn default() -> Self {
        Self {}
    }

    fn parse(self, source: &str, diagnostics: &mut dyn DiagnosticSink) -> Result<AbstractSyntaxTree, SimpleError> {
        let root = Self::parse_into_node_tree(source, diagnostics)?;
        debug!(statements = root.statements().map_or(0, |statements| statements.len()), "parsed program");
        Ok(AbstractSyntaxTree::new(root))
    }
}
