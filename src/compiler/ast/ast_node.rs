use std::fmt;
use std::mem;
use std::ops::AddAssign;

use strum_macros::IntoStaticStr;
use tracing::debug;

use super::literals::Literal;
use super::operators::BinaryOperation;
use super::super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};

/// One indentation unit of the tree printer, written once per level of depth.
const INDENT_UNIT: &str = "  ";


#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub enum ASTNode {
    /// Program is the root statement list of a translation unit.
    ///
    /// # Example:
    ///     int x = 1;   -> Statement  |
    ///     print(x);    -> Statement  } Program
    PROGRAM(Vec<ASTNode>),

    /// Block has the same shape as a program but is nested inside another statement.
    ///
    /// # Syntax:
    ///     { (<statement>)* }
    BLOCK(Vec<ASTNode>),

    /// Declaration introduces a variable with a type name and an optional initializer.
    ///
    /// # Syntax:
    ///     <type> <identifier> (= <expression>)?;
    ///
    /// # Example:
    ///     int x = 5;
    ///     ^^^^^^^^^^ -> Declaration
    DECLARATION {
        var_type: String,
        var_name: String,
        initializer: Option<Box<ASTNode>>
    },

    /// Assignment stores the value of an expression into a variable.
    ///
    /// # Syntax:
    ///     <identifier> = <expression>;
    ASSIGNMENT {
        var_name: String,
        value: Box<ASTNode>
    },

    /// Print statement evaluates an expression and outputs it.
    ///
    /// # Syntax:
    ///     print(<expression>);
    PRINT {
        expression: Box<ASTNode>
    },

    /// Branch statement, also known as an if statement. The else branch is optional.
    ///
    /// # Syntax:
    ///     if (<expression>) <statement> (else <statement>)?
    BRANCH {
        condition: Box<ASTNode>,
        then_branch: Box<ASTNode>,
        else_branch: Option<Box<ASTNode>>
    },

    /// While loop runs its body while the condition is non-zero.
    ///
    /// # Syntax:
    ///     while (<expression>) <statement>
    WHILE_LOOP {
        condition: Box<ASTNode>,
        body: Box<ASTNode>
    },

    /// Binary operation is an expression operation with two arguments.
    ///
    /// # Syntax:
    ///     <lhs> <op> <rhs>
    BINARY_OP {
        op: BinaryOperation,
        lhs: Box<ASTNode>,
        rhs: Box<ASTNode>
    },

    /// Literal is a constant scalar used within an expression.
    LITERAL(Literal),

    /// Identifier references a variable by name.
    IDENTIFIER(String)
}

/// Tally of the nodes and owned strings in a subtree.
/// Produced both by counting a live tree and by releasing one, so the two can be compared.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCensus {
    pub nodes: usize,
    pub strings: usize
}

impl AddAssign for NodeCensus {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.strings += other.strings;
    }
}

/// Constructors
/// String payloads are copied out of the caller's string so the tree never borrows caller memory.
impl ASTNode {
    pub fn program() -> Self {
        ASTNode::PROGRAM(Vec::new())
    }

    pub fn block() -> Self {
        ASTNode::BLOCK(Vec::new())
    }

    pub fn declaration(var_type: &str, var_name: &str, initializer: Option<ASTNode>) -> Self {
        ASTNode::DECLARATION {
            var_type: var_type.to_string(),
            var_name: var_name.to_string(),
            initializer: initializer.map(Box::new)
        }
    }

    pub fn assignment(var_name: &str, value: ASTNode) -> Self {
        ASTNode::ASSIGNMENT {
            var_name: var_name.to_string(),
            value: Box::new(value)
        }
    }

    pub fn print(expression: ASTNode) -> Self {
        ASTNode::PRINT {
            expression: Box::new(expression)
        }
    }

    pub fn branch(condition: ASTNode, then_branch: ASTNode, else_branch: Option<ASTNode>) -> Self {
        ASTNode::BRANCH {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new)
        }
    }

    pub fn while_loop(condition: ASTNode, body: ASTNode) -> Self {
        ASTNode::WHILE_LOOP {
            condition: Box::new(condition),
            body: Box::new(body)
        }
    }

    pub fn binary_op(op: BinaryOperation, lhs: ASTNode, rhs: ASTNode) -> Self {
        ASTNode::BINARY_OP {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs)
        }
    }

    pub fn literal(literal: Literal) -> Self {
        ASTNode::LITERAL(literal)
    }

    pub fn integer(value: i32) -> Self {
        ASTNode::LITERAL(Literal::INTEGER(value))
    }

    pub fn float(value: f32) -> Self {
        ASTNode::LITERAL(Literal::FLOAT(value))
    }

    pub fn character(value: char) -> Self {
        ASTNode::LITERAL(Literal::CHAR(value))
    }

    pub fn identifier(name: &str) -> Self {
        ASTNode::IDENTIFIER(name.to_string())
    }
}

/// Tree assembly
impl ASTNode {
    /// Name of the node variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        self.into()
    }

    /// Statements of a Program or Block node, None for every other kind
    pub fn statements(&self) -> Option<&[ASTNode]> {
        match self {
            ASTNode::PROGRAM(statements) | ASTNode::BLOCK(statements) => Some(statements.as_slice()),
            _ => None
        }
    }

    /// Appends a statement to a Program or Block, preserving call order.
    /// Any other node kind is reported to the diagnostic sink and the statement is
    /// handed back to the caller untouched as the error value.
    pub fn add_statement(&mut self, statement: ASTNode, diagnostics: &mut dyn DiagnosticSink) -> Result<(), ASTNode> {
        match self {
            ASTNode::PROGRAM(statements) | ASTNode::BLOCK(statements) => {
                statements.push(statement);
                Ok(())
            }
            _ => {
                diagnostics.report(Diagnostic::new(
                    DiagnosticKind::InvalidStatementContainer,
                    format!("add_statement called on non-program/block node {}", self.kind_name())
                ));
                Err(statement)
            }
        }
    }

    /// Moves the statements of a Program into a new Block.
    /// The Program is left holding an empty statement list and remains owned by the caller.
    /// Any other node kind is reported and left unmodified.
    pub fn node_to_block(&mut self, diagnostics: &mut dyn DiagnosticSink) -> Option<ASTNode> {
        match self {
            ASTNode::PROGRAM(statements) => {
                let statements = mem::take(statements);
                debug!(statements = statements.len(), "moved program statements into block");
                Some(ASTNode::BLOCK(statements))
            }
            _ => {
                diagnostics.report(Diagnostic::new(
                    DiagnosticKind::InvalidBlockConversion,
                    format!("node_to_block called on non-program node {}", self.kind_name())
                ));
                None
            }
        }
    }

    /// Consuming form of node_to_block. A Program is turned into a Block holding the same
    /// statements; any other node is handed back as the error value.
    pub fn into_block(self) -> Result<ASTNode, ASTNode> {
        match self {
            ASTNode::PROGRAM(statements) => Ok(ASTNode::BLOCK(statements)),
            other => Err(other)
        }
    }
}

/// Printing
impl ASTNode {
    /// Writes a pre-order dump of the subtree, one line per node, indented by depth.
    pub fn write_tree<W: fmt::Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        match self {
            ASTNode::PROGRAM(statements) => {
                Self::write_line(out, indent, "Program:")?;
                for statement in statements {
                    statement.write_tree(out, indent + 1)?;
                }
            }
            ASTNode::BLOCK(statements) => {
                Self::write_line(out, indent, "Block:")?;
                for statement in statements {
                    statement.write_tree(out, indent + 1)?;
                }
            }
            ASTNode::DECLARATION { var_type, var_name, initializer } => {
                Self::write_line(out, indent, &format!("Declaration: {} {}", var_type, var_name))?;
                if let Some(initializer) = initializer {
                    initializer.write_tree(out, indent + 1)?;
                }
            }
            ASTNode::ASSIGNMENT { var_name, value } => {
                Self::write_line(out, indent, &format!("Assignment: {} =", var_name))?;
                value.write_tree(out, indent + 1)?;
            }
            ASTNode::PRINT { expression } => {
                Self::write_line(out, indent, "Print:")?;
                expression.write_tree(out, indent + 1)?;
            }
            ASTNode::BRANCH { condition, then_branch, else_branch } => {
                Self::write_line(out, indent, "If:")?;
                Self::write_line(out, indent + 1, "Condition:")?;
                condition.write_tree(out, indent + 2)?;
                Self::write_line(out, indent + 1, "Then:")?;
                then_branch.write_tree(out, indent + 2)?;
                if let Some(else_branch) = else_branch {
                    Self::write_line(out, indent + 1, "Else:")?;
                    else_branch.write_tree(out, indent + 2)?;
                }
            }
            ASTNode::WHILE_LOOP { condition, body } => {
                Self::write_line(out, indent, "While:")?;
                Self::write_line(out, indent + 1, "Condition:")?;
                condition.write_tree(out, indent + 2)?;
                Self::write_line(out, indent + 1, "Body:")?;
                body.write_tree(out, indent + 2)?;
            }
            ASTNode::BINARY_OP { op, lhs, rhs } => {
                Self::write_line(out, indent, &format!("BinaryOp: {}", op))?;
                lhs.write_tree(out, indent + 1)?;
                rhs.write_tree(out, indent + 1)?;
            }
            ASTNode::LITERAL(literal) => {
                Self::write_line(out, indent, &format!("Literal: {}", literal))?;
            }
            ASTNode::IDENTIFIER(name) => {
                Self::write_line(out, indent, &format!("Identifier: {}", name))?;
            }
        }

        Ok(())
    }

    fn write_line<W: fmt::Write>(out: &mut W, indent: usize, text: &str) -> fmt::Result {
        for _ in 0..indent {
            out.write_str(INDENT_UNIT)?;
        }
        writeln!(out, "{}", text)
    }

    /// Prints the tree dump to stdout
    pub fn print_tree(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Ownership accounting
impl ASTNode {
    /// Counts the nodes and owned strings of the subtree without modifying it.
    pub fn census(&self) -> NodeCensus {
        let mut census = NodeCensus { nodes: 1, strings: 0 };

        match self {
            ASTNode::PROGRAM(statements) | ASTNode::BLOCK(statements) => {
                for statement in statements {
                    census += statement.census();
                }
            }
            ASTNode::DECLARATION { initializer, .. } => {
                census.strings += 2;
                if let Some(initializer) = initializer {
                    census += initializer.census();
                }
            }
            ASTNode::ASSIGNMENT { value, .. } => {
                census.strings += 1;
                census += value.census();
            }
            ASTNode::PRINT { expression } => {
                census += expression.census();
            }
            ASTNode::BRANCH { condition, then_branch, else_branch } => {
                census += condition.census();
                census += then_branch.census();
                if let Some(else_branch) = else_branch {
                    census += else_branch.census();
                }
            }
            ASTNode::WHILE_LOOP { condition, body } => {
                census += condition.census();
                census += body.census();
            }
            ASTNode::BINARY_OP { lhs, rhs, .. } => {
                census += lhs.census();
                census += rhs.census();
            }
            ASTNode::LITERAL(_) => {}
            ASTNode::IDENTIFIER(_) => {
                census.strings += 1;
            }
        }

        census
    }

    /// Releases the subtree post-order: owned children first in the order they were
    /// attached, then owned strings, then the node itself. Absent optional children are skipped.
    /// @return: tally of everything released, equal to census() taken before the call.
    pub fn destroy(self) -> NodeCensus {
        let mut released = NodeCensus::default();

        match self {
            ASTNode::PROGRAM(statements) | ASTNode::BLOCK(statements) => {
                for statement in statements {
                    released += statement.destroy();
                }
            }
            ASTNode::DECLARATION { var_type, var_name, initializer } => {
                if let Some(initializer) = initializer {
                    released += Self::destroy_boxed(initializer);
                }
                released.strings += Self::release_string(var_type);
                released.strings += Self::release_string(var_name);
            }
            ASTNode::ASSIGNMENT { var_name, value } => {
                released += Self::destroy_boxed(value);
                released.strings += Self::release_string(var_name);
            }
            ASTNode::PRINT { expression } => {
                released += Self::destroy_boxed(expression);
            }
            ASTNode::BRANCH { condition, then_branch, else_branch } => {
                released += Self::destroy_boxed(condition);
                released += Self::destroy_boxed(then_branch);
                if let Some(else_branch) = else_branch {
                    released += Self::destroy_boxed(else_branch);
                }
            }
            ASTNode::WHILE_LOOP { condition, body } => {
                released += Self::destroy_boxed(condition);
                released += Self::destroy_boxed(body);
            }
            ASTNode::BINARY_OP { op: _, lhs, rhs } => {
                released += Self::destroy_boxed(lhs);
                released += Self::destroy_boxed(rhs);
            }
            ASTNode::LITERAL(_) => {}
            ASTNode::IDENTIFIER(name) => {
                released.strings += Self::release_string(name);
            }
        }

        released.nodes += 1;
        released
    }

    // Destroys the child, then the box holding it goes out of scope.
    fn destroy_boxed(node: Box<ASTNode>) -> NodeCensus {
        (*node).destroy()
    }

    fn release_string(string: String) -> usize {
        drop(string);
        1
    }
}
