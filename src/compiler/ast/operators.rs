use strum_macros::{Display, EnumString};
use enum_assoc::Assoc;

/// Binary operators of the language.
/// The strum serialisation is the source symbol, which is both what the parser
/// reads and what the tree printer writes.
#[allow(non_camel_case_types)]
#[derive(Debug,
         Eq, PartialEq,
         Copy, Clone,
         Display, EnumString,
         Assoc)]
#[func(pub const fn precedence(&self) -> u8)] // Higher binds tighter
pub enum BinaryOperation {
    #[assoc(precedence=2)]
    #[strum(to_string = "+")]
    ADD,
    #[assoc(precedence=2)]
    #[strum(to_string = "-")]
    SUB,
    #[assoc(precedence=3)]
    #[strum(to_string = "*")]
    MUL,
    #[assoc(precedence=3)]
    #[strum(to_string = "/")]
    DIV,

    #[assoc(precedence=1)]
    #[strum(to_string = ">")]
    GREATER_THAN,
    #[assoc(precedence=1)]
    #[strum(to_string = "<")]
    LESS_THAN,
    #[assoc(precedence=1)]
    #[strum(to_string = ">=")]
    GREATER_EQUAL,
    #[assoc(precedence=1)]
    #[strum(to_string = "<=")]
    LESS_EQUAL,
    #[assoc(precedence=1)]
    #[strum(to_string = "==")]
    EQUAL,
    #[assoc(precedence=1)]
    #[strum(to_string = "!=")]
    NOT_EQUAL
}
