//! Tokenizer, abstract syntax tree and Pratt parser for the Lars language.

pub mod ast;
pub mod lexer;
pub mod parser;
