pub mod ast;
pub mod checker;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod rewriter;
pub mod source;
pub mod types;
