use tracing::info;

use crate::ast::Program;
use crate::checker::{check_program, Diagnostic};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::printer::print_program;
use crate::rewriter::{RewriteOptions, RewriteReport, Rewriter};
use crate::types::SemanticModel;

pub fn parse_source(source: &str) -> Result<Program, String> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize().map_err(|e| e.to_string())?;
    let mut parser = Parser::new(tokens);
    parser.parse().map_err(|e| e.to_string())
}

/// Everything one desugaring run produces.
#[derive(Debug, Clone)]
pub struct Desugared {
    pub program: Program,
    pub report: RewriteReport,
    pub diagnostics: Vec<Diagnostic>,
    /// Rendered source of the rewritten program.
    pub output: String,
}

/// Parse, build the semantic model over the untouched tree, rewrite list
/// literals, validate and render.
pub fn desugar_source(source: &str, options: RewriteOptions) -> Result<Desugared, String> {
    let program = parse_source(source)?;
    let model = SemanticModel::build(&program);
    let (program, report) = Rewriter::new(&model, options).rewrite_program(program);
    let diagnostics = check_program(&program);
    let output = print_program(&program);

    info!(
        rewritten = report.rewritten(),
        abstained = report.abstained(),
        diagnostics = diagnostics.len(),
        "desugaring finished"
    );

    Ok(Desugared {
        program,
        report,
        diagnostics,
        output,
    })
}
