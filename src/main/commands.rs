use std::process;

use colored::Colorize;

use listinit::rewriter::{RewriteOptions, SiteOutcome};
use listinit::source::{desugar_source, Desugared};

use crate::shared::{print_diagnostics, read_file, write_file};

fn load(file: &str, options: RewriteOptions) -> Desugared {
    let source = match read_file(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.red());
            process::exit(1);
        }
    };

    match desugar_source(&source, options) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", format!("{}: {}", file, e).red());
            process::exit(1);
        }
    }
}

pub(super) fn cmd_rewrite(file: &str, output: Option<&str>, options: RewriteOptions) {
    let desugared = load(file, options);

    match output {
        Some(path) => {
            if let Err(e) = write_file(path, &desugared.output) {
                eprintln!("{}", e.red());
                process::exit(1);
            }
        }
        None => print!("{}", desugared.output),
    }

    if !desugared.diagnostics.is_empty() {
        print_diagnostics(file, &desugared.diagnostics);
        process::exit(1);
    }
}

pub(super) fn cmd_check(file: &str, options: RewriteOptions) {
    let container = options.container.clone();
    let desugared = load(file, options);
    let report = &desugared.report;

    println!("Check: {}", file.cyan());

    for site in &report.sites {
        let what = if site.elements == 0 {
            format!("empty {}<{}>", container, site.element_type.display())
        } else {
            format!(
                "{} element(s) of {}",
                site.elements,
                site.element_type.display()
            )
        };
        let outcome = match site.outcome {
            SiteOutcome::Rewritten => "rewritten".green(),
            SiteOutcome::Abstained => "abstained".yellow(),
        };
        println!("  {}:{} {}: {}", site.line, site.col, outcome, what);
    }

    println!(
        "  {} rewritten, {} abstained",
        report.rewritten(),
        report.abstained()
    );

    if !desugared.diagnostics.is_empty() {
        for d in &desugared.diagnostics {
            println!("  {}", d.to_string().red());
        }
        process::exit(1);
    }
}
