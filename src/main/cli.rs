use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};

use listinit::rewriter::{RewriteOptions, UnresolvedPolicy};

#[derive(ClapParser)]
#[command(
    name = "listinit",
    about = "Desugar [<a, b, c>] list literals into List<T> construction"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Subcommand)]
pub(super) enum Commands {
    /// Rewrite a source file and print the result
    Rewrite {
        file: String,
        /// Write the rewritten source to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
        #[command(flatten)]
        options: RewriteArgs,
    },
    /// List every literal site and what it becomes, without writing output
    Check {
        file: String,
        #[command(flatten)]
        options: RewriteArgs,
    },
}

#[derive(Args)]
pub(super) struct RewriteArgs {
    /// Generic container type to instantiate
    #[arg(long, default_value = "List")]
    pub(super) container: String,
    /// What to do when the first element's type cannot be inferred
    #[arg(long, value_enum, default_value_t = OnUnresolved::Abstain)]
    pub(super) on_unresolved: OnUnresolved,
}

#[derive(Clone, Copy, ValueEnum)]
pub(super) enum OnUnresolved {
    /// Leave the literal as written
    Abstain,
    /// Rewrite with an unresolved type argument
    Proceed,
}

impl From<RewriteArgs> for RewriteOptions {
    fn from(args: RewriteArgs) -> Self {
        RewriteOptions {
            container: args.container,
            on_unresolved: match args.on_unresolved {
                OnUnresolved::Abstain => UnresolvedPolicy::Abstain,
                OnUnresolved::Proceed => UnresolvedPolicy::Proceed,
            },
        }
    }
}
