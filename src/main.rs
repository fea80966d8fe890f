use mangekyou_tree::Program;
use mangekyou_typer::prelude::{TyperOptions, check};
use miette::{IntoDiagnostic, miette};
use owo_colors::OwoColorize;
use std::{fs, path::PathBuf};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(clap::Subcommand, Debug)]
pub enum Cmd {
    /// Infer the types of a serialized program
    Check {
        path: PathBuf,
        /// Typer options as json
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default typer options as json
    Config,
}

fn load_options(config: Option<PathBuf>) -> miette::Result<TyperOptions> {
    let Some(path) = config else {
        return Ok(TyperOptions::default());
    };

    let json = fs::read_to_string(&path).into_diagnostic()?;
    TyperOptions::from_json(&json).into_diagnostic()
}

fn main() -> miette::Result<()> {
    let cli: Cli = clap::Parser::parse();

    match cli.command {
        Cmd::Check { path, config } => {
            let options = load_options(config)?;

            let json = fs::read_to_string(&path).into_diagnostic()?;
            let program = Program::from_json(&json).into_diagnostic()?;

            let checked = check(&program, &options);

            for (name, scheme) in checked.env.iter() {
                println!("{} : {}", name.bold(), scheme.green());
            }
            for (scheme, span) in &checked.top_level {
                println!("{} : {}", span.dimmed(), scheme.green());
            }

            if !checked.is_ok() {
                checked.report().eprint().into_diagnostic()?;
                return Err(miette!(
                    "{} found {} type error(s)",
                    path.display(),
                    checked.errors.len()
                ));
            }
        }
        Cmd::Config => {
            let json = TyperOptions::default().to_json().into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
