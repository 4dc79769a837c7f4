use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "docprep",
    version,
    about = "Agency document manifest preparation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Prepare(PrepareArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    #[arg(long)]
    pub agency_directory: PathBuf,

    #[arg(long, value_enum, default_value_t = ParserKind::None)]
    pub parser: ParserKind,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub document_directory: PathBuf,

    #[arg(long, value_enum, default_value_t = ParserKind::None)]
    pub parser: ParserKind,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ParserKind {
    None,
    Foiaonline,
}

impl ParserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Foiaonline => "foiaonline",
        }
    }
}
