pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sketchpass")]
#[command(about = "Password generator and drawing studio web applications")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run one of the web applications")]
    Serve {
        #[command(subcommand)]
        cmd: commands::serve::ServeCommands,
    },

    #[command(about = "Generate passwords without starting a server")]
    Generate(commands::generate::GenerateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { cmd } => commands::serve::handle(cmd).await,
        Commands::Generate(args) => commands::generate::handle(args, output_format),
    }
}
