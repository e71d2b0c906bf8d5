use clap::Args;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::config;
use crate::services::{generate_batch, Complexity, GenerationRequest};

#[derive(Args)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = 16, help = "Characters per password")]
    pub length: usize,

    #[arg(long, default_value_t = 1, help = "Number of passwords")]
    pub count: usize,

    #[arg(long, default_value = "high", help = "low, medium, high or max")]
    pub complexity: Complexity,
}

pub fn handle(args: GenerateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let request = GenerationRequest::new(
        args.length,
        args.count,
        args.complexity,
        &config().generator,
    )?;
    let passwords = generate_batch(&request, &mut rand::thread_rng());

    match output_format {
        OutputFormat::Json => {
            let body = json!({
                "complexity": request.complexity.as_str(),
                "length": request.length,
                "passwords": passwords,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            for password in passwords {
                println!("{}", password);
            }
        }
    }
    Ok(())
}
