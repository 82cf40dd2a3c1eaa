use crate::config::{non_empty_env, Config};
use crate::constants::{CMD_RUN, CMD_SERVE};
use crate::pipeline::run_pipeline;
use crate::print_help::print_help;
use crate::request::{validate_request_body, ResponseBody};
use crate::server::serve;
use crate::utils::create_spinner;
use colored::Colorize;
use serde_json::json;
use std::error::Error;

/// Builds the same JSON body the HTTP endpoint receives, so one-shot runs go
/// through the same validation. Credentials come from `var`.
pub fn build_run_body<F>(args: &[String], var: F) -> Result<Vec<u8>, Box<dyn Error>>
where
    F: Fn(&str) -> Option<String>,
{
    if args.len() < 4 {
        return Err("Usage: gen-image run <image_url> <mime_type>".into());
    }

    let required = |name: &str| -> Result<String, Box<dyn Error>> {
        var(name).ok_or_else(|| format!("{} must be set", name).into())
    };
    let body = json!({
        "openaiApiKey": required("OPENAI_API_KEY")?,
        "pinataJwt": required("PINATA_JWT")?,
        "imageUrl": args[2],
        "imageMimetype": args[3],
        "pinataGateway": required("PINATA_GATEWAY")?,
    });
    Ok(serde_json::to_vec(&body)?)
}

pub fn print_result(response: &ResponseBody) {
    println!("{} {}", "Prompt:".bold().magenta(), response.prompt);
    println!("{} {}", "IPFS URL:".bold().green(), response.image_url);
    println!(
        "{} {}",
        "OpenAI URL:".bold().cyan(),
        response.openai_image_url
    );
}

async fn run_once(config: Config, args: &[String]) -> Result<(), Box<dyn Error>> {
    let body = build_run_body(args, non_empty_env)?;
    let request = validate_request_body(&body)?;
    let client = config.build_client()?;

    let spinner = create_spinner("magenta", "Reimagining image...".to_string());
    let result = run_pipeline(&client, &config, &request).await;
    spinner.finish_and_clear();

    let response = result?;
    print_result(&response);
    Ok(())
}

pub async fn process_command(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;

    match args[1].as_str() {
        CMD_SERVE => serve(config).await,
        CMD_RUN => run_once(config, args).await,
        other => {
            eprintln!("Unknown command: {}", other.red());
            print_help();
            Err("Unknown command".into())
        }
    }
}
