mod cli;
mod config;
mod constants;
mod error;
mod fetch;
mod images;
mod pinata;
mod pipeline;
mod print_help;
mod request;
mod server;
mod utils;
mod vision;

use crate::cli::process_command;
use crate::print_help::print_help;
use std::{env, error::Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    process_command(&args).await
}
