use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " GEN-IMAGE ".yellow());
    println!("Usage:");
    println!("  {} <command> [arguments]", "gen-image".bold().green());
    println!("\nCommands:");
    println!(
        "  {}   Start the HTTP server (POST / to generate).",
        "serve".bold().cyan()
    );
    println!(
        "  {}     Reimagine one image and pin the result.",
        "run".bold().magenta()
    );
    println!(
        "  {}  Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nArguments:");
    println!(
        "  {}  Source image URL and its MIME type.",
        "run <image_url> <mime_type>".bold().magenta()
    );
    println!("\nEnvironment:");
    println!(
        "  {}  Credentials used by {}.",
        "OPENAI_API_KEY, PINATA_JWT, PINATA_GATEWAY".bold(),
        "run".magenta()
    );
    println!(
        "  {}  Server and provider settings.",
        "HOST, PORT, OPENAI_API_BASE, PINATA_API_URL, HTTP_TIMEOUT_SECS".bold()
    );
    println!("\nExamples:");
    println!("  {}", "gen-image serve".bold().cyan());
    println!(
        "  {} https://example.com/cat.png image/png",
        "gen-image run".bold().magenta()
    );
    println!("{:━^60}", "".yellow());
}
