use std::process::ExitCode;
use std::time::Duration;

use breachcheck_client::{BreachChecker, CheckResult, ClientConfig, DEFAULT_ENDPOINT};
use clap::Parser;
use zeroize::Zeroize;

#[derive(Parser, Debug)]
#[command(name = "breachcheck")]
#[command(about = "Check a password against the Have I Been Pwned range API without revealing it")]
struct Args {
    /// Range endpoint base URL (the 5-character digest prefix is appended)
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Round-trip budget for the range query, in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    /// Treat a timed-out query as "no breach found" instead of failing
    #[arg(long)]
    resolve_on_timeout: bool,

    /// Print the password's digest instead of querying the range endpoint
    #[arg(long)]
    hash_only: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = ClientConfig {
        endpoint: args.endpoint,
        timeout: Duration::from_millis(args.timeout_ms),
        resolve_on_timeout: args.resolve_on_timeout,
        ..ClientConfig::default()
    };
    let checker = BreachChecker::new(config);

    let mut password = match rpassword::prompt_password("Password: ") {
        Ok(password) => password,
        Err(e) => {
            eprintln!("failed to read password: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.hash_only {
        let result = checker.hash_password(&password);
        password.zeroize();

        return match result {
            Ok(digest) => {
                println!("{digest}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let result = checker.check(&password).await;
    password.zeroize();

    match result {
        Ok(CheckResult::Clean) => {
            println!("No known breach.");
            ExitCode::SUCCESS
        }
        Ok(CheckResult::Breached { count }) => {
            println!("Found in known breaches {count} times. Do not use this password.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("check failed: {e}");
            ExitCode::FAILURE
        }
    }
}
