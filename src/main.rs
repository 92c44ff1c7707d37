// src/main.rs

use monrun::cli::{self, CliArgs};
use monrun::errors::{EXIT_USAGE, Result};
use monrun::{logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match cli::try_parse() {
        Ok(args) => args,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(EXIT_USAGE);
        }
        // --help / --version
        Err(err) => err.exit(),
    };

    if let Err(err) = run_main(args).await {
        eprintln!("monrun error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main(args: CliArgs) -> Result<()> {
    logging::init_logging(args.log_level)?;
    run(args).await
}
