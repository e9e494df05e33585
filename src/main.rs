//! micv command-line entry point.
//!
//! ```text
//! parse flags
//!     → --generate-* / --version (exit early)
//!     → load config (defaults → file → flags → env)
//!     → init logging, then emit config warnings
//!     → resolve payload (--data file or positional args)
//!     → Submitter::submit under a run deadline, Ctrl-C cancels
//!     → print receipt, or error report and exit 1
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::Instrument;
use uuid::Uuid;

use micv::application::generate::generate_files;
use micv::build_info::BuildInfo;
use micv::cli::{Action, Cli};
use micv::config::load_config;
use micv::http::ReqwestTransport;
use micv::lifecycle::{signals::cancel_on_ctrl_c, RunContext};
use micv::observability::init_logging;
use micv::{AppError, AppResult, SubmissionReceipt, Submitter, SubmitterSettings};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.action() {
        Action::Generate => generate(&cli),
        Action::ShowVersion => {
            println!("{}", BuildInfo::current());
            Ok(())
        }
        Action::Submit => run(&cli).await.map(|receipt| print_receipt(&receipt)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn generate(cli: &Cli) -> AppResult<()> {
    init_logging("info", Default::default(), cli.verbose);

    let written = generate_files(
        std::path::Path::new("."),
        cli.generate_data_json,
        cli.generate_config_json,
    )?;

    println!("Generated files:");
    for path in &written {
        println!("   - {}", path.display());
    }
    if let Some(hint) = cli.usage_hint() {
        println!("\nUsage example:\n   {}", hint);
    }
    Ok(())
}

async fn run(cli: &Cli) -> AppResult<SubmissionReceipt> {
    let loaded = load_config(cli.config.as_deref(), &cli.overrides())?;
    let config = &loaded.config;
    init_logging(
        &config.observability.log_level,
        config.observability.log_format,
        cli.verbose,
    );
    loaded.emit_warnings();

    tracing::info!(
        secret_url = %config.secret_url,
        application_url = %config.application_url,
        timeout_seconds = config.timeout_seconds,
        max_attempts = config.retry.max_attempts,
        "Configuration loaded"
    );

    let payload = cli.payload()?;

    let transport = ReqwestTransport::new(config.request_timeout()).map_err(|e| {
        AppError::network(
            config.secret_url.as_str(),
            format!("failed to build HTTP client: {}", e),
        )
    })?;
    let submitter = Submitter::new(Arc::new(transport), SubmitterSettings::from_config(config));

    let ctx = RunContext::with_timeout(config.run_deadline());
    let signal_task = cancel_on_ctrl_c(ctx.clone());

    let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
    let result = submitter.submit(&ctx, &payload).instrument(span).await;

    signal_task.abort();
    result
}

fn print_receipt(receipt: &SubmissionReceipt) {
    println!("Application submission HTTP status: {}", receipt.status);
    println!("Application submission response body: {}", receipt.body);
    if receipt.is_success() {
        println!("Application submitted successfully!");
    } else {
        println!("Application submission completed with non-success status");
    }
}

fn report_error(err: &AppError) {
    for line in err.report() {
        eprintln!("{}", line);
    }

    if matches!(err, AppError::Data(micv::application::DataError::InsufficientArguments)) {
        eprintln!("\nUsage: micv [OPTIONS] [<name> <email> <job_title> [final_attempt]]");
        eprintln!("Run 'micv --help' for more information.");
    }
}
