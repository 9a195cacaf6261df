use llmport::{cli, log_error, logger, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    if let Err(e) = cli::main().await {
        log_error!("{e:?}");
        ui::print_error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
