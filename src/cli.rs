use crate::commands;
use crate::common::{CommonParams, OutputParams};
use crate::log_debug;
use crate::providers::Provider;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;

const LOG_FILE: &str = "llmport-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    version = crate_version!(),
    about = "llmport: generate source modules from a prompt",
    long_about = "llmport asks an LLM provider to write a Python module from a plain-language description, strips any markdown fencing from the answer and saves it as <MODULE>.py.",
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a module unless it already exists
    #[command(
        about = "Generate a module from a description",
        long_about = "Generate <MODULE>.py from a description. An existing module is kept unless --overwrite is given.",
        after_help = get_dynamic_help()
    )]
    Gen {
        /// Module name (a Python identifier)
        module: String,

        /// What the module should do
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        #[command(flatten)]
        common: CommonParams,

        #[command(flatten)]
        output: OutputParams,

        /// Regenerate the module even if it exists
        #[arg(long, help = "Regenerate the module even if it exists")]
        overwrite: bool,
    },

    /// Rewrite an existing module
    #[command(
        about = "Update an existing module",
        long_about = "Send the current <MODULE>.py together with a change request and replace the file with the answer."
    )]
    Update {
        /// Module name (a Python identifier)
        module: String,

        /// The change to make
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        #[command(flatten)]
        common: CommonParams,

        #[command(flatten)]
        output: OutputParams,
    },

    /// Save provider settings
    #[command(
        about = "Configure llmport settings and providers",
        long_about = "Save the default provider, API key, model and timeout. Saved values take precedence over environment variables; per-command flags take precedence over both."
    )]
    Config {
        /// Set the default provider
        #[arg(long, help = "Set the default provider", value_parser = crate::common::available_providers_parser)]
        provider: Option<String>,

        /// Set API key for the provider
        #[arg(long, help = "Set API key for the provider")]
        api_key: Option<String>,

        /// Set model for the provider
        #[arg(long, help = "Set model for the provider")]
        model: Option<String>,

        /// Set request timeout in seconds
        #[arg(long, help = "Set request timeout in seconds")]
        timeout: Option<u64>,

        /// Set an alternative API base URL for the provider
        #[arg(long, help = "Set an alternative API base URL for the provider")]
        base_url: Option<String>,

        /// Print the resolved configuration
        #[arg(short, long, help = "Print the resolved configuration")]
        print: bool,
    },

    /// List supported providers
    #[command(about = "List supported providers and their defaults")]
    ListProviders,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Generate dynamic help including available LLM providers
fn get_dynamic_help() -> String {
    let providers_list = Provider::all_names()
        .iter()
        .map(|p| format!("{}", p.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nAvailable LLM Providers: {providers_list}")
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
        log_debug!("Debug logging to {}", log_file);
    } else {
        crate::logger::disable_logging();
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["llmport", "--help"]);
        Ok(())
    }
}

/// Handle the command based on parsed arguments
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Gen {
            module,
            prompt,
            common,
            output,
            overwrite,
        } => {
            commands::handle_gen_command(&module, &prompt.join(" "), &common, &output, overwrite)
                .await
        }
        Commands::Update {
            module,
            prompt,
            common,
            output,
        } => {
            commands::handle_update_command(&module, &prompt.join(" "), &common, &output).await
        }
        Commands::Config {
            provider,
            api_key,
            model,
            timeout,
            base_url,
            print,
        } => commands::handle_config_command(
            &crate::config::ConfigOverrides {
                provider,
                api_key,
                model,
                timeout_secs: timeout,
                base_url,
            },
            print,
        ),
        Commands::ListProviders => {
            commands::handle_list_providers_command();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gen() {
        let cli = Cli::try_parse_from([
            "llmport",
            "gen",
            "adder",
            "a function add(a,b)",
            "that returns a+b",
            "--provider",
            "openrouter",
            "--overwrite",
            "--no-log",
        ])
        .expect("valid arguments");

        let Some(Commands::Gen {
            module,
            prompt,
            common,
            output,
            overwrite,
        }) = cli.command
        else {
            panic!("expected gen command");
        };
        assert_eq!(module, "adder");
        assert_eq!(prompt.join(" "), "a function add(a,b) that returns a+b");
        assert_eq!(common.provider.as_deref(), Some("openrouter"));
        assert!(overwrite);
        assert!(output.no_log);
        assert!(!output.stdout);
        assert_eq!(output.dir, std::path::PathBuf::from("."));
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["llmport", "update", "adder", "x", "--provider", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_gen_requires_prompt() {
        assert!(Cli::try_parse_from(["llmport", "gen", "adder"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
