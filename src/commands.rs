use crate::common::{CommonParams, OutputParams};
use crate::config::{Config, ConfigOverrides, Environment, ProcessEnv, Settings, resolve};
use crate::connectors;
use crate::error::{ConfigError, Error, ProviderError};
use crate::event_log::EventLog;
use crate::handler::ModuleHandler;
use crate::log_debug;
use crate::providers::Provider;
use crate::store::{ModuleStore, validate_module_name};
use crate::ui;
use crate::workflow::{Outcome, Workflow};
use anyhow::Result;
use clap::crate_version;
use colored::Colorize;

/// Resolve configuration for a run: CLI flags, then saved settings, then environment
fn load_config(
    common: &CommonParams,
    settings: &Settings,
    env: &impl Environment,
) -> Result<Config, Error> {
    let overrides = settings.layered_overrides(&common.to_overrides(), env);
    Ok(resolve(&overrides, env)?)
}

fn build_workflow(common: &CommonParams, output: &OutputParams) -> Result<Workflow> {
    let settings = Settings::load().map_err(|e| report(e.into()))?;
    let config = load_config(common, &settings, &ProcessEnv).map_err(report)?;
    let connector = connectors::from_config(&config).map_err(report)?;
    log_debug!(
        "Using {} with model {}",
        connector.provider(),
        connector.model()
    );

    Ok(Workflow::new(
        ModuleHandler::new(connector),
        ModuleStore::new(&output.dir),
        EventLog::new(&output.dir, output.stdout, !output.no_log),
    ))
}

/// Print a hint for errors the user can fix, then pass the error on
fn report(err: Error) -> Error {
    match &err {
        Error::Provider(provider_err) if provider_err.is_auth() => {
            ui::print_warning("The provider rejected your API key.");
            ui::print_info("Update it with `llmport config --api-key <KEY>` or the provider's environment variable.");
        }
        Error::Provider(ProviderError::Transport { .. }) => {
            ui::print_info("Check your network connection, or raise the timeout with --timeout.");
        }
        Error::Config(ConfigError::UnsupportedProvider(_)) => {
            ui::print_info(&format!(
                "Supported providers: {}",
                Provider::all_names().join(", ")
            ));
        }
        _ => {}
    }
    err
}

fn print_outcome(module: &str, outcome: &Outcome, verb: &str, output: &OutputParams) {
    match outcome {
        Outcome::Existing(path) => {
            ui::print_info(&format!(
                "Module '{module}' already exists at {}. Use --overwrite to regenerate it.",
                path.display()
            ));
        }
        Outcome::Generated { path, generation } => {
            ui::print_success(&format!("✨ Module '{module}' {verb} at {}", path.display()));
            if generation.source.is_empty() {
                ui::print_warning("The model returned no code; the module file is empty.");
            }
            if output.print {
                println!("{}", generation.source);
            }
        }
    }
}

/// Handle the `gen` command
pub async fn handle_gen_command(
    module: &str,
    prompt: &str,
    common: &CommonParams,
    output: &OutputParams,
    overwrite: bool,
) -> Result<()> {
    log_debug!(
        "Handling 'gen' command with module: {}, common: {:?}, output: {:?}, overwrite: {}",
        module,
        common,
        output,
        overwrite
    );
    validate_module_name(module)?;

    // An existing module needs no provider, so skip configuration entirely
    let store = ModuleStore::new(&output.dir);
    if store.exists(module) && !overwrite {
        print_outcome(module, &Outcome::Existing(store.path_for(module)), "kept", output);
        return Ok(());
    }

    ui::print_version(crate_version!());
    let workflow = build_workflow(common, output)?;
    ui::print_dim(&format!("Generating module '{module}'..."));

    let outcome = workflow
        .import(module, prompt, overwrite)
        .await
        .map_err(report)?;
    print_outcome(module, &outcome, "generated", output);
    Ok(())
}

/// Handle the `update` command
pub async fn handle_update_command(
    module: &str,
    prompt: &str,
    common: &CommonParams,
    output: &OutputParams,
) -> Result<()> {
    log_debug!(
        "Handling 'update' command with module: {}, common: {:?}, output: {:?}",
        module,
        common,
        output
    );
    validate_module_name(module)?;

    ui::print_version(crate_version!());
    let workflow = build_workflow(common, output)?;
    ui::print_dim(&format!("Updating module '{module}'..."));

    let outcome = workflow.update(module, prompt).await.map_err(report)?;
    print_outcome(module, &outcome, "updated", output);
    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command(changes: &ConfigOverrides, print: bool) -> Result<()> {
    log_debug!(
        "Handling 'config' command with provider: {:?}, model: {:?}, timeout: {:?}, print: {}",
        changes.provider,
        changes.model,
        changes.timeout_secs,
        print
    );

    let mut settings = Settings::load()?;
    let changed = settings.update(changes)?;
    if changed {
        settings.save()?;
        ui::print_success(&format!(
            "Configuration saved to {}",
            Settings::path()?.display()
        ));
    }

    if print || !changed {
        print_configuration(&settings, &ProcessEnv)?;
    }
    Ok(())
}

fn print_configuration(settings: &Settings, env: &impl Environment) -> Result<()> {
    let config = resolve(
        &settings.layered_overrides(&ConfigOverrides::default(), env),
        env,
    )?;

    println!("\n{}", "llmport configuration".bright_magenta().bold());
    ui::print_setting("Provider", config.provider.name());
    ui::print_setting("Model", &config.model);
    ui::print_setting(
        "API key",
        &config
            .api_key
            .as_deref()
            .map_or_else(|| "not set".to_string(), ui::mask_secret),
    );
    ui::print_setting(
        "Timeout",
        &config
            .timeout_secs
            .map_or_else(|| "none".to_string(), |secs| format!("{secs}s")),
    );
    if let Some(base_url) = &config.base_url {
        ui::print_setting("Base URL", base_url);
    }
    ui::print_setting("Settings file", &Settings::path()?.display().to_string());
    Ok(())
}

/// Handle the `list-providers` command
pub fn handle_list_providers_command() {
    println!("{}", "Supported providers".bright_magenta().bold());
    for provider in Provider::ALL {
        println!(
            "\n{} {}",
            "•".bright_cyan(),
            provider.name().bright_green().bold()
        );
        ui::print_setting("  Default model", provider.default_model());
        ui::print_setting("  API key variables", &provider.api_key_envs().join(", "));
        ui::print_setting("  Model variable", provider.model_env());
    }
}
