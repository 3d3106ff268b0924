use anyhow::Context;
use clap::Parser;
use patient_registry::utils::{logger, validation::Validate};
use patient_registry::{
    CliConfig, Command, ConsoleSink, OutputFormat, RegistryError, RegistrySession, ScriptConfig,
};

fn load_script(config: &CliConfig) -> anyhow::Result<ScriptConfig> {
    match &config.script {
        Some(path) => {
            tracing::info!("📁 Loading session script from: {}", path);
            ScriptConfig::from_file(path)
                .with_context(|| format!("Failed to load session script '{}'", path))
        }
        None => {
            tracing::info!("📁 No script given, running the bundled hospital demo");
            ScriptConfig::demo().context("Failed to load the bundled demo script")
        }
    }
}

fn print_dry_run(script: &ScriptConfig) {
    println!("Session: {}", script.session.name);
    if let Some(description) = &script.session.description {
        println!("{}", description);
    }
    println!(
        "{} steps ({} registry mutations)",
        script.steps.len(),
        script.mutation_count()
    );
    for (i, step) in script.steps.iter().enumerate() {
        if let Command::Echo { .. } = step {
            continue;
        }
        println!("  {:>3}. {}", i + 1, step.label());
    }
}

fn exit_with(err: &RegistryError) -> ! {
    tracing::error!("❌ {}", err);
    tracing::error!("💡 Suggestion: {}", err.recovery_suggestion());
    eprintln!("❌ {}", err);
    std::process::exit(err.exit_code().max(1));
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.format {
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("🚀 Starting patient-registry");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let script = match load_script(&config) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            match e.downcast_ref::<RegistryError>() {
                Some(inner) => std::process::exit(inner.exit_code().max(1)),
                None => std::process::exit(1),
            }
        }
    };

    // 驗證腳本
    if let Err(e) = script.validate() {
        exit_with(&e);
    }
    tracing::info!(
        "✅ Script '{}' validated: {} steps",
        script.session.name,
        script.steps.len()
    );

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No registry operations will run");
        print_dry_run(&script);
        return Ok(());
    }

    let mut session = RegistrySession::new(ConsoleSink::stdout(config.format));
    match session.run(&script.steps) {
        Ok(summary) => {
            tracing::info!(
                "📊 {} patients left in the registry after {} steps",
                session.registry().len(),
                summary.steps
            );
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
