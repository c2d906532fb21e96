use clap::Parser;
use fcview::core::ConfigProvider;
use fcview::utils::{logger, validation::Validate};
use fcview::{CliConfig, FcError, FreeCompanyAssembler, OutputFormat, StructuredNode, XivApiClient};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting fcview");

    match run(config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Lookup failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(config: CliConfig) -> fcview::Result<String> {
    let config = config.load_file()?;

    // 驗證配置
    config.validate()?;
    let lookup = config.lookup()?;
    tracing::debug!(
        "Using {} (timeout {}s, api key: {})",
        config.base_url(),
        config.timeout_seconds(),
        if config.api_key().is_some() { "set" } else { "none" }
    );

    let client = XivApiClient::from_config(&config)?;
    let assembler = FreeCompanyAssembler::new(client);
    let view = assembler.assemble(&lookup, config.include_members()).await?;

    let selected = select(&view, config.field.as_deref())?;
    render(selected, config.format)
}

/// `--field` 指定的子節點，未指定時為整個結果
fn select<'a>(view: &'a StructuredNode, field: Option<&str>) -> fcview::Result<&'a StructuredNode> {
    match field {
        Some(path) => view.path(path).ok_or_else(|| FcError::FieldNotFound {
            path: path.to_string(),
        }),
        None => Ok(view),
    }
}

fn render(node: &StructuredNode, format: OutputFormat) -> fcview::Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(node)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(node)?,
        OutputFormat::Repr => node.to_string(),
    };
    Ok(output)
}
