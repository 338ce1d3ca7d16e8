use clap::Parser;
use storegate::config::cli::{Cli, Command};
use storegate::core::backend::detected_platform;
use storegate::utils::logger;
use storegate::{connect, download, get, put, resolve_host, upload, Payload, Result, StoreError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // structured logs on the managed platforms, compact lines elsewhere
    if detected_platform().is_some() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let host = cli.host.clone().unwrap_or_else(resolve_host);
    tracing::debug!("host identity: {}", host);

    if let Err(e) = run(&cli, &host).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(if e.is_config() { 2 } else { 1 });
    }
}

async fn run(cli: &Cli, host: &str) -> Result<()> {
    match &cli.command {
        Command::Put { name, data, format } => {
            let payload = parse_payload(data, format)?;
            put(name, payload, host, format).await?;
            println!("✅ stored {}", name);
        }
        Command::Get { name, format } => match get(name, host, format).await? {
            Payload::Text(text) => println!("{}", text),
            Payload::Json(value) => println!("{}", value),
        },
        Command::Upload { local_path, name } => {
            upload(local_path, name, host).await?;
            println!("✅ uploaded {} as {}", local_path, name);
        }
        Command::Download { name, local_path } => {
            download(name, local_path, host).await?;
            println!("✅ downloaded {} to {}", name, local_path);
        }
        Command::Exists { name } => {
            let store = connect(host)?;
            println!("{}", store.exists(name).await);
        }
        Command::Host => {
            println!("{}", resolve_host());
        }
    }
    Ok(())
}

// json puts take the JSON text on the command line; parse it up front so a
// typo fails as a configuration error instead of storing a quoted string
fn parse_payload(data: &str, format: &str) -> Result<Payload> {
    if format == "json" {
        let value = serde_json::from_str(data).map_err(|e| StoreError::InvalidConfigValue {
            field: "data".to_string(),
            value: data.to_string(),
            reason: format!("invalid JSON: {}", e),
        })?;
        Ok(Payload::Json(value))
    } else {
        Ok(Payload::Text(data.to_string()))
    }
}
