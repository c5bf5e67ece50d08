// # rrsetctl - PowerDNS record-set resources from the command line
//
// The rrsetctl binary is a THIN host over rrset-core:
// 1. Reading API configuration from environment variables
// 2. Parsing declared configuration / stored state documents (JSON)
// 3. Invoking one resource operation
// 4. Printing the resulting state as JSON on stdout
//
// All record-set logic lives in rrset-core; the caller owns the state store
// (e.g. a JSON file written from stdout).
//
// ## Configuration
//
// - `PDNS_SERVER_URL`: Base URL of the PowerDNS API (required)
// - `PDNS_API_KEY`: API key (required)
// - `PDNS_SERVER_ID`: Server id (default: localhost)
// - `PDNS_HTTP_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
// - `PDNS_INSECURE_HTTPS`: Accept invalid TLS certificates (default: false)
// - `PDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export PDNS_SERVER_URL=http://127.0.0.1:8081
// export PDNS_API_KEY=your_key
//
// rrsetctl record create --config www.json > www.state.json
// rrsetctl record exists --state www.state.json
// rrsetctl soa import '{"zone": "example.com.", "id": "example.com.:::SOA"}'
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rrset_core::{ApiConfig, RecordApi, RecordResource, Resource, SoaRecordResource};
use rrset_provider_powerdns::PowerDnsClient;
use std::env;
use std::io::Read;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtlExitCode {
    /// Operation succeeded
    Success = 0,
    /// Configuration or startup error
    ConfigError = 1,
    /// The resource operation failed
    OperationError = 2,
    /// `exists` found no record set
    Absent = 3,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "rrsetctl", version, about = "Manage PowerDNS record sets declaratively")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generic record set (powerdns_record)
    Record {
        #[command(subcommand)]
        action: Action,
    },
    /// SOA record (powerdns_record_soa)
    Soa {
        #[command(subcommand)]
        action: Action,
    },
    /// Print the field schema of a resource type
    Schema {
        #[arg(value_enum)]
        resource: ResourceKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceKind {
    Record,
    Soa,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Create the record set from a declared configuration
    Create {
        /// Declared configuration as JSON ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        config: String,
    },
    /// Refresh a stored state from the server
    Read {
        /// Stored state as JSON ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        state: String,
    },
    /// Delete the record set behind a stored state
    Delete {
        /// Stored state as JSON ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        state: String,
    },
    /// Check whether the record set behind a stored state still exists
    Exists {
        /// Stored state as JSON ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        state: String,
    },
    /// Import an existing record set from '{"zone": ..., "id": ...}'
    Import {
        /// JSON import string
        import_id: String,
    },
}

/// Application configuration
struct Config {
    server_url: String,
    api_key: String,
    server_id: Option<String>,
    timeout_secs: Option<u64>,
    insecure_https: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            server_url: env::var("PDNS_SERVER_URL").context("PDNS_SERVER_URL is not set")?,
            api_key: env::var("PDNS_API_KEY").context("PDNS_API_KEY is not set")?,
            server_id: env::var("PDNS_SERVER_ID").ok(),
            timeout_secs: env::var("PDNS_HTTP_TIMEOUT_SECS")
                .ok()
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("PDNS_HTTP_TIMEOUT_SECS must be a number of seconds")?,
            insecure_https: env::var("PDNS_INSECURE_HTTPS")
                .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_level: env::var("PDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout_secs
            && !(1..=300).contains(&timeout)
        {
            anyhow::bail!(
                "PDNS_HTTP_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                timeout
            );
        }

        log_level(&self.log_level)?;
        self.api_config().validate()?;
        Ok(())
    }

    fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(&self.server_url, &self.api_key)
            .with_insecure_https(self.insecure_https);
        if let Some(ref server_id) = self.server_id {
            config = config.with_server_id(server_id);
        }
        if let Some(timeout) = self.timeout_secs {
            config = config.with_timeout_secs(timeout);
        }
        config
    }
}

fn log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "PDNS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Schema output needs neither configuration nor network.
    if let Command::Schema { resource } = cli.command {
        return match print_schema(resource) {
            Ok(()) => CtlExitCode::Success.into(),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                CtlExitCode::OperationError.into()
            }
        };
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return CtlExitCode::ConfigError.into();
    }

    let level = log_level(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let client = match PowerDnsClient::new(&config.api_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create PowerDNS client: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // Operations are strictly sequential; one thread is enough.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let result = rt.block_on(async {
        match cli.command {
            Command::Record { action } => run(RecordResource, action, &client).await,
            Command::Soa { action } => run(SoaRecordResource, action, &client).await,
            Command::Schema { .. } => Ok(CtlExitCode::Success),
        }
    });

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            error!("Operation failed: {:#}", e);
            CtlExitCode::OperationError.into()
        }
    }
}

/// Run one action of a resource and print its result
async fn run<R: Resource>(resource: R, action: Action, api: &dyn RecordApi) -> Result<CtlExitCode> {
    info!("{} via {} API", resource.type_name(), api.api_name());

    match action {
        Action::Create { config } => {
            let config: R::Config = read_json(&config)?;
            let state = resource.create(api, &config).await?;
            print_json(&state)?;
        }
        Action::Read { state } => {
            let state: R::State = read_json(&state)?;
            let state = resource.read(api, &state).await?;
            print_json(&state)?;
        }
        Action::Delete { state } => {
            let state: R::State = read_json(&state)?;
            resource.delete(api, &state).await?;
        }
        Action::Exists { state } => {
            let state: R::State = read_json(&state)?;
            let exists = resource.exists(api, &state).await?;
            print_json(&serde_json::json!({ "exists": exists }))?;
            if !exists {
                return Ok(CtlExitCode::Absent);
            }
        }
        Action::Import { import_id } => {
            let state = resource.import(api, &import_id).await?;
            print_json(&state)?;
        }
    }

    Ok(CtlExitCode::Success)
}

fn print_schema(kind: ResourceKind) -> Result<()> {
    let schema = match kind {
        ResourceKind::Record => RecordResource.schema(),
        ResourceKind::Soa => SoaRecordResource.schema(),
    };
    print_json(&schema)
}

fn read_json<T: serde::de::DeserializeOwned>(file: &str) -> Result<T> {
    let text = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };

    serde_json::from_str(&text).with_context(|| format!("Invalid JSON document in {}", file))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
