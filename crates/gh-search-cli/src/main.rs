use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use gh_search_cli::{
    config::{ConfigError, RuntimeConfig},
    flags::QualifierFlags,
    github_api::{GitHubApiError, GitHubSearcher},
    render,
    repos::new_search_query,
};
use search_core::{Query, QueryError, SearchResult, Searcher, query::DEFAULT_LIMIT};

const ENVELOPE_SCHEMA_VERSION: &str = "v1";
const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
const ERROR_CODE_USER_OUTPUT_MODE_CONFLICT: &str = "user.output_mode_conflict";
const ERROR_CODE_USER_INVALID_CONFIG: &str = "user.invalid_config";
const ERROR_CODE_RUNTIME_QUERY_DECLARATION: &str = "runtime.query_declaration";
const ERROR_CODE_RUNTIME_GITHUB_API: &str = "runtime.github_api";
const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";

#[derive(Debug, Parser)]
#[command(author, version, about = "GitHub repository search CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for repositories on GitHub.
    ///
    /// Keywords are passed through verbatim; qualifier flags are validated
    /// before any request is made.
    Repos(ReposArgs),
}

#[derive(Debug, Args)]
struct ReposArgs {
    /// Search keywords.
    keywords: Vec<String>,
    /// Maximum number of repositories to fetch (1-1000).
    #[arg(short = 'L', long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
    /// Order of repositories returned, ignored unless --sort is specified: asc or desc.
    #[arg(long)]
    order: Option<String>,
    /// Sort repositories by stars, forks, help-wanted-issues, or updated.
    #[arg(long)]
    sort: Option<String>,
    /// Print the raw result items as JSON.
    #[arg(long)]
    json: bool,
    /// Print the web search URL instead of calling the API.
    #[arg(short = 'w', long)]
    web: bool,
    /// Output mode: human-readable text or service envelope JSON.
    #[arg(long, value_enum, default_value_t = OutputMode::Human)]
    mode: OutputMode,
    #[command(flatten)]
    qualifiers: QualifierFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputMode {
    Human,
    ServiceJson,
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match &self.command {
            Commands::Repos(_) => "repos",
        }
    }

    fn output_mode(&self) -> OutputMode {
        match &self.command {
            Commands::Repos(args) => args.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl CliError {
    fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    fn from_query(error: QueryError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_INPUT, error.to_string())
    }

    fn from_config(error: ConfigError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_CONFIG, error.to_string())
    }

    fn from_github_api(error: GitHubApiError) -> Self {
        match error {
            GitHubApiError::InvalidQuery(error) => Self::from_query(error),
            other => Self::runtime(ERROR_CODE_RUNTIME_GITHUB_API, other.to_string()),
        }
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command_name();
    let mode = cli.output_mode();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            match mode {
                OutputMode::ServiceJson => {
                    println!("{}", serialize_service_error(command, &error));
                }
                OutputMode::Human => {
                    eprintln!("error: {}", error.message);
                }
            }
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let tty = std::io::stdout().is_terminal();
    run_with(cli, tty, RuntimeConfig::from_env, GitHubSearcher::new)
}

fn run_with<LoadConfig, Connect, S>(
    cli: Cli,
    tty: bool,
    load_config: LoadConfig,
    connect: Connect,
) -> Result<String, CliError>
where
    LoadConfig: Fn() -> Result<RuntimeConfig, ConfigError>,
    Connect: Fn(&RuntimeConfig) -> Result<S, GitHubApiError>,
    S: Searcher<Error = GitHubApiError>,
{
    match cli.command {
        Commands::Repos(args) => {
            if args.json && args.web {
                return Err(CliError::user(
                    ERROR_CODE_USER_OUTPUT_MODE_CONFLICT,
                    "expected at most one of `--json` or `--web`",
                ));
            }

            let query = build_query(&args)?;
            let config = load_config().map_err(CliError::from_config)?;
            let searcher = connect(&config).map_err(CliError::from_github_api)?;

            if args.web {
                let url = searcher.url(&query);
                tracing::debug!(%url, "web mode, skipping api request");
                return render_web(args.mode, &url);
            }

            let result = searcher
                .search(&query)
                .map_err(CliError::from_github_api)?;
            render_result(&args, tty, &query, &result)
        }
    }
}

fn build_query(args: &ReposArgs) -> Result<Query, CliError> {
    let mut query = new_search_query().map_err(|error| {
        CliError::runtime(ERROR_CODE_RUNTIME_QUERY_DECLARATION, error.to_string())
    })?;
    query.keywords = args.keywords.clone();
    query.limit = args.limit;

    if let Some(order) = &args.order {
        query
            .set_qualifier("order", order)
            .map_err(CliError::from_query)?;
    }
    if let Some(sort) = &args.sort {
        query
            .set_qualifier("sort", sort)
            .map_err(CliError::from_query)?;
    }
    args.qualifiers
        .apply(&mut query)
        .map_err(CliError::from_query)?;
    query.validate().map_err(CliError::from_query)?;

    Ok(query)
}

#[derive(Debug, Serialize)]
struct ServiceErrorEnvelope {
    code: &'static str,
    message: String,
    details: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ServiceEnvelope {
    schema_version: &'static str,
    command: &'static str,
    ok: bool,
    result: Option<Value>,
    error: Option<ServiceErrorEnvelope>,
}

fn render_web(mode: OutputMode, url: &str) -> Result<String, CliError> {
    match mode {
        OutputMode::Human => Ok(url.to_string()),
        OutputMode::ServiceJson => render_service_envelope(json!({ "url": url })),
    }
}

fn render_result(
    args: &ReposArgs,
    tty: bool,
    query: &Query,
    result: &SearchResult,
) -> Result<String, CliError> {
    match args.mode {
        OutputMode::ServiceJson => render_service_envelope(json!({
            "query": query.query_string(),
            "total_count": result.total_count,
            "incomplete_results": result.incomplete_results,
            "items": result.items,
        })),
        OutputMode::Human if args.json => render::render_items_json(result).map_err(|err| {
            CliError::runtime(
                ERROR_CODE_RUNTIME_SERIALIZE,
                format!("failed to serialize items: {err}"),
            )
        }),
        OutputMode::Human => Ok(render::render_table(result, tty)),
    }
}

fn render_service_envelope(result: Value) -> Result<String, CliError> {
    serde_json::to_string(&ServiceEnvelope {
        schema_version: ENVELOPE_SCHEMA_VERSION,
        command: "repos",
        ok: true,
        result: Some(result),
        error: None,
    })
    .map_err(|err| {
        CliError::runtime(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize service envelope: {err}"),
        )
    })
}

fn serialize_service_error(command: &'static str, error: &CliError) -> String {
    let envelope = ServiceEnvelope {
        schema_version: ENVELOPE_SCHEMA_VERSION,
        command,
        ok: false,
        result: None,
        error: Some(ServiceErrorEnvelope {
            code: error.code,
            message: error.message.clone(),
            details: Some(json!({ "exit_code": error.exit_code() })),
        }),
    };

    serde_json::to_string(&envelope).unwrap_or_else(|serialize_error| {
        json!({
            "schema_version": ENVELOPE_SCHEMA_VERSION,
            "command": command,
            "ok": false,
            "result": Value::Null,
            "error": {
                "code": ERROR_CODE_RUNTIME_SERIALIZE,
                "message": format!("failed to serialize service error envelope: {serialize_error}"),
                "details": Value::Null,
            }
        })
        .to_string()
    })
}
