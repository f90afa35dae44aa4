use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use codereview::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES};
use codereview::loader::resolve_root;
use codereview::{
    create_client, CodeReviewer, Config, Error, FileLoader, LoaderConfig, ProviderKind, Session,
};

#[derive(Parser, Debug)]
#[command(name = "codereview")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered code review assistant")]
#[command(after_help = "Examples:
  codereview /path/to/project
  codereview /path/to/project --provider anthropic
  codereview /path/to/project --provider openai --model gpt-4o")]
struct Args {
    /// Path to the codebase to review (prompted for when omitted)
    path: Option<PathBuf>,

    /// LLM provider to use: anthropic or openai (default: $LLM_PROVIDER or anthropic)
    #[arg(long)]
    provider: Option<String>,

    /// Model to use (default: $LLM_MODEL or the provider's default model)
    #[arg(long)]
    model: Option<String>,

    /// Maximum directory nesting depth to traverse
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum number of files loaded per review
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    max_files: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the transcript on stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("codereview=warn".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => fatal(&err),
    };

    let codebase = match resolve_codebase(args.path.clone()) {
        Ok(path) => path,
        Err(err) => fatal(&err),
    };

    let client = match create_client(
        config.provider,
        &config.api_key,
        &config.model,
        config.max_tokens,
        config.base_url.as_deref(),
    ) {
        Ok(client) => client,
        Err(err) => fatal(&err),
    };

    tracing::info!(
        "Starting review session for {} with {} ({})",
        codebase.display(),
        config.provider,
        config.model
    );

    let loader = FileLoader::new(&codebase, config.loader.clone());
    let reviewer = CodeReviewer::new(loader, client);
    let mut session = Session::new(reviewer, config.provider, config.model.clone());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout).await?;

    Ok(())
}

fn build_config(args: &Args) -> codereview::Result<Config> {
    let provider = args
        .provider
        .as_deref()
        .map(str::parse::<ProviderKind>)
        .transpose()?;

    let config = Config::from_env()?
        .with_overrides(provider, args.model.clone())
        .with_loader(LoaderConfig {
            max_depth: args.max_depth,
            max_files: args.max_files,
            ..LoaderConfig::default()
        });
    Ok(config)
}

fn resolve_codebase(path: Option<PathBuf>) -> codereview::Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => {
            print!("Enter path to codebase to review: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            PathBuf::from(line.trim())
        }
    };

    resolve_root(&path)
}

fn fatal(err: &Error) -> ! {
    eprintln!("Error: {}", err);
    if let Error::Config(msg) = err {
        if msg.contains("LLM_API_KEY") {
            eprintln!("Please set it with: export LLM_API_KEY='your-api-key'");
        }
    }
    std::process::exit(1);
}
