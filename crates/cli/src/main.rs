use clap::{Parser, Subcommand};

use ranobes_provider_core::config::{config_status, SessionConfig};
use ranobes_provider_core::error::{LookupError, ProviderError};
use ranobes_provider_core::provider::RanobesProvider;
use ranobes_provider_core::record::MetadataQuery;
use ranobes_provider_core::wire::BookMatch;

#[derive(Parser)]
#[command(name = "ranobes-provider")]
#[command(about = "Book metadata lookup from ranobes.com")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the site and print the best match's metadata
    Search {
        /// Title query text
        #[arg(required = true)]
        query: String,

        /// Author to include in the search
        #[arg(long)]
        author: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved configuration (cookie values reduced to set/unset)
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let result = match &cli.command {
        Commands::Search { query, author } => run_search(query, author.as_deref(), cli.json).await,
        Commands::Config { action } => run_config(action, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let unauthenticated = e
            .downcast_ref::<ProviderError>()
            .is_some_and(|p| matches!(p, ProviderError::Lookup(LookupError::Unauthenticated)));
        if unauthenticated {
            eprintln!("Refresh the DLE_USER_ID, DLE_PASSWORD and PHPSESSID session cookies and try again.");
        }
        std::process::exit(1);
    }
}

async fn run_search(
    query: &str,
    author: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let session = SessionConfig::load().map_err(ProviderError::from)?;
    let provider = RanobesProvider::new(&session)?;
    let request = MetadataQuery {
        title: query.to_string(),
        author: author.map(str::to_string),
    };

    let matches: Vec<BookMatch> = provider
        .lookup(&request)
        .await
        .map_err(ProviderError::from)?
        .map(BookMatch::from)
        .into_iter()
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "matches": matches }))?
        );
    } else if let Some(wire) = matches.first() {
        print_summary(wire);
    } else {
        println!("No match for \"{}\"", query);
    }
    Ok(())
}

fn print_summary(wire: &BookMatch) {
    println!("Title:     {}", wire.title);
    if let Some(subtitle) = &wire.subtitle {
        println!("Subtitle:  {}", subtitle);
    }
    if let Some(author) = &wire.author {
        println!("Author:    {}", author);
    }
    for series in &wire.series {
        match &series.sequence {
            Some(seq) => println!("Series:    {} #{}", series.series, seq),
            None => println!("Series:    {}", series.series),
        }
    }
    if let Some(year) = &wire.published_year {
        println!("Year:      {}", year);
    }
    if let Some(publisher) = &wire.publisher {
        println!("Publisher: {}", publisher);
    }
    if let Some(language) = &wire.language {
        println!("Language:  {}", language);
    }
    if !wire.genres.is_empty() {
        println!("Genres:    {}", wire.genres.join(", "));
    }
    if !wire.tags.is_empty() {
        println!("Tags:      {}", wire.tags.join(", "));
    }
    if let Some(cover) = &wire.cover {
        println!("Cover:     {}", cover);
    }
    if let Some(description) = &wire.description {
        println!();
        println!("{}", description);
    }
}

fn run_config(
    action: &ConfigAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match action {
        ConfigAction::Show => {
            let status = config_status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                match &status.config_file {
                    Some(p) => println!("Config file: {}", p.display()),
                    None => println!("Config file: (none)"),
                }
                println!("Base URL:    {}", status.base_url);
                println!("Timeout:     {}s", status.timeout_secs);
                let flag = |set: bool| if set { "set" } else { "missing" };
                println!("dle_user_id:  {}", flag(status.dle_user_id_set));
                println!("dle_password: {}", flag(status.dle_password_set));
                println!("PHPSESSID:    {}", flag(status.phpsessid_set));
            }
            Ok(())
        }
    }
}
