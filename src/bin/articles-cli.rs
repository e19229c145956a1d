use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};
use std::error::Error;

#[derive(Parser)]
#[command(name = "articles-cli")]
#[command(about = "Command-line client for the Articles API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all articles, newest first
    List,
    /// Show one article
    Get { id: String },
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        authors: String,
    },
    /// Replace an article's title, text and authors
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        authors: String,
    },
    /// Delete an article
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::List => client.get(articles_url(&cli.url, None)?).send().await?,
        Commands::Get { id } => client.get(articles_url(&cli.url, Some(&id))?).send().await?,
        Commands::Create { title, text, authors } => {
            client
                .post(articles_url(&cli.url, None)?)
                .json(&json!({ "title": title, "text": text, "authors": authors }))
                .send()
                .await?
        }
        Commands::Update { id, title, text, authors } => {
            client
                .put(articles_url(&cli.url, Some(&id))?)
                .json(&json!({ "title": title, "text": text, "authors": authors }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client.delete(articles_url(&cli.url, Some(&id))?).send().await?
        }
    };

    print_response(res).await
}

/// `/api/articles` under `base`, optionally followed by a percent-encoded id.
fn articles_url(base: &str, id: Option<&str>) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(base)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", base))?;
        segments.pop_if_empty().extend(["api", "articles"]);
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("Articles API returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
