mod search;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Crawl job boards and rank postings against a CV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl the selected boards and rank the results against the profile
    Search {
        /// Plain-text CV/profile file
        #[clap(long)]
        profile: PathBuf,
        /// Role to search for; derived from the profile when omitted
        #[clap(long)]
        role: Option<String>,
        #[clap(long, default_value = "Istanbul")]
        location: String,
        /// Boards to crawl: linkedin, kariyer (repeatable)
        #[clap(long, default_value = "linkedin")]
        site: Vec<String>,
        #[clap(long, default_value_t = 50)]
        max_results: usize,
        /// Where to write the ranked results
        #[clap(long, default_value = "jobs.json")]
        out: PathBuf,
    },
    /// Show the keywords and role suggestions derived from a profile
    Suggest {
        #[clap(long)]
        profile: PathBuf,
    },
    /// Print a previously saved search
    Show {
        #[clap(long, default_value = "jobs.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    match args.command {
        Commands::Search {
            profile,
            role,
            location,
            site,
            max_results,
            out,
        } => search::run(profile, role, location, site, max_results, out).await,
        Commands::Suggest { profile } => suggest(profile).await,
        Commands::Show { file } => show(file).await,
    }
}

async fn suggest(path: PathBuf) {
    let text = tokio::fs::read_to_string(&path)
        .await
        .expect("Failed to read profile file");
    let keywords = profile::extract_keywords(&text);
    println!("Keywords: {}", keywords.join(", "));
    for title in profile::suggest_titles(&keywords, &text) {
        println!("Suggested role: {}", title);
    }
}

async fn show(path: PathBuf) {
    let snapshot = persistence::load(&path)
        .await
        .expect("Failed to load saved search");
    println!(
        "{} jobs for '{}' in {} (saved {})",
        snapshot.jobs.len(),
        snapshot.role,
        snapshot.location,
        snapshot.saved_at
    );
    for scored in &snapshot.jobs {
        println!(
            "{:5.1}  {} @ {}",
            scored.match_score, scored.job.title, scored.job.company
        );
    }
}
