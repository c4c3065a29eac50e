use futures::future;
use job_scraper::{kariyer, linkedin, Crawler, JobRecord, SearchQuery, Source};
use std::path::PathBuf;

enum Site {
    Linkedin,
    Kariyer,
}

impl From<&str> for Site {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "kariyer" => Site::Kariyer,
            _ => Site::Linkedin,
        }
    }
}

impl Site {
    fn source(&self) -> &'static Source {
        match self {
            Site::Linkedin => &linkedin::SOURCE,
            Site::Kariyer => &kariyer::SOURCE,
        }
    }
}

pub(crate) async fn run(
    profile_path: PathBuf,
    role: Option<String>,
    location: String,
    sites: Vec<String>,
    max_results: usize,
    out: PathBuf,
) {
    let profile_text = tokio::fs::read_to_string(&profile_path)
        .await
        .expect("Failed to read profile file");
    let keywords = profile::extract_keywords(&profile_text);
    let role = role.unwrap_or_else(|| profile::primary_title(&keywords, &profile_text));
    log::info!(
        "searching as '{}' in {} with {} profile keywords",
        role,
        location,
        keywords.len()
    );

    let query = SearchQuery::new(&role, &location, max_results);
    // each site gets its own crawler and session; nothing is shared until
    // the results are merged
    let crawls = sites.iter().map(|site| {
        let crawler = Crawler::new(Site::from(site.as_str()).source());
        let query = query.clone();
        async move { crawler.search(&query).await }
    });

    let mut records: Vec<JobRecord> = Vec::new();
    for result in future::join_all(crawls).await {
        match result {
            Ok(jobs) => records.extend(jobs),
            Err(err) => {
                eprintln!("Search failed: {}", err);
                std::process::exit(1);
            }
        }
    }

    let jobs = matcher::rank(&profile_text, &keywords, &role, records);
    if jobs.is_empty() {
        println!("No jobs found. Try different keywords.");
    }
    for scored in &jobs {
        println!(
            "{:5.1}  {} @ {}",
            scored.match_score, scored.job.title, scored.job.company
        );
    }

    let snapshot = persistence::Snapshot::new(&role, &location, jobs);
    persistence::save(&out, &snapshot)
        .await
        .expect("Failed to write results file");
}
