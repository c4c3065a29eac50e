//! Profile-side heuristics: spot skill keywords in a résumé and suggest
//! role titles to search for.

mod titles;

pub use titles::{primary_title, suggest_titles};

/// Skills, tools and role phrases worth matching postings against.
/// Table order is relevance order; the first hits win.
const TECH_KEYWORDS: [&str; 57] = [
    "python",
    "javascript",
    "react",
    "node",
    "java",
    "c++",
    "c#",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "machine learning",
    "data science",
    "deep learning",
    "ai",
    "frontend",
    "backend",
    "fullstack",
    "full-stack",
    "devops",
    "agile",
    "scrum",
    "git",
    "ci/cd",
    "rest api",
    "graphql",
    "typescript",
    "vue",
    "angular",
    "django",
    "flask",
    "fastapi",
    "html",
    "css",
    "tailwind",
    "bootstrap",
    "sass",
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "scikit-learn",
    "selenium",
    "playwright",
    "cypress",
    "testing",
    "data analyst",
    "data engineer",
    "software engineer",
    "developer",
    "architect",
];

const MAX_KEYWORDS: usize = 15;

/// Scans the keyword table against the lowercased profile text and returns
/// the first hits, capped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let keywords: Vec<String> = TECH_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .take(MAX_KEYWORDS)
        .map(|keyword| (*keyword).to_owned())
        .collect();
    log::debug!("extracted {} profile keywords", keywords.len());
    keywords
}
