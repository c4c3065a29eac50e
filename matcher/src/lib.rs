//! Profile-to-posting similarity scoring.
//!
//! Two independent signals over normalized text: a tf-idf weighted cosine
//! built from just the two documents at hand, and a directional token
//! coverage ratio. The blend keeps very short postings scoreable where the
//! vector signal starves; a separate keyword variant ranks postings that are
//! little more than a title.

mod text;

pub use text::normalize;

use job_scraper::JobRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

const TFIDF_WEIGHT: f64 = 0.6;
const OVERLAP_WEIGHT: f64 = 0.4;
/// Added per search-role word found verbatim in a posting title.
const ROLE_WORD_BONUS: f64 = 15.0;
/// Role words this short ("of", "and") prove nothing.
const ROLE_WORD_MIN_CHARS: usize = 3;
/// Flat bonus when a posting has body text and at least one keyword hit.
const DESCRIPTION_BONUS: f64 = 10.0;

/// A posting plus its match confidence in `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJob {
    pub job: JobRecord,
    pub match_score: f64,
}

/// Cosine similarity of tf-idf vectors built over exactly the two input
/// documents, with unigram and bigram vocabulary, as a 0-100 percentage.
pub fn tfidf_score(profile_text: &str, job_text: &str) -> f64 {
    let profile = normalize(profile_text);
    let job = normalize(job_text);
    if profile.is_empty() || job.is_empty() {
        return 0.0;
    }
    let profile_terms = terms(&profile);
    let job_terms = terms(&job);
    let profile_counts = term_counts(&profile_terms);
    let job_counts = term_counts(&job_terms);

    let vocabulary: HashSet<&str> = profile_counts
        .keys()
        .chain(job_counts.keys())
        .copied()
        .collect();

    let mut dot = 0.0;
    let mut profile_norm = 0.0;
    let mut job_norm = 0.0;
    for term in vocabulary {
        let tf_profile = profile_counts.get(term).copied().unwrap_or(0.0);
        let tf_job = job_counts.get(term).copied().unwrap_or(0.0);
        let df = (tf_profile > 0.0) as u8 + (tf_job > 0.0) as u8;
        // Smoothed idf over the two-document corpus: terms both sides share
        // weigh less than terms distinctive to one side.
        let idf = (3.0 / (1.0 + df as f64)).ln() + 1.0;
        let weight_profile = tf_profile * idf;
        let weight_job = tf_job * idf;
        dot += weight_profile * weight_job;
        profile_norm += weight_profile * weight_profile;
        job_norm += weight_job * weight_job;
    }
    if profile_norm == 0.0 || job_norm == 0.0 {
        return 0.0;
    }
    let cosine = dot / (profile_norm.sqrt() * job_norm.sqrt());
    round1((cosine * 100.0).clamp(0.0, 100.0))
}

/// Fraction of the posting's vocabulary covered by the profile, 0-100.
/// Directional on purpose: a short posting fully covered by a long profile
/// scores high, not the other way around.
pub fn overlap_score(profile_text: &str, job_text: &str) -> f64 {
    let profile = normalize(profile_text);
    let job = normalize(job_text);
    if profile.is_empty() || job.is_empty() {
        return 0.0;
    }
    let profile_tokens = text::token_set(&profile);
    let job_tokens = text::token_set(&job);
    if job_tokens.is_empty() {
        return 0.0;
    }
    let shared = profile_tokens.intersection(&job_tokens).count();
    round1(((shared as f64 / job_tokens.len() as f64) * 100.0).min(100.0))
}

/// Blend of the two signals. The vector signal carries more weight; the raw
/// coverage ratio keeps title-only postings from scoring zero.
pub fn combined_score(profile_text: &str, job_text: &str) -> f64 {
    round1(
        TFIDF_WEIGHT * tfidf_score(profile_text, job_text)
            + OVERLAP_WEIGHT * overlap_score(profile_text, job_text),
    )
}

/// Keyword-coverage ranking for postings without enough text for the
/// similarity methods: base coverage of the profile keywords, a bonus per
/// role word found in the title, and a flat bonus for a confirmed
/// description, capped at 100.
pub fn keyword_rank_score(keywords: &[String], role: &str, job: &JobRecord) -> f64 {
    let title = job.title.to_lowercase();
    let combined = job.combined_text().to_lowercase();
    let matches = keywords
        .iter()
        .filter(|keyword| combined.contains(&keyword.to_lowercase()))
        .count();
    let base = if keywords.is_empty() {
        0.0
    } else {
        matches as f64 / keywords.len() as f64 * 100.0
    };
    let role_bonus = role
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > ROLE_WORD_MIN_CHARS && title.contains(*word))
        .count() as f64
        * ROLE_WORD_BONUS;
    let description_bonus = if !job.description.is_empty() && matches > 0 {
        DESCRIPTION_BONUS
    } else {
        0.0
    };
    round1((base + role_bonus + description_bonus).min(100.0))
}

/// Scores one crawl's merged records against the profile and sorts them best
/// first. Postings with body text get the blended similarity score; bare
/// title/company postings fall back to the keyword variant.
pub fn rank(
    profile_text: &str,
    keywords: &[String],
    role: &str,
    records: Vec<JobRecord>,
) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = records
        .into_iter()
        .map(|job| {
            let match_score = if job.description.is_empty() {
                keyword_rank_score(keywords, role, &job)
            } else {
                combined_score(profile_text, &job.combined_text())
            };
            ScoredJob { job, match_score }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    log::debug!("ranked {} postings", scored.len());
    scored
}

/// Unigram plus adjacent-bigram terms of a normalized text.
fn terms(normalized: &str) -> Vec<String> {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let mut terms: Vec<String> = tokens.iter().map(|token| (*token).to_owned()).collect();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

fn term_counts(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
