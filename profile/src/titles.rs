//! Role-title suggestion from a profile: a fixed scoring table of keywords
//! and regex patterns per title, highest score first.

use lazy_static::lazy_static;
use regex::Regex;

struct Criteria {
    title: &'static str,
    keywords: &'static [&'static str],
    patterns: &'static [&'static str],
}

const KEYWORD_POINTS: u32 = 10;
const PATTERN_POINTS: u32 = 25;
const MAX_SUGGESTIONS: usize = 4;
const MIN_SUGGESTIONS: usize = 2;
const DEFAULT_TITLES: [&str; 2] = ["Software Developer", "Full Stack Developer"];

const CRITERIA: [Criteria; 14] = [
    Criteria {
        title: "Growth Engineer",
        keywords: &["growth", "seo", "meta ads", "google ads", "analytics", "a/b test", "cro"],
        patterns: &[r"growth\s+(engineer|hacking|marketing)", r"dijital\s+pazarlama"],
    },
    Criteria {
        title: "Full Stack Developer",
        keywords: &["fullstack", "full-stack", "react", "python", "javascript", "flask", "django", "html", "css"],
        patterns: &[r"full[- ]?stack"],
    },
    Criteria {
        title: "Backend Developer",
        keywords: &["python", "flask", "django", "fastapi", "sql", "postgresql", "api", "backend"],
        patterns: &[r"backend\s+developer"],
    },
    Criteria {
        title: "Frontend Developer",
        keywords: &["react", "javascript", "html", "css", "vue", "angular", "frontend", "typescript"],
        patterns: &[r"frontend\s+developer"],
    },
    Criteria {
        title: "Automation Engineer",
        keywords: &["selenium", "automation", "playwright", "testing", "bot", "scraping", "api"],
        patterns: &[r"otomasyon", r"automation"],
    },
    Criteria {
        title: "Data Analyst",
        keywords: &["data", "analytics", "pandas", "excel", "sql", "visualization", "reporting", "veri"],
        patterns: &[r"data\s+analyst", r"veri\s+analiz"],
    },
    Criteria {
        title: "Data Engineer",
        keywords: &["data", "pipeline", "etl", "sql", "python", "spark", "airflow"],
        patterns: &[r"data\s+engineer"],
    },
    Criteria {
        title: "Python Developer",
        keywords: &["python", "django", "flask", "fastapi", "pandas"],
        patterns: &[r"python\s+developer"],
    },
    Criteria {
        title: "Software Engineer",
        keywords: &["software", "engineer", "developer", "programming", "coding"],
        patterns: &[r"software\s+engineer", r"yazılım"],
    },
    Criteria {
        title: "DevOps Engineer",
        keywords: &["docker", "kubernetes", "aws", "azure", "ci/cd", "devops", "jenkins"],
        patterns: &[r"devops"],
    },
    Criteria {
        title: "Machine Learning Engineer",
        keywords: &["machine learning", "deep learning", "tensorflow", "pytorch", "ai", "ml"],
        patterns: &[r"machine\s+learning", r"yapay\s+zeka"],
    },
    Criteria {
        title: "Product Manager",
        keywords: &["product", "roadmap", "agile", "scrum", "stakeholder"],
        patterns: &[r"product\s+manager", r"ürün\s+yönetici"],
    },
    Criteria {
        title: "Digital Marketing Specialist",
        keywords: &["marketing", "seo", "sem", "google ads", "meta ads", "social media", "content"],
        patterns: &[r"dijital\s+pazarlama", r"digital\s+marketing"],
    },
    Criteria {
        title: "E-commerce Specialist",
        keywords: &["e-commerce", "shopify", "woocommerce", "erp"],
        patterns: &[r"e-?ticaret", r"e-?commerce"],
    },
];

lazy_static! {
    static ref PATTERNS: Vec<Vec<Regex>> = CRITERIA
        .iter()
        .map(|criteria| {
            criteria
                .patterns
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect()
        })
        .collect();
}

/// Ranks likely role titles for a profile, best guess first. Always returns
/// at least two suggestions.
pub fn suggest_titles(keywords: &[String], text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let keyword_text = keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut scores: Vec<(&'static str, u32)> = Vec::new();
    for (criteria, patterns) in CRITERIA.iter().zip(PATTERNS.iter()) {
        let mut score = 0;
        for keyword in criteria.keywords {
            if keyword_text.contains(keyword) || haystack.contains(keyword) {
                score += KEYWORD_POINTS;
            }
        }
        for pattern in patterns {
            if pattern.is_match(&haystack) {
                score += PATTERN_POINTS;
            }
        }
        if score > 0 {
            scores.push((criteria.title, score));
        }
    }
    // stable sort keeps table order between equal scores
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let mut suggestions: Vec<String> = scores
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(title, _)| title.to_owned())
        .collect();
    for default in DEFAULT_TITLES {
        if suggestions.len() >= MIN_SUGGESTIONS {
            break;
        }
        if !suggestions.iter().any(|title| title == default) {
            suggestions.push(default.to_owned());
        }
    }
    suggestions
}

/// First suggestion, with a safe fallback.
pub fn primary_title(keywords: &[String], text: &str) -> String {
    suggest_titles(keywords, text)
        .into_iter()
        .next()
        .unwrap_or_else(|| "Software Developer".to_owned())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extract_keywords;

    const PYTHON_CV: &str = "Experienced Python developer. Built REST APIs with \
        Django and FastAPI, containerized services with Docker.";

    #[test]
    fn test_obvious_profile_ranks_its_title_first() {
        let keywords = extract_keywords(PYTHON_CV);
        let suggestions = suggest_titles(&keywords, PYTHON_CV);
        assert_eq!(suggestions[0], "Python Developer");
        assert!(suggestions.len() >= MIN_SUGGESTIONS);
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_empty_profile_gets_defaults() {
        let suggestions = suggest_titles(&[], "");
        assert_eq!(
            suggestions,
            vec!["Software Developer".to_owned(), "Full Stack Developer".to_owned()]
        );
    }

    #[test]
    fn test_primary_title_never_empty() {
        assert_eq!(primary_title(&[], ""), "Software Developer");
        assert!(!primary_title(&[], "devops kubernetes docker").is_empty());
    }
}
