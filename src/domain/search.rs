//! Search ranking hints: path globs compiled with fnmatch semantics.

use regex::Regex;
use serde::Serialize;

use crate::domain::AppError;
use crate::domain::manifest::{RankingWeight, Search};

/// A compiled `search.ranking` / `search.ignore` glob.
///
/// Supports `*`, `?`, `[...]` and `[!...]`. The whole page path must match.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, AppError> {
        let invalid = |reason: String| AppError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if pattern.trim().is_empty() {
            return Err(invalid("pattern is empty".into()));
        }

        let translated = translate(pattern).map_err(invalid)?;
        let regex = Regex::new(&translated).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { source: pattern.to_string(), regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, page: &str) -> bool {
        self.regex.is_match(normalize_page(page))
    }
}

fn normalize_page(page: &str) -> &str {
    page.trim_start_matches('/')
}

fn translate(pattern: &str) -> Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push_str(".*");
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i + 1;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                // A leading `]` is part of the class, not its end.
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(format!("unterminated character class at position {}", i));
                }
                out.push_str(&translate_class(&chars[i + 1..j]));
                i = j;
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
        i += 1;
    }

    out.push('$');
    Ok(out)
}

fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.first() {
        Some('!') => (true, &body[1..]),
        _ => (false, body),
    };

    let mut out = String::from("[");
    if negated {
        out.push('^');
    }
    for (idx, &c) in body.iter().enumerate() {
        let is_edge = idx == 0 || idx + 1 == body.len();
        let after_dash = idx > 0 && body[idx - 1] == '-';
        match c {
            '\\' | '[' | ']' | '^' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            '-' if is_edge || after_dash => out.push_str("\\-"),
            _ => out.push(c),
        }
    }
    out.push(']');
    out
}

/// Outcome of ranking a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageRank {
    /// The page is excluded from the index by `search.ignore`.
    Ignored { pattern: String },
    /// The page is indexed with the given weight; `pattern` is the deciding rule.
    Ranked { weight: i8, pattern: Option<String> },
}

/// Compiled `search` section.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    ranking: Vec<(PathPattern, RankingWeight)>,
    ignore: Vec<PathPattern>,
}

impl SearchIndex {
    pub fn compile(search: Option<&Search>) -> Result<Self, AppError> {
        let Some(search) = search else {
            return Ok(Self::default());
        };

        let ranking = search
            .ranking
            .iter()
            .map(|rule| Ok((PathPattern::new(&rule.pattern)?, rule.weight)))
            .collect::<Result<Vec<_>, AppError>>()?;
        let ignore =
            search.ignore.iter().map(|p| PathPattern::new(p)).collect::<Result<Vec<_>, _>>()?;

        Ok(Self { ranking, ignore })
    }

    /// Rank a page path. When several ranking patterns match, the last one declared wins.
    pub fn rank(&self, page: &str) -> PageRank {
        if let Some(pattern) = self.ignore.iter().find(|pattern| pattern.matches(page)) {
            return PageRank::Ignored { pattern: pattern.as_str().to_string() };
        }

        match self.ranking.iter().rev().find(|(pattern, _)| pattern.matches(page)) {
            Some((pattern, weight)) => PageRank::Ranked {
                weight: weight.value(),
                pattern: Some(pattern.as_str().to_string()),
            },
            None => PageRank::Ranked { weight: 0, pattern: None },
        }
    }
}
