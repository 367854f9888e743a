//! Closed selector sets for the pipeline: keyword strategies and bibliographic sources.
//!
//! Both sets are fixed at three members. Every artifact file name and every
//! CLI selector is derived from these; an unrecognized name is fatal rather
//! than silently skipped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CiteweaveError;

/// Keyword extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Rake,
    Yake,
    BertScore,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Rake, Strategy::Yake, Strategy::BertScore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Rake => "rake",
            Strategy::Yake => "yake",
            Strategy::BertScore => "bert_score",
        }
    }
}

impl FromStr for Strategy {
    type Err = CiteweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rake" => Ok(Strategy::Rake),
            "yake" => Ok(Strategy::Yake),
            "bert_score" => Ok(Strategy::BertScore),
            other => Err(CiteweaveError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bibliographic API a reference record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    OpenAlex,
    SemanticScholar,
    Crossref,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::OpenAlex, Source::SemanticScholar, Source::Crossref];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::OpenAlex => "openalex",
            Source::SemanticScholar => "semanticscholar",
            Source::Crossref => "crossref",
        }
    }
}

impl FromStr for Source {
    type Err = CiteweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openalex" => Ok(Source::OpenAlex),
            "semanticscholar" => Ok(Source::SemanticScholar),
            "crossref" => Ok(Source::Crossref),
            other => Err(CiteweaveError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_round_trip() {
        for s in Strategy::ALL {
            assert_eq!(s.as_str().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn test_source_round_trip() {
        for s in Source::ALL {
            assert_eq!(s.as_str().parse::<Source>().unwrap(), s);
        }
    }

    #[test]
    fn test_unknown_selector_is_fatal() {
        assert!(matches!(
            "scopus".parse::<Source>(),
            Err(CiteweaveError::UnknownSource(_))
        ));
        assert!(matches!(
            "tfidf".parse::<Strategy>(),
            Err(CiteweaveError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let v = serde_json::to_value(Strategy::BertScore).unwrap();
        assert_eq!(v, serde_json::json!("bert_score"));
        let v = serde_json::to_value(Source::SemanticScholar).unwrap();
        assert_eq!(v, serde_json::json!("semanticscholar"));
    }
}
