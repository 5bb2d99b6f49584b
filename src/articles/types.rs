//! Article and feedback record definitions.
//!
//! [`Article`] is the read shape (never carries `content`), [`NewArticle`] is
//! the ingestion payload with optional scores, and [`Scores`] groups the nine
//! classifier outputs as three triads.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Default for the first two members of each score triad.
pub const DEFAULT_TRIAD_SCORE: f64 = 0.333;
/// Default for the third member of each score triad.
pub const DEFAULT_TRIAD_LAST_SCORE: f64 = 0.334;

/// Columns selected by every article read, in [`Article::from_row`] order.
pub(crate) const ARTICLE_COLUMNS: &str = "id, title, url, domain, published_at, \
     epistemic_opinion_score, epistemic_mixed_score, epistemic_facts_score, \
     emotive_triggering_score, emotive_mixed_score, emotive_calm_score, \
     density_fluff_score, density_standard_score, density_deep_score";

/// The nine precomputed classifier scores, conventionally in `[0.0, 1.0]`.
///
/// Triads are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub epistemic_opinion_score: f64,
    pub epistemic_mixed_score: f64,
    pub epistemic_facts_score: f64,
    pub emotive_triggering_score: f64,
    pub emotive_mixed_score: f64,
    pub emotive_calm_score: f64,
    pub density_fluff_score: f64,
    pub density_standard_score: f64,
    pub density_deep_score: f64,
}

impl Default for Scores {
    fn default() -> Self {
        Self {
            epistemic_opinion_score: DEFAULT_TRIAD_SCORE,
            epistemic_mixed_score: DEFAULT_TRIAD_SCORE,
            epistemic_facts_score: DEFAULT_TRIAD_LAST_SCORE,
            emotive_triggering_score: DEFAULT_TRIAD_SCORE,
            emotive_mixed_score: DEFAULT_TRIAD_SCORE,
            emotive_calm_score: DEFAULT_TRIAD_LAST_SCORE,
            density_fluff_score: DEFAULT_TRIAD_SCORE,
            density_standard_score: DEFAULT_TRIAD_SCORE,
            density_deep_score: DEFAULT_TRIAD_LAST_SCORE,
        }
    }
}

/// A stored article as returned by reads. `content` is write-only and absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub url: String,
    pub domain: String,
    /// Publication timestamp as supplied at ingestion, or `None`.
    pub published_at: Option<String>,
    #[serde(flatten)]
    pub scores: Scores,
}

impl Article {
    /// Map a row selected with [`ARTICLE_COLUMNS`].
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            domain: row.get(3)?,
            published_at: row.get(4)?,
            scores: Scores {
                epistemic_opinion_score: row.get(5)?,
                epistemic_mixed_score: row.get(6)?,
                epistemic_facts_score: row.get(7)?,
                emotive_triggering_score: row.get(8)?,
                emotive_mixed_score: row.get(9)?,
                emotive_calm_score: row.get(10)?,
                density_fluff_score: row.get(11)?,
                density_standard_score: row.get(12)?,
                density_deep_score: row.get(13)?,
            },
        })
    }
}

/// Ingestion payload. Every field is optional on the wire so that validation
/// can name all missing required fields at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewArticle {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epistemic_opinion_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epistemic_mixed_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epistemic_facts_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotive_triggering_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotive_mixed_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotive_calm_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_fluff_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_standard_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_deep_score: Option<f64>,
}

impl NewArticle {
    /// Payload with the four required fields set and everything else defaulted.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            url: Some(url.into()),
            domain: Some(domain.into()),
            ..Default::default()
        }
    }

    /// Resolve each score independently against its triad default.
    pub fn resolved_scores(&self) -> Scores {
        let d = Scores::default();
        Scores {
            epistemic_opinion_score: self.epistemic_opinion_score.unwrap_or(d.epistemic_opinion_score),
            epistemic_mixed_score: self.epistemic_mixed_score.unwrap_or(d.epistemic_mixed_score),
            epistemic_facts_score: self.epistemic_facts_score.unwrap_or(d.epistemic_facts_score),
            emotive_triggering_score: self.emotive_triggering_score.unwrap_or(d.emotive_triggering_score),
            emotive_mixed_score: self.emotive_mixed_score.unwrap_or(d.emotive_mixed_score),
            emotive_calm_score: self.emotive_calm_score.unwrap_or(d.emotive_calm_score),
            density_fluff_score: self.density_fluff_score.unwrap_or(d.density_fluff_score),
            density_standard_score: self.density_standard_score.unwrap_or(d.density_standard_score),
            density_deep_score: self.density_deep_score.unwrap_or(d.density_deep_score),
        }
    }
}

/// A single user correction on one scoring axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub article_id: Option<String>,
    pub axis: Option<String>,
    pub user_score: Option<i64>,
}

impl FeedbackRequest {
    pub fn new(article_id: impl Into<String>, axis: impl Into<String>, user_score: i64) -> Self {
        Self {
            article_id: Some(article_id.into()),
            axis: Some(axis.into()),
            user_score: Some(user_score),
        }
    }
}
