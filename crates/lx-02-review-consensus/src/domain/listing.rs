//! Review listing queries and result rows.

use super::tally::Tally;
use crate::error::{ConsensusError, ConsensusResult};
use serde::{Deserialize, Serialize};
use shared_types::{Review, UserId, Word};

/// Optional listing filter. Approve-count and direction filters are
/// mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    /// Reviews with at least this many approve votes.
    MinApproves(u64),
    /// Reviews translating from `src_lang` into `dst_lang`.
    Direction { src_lang: String, dst_lang: String },
}

/// Paged listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Viewer whose own votes are reported; `None` for anonymous.
    pub viewer: Option<UserId>,
    pub filter: ReviewFilter,
    pub offset: usize,
    /// Page size; `None` uses the configured default.
    pub count: Option<usize>,
}

impl ReviewQuery {
    pub fn new(viewer: Option<UserId>) -> Self {
        Self {
            viewer,
            filter: ReviewFilter::All,
            offset: 0,
            count: None,
        }
    }

    pub fn with_filter(mut self, filter: ReviewFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn page(mut self, offset: usize, count: usize) -> Self {
        self.offset = offset;
        self.count = Some(count);
        self
    }

    /// Check the query and return the effective page size.
    pub fn validate(&self, default_count: usize, max_count: usize) -> ConsensusResult<usize> {
        let count = self.count.unwrap_or(default_count);
        if count == 0 {
            return Err(ConsensusError::InvalidRequest {
                reason: "count must be positive".into(),
            });
        }
        if count > max_count {
            return Err(ConsensusError::InvalidRequest {
                reason: format!("count {} exceeds maximum {}", count, max_count),
            });
        }
        if let ReviewFilter::Direction { src_lang, dst_lang } = &self.filter {
            if src_lang == dst_lang {
                return Err(ConsensusError::InvalidRequest {
                    reason: format!("source and target language are both {:?}", src_lang),
                });
            }
        }
        Ok(count)
    }
}

/// One open review as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub review: Review,
    pub tally: Tally,
    pub author_name: Option<String>,
    pub source_word: Word,
    pub target_word: Word,
    /// Approved translations of the source word into the target language.
    pub known_translations: Vec<Word>,
}
