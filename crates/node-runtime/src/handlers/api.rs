//! # API Handler
//!
//! Transport-independent request dispatch for the consensus and ledger
//! operations. A front end (HTTP, RPC) hands over the method name, the raw
//! `Authorization` header and JSON params, and gets back a status code plus
//! a JSON body.
//!
//! ## Reply Shapes
//!
//! ```text
//! 200  operation result
//! 400  {"error": "duplicate" | "not found" | "invalid_src" | "invalid_dst"
//!               | "no review" | "invalid request"}
//! 401  {"error": "unauthorized"}
//! 404  {"error": "unknown method"}
//! 500  {"error": "internal error"}
//! ```

use crate::adapters::identity::{parse_bearer, IdentityResolver};
use crate::handlers::jobs::{JobError, JobRunner};
use lx_01_dictionary_storage::TimeSource;
use lx_02_review_consensus::{
    ConsensusError, ReviewConsensusApi, ReviewFilter, ReviewQuery, SubmitReview,
};
use lx_03_contrib_ledger::{LedgerApi, LedgerError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{ReviewId, Timestamp, UserId, VoteValue, WordId};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Status code and JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    fn ok(body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!("[node] failed to encode reply: {}", e);
                Self::internal()
            }
        }
    }

    fn error(status: u16, reason: &str) -> Self {
        Self {
            status,
            body: json!({ "error": reason }),
        }
    }

    fn unauthorized() -> Self {
        Self::error(401, "unauthorized")
    }

    fn internal() -> Self {
        Self::error(500, "internal error")
    }

    fn invalid(reason: &str) -> Self {
        debug!("[node] invalid request: {}", reason);
        Self::error(400, "invalid request")
    }
}

impl From<ConsensusError> for ApiReply {
    fn from(e: ConsensusError) -> Self {
        if e.is_user_facing() {
            debug!("[node] rejected: {}", e);
            Self::error(400, e.reason())
        } else {
            error!("[node] consensus failure: {}", e);
            Self::internal()
        }
    }
}

impl From<LedgerError> for ApiReply {
    fn from(e: LedgerError) -> Self {
        error!("[node] ledger failure: {}", e);
        Self::internal()
    }
}

impl From<JobError> for ApiReply {
    fn from(e: JobError) -> Self {
        match e {
            JobError::Unauthorized(_) => Self::unauthorized(),
            JobError::UnknownJob(_) => Self::error(400, "invalid request"),
            JobError::Ledger(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitParams {
    source_word_id: WordId,
    target_word_id: WordId,
    #[serde(default)]
    reference: String,
}

#[derive(Debug, Deserialize)]
struct ReviewParams {
    review_id: ReviewId,
}

#[derive(Debug, Deserialize)]
struct VoteParams {
    review_id: ReviewId,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    offset: usize,
    count: Option<usize>,
    min_approves: Option<u64>,
    src_lang: Option<String>,
    dst_lang: Option<String>,
}

impl ListParams {
    fn filter(self) -> Result<ReviewFilter, &'static str> {
        match (self.min_approves, self.src_lang, self.dst_lang) {
            (None, None, None) => Ok(ReviewFilter::All),
            (Some(n), None, None) => Ok(ReviewFilter::MinApproves(n)),
            (None, Some(src_lang), Some(dst_lang)) => {
                Ok(ReviewFilter::Direction { src_lang, dst_lang })
            }
            (None, _, _) => Err("src_lang and dst_lang must be given together"),
            (Some(_), _, _) => Err("min_approves cannot be combined with a direction"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TriggerParams {
    job: String,
    timestamp: Timestamp,
    signature: String,
}

fn parse<P: DeserializeOwned>(params: &Value) -> Result<P, ApiReply> {
    serde_json::from_value(params.clone()).map_err(|e| ApiReply::invalid(&e.to_string()))
}

/// Routes API calls to the consensus service, the ledger and the job runner.
pub struct ApiHandler<C, L, I>
where
    C: ReviewConsensusApi,
    L: LedgerApi,
    I: IdentityResolver,
{
    consensus: Arc<C>,
    ledger: Arc<L>,
    jobs: Arc<JobRunner<L>>,
    identity: Arc<I>,
    clock: Arc<dyn TimeSource>,
}

impl<C, L, I> ApiHandler<C, L, I>
where
    C: ReviewConsensusApi,
    L: LedgerApi,
    I: IdentityResolver,
{
    pub fn new(
        consensus: Arc<C>,
        ledger: Arc<L>,
        jobs: Arc<JobRunner<L>>,
        identity: Arc<I>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            consensus,
            ledger,
            jobs,
            identity,
            clock,
        }
    }

    /// Dispatch one call. Never fails; errors are encoded in the reply.
    pub async fn process(
        &self,
        method: &str,
        authorization: Option<&str>,
        params: &Value,
    ) -> ApiReply {
        let result = match method {
            "submit_review" => self.submit_review(authorization, params).await,
            "discard_review" => self.discard_review(authorization, params).await,
            "cast_vote" => self.vote(authorization, params, false).await,
            "retract_vote" => self.vote(authorization, params, true).await,
            "list_reviews" => self.list_reviews(authorization, params).await,
            "get_rankings" => self
                .ledger
                .get_rankings()
                .await
                .map(ApiReply::ok)
                .map_err(Into::into),
            "get_feed" => self
                .ledger
                .get_feed()
                .await
                .map(ApiReply::ok)
                .map_err(Into::into),
            "trigger_job" => self.trigger_job(params).await,
            _ => {
                warn!("[node] unknown method {:?}", method);
                Err(ApiReply::error(404, "unknown method"))
            }
        };
        result.unwrap_or_else(|reply| reply)
    }

    /// Caller identity. A missing header is anonymous; a bad one is rejected.
    fn viewer(&self, authorization: Option<&str>) -> Result<Option<UserId>, ApiReply> {
        match authorization {
            None => Ok(None),
            Some(header) => self.authenticate(Some(header)).map(Some),
        }
    }

    fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, ApiReply> {
        authorization
            .and_then(parse_bearer)
            .and_then(|token| self.identity.resolve(token))
            .ok_or_else(ApiReply::unauthorized)
    }

    async fn submit_review(
        &self,
        auth: Option<&str>,
        params: &Value,
    ) -> Result<ApiReply, ApiReply> {
        let author = self.authenticate(auth)?;
        let p: SubmitParams = parse(params)?;
        let review = self
            .consensus
            .submit_review(
                author,
                SubmitReview {
                    source_word_id: p.source_word_id,
                    target_word_id: p.target_word_id,
                    reference: p.reference,
                },
            )
            .await?;
        Ok(ApiReply::ok(review))
    }

    async fn discard_review(
        &self,
        auth: Option<&str>,
        params: &Value,
    ) -> Result<ApiReply, ApiReply> {
        let author = self.authenticate(auth)?;
        let p: ReviewParams = parse(params)?;
        self.consensus.discard_review(author, p.review_id).await?;
        Ok(ApiReply::ok(json!({ "review_id": p.review_id })))
    }

    async fn vote(
        &self,
        auth: Option<&str>,
        params: &Value,
        retract: bool,
    ) -> Result<ApiReply, ApiReply> {
        let voter = self.authenticate(auth)?;
        let p: VoteParams = parse(params)?;
        let value: VoteValue = p
            .value
            .parse()
            .map_err(|e: shared_types::ParseEnumError| ApiReply::invalid(&e.to_string()))?;

        let outcome = if retract {
            self.consensus.retract_vote(p.review_id, voter, value).await?
        } else {
            self.consensus.cast_vote(p.review_id, voter, value).await?
        };
        Ok(ApiReply::ok(outcome))
    }

    async fn list_reviews(
        &self,
        auth: Option<&str>,
        params: &Value,
    ) -> Result<ApiReply, ApiReply> {
        let viewer = self.viewer(auth)?;
        let p: ListParams = if params.is_null() {
            ListParams::default()
        } else {
            parse(params)?
        };
        let (offset, count) = (p.offset, p.count);
        let filter = p.filter().map_err(ApiReply::invalid)?;

        let mut query = ReviewQuery::new(viewer).with_filter(filter);
        query.offset = offset;
        query.count = count;

        let reviews = self.consensus.list_reviews(query).await?;
        Ok(ApiReply::ok(reviews))
    }

    async fn trigger_job(&self, params: &Value) -> Result<ApiReply, ApiReply> {
        let p: TriggerParams = parse(params)?;
        let report = self
            .jobs
            .trigger(&p.job, p.timestamp, &p.signature, self.clock.now())
            .await?;
        Ok(ApiReply::ok(report))
    }
}
