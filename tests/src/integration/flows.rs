//! # Integration Test Flows
//!
//! Full lifecycle of a candidate translation across lx-02 and lx-03:
//!
//! 1. **Review → Translation**: approval quorum promotes and migrates votes
//! 2. **Review → Rejection**: disapproval quorum credits the disapprovers
//! 3. **Ledger → Rankings**: both boards rebuilt from the same entries
//! 4. **Node API**: the same flow through `node-runtime` dispatch

use super::fixtures::*;

use lx_02_review_consensus::{ConsensusError, ReviewConsensusApi, ReviewQuery};
use lx_03_contrib_ledger::LedgerApi;
use shared_types::{ContribAction, RankingBoard, ReviewStatus, VoteTarget, VoteValue};

// =============================================================================
// REVIEW → TRANSLATION
// =============================================================================

#[tokio::test]
async fn test_worked_example_kitap_book() {
    let node = TestNode::new();
    let r1 = node.submit(AUTHOR, KITAP, BOOK).await;

    // A approves: (1, 0), still NEW
    let first = node
        .consensus
        .cast_vote(r1, ALICE, VoteValue::Approve)
        .await
        .unwrap();
    assert_eq!((first.tally.approves, first.tally.disapproves), (1, 0));
    assert_eq!(first.status, ReviewStatus::New);
    assert!(!first.gone);

    // B approves: (2, 0), APPROVED with a translation
    node.clock.advance(60);
    let second = node
        .consensus
        .cast_vote(r1, BOB, VoteValue::Approve)
        .await
        .unwrap();
    assert_eq!((second.tally.approves, second.tally.disapproves), (2, 0));
    assert_eq!(second.status, ReviewStatus::Approved);
    assert!(second.gone);
    let t1 = second.translation_id.expect("promotion creates a translation");

    let dict = node.store.lock();
    let review = dict.review_by_id(r1).unwrap().unwrap();
    let translation = dict.translation_by_id(t1).unwrap().unwrap();
    assert_eq!(review.status, ReviewStatus::Approved);
    assert_eq!(translation.reference, review.reference);
    assert_eq!(translation.author_user_id, AUTHOR);
    assert_eq!(
        (translation.source_word_id, translation.target_word_id),
        (KITAP, BOOK)
    );

    let votes = dict.votes(VoteTarget::Translation, t1).unwrap();
    let voters: Vec<_> = votes.iter().map(|v| (v.voter_user_id, v.value)).collect();
    assert_eq!(
        voters,
        vec![(ALICE, VoteValue::Approve), (BOB, VoteValue::Approve)]
    );
    // Migrated votes keep their original timestamps.
    assert_eq!(votes[0].created_at, NOW);
    assert_eq!(votes[1].created_at, NOW + 60);
}

#[tokio::test]
async fn test_promoted_pair_cannot_be_resubmitted() {
    let node = TestNode::new();
    let r1 = node.submit(AUTHOR, KITAP, BOOK).await;
    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(r1, voter, VoteValue::Approve)
            .await
            .unwrap();
    }

    let again = node
        .consensus
        .submit_review(
            CAROL,
            lx_02_review_consensus::SubmitReview {
                source_word_id: KITAP,
                target_word_id: BOOK,
                reference: String::new(),
            },
        )
        .await;
    assert_eq!(again.unwrap_err().reason(), "duplicate");

    // Voting on the closed review is refused.
    let late = node.consensus.cast_vote(r1, CAROL, VoteValue::Approve).await;
    assert!(matches!(late, Err(ConsensusError::NoReview { .. })));
}

// =============================================================================
// REVIEW → REJECTION
// =============================================================================

#[tokio::test]
async fn test_rejection_credits_disapprovers() {
    let node = TestNode::new();
    let review = node.submit(AUTHOR, ZHAZU, WRITE).await;

    node.consensus
        .cast_vote(review, ALICE, VoteValue::Approve)
        .await
        .unwrap();
    node.consensus
        .cast_vote(review, BOB, VoteValue::Disapprove)
        .await
        .unwrap();
    let outcome = node
        .consensus
        .cast_vote(review, CAROL, VoteValue::Disapprove)
        .await
        .unwrap();
    assert_eq!(outcome.status, ReviewStatus::Disapproved);
    assert!(outcome.translation_id.is_none());

    assert_eq!(node.ledger.collect_contribs().await.unwrap(), 0);
    assert_eq!(node.ledger.collect_disapprove_contribs().await.unwrap(), 2);

    let entries = node.store.lock().contribs().unwrap();
    let credited: Vec<_> = entries.iter().map(|e| (e.user_id, e.action)).collect();
    assert_eq!(
        credited,
        vec![
            (BOB, ContribAction::DisapproveConfirmed),
            (CAROL, ContribAction::DisapproveConfirmed),
        ]
    );
    assert!(entries.iter().all(|e| e.review_id == review && e.translation_id == 0));
}

// =============================================================================
// LEDGER → RANKINGS
// =============================================================================

#[tokio::test]
async fn test_promotions_and_rejections_feed_rankings() {
    let node = TestNode::new();

    let approved = node.submit(AUTHOR, KITAP, BOOK).await;
    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(approved, voter, VoteValue::Approve)
            .await
            .unwrap();
    }
    let rejected = node.submit(ALICE, ZHAZU, WRITE).await;
    for voter in [BOB, CAROL] {
        node.consensus
            .cast_vote(rejected, voter, VoteValue::Disapprove)
            .await
            .unwrap();
    }

    assert_eq!(node.ledger.collect_contribs().await.unwrap(), 3);
    assert_eq!(node.ledger.collect_disapprove_contribs().await.unwrap(), 2);
    let sizes = node.ledger.calculate_rankings().await.unwrap();
    assert_eq!((sizes.alltime, sizes.week), (4, 4));

    let rankings = node.ledger.get_rankings().await.unwrap();
    let order: Vec<_> = rankings
        .alltime
        .iter()
        .map(|r| (r.display_name.as_str(), r.contribs))
        .collect();
    // bob: approve + disapprove; author: 1 translation; carol: 1 disapprove; alice: 1 approve
    assert_eq!(
        order,
        vec![("bob", 2), ("author", 1), ("carol", 1), ("alice", 1)]
    );
    assert_eq!(rankings.alltime, rankings.week);

    let stored = node
        .store
        .lock()
        .ranking(RankingBoard::AllTime, 100)
        .unwrap();
    assert_eq!(stored, rankings.alltime);
}

#[tokio::test]
async fn test_listing_reflects_lifecycle() {
    let node = TestNode::new();
    let open = node.submit(AUTHOR, ZHAZU, WRITE).await;
    let promoted = node.submit(AUTHOR, KITAP, BOOK).await;
    node.clock.advance(1);
    let discarded = node.submit(AUTHOR, KITAP, KNIGA).await;

    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(promoted, voter, VoteValue::Approve)
            .await
            .unwrap();
    }
    node.consensus
        .discard_review(AUTHOR, discarded)
        .await
        .unwrap();

    let listed = node
        .consensus
        .list_reviews(ReviewQuery::new(Some(ALICE)))
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.review.review_id).collect();
    assert_eq!(ids, vec![open]);
    assert_eq!(listed[0].author_name.as_deref(), Some("author"));
}

// =============================================================================
// NODE API
// =============================================================================

#[tokio::test]
async fn test_node_api_end_to_end() {
    use node_runtime::container::{NodeConfig, SubsystemContainer};
    use serde_json::json;
    use shared_types::{User, Word};

    let mut config = NodeConfig::default();
    config.security.api_tokens = [("a", AUTHOR), ("b", ALICE), ("c", BOB)]
        .into_iter()
        .map(|(t, u)| (t.to_string(), u))
        .collect();
    let container = SubsystemContainer::in_memory(config);
    container.store.with(|dict| {
        dict.put_word(&Word::new(KITAP, "кітап", "kk")).unwrap();
        dict.put_word(&Word::new(BOOK, "book", "en")).unwrap();
        for (id, name) in [(AUTHOR, "author"), (ALICE, "alice"), (BOB, "bob")] {
            dict.put_user(&User {
                id,
                display_name: name.into(),
            })
            .unwrap();
        }
    });

    let api = &container.api;
    let submitted = api
        .process(
            "submit_review",
            Some("Bearer a"),
            &json!({"source_word_id": KITAP, "target_word_id": BOOK, "reference": "r"}),
        )
        .await;
    assert_eq!(submitted.status, 200);
    let review_id = submitted.body["review_id"].as_u64().unwrap();

    let vote = json!({"review_id": review_id, "value": "APPROVE"});
    api.process("cast_vote", Some("Bearer b"), &vote).await;
    let last = api.process("cast_vote", Some("Bearer c"), &vote).await;
    assert_eq!(last.body["status"], "APPROVED");
    assert_eq!(last.body["gone"], true);

    for job in ["collect_contribs", "calculate_rankings"] {
        let report = container.jobs.run(job.parse().unwrap()).await.unwrap();
        assert_eq!(report.job.as_str(), job);
    }

    let rankings = api
        .process("get_rankings", None, &serde_json::Value::Null)
        .await;
    assert_eq!(rankings.body["alltime"].as_array().unwrap().len(), 3);
}
