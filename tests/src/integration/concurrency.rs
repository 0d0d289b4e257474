//! # Concurrency
//!
//! Racing callers on the one critical section. Each test runs on the
//! multi-threaded runtime so tasks really overlap.

use super::fixtures::*;

use std::sync::Arc;

use lx_02_review_consensus::{ConsensusError, ReviewConsensusApi};
use lx_03_contrib_ledger::LedgerApi;
use rand::seq::SliceRandom;
use shared_types::{ContribAction, ReviewStatus, VoteTarget, VoteValue};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_approvals_promote_exactly_once() {
    let node = Arc::new(TestNode::new());
    let review = node.submit(AUTHOR, KITAP, BOOK).await;

    let mut voters: Vec<u64> = (100..120).collect();
    voters.shuffle(&mut rand::thread_rng());

    let handles: Vec<_> = voters
        .into_iter()
        .map(|voter| {
            let node = Arc::clone(&node);
            tokio::spawn(async move {
                node.consensus
                    .cast_vote(review, voter, VoteValue::Approve)
                    .await
            })
        })
        .collect();

    let mut promoted = Vec::new();
    let mut closed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(outcome) => promoted.extend(outcome.translation_id),
            Err(ConsensusError::NoReview { .. }) => closed += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    // The second accepted approve promotes; everyone after finds it closed.
    assert_eq!(promoted.len(), 1);
    assert_eq!(closed, 18);

    let dict = node.store.lock();
    assert_eq!(dict.translations().unwrap().len(), 1);
    assert_eq!(
        dict.votes(VoteTarget::Translation, promoted[0]).unwrap().len(),
        2
    );
    assert_eq!(
        dict.review_by_id(review).unwrap().unwrap().status,
        ReviewStatus::Approved
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_forced_promotion_races_vote() {
    let node = Arc::new(TestNode::new());
    let review = node.submit(AUTHOR, KITAP, BOOK).await;
    node.consensus
        .cast_vote(review, ALICE, VoteValue::Approve)
        .await
        .unwrap();

    let forced = {
        let node = Arc::clone(&node);
        tokio::spawn(async move { node.consensus.promote_review(review).await })
    };
    let voted = {
        let node = Arc::clone(&node);
        tokio::spawn(async move {
            node.consensus
                .cast_vote(review, BOB, VoteValue::Approve)
                .await
        })
    };

    let forced = forced.await.unwrap();
    let voted = voted.await.unwrap();

    // Whichever ran first promoted; the other saw a closed review.
    let translations = [
        forced.as_ref().ok().copied(),
        voted.as_ref().ok().and_then(|o| o.translation_id),
    ];
    assert_eq!(translations.iter().flatten().count(), 1);
    assert_eq!(node.store.lock().translations().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ingestion_during_voting_never_duplicates() {
    let node = Arc::new(TestNode::new());
    let pairs = [(KITAP, BOOK), (KITAP, KNIGA), (ZHAZU, WRITE)];
    let mut reviews = Vec::new();
    for (src, dst) in pairs {
        reviews.push(node.submit(AUTHOR, src, dst).await);
    }

    let voting = {
        let node = Arc::clone(&node);
        let reviews = reviews.clone();
        tokio::spawn(async move {
            for review in reviews {
                for voter in [ALICE, BOB] {
                    node.consensus
                        .cast_vote(review, voter, VoteValue::Approve)
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                }
            }
        })
    };
    let ingesting = {
        let node = Arc::clone(&node);
        tokio::spawn(async move {
            for _ in 0..20 {
                node.ledger.collect_contribs().await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    voting.await.unwrap();
    ingesting.await.unwrap();
    node.ledger.collect_contribs().await.unwrap();

    // Per translation: one ADD_TRANSLATION and two APPROVE_CONFIRMED.
    let entries = node.store.lock().contribs().unwrap();
    assert_eq!(entries.len(), 9);
    let adds = entries
        .iter()
        .filter(|e| e.action == ContribAction::AddTranslation)
        .count();
    assert_eq!(adds, 3);
}
