//! # Ledger Ingestion and Ranking Windows
//!
//! Exercises lx-03 against state produced by real lx-02 calls rather than
//! rows written directly into storage.

use super::fixtures::*;

use lx_02_review_consensus::ReviewConsensusApi;
use lx_03_contrib_ledger::LedgerApi;
use shared_types::{ContribAction, VoteValue, Word};

const DAY: u64 = 24 * 3600;

/// Promote `count` fresh kk→en pairs, each approved by ALICE and BOB.
async fn promote_many(node: &TestNode, count: u64) {
    node.store.with(|dict| {
        for i in 0..count {
            dict.put_word(&Word::new(1_000 + i, format!("сөз{i}"), "kk"))
                .unwrap();
            dict.put_word(&Word::new(2_000 + i, format!("word{i}"), "en"))
                .unwrap();
        }
    });
    for i in 0..count {
        let review = node.submit(AUTHOR, 1_000 + i, 2_000 + i).await;
        for voter in [ALICE, BOB] {
            node.consensus
                .cast_vote(review, voter, VoteValue::Approve)
                .await
                .unwrap();
        }
    }
}

#[tokio::test]
async fn test_ingestion_pages_through_backlog() {
    let node = TestNode::new();
    promote_many(&node, 23).await;

    // 10 translations per run, three entries each.
    let runs: Vec<usize> = {
        let mut runs = Vec::new();
        loop {
            let appended = node.ledger.collect_contribs().await.unwrap();
            runs.push(appended);
            if appended == 0 {
                break;
            }
        }
        runs
    };
    assert_eq!(runs, vec![30, 30, 9, 0]);

    let entries = node.store.lock().contribs().unwrap();
    let adds = entries
        .iter()
        .filter(|e| e.action == ContribAction::AddTranslation)
        .count();
    assert_eq!(adds, 23);
}

#[tokio::test]
async fn test_week_board_follows_the_clock() {
    let node = TestNode::new();

    // Old activity, eight days before the second batch.
    let old = node.submit(AUTHOR, KITAP, BOOK).await;
    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(old, voter, VoteValue::Approve)
            .await
            .unwrap();
    }

    node.clock.advance(8 * DAY);
    let recent = node.submit(CAROL, ZHAZU, WRITE).await;
    for voter in [DAVE, BOB] {
        node.consensus
            .cast_vote(recent, voter, VoteValue::Approve)
            .await
            .unwrap();
    }

    node.ledger.collect_contribs().await.unwrap();
    let sizes = node.ledger.calculate_rankings().await.unwrap();
    assert_eq!(sizes.alltime, 5);
    assert_eq!(sizes.week, 3);

    let rankings = node.ledger.get_rankings().await.unwrap();
    let week: Vec<_> = rankings.week.iter().map(|r| r.user_id).collect();
    // carol added a translation; bob and dave approved. Ties on
    // (contribs, translations, disapproves) fall back to user id.
    assert_eq!(week, vec![CAROL, BOB, DAVE]);
    assert_eq!(rankings.alltime[0].user_id, BOB);
    assert_eq!(rankings.alltime[0].contribs, 2);
}

#[tokio::test]
async fn test_recomputation_is_stable() {
    let node = TestNode::new();
    promote_many(&node, 4).await;
    node.ledger.collect_contribs().await.unwrap();

    node.ledger.calculate_rankings().await.unwrap();
    let first = node.ledger.get_rankings().await.unwrap();
    node.ledger.calculate_rankings().await.unwrap();
    let second = node.ledger.get_rankings().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_feed_window_and_order() {
    let node = TestNode::new();
    let older = node.submit(AUTHOR, KITAP, BOOK).await;
    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(older, voter, VoteValue::Approve)
            .await
            .unwrap();
    }
    node.clock.advance(DAY);
    let newer = node.submit(AUTHOR, ZHAZU, WRITE).await;
    for voter in [ALICE, CAROL] {
        node.consensus
            .cast_vote(newer, voter, VoteValue::Approve)
            .await
            .unwrap();
    }

    let feed = node.ledger.get_feed().await.unwrap();
    let words: Vec<_> = feed.iter().map(|f| f.source_word.as_str()).collect();
    assert_eq!(words, vec!["жазу", "кітап"]);
    assert_eq!(feed[0].votes.len(), 2);
    assert_eq!(feed[0].votes[1].voter_name.as_deref(), Some("carol"));

    // Two days later only the newer translation is still inside the window.
    node.clock.advance(DAY + 1);
    let feed = node.ledger.get_feed().await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].target_word, "write");
}

#[tokio::test]
async fn test_disapprove_scan_is_a_high_water_mark() {
    let node = TestNode::new();
    let first = node.submit(AUTHOR, KITAP, BOOK).await;
    let second = node.submit(AUTHOR, ZHAZU, WRITE).await;

    for voter in [ALICE, BOB] {
        node.consensus
            .cast_vote(second, voter, VoteValue::Disapprove)
            .await
            .unwrap();
    }
    assert_eq!(node.ledger.collect_disapprove_contribs().await.unwrap(), 2);

    // A lower-id review rejected after the mark moved past it is not revisited.
    for voter in [CAROL, DAVE] {
        node.consensus
            .cast_vote(first, voter, VoteValue::Disapprove)
            .await
            .unwrap();
    }
    assert_eq!(node.ledger.collect_disapprove_contribs().await.unwrap(), 0);
}
