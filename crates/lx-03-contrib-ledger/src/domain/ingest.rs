//! # Ledger Entry Builders
//!
//! Pure conversion of scanned rows into ledger entries. Ids are assigned by
//! storage on append; entries come out in the order they must be appended,
//! which keeps the high-water mark (latest entry with a non-zero id) exact.

use shared_types::{ContribAction, ContribEntry, Review, Translation, Vote, VoteValue};

/// For each translation, in the given order: one `ADD_TRANSLATION` for the
/// author, then one `APPROVE_CONFIRMED` per approve vote. Disapprove votes
/// on a translation are not a rejection and produce nothing.
pub fn translation_entries(scanned: &[(Translation, Vec<Vote>)]) -> Vec<ContribEntry> {
    let mut entries = Vec::new();
    for (translation, votes) in scanned {
        entries.push(ContribEntry::for_translation(
            translation.translation_id,
            translation.author_user_id,
            ContribAction::AddTranslation,
            translation.created_at,
        ));
        entries.extend(
            votes
                .iter()
                .filter(|v| v.value == VoteValue::Approve)
                .map(|v| {
                    ContribEntry::for_translation(
                        translation.translation_id,
                        v.voter_user_id,
                        ContribAction::ApproveConfirmed,
                        v.created_at,
                    )
                }),
        );
    }
    entries
}

/// One `DISAPPROVE_CONFIRMED` per disapprove vote on each rejected review.
pub fn disapprove_entries(scanned: &[(Review, Vec<Vote>)]) -> Vec<ContribEntry> {
    scanned
        .iter()
        .flat_map(|(review, votes)| {
            votes
                .iter()
                .filter(|v| v.value == VoteValue::Disapprove)
                .map(move |v| {
                    ContribEntry::for_review(
                        review.review_id,
                        v.voter_user_id,
                        ContribAction::DisapproveConfirmed,
                        v.created_at,
                    )
                })
        })
        .collect()
}
