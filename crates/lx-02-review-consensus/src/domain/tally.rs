//! Vote tally derived from a ledger scan. No counter is persisted.

use serde::{Deserialize, Serialize};
use shared_types::{UserId, Vote, VoteValue};

/// Aggregate counts for one item, plus the viewer's own votes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub approves: u64,
    pub disapproves: u64,
    pub own_approves: u64,
    pub own_disapproves: u64,
}

impl Tally {
    /// Count `votes`. An anonymous viewer (`None`) owns no votes.
    pub fn from_votes(votes: &[Vote], viewer: Option<UserId>) -> Self {
        votes.iter().fold(Tally::default(), |mut tally, vote| {
            let own = viewer == Some(vote.voter_user_id);
            match vote.value {
                VoteValue::Approve => {
                    tally.approves += 1;
                    tally.own_approves += u64::from(own);
                }
                VoteValue::Disapprove => {
                    tally.disapproves += 1;
                    tally.own_disapproves += u64::from(own);
                }
            }
            tally
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(voter: UserId, value: VoteValue) -> Vote {
        Vote {
            item_id: 1,
            voter_user_id: voter,
            value,
            created_at: 0,
        }
    }

    #[test]
    fn test_counts_and_own_votes() {
        let votes = vec![
            vote(1, VoteValue::Approve),
            vote(2, VoteValue::Approve),
            vote(3, VoteValue::Disapprove),
        ];

        let tally = Tally::from_votes(&votes, Some(3));
        assert_eq!(tally.approves, 2);
        assert_eq!(tally.disapproves, 1);
        assert_eq!(tally.own_approves, 0);
        assert_eq!(tally.own_disapproves, 1);

        let anonymous = Tally::from_votes(&votes, None);
        assert_eq!(anonymous.own_approves + anonymous.own_disapproves, 0);
    }
}
