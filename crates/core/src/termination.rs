//! Termination evaluator - turns the final scores into a result.

use crate::types::{Outcome, ParticipantId, TerminationState, PARTICIPANT_COUNT};

/// Higher score wins; equal scores tie.
pub fn evaluate(scores: [u32; PARTICIPANT_COUNT]) -> Outcome {
    let [one, two] = scores;
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => Outcome::Winner(ParticipantId::One),
        std::cmp::Ordering::Less => Outcome::Winner(ParticipantId::Two),
        std::cmp::Ordering::Equal => Outcome::Tie,
    }
}

/// The decided state for these final scores.
pub fn decide(scores: [u32; PARTICIPANT_COUNT]) -> TerminationState {
    TerminationState::Decided {
        outcome: evaluate(scores),
        scores,
    }
}

/// Banner text for a decided session, e.g. `"Player 1 Wins!"`.
pub fn headline(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Winner(ParticipantId::One) => "Player 1 Wins!",
        Outcome::Winner(ParticipantId::Two) => "Player 2 Wins!",
        Outcome::Tie => "It's a Tie!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_score_wins() {
        assert_eq!(evaluate([4, 2]), Outcome::Winner(ParticipantId::One));
        assert_eq!(evaluate([0, 1]), Outcome::Winner(ParticipantId::Two));
    }

    #[test]
    fn equal_scores_tie() {
        assert_eq!(evaluate([0, 0]), Outcome::Tie);
        assert_eq!(evaluate([7, 7]), Outcome::Tie);
    }

    #[test]
    fn decide_keeps_literal_scores() {
        assert_eq!(
            decide([4, 2]),
            TerminationState::Decided {
                outcome: Outcome::Winner(ParticipantId::One),
                scores: [4, 2],
            }
        );
    }

    #[test]
    fn headlines() {
        assert_eq!(headline(Outcome::Tie), "It's a Tie!");
        assert_eq!(headline(Outcome::Winner(ParticipantId::Two)), "Player 2 Wins!");
    }
}
