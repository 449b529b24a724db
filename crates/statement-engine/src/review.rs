//! Interactive review session
//!
//! A question/answer state machine over the ambiguous statements. Modeled as
//! an explicit two-call protocol (fetch the next question, submit one answer)
//! so a web-facing caller can drive it one step at a time; there is no
//! blocking input anywhere in this module. Session state lives here, the
//! statements themselves stay with the caller.
//!
//! Abandoning a session at any point is safe: statements keep whatever
//! destination they had when review stopped.

use statement_types::{Destination, ReviewAnswer, SimilarMatch, Statement};
use tracing::debug;

use crate::error::ReviewError;

/// One pending question for the reviewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Index of the statement in the caller's statement list.
    pub statement_id: usize,
    /// 1-based position in the question sequence.
    pub ordinal: usize,
    pub total: usize,
    pub company_name: String,
    pub similar_matches: Vec<SimilarMatch>,
}

/// Result of a successful answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// More questions remain.
    Advanced,
    /// That was the last question, or skip-all ended the session.
    SessionComplete,
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    cursor: usize,
    statement_id: usize,
    destination: Destination,
    user_answer: Option<ReviewAnswer>,
}

/// Review session over the `ask_question` statements of one pipeline run.
///
/// Every forward transition pushes the pre-transition state onto a history
/// stack before mutating, so `back` is an exact undo. The session never
/// re-evaluates `ask_question`/`manual_required`; those were fixed at
/// classification time.
#[derive(Debug)]
pub struct ReviewSession {
    queue: Vec<usize>,
    cursor: usize,
    history: Vec<HistoryEntry>,
    skip_all: bool,
}

impl ReviewSession {
    pub fn new(statements: &[Statement]) -> Self {
        let queue = statements
            .iter()
            .enumerate()
            .filter(|(_, s)| s.ask_question)
            .map(|(i, _)| i)
            .collect();
        Self {
            queue,
            cursor: 0,
            history: Vec::new(),
            skip_all: false,
        }
    }

    pub fn question_count(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining(&self) -> usize {
        if self.skip_all {
            0
        } else {
            self.queue.len() - self.cursor
        }
    }

    pub fn is_complete(&self) -> bool {
        self.skip_all || self.cursor >= self.queue.len()
    }

    /// The question currently awaiting an answer, or None when the session
    /// is complete.
    pub fn next_question(&self, statements: &[Statement]) -> Option<Question> {
        if self.is_complete() {
            return None;
        }
        let statement_id = self.queue[self.cursor];
        let statement = &statements[statement_id];
        Some(Question {
            statement_id,
            ordinal: self.cursor + 1,
            total: self.queue.len(),
            company_name: statement.company_name.clone(),
            similar_matches: statement.similar_matches.clone(),
        })
    }

    /// Apply one answer to the current question.
    ///
    /// `Yes` confirms the match and routes the statement to DNM; `No` keeps
    /// its destination; `Skip` marks every remaining pending statement
    /// skipped and ends the session. Answers for any statement other than
    /// the current question are rejected without touching state.
    pub fn submit(
        &mut self,
        statements: &mut [Statement],
        statement_id: usize,
        answer: ReviewAnswer,
    ) -> Result<SubmitOutcome, ReviewError> {
        if self.is_complete() {
            return Err(ReviewError::SessionComplete);
        }
        let current = self.queue[self.cursor];
        if statement_id != current {
            if self.queue.contains(&statement_id) {
                return Err(ReviewError::NotCurrentQuestion(statement_id));
            }
            return Err(ReviewError::UnknownStatement(statement_id));
        }

        match answer {
            ReviewAnswer::Yes => {
                self.push_history(statements, current);
                let statement = &mut statements[current];
                statement.destination = Destination::Dnm;
                statement.user_answer = Some(ReviewAnswer::Yes);
                debug!(company = %statement.company_name, "confirmed as DNM");
                self.cursor += 1;
            }
            ReviewAnswer::No => {
                self.push_history(statements, current);
                let statement = &mut statements[current];
                statement.user_answer = Some(ReviewAnswer::No);
                debug!(
                    company = %statement.company_name,
                    destination = statement.destination.label(),
                    "match rejected, destination unchanged"
                );
                self.cursor += 1;
            }
            ReviewAnswer::Skip => {
                for &idx in &self.queue[self.cursor..] {
                    statements[idx].user_answer = Some(ReviewAnswer::Skip);
                }
                self.skip_all = true;
            }
        }

        if self.is_complete() {
            Ok(SubmitOutcome::SessionComplete)
        } else {
            Ok(SubmitOutcome::Advanced)
        }
    }

    /// Undo the most recent answer, restoring the affected statement's
    /// destination and answer exactly and moving the cursor back to it.
    pub fn back(&mut self, statements: &mut [Statement]) -> Result<(), ReviewError> {
        if self.is_complete() {
            return Err(ReviewError::SessionComplete);
        }
        let entry = self.history.pop().ok_or(ReviewError::EmptyHistory)?;
        let statement = &mut statements[entry.statement_id];
        statement.destination = entry.destination;
        statement.user_answer = entry.user_answer;
        self.cursor = entry.cursor;
        Ok(())
    }

    fn push_history(&mut self, statements: &[Statement], statement_id: usize) {
        let statement = &statements[statement_id];
        self.history.push(HistoryEntry {
            cursor: self.cursor,
            statement_id,
            destination: statement.destination,
            user_answer: statement.user_answer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use statement_types::{ExtractionMethod, Location, PageSpan};

    fn ambiguous(name: &str) -> Statement {
        Statement {
            company_name: name.to_string(),
            fallback_name: None,
            extraction_method: ExtractionMethod::LinePattern,
            exact_match: None,
            similar_matches: vec![SimilarMatch {
                company_name: format!("{name} Ltd"),
                score: 72.0,
            }],
            location: Location::National,
            page_span: PageSpan::new(1, 1),
            manual_required: true,
            ask_question: true,
            destination: Destination::NationalSingle,
            user_answer: None,
        }
    }

    fn resolved(name: &str) -> Statement {
        Statement {
            ask_question: false,
            manual_required: false,
            similar_matches: Vec::new(),
            ..ambiguous(name)
        }
    }

    #[test]
    fn test_only_ambiguous_statements_queued() {
        let statements = vec![resolved("A"), ambiguous("B"), ambiguous("C")];
        let session = ReviewSession::new(&statements);
        assert_eq!(session.question_count(), 2);
        let q = session.next_question(&statements).unwrap();
        assert_eq!(q.statement_id, 1);
        assert_eq!(q.company_name, "B");
        assert_eq!(q.ordinal, 1);
        assert_eq!(q.total, 2);
    }

    #[test]
    fn test_confirm_routes_to_dnm_and_advances() {
        let mut statements = vec![ambiguous("A"), ambiguous("B")];
        let mut session = ReviewSession::new(&statements);
        let outcome = session.submit(&mut statements, 0, ReviewAnswer::Yes).unwrap();
        assert_eq!(outcome, SubmitOutcome::Advanced);
        assert_eq!(statements[0].destination, Destination::Dnm);
        assert_eq!(statements[0].user_answer, Some(ReviewAnswer::Yes));
        assert_eq!(session.next_question(&statements).unwrap().statement_id, 1);
    }

    #[test]
    fn test_reject_keeps_destination() {
        let mut statements = vec![ambiguous("A")];
        let mut session = ReviewSession::new(&statements);
        let outcome = session.submit(&mut statements, 0, ReviewAnswer::No).unwrap();
        assert_eq!(outcome, SubmitOutcome::SessionComplete);
        assert_eq!(statements[0].destination, Destination::NationalSingle);
        assert_eq!(statements[0].user_answer, Some(ReviewAnswer::No));
    }

    #[test]
    fn test_skip_all_marks_remaining_and_ends_session() {
        let mut statements = vec![ambiguous("A"), ambiguous("B"), ambiguous("C")];
        let mut session = ReviewSession::new(&statements);
        session.submit(&mut statements, 0, ReviewAnswer::Yes).unwrap();
        let outcome = session.submit(&mut statements, 1, ReviewAnswer::Skip).unwrap();
        assert_eq!(outcome, SubmitOutcome::SessionComplete);
        assert!(session.is_complete());
        assert_eq!(statements[1].user_answer, Some(ReviewAnswer::Skip));
        assert_eq!(statements[2].user_answer, Some(ReviewAnswer::Skip));
        // Skipped statements keep their pre-review destination
        assert_eq!(statements[1].destination, Destination::NationalSingle);
    }

    #[test]
    fn test_back_exactly_undoes_confirm() {
        let mut statements = vec![ambiguous("A"), ambiguous("B")];
        let mut session = ReviewSession::new(&statements);
        session.submit(&mut statements, 0, ReviewAnswer::Yes).unwrap();
        session.back(&mut statements).unwrap();

        assert_eq!(statements[0].destination, Destination::NationalSingle);
        assert_eq!(statements[0].user_answer, None);
        assert_eq!(session.next_question(&statements).unwrap().statement_id, 0);
    }

    #[test]
    fn test_back_after_two_confirms_restores_second_only() {
        let mut statements = vec![ambiguous("A"), ambiguous("B"), ambiguous("C")];
        let mut session = ReviewSession::new(&statements);
        session.submit(&mut statements, 0, ReviewAnswer::Yes).unwrap();
        session.submit(&mut statements, 1, ReviewAnswer::Yes).unwrap();
        session.back(&mut statements).unwrap();

        // First answer untouched, second reverted
        assert_eq!(statements[0].destination, Destination::Dnm);
        assert_eq!(statements[0].user_answer, Some(ReviewAnswer::Yes));
        assert_eq!(statements[1].destination, Destination::NationalSingle);
        assert_eq!(statements[1].user_answer, None);
        assert_eq!(session.next_question(&statements).unwrap().statement_id, 1);
    }

    #[test]
    fn test_back_with_empty_history_is_rejected() {
        let mut statements = vec![ambiguous("A")];
        let mut session = ReviewSession::new(&statements);
        assert_eq!(
            session.back(&mut statements),
            Err(ReviewError::EmptyHistory)
        );
        // State untouched, question still pending
        assert!(session.next_question(&statements).is_some());
    }

    #[test]
    fn test_answer_for_wrong_statement_is_rejected() {
        let mut statements = vec![ambiguous("A"), ambiguous("B")];
        let mut session = ReviewSession::new(&statements);
        assert_eq!(
            session.submit(&mut statements, 1, ReviewAnswer::Yes),
            Err(ReviewError::NotCurrentQuestion(1))
        );
        assert_eq!(
            session.submit(&mut statements, 9, ReviewAnswer::Yes),
            Err(ReviewError::UnknownStatement(9))
        );
        assert_eq!(statements[1].user_answer, None);
    }

    #[test]
    fn test_submit_after_completion_is_rejected() {
        let mut statements = vec![ambiguous("A")];
        let mut session = ReviewSession::new(&statements);
        session.submit(&mut statements, 0, ReviewAnswer::No).unwrap();
        assert_eq!(
            session.submit(&mut statements, 0, ReviewAnswer::Yes),
            Err(ReviewError::SessionComplete)
        );
    }
}
