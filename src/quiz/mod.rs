pub mod questions;

use crate::error::{Error, Result};
use crate::progress;

pub const GOOD_JOB: &str = "🎉 Good job!";
pub const TRY_AGAIN: &str = "❌ Try again next time!";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct: usize) -> Result<Self> {
        let question = Self {
            text: text.into(),
            options,
            correct,
        };
        question.validate()?;
        Ok(question)
    }

    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(Error::InvalidQuestion(format!(
                "\"{}\" has no options",
                self.text
            )));
        }
        if self.correct >= self.options.len() {
            return Err(Error::InvalidQuestion(format!(
                "\"{}\": correct index {} out of {} options",
                self.text,
                self.correct,
                self.options.len()
            )));
        }
        Ok(())
    }

    /// Index of the option whose text is `answer`.
    pub fn option_index(&self, answer: &str) -> Option<usize> {
        self.options.iter().position(|o| o == answer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Showing,
    Answered { selected: usize, correct: bool },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    GoodJob,
    TryAgain,
}

impl Feedback {
    pub fn text(self) -> &'static str {
        match self {
            Feedback::GoodJob => GOOD_JOB,
            Feedback::TryAgain => TRY_AGAIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Marked { option: usize, correct: bool },
    Feedback(Feedback),
    NextRevealed,
    Showing { index: usize },
    Progress { percent: u8 },
    Finished { score: usize, total: usize },
}

/// One pass through a fixed list of questions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    score: usize,
    phase: Phase,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::EmptyQuiz);
        }
        for q in &questions {
            q.validate()?;
        }
        Ok(Self {
            questions,
            index: 0,
            score: 0,
            phase: Phase::Showing,
        })
    }

    /// The question on screen, or `None` once finished.
    pub fn current(&self) -> Option<&Question> {
        match self.phase {
            Phase::Finished => None,
            _ => self.questions.get(self.index),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn percent(&self) -> u8 {
        progress::percent(self.index, self.len())
    }

    pub fn score_text(&self) -> String {
        format!("⭐ Your Score: {}/{}", self.score, self.len())
    }

    /// Answer the current question. Only the first answer counts; later
    /// calls return no events.
    pub fn select_option(&mut self, option: usize) -> Result<Vec<QuizEvent>> {
        if self.phase != Phase::Showing {
            return Ok(Vec::new());
        }
        let question = self.questions.get(self.index).ok_or(Error::NoSuchQuestion {
            index: self.index,
            len: self.questions.len(),
        })?;
        if option >= question.options.len() {
            return Err(Error::NoSuchOption {
                index: option,
                len: question.options.len(),
            });
        }

        let correct = option == question.correct;
        if correct {
            self.score += 1;
        }
        self.phase = Phase::Answered {
            selected: option,
            correct,
        };
        log::debug!(
            "question {} answered with option {option} (correct: {correct})",
            self.index
        );

        let feedback = if correct {
            Feedback::GoodJob
        } else {
            Feedback::TryAgain
        };
        Ok(vec![
            QuizEvent::Marked { option, correct },
            QuizEvent::Feedback(feedback),
            QuizEvent::NextRevealed,
        ])
    }

    /// Move past an answered question.
    pub fn advance(&mut self) -> Vec<QuizEvent> {
        if !matches!(self.phase, Phase::Answered { .. }) {
            return Vec::new();
        }
        self.index += 1;
        if self.index < self.len() {
            self.phase = Phase::Showing;
            vec![
                QuizEvent::Showing { index: self.index },
                QuizEvent::Progress {
                    percent: self.percent(),
                },
            ]
        } else {
            self.phase = Phase::Finished;
            log::info!("quiz finished: {}/{}", self.score, self.len());
            vec![
                QuizEvent::Finished {
                    score: self.score,
                    total: self.len(),
                },
                QuizEvent::Progress { percent: 100 },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(correct: usize) -> Question {
        Question::new(
            "Pick one",
            vec!["a".into(), "b".into(), "c".into()],
            correct,
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_questions() {
        assert!(matches!(
            Question::new("x", vec![], 0),
            Err(Error::InvalidQuestion(_))
        ));
        assert!(matches!(
            Question::new("x", vec!["a".into()], 1),
            Err(Error::InvalidQuestion(_))
        ));
        assert!(matches!(QuizSession::new(vec![]), Err(Error::EmptyQuiz)));
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let mut s = QuizSession::new(vec![q(2)]).unwrap();
        let events = s.select_option(0).unwrap();
        assert_eq!(
            events,
            vec![
                QuizEvent::Marked {
                    option: 0,
                    correct: false
                },
                QuizEvent::Feedback(Feedback::TryAgain),
                QuizEvent::NextRevealed,
            ]
        );
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn second_answer_is_ignored() {
        let mut s = QuizSession::new(vec![q(1)]).unwrap();
        s.select_option(1).unwrap();
        let phase = s.phase();
        assert!(s.select_option(0).unwrap().is_empty());
        assert!(s.select_option(1).unwrap().is_empty());
        assert_eq!(s.score(), 1);
        assert_eq!(s.phase(), phase);
    }

    #[test]
    fn out_of_range_option_is_an_error() {
        let mut s = QuizSession::new(vec![q(0)]).unwrap();
        assert!(matches!(
            s.select_option(3),
            Err(Error::NoSuchOption { index: 3, len: 3 })
        ));
        assert_eq!(s.phase(), Phase::Showing);
    }

    #[test]
    fn advance_needs_an_answer() {
        let mut s = QuizSession::new(vec![q(0), q(1)]).unwrap();
        assert!(s.advance().is_empty());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn advance_moves_to_next_question() {
        let mut s = QuizSession::new(vec![q(0), q(1), q(2), q(0)]).unwrap();
        s.select_option(0).unwrap();
        assert_eq!(
            s.advance(),
            vec![
                QuizEvent::Showing { index: 1 },
                QuizEvent::Progress { percent: 25 }
            ]
        );
        assert_eq!(s.phase(), Phase::Showing);
        assert_eq!(s.current(), Some(&q(1)));
    }

    #[test]
    fn finished_is_terminal() {
        let mut s = QuizSession::new(vec![q(0)]).unwrap();
        s.select_option(0).unwrap();
        s.advance();
        assert!(s.is_finished());
        assert!(s.current().is_none());
        assert!(s.select_option(0).unwrap().is_empty());
        assert!(s.advance().is_empty());
        assert_eq!(s.score_text(), "⭐ Your Score: 1/1");
    }

    #[test]
    fn stored_session_past_its_questions_errors_instead_of_panicking() {
        let json = r#"{"questions":[{"text":"?","options":["a"],"correct":0}],"index":3,"score":0,"phase":"Showing"}"#;
        let mut s: QuizSession = serde_json::from_str(json).unwrap();
        assert!(matches!(
            s.select_option(0),
            Err(Error::NoSuchQuestion { index: 3, len: 1 })
        ));
        assert!(s.current().is_none());
    }
}
