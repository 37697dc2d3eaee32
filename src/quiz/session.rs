use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::error::{ConfigError, TransitionError};
use crate::quiz::feedback::{AnswerColor, Outcome, Verdict};
use crate::quiz::{multiplication, Answer, Question};

pub const FACTORS: RangeInclusive<u32> = 2..=12;
pub const QUESTION_COUNTS: [usize; 3] = [5, 10, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    pub factor: u32,
    pub question_count: usize,
}

impl SessionConfig {
    pub fn new(factor: u32, question_count: usize) -> Result<Self, ConfigError> {
        if !FACTORS.contains(&factor) {
            return Err(ConfigError::FactorOutOfRange(factor));
        }
        if !QUESTION_COUNTS.contains(&question_count) {
            return Err(ConfigError::UnsupportedQuestionCount(question_count));
        }
        Ok(Self {
            factor,
            question_count,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            factor: *FACTORS.start(),
            question_count: QUESTION_COUNTS[0],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    Active(Turn),
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Turn {
    AwaitingAnswer,
    ShowingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub asked: usize,
    pub total: usize,
    pub correct: usize,
}

/// One run of the quiz, from choosing a table to the final answer.
///
/// Questions are asked in a shuffled order without repeats: `start` queues every
/// question once and `next_question` takes them off the queue.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameSession {
    config: SessionConfig,
    questions: Vec<Question>,
    pending: Vec<usize>,
    current: Option<usize>,
    asked: usize,
    correct: usize,
    candidates: Vec<Answer>,
    selected: Option<u32>,
    phase: Phase,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            questions: Vec::new(),
            pending: Vec::new(),
            current: None,
            asked: 0,
            correct: 0,
            candidates: Vec::new(),
            selected: None,
            phase: Phase::Setup,
        };
        session.reset();
        session
    }

    /// Validates and applies a new configuration, then goes back to setup with a fresh question set.
    pub fn configure(&mut self, factor: u32, question_count: usize) -> Result<(), ConfigError> {
        self.config = SessionConfig::new(factor, question_count)?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.questions = (1..=self.config.question_count as u32)
            .map(|index| multiplication::generate(index, self.config.factor))
            .collect();
        self.pending.clear();
        self.current = None;
        self.asked = 0;
        self.correct = 0;
        self.candidates.clear();
        self.selected = None;
        self.phase = Phase::Setup;
    }

    pub fn start<R: Rng>(&mut self, rng: &mut R) -> Result<(), TransitionError> {
        if self.phase != Phase::Setup {
            return Err(TransitionError::NotInSetup(self.phase));
        }

        self.pending = (0..self.questions.len()).collect();
        self.pending.shuffle(rng);
        self.phase = Phase::Active(Turn::AwaitingAnswer);

        log::debug!(
            "Game started: table of {}, {} questions",
            self.config.factor,
            self.config.question_count
        );
        self.next_question(rng);
        Ok(())
    }

    /// Moves on to the next queued question. Returns `false` and leaves the session
    /// untouched when the game is not running or every question was already asked.
    pub fn next_question<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !matches!(self.phase, Phase::Active(_)) || self.asked >= self.config.question_count {
            return false;
        }
        let Some(index) = self.pending.pop() else {
            return false;
        };

        self.candidates = multiplication::candidates(&self.questions[index], self.config.factor, rng);
        self.current = Some(index);
        self.asked += 1;
        self.selected = None;
        self.phase = Phase::Active(Turn::AwaitingAnswer);
        true
    }

    pub fn submit_answer(&mut self, value: u32) -> Result<Verdict, TransitionError> {
        if self.phase != Phase::Active(Turn::AwaitingAnswer) {
            return Err(TransitionError::NotAwaitingAnswer(self.phase));
        }
        let Some(expected) = self.current_question().map(|q| q.answer) else {
            return Err(TransitionError::NotAwaitingAnswer(self.phase));
        };

        self.selected = Some(value);
        let outcome = if value == expected {
            self.correct += 1;
            Outcome::Correct
        } else {
            Outcome::Incorrect { expected }
        };

        let game_over = self.asked >= self.config.question_count;
        self.phase = if game_over {
            Phase::GameOver
        } else {
            Phase::Active(Turn::ShowingResult)
        };

        log::debug!(
            "Answer {} to question {}/{}: {:?}",
            value,
            self.asked,
            self.config.question_count,
            outcome
        );
        Ok(Verdict { outcome, game_over })
    }

    /// Dismisses the result of the last answer and asks the next question.
    pub fn acknowledge<R: Rng>(&mut self, rng: &mut R) -> Result<(), TransitionError> {
        if self.phase != Phase::Active(Turn::ShowingResult) {
            return Err(TransitionError::NoResultShown(self.phase));
        }
        self.next_question(rng);
        Ok(())
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> Progress {
        Progress {
            asked: self.asked,
            total: self.config.question_count,
            correct: self.correct,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|index| self.questions.get(index))
    }

    pub fn candidates(&self) -> &[Answer] {
        &self.candidates
    }

    pub fn is_candidate(&self, value: u32) -> bool {
        self.candidates.iter().any(|a| a.value == value)
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn answer_color(&self) -> AnswerColor {
        match (self.selected, self.current_question()) {
            (Some(value), Some(question)) if value == question.answer => AnswerColor::Green,
            (Some(_), _) => AnswerColor::Red,
            (None, _) => AnswerColor::Blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn started(factor: u32, count: usize, seed: u64) -> (GameSession, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = GameSession::default();
        session.configure(factor, count).unwrap();
        session.start(&mut rng).unwrap();
        (session, rng)
    }

    fn correct_value(session: &GameSession) -> u32 {
        session.current_question().unwrap().answer
    }

    #[test]
    fn configure_rejects_values_the_controls_do_not_offer() {
        let mut session = GameSession::default();
        assert_eq!(session.configure(1, 5), Err(ConfigError::FactorOutOfRange(1)));
        assert_eq!(session.configure(13, 5), Err(ConfigError::FactorOutOfRange(13)));
        assert_eq!(
            session.configure(3, 7),
            Err(ConfigError::UnsupportedQuestionCount(7))
        );
        assert_eq!(session.config(), SessionConfig::default());
    }

    #[test]
    fn configure_builds_one_question_per_index() {
        let mut session = GameSession::default();
        session.configure(7, 10).unwrap();
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.questions().len(), 10);
        for (i, question) in session.questions().iter().enumerate() {
            let index = i as u32 + 1;
            assert_eq!(question.answer, 7 * index);
            assert_eq!(question.prompt, format!("What is {} times 7?", index));
        }
    }

    #[test]
    fn first_question_and_correct_answer() {
        let (mut session, _) = started(3, 5, 1);
        assert_eq!(session.phase(), Phase::Active(Turn::AwaitingAnswer));
        assert_eq!(session.progress().asked, 1);

        let prompt = session.current_question().unwrap().prompt.clone();
        let valid: Vec<String> = (1..=5).map(|i| format!("What is {} times 3?", i)).collect();
        assert!(valid.contains(&prompt));

        let verdict = session.submit_answer(correct_value(&session)).unwrap();
        assert!(verdict.is_correct());
        assert_eq!(verdict.message(), "Your answer is good, good job!");
        assert_eq!(session.progress().correct, 1);
        assert_eq!(session.phase(), Phase::Active(Turn::ShowingResult));
        assert_eq!(session.answer_color(), AnswerColor::Green);
    }

    #[test]
    fn wrong_answer_names_the_expected_value() {
        let (mut session, _) = started(4, 5, 2);
        let expected = correct_value(&session);
        let wrong = session
            .candidates()
            .iter()
            .find(|a| !a.is_correct)
            .unwrap()
            .value;

        let verdict = session.submit_answer(wrong).unwrap();
        assert_eq!(verdict.outcome, Outcome::Incorrect { expected });
        assert_eq!(session.progress().correct, 0);
        assert_eq!(session.selected(), Some(wrong));
        assert_eq!(session.answer_color(), AnswerColor::Red);
    }

    #[test]
    fn asked_count_grows_by_one_per_cycle_until_game_over() {
        let (mut session, mut rng) = started(3, 5, 3);
        for round in 1..=5 {
            assert_eq!(session.progress().asked, round);
            assert_eq!(session.answer_color(), AnswerColor::Blue);
            let candidates = session.candidates();
            assert_eq!(candidates.iter().filter(|a| a.is_correct).count(), 1);

            // odd rounds right, even rounds wrong
            let value = if round % 2 == 1 {
                correct_value(&session)
            } else {
                correct_value(&session) + 1
            };
            let verdict = session.submit_answer(value).unwrap();

            if round < 5 {
                assert!(!verdict.game_over);
                session.acknowledge(&mut rng).unwrap();
            } else {
                assert!(verdict.game_over);
                assert_eq!(verdict.message(), "Game over! You can restart game.");
            }
        }
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.progress().asked, 5);
        assert_eq!(session.progress().correct, 3);

        assert!(!session.next_question(&mut rng));
        assert_eq!(session.progress().asked, 5);
    }

    #[test]
    fn questions_do_not_repeat_within_a_game() {
        let (mut session, mut rng) = started(9, 20, 4);
        let mut seen = HashSet::new();
        loop {
            assert!(seen.insert(session.current_question().unwrap().prompt.clone()));
            let verdict = session.submit_answer(0).unwrap();
            if verdict.game_over {
                break;
            }
            session.acknowledge(&mut rng).unwrap();
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn reset_from_game_over_goes_back_to_setup() {
        let (mut session, mut rng) = started(3, 5, 5);
        while session.phase() != Phase::GameOver {
            session.submit_answer(correct_value(&session)).unwrap();
            let _ = session.acknowledge(&mut rng);
        }

        session.reset();
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(
            session.progress(),
            Progress {
                asked: 0,
                total: 5,
                correct: 0
            }
        );
        assert_eq!(session.questions().len(), 5);
        assert!(session.questions().iter().all(|q| q.answer % 3 == 0));
        assert!(session.current_question().is_none());
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn operations_outside_their_phase_are_rejected() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = GameSession::default();

        assert!(session.submit_answer(2).is_err());
        assert!(session.acknowledge(&mut rng).is_err());
        assert!(!session.next_question(&mut rng));

        session.start(&mut rng).unwrap();
        assert_eq!(
            session.start(&mut rng),
            Err(TransitionError::NotInSetup(Phase::Active(Turn::AwaitingAnswer)))
        );
        assert!(session.acknowledge(&mut rng).is_err());

        session.submit_answer(correct_value(&session)).unwrap();
        assert!(session.submit_answer(2).is_err());
        assert_eq!(session.progress().correct, 1);
    }

    #[test]
    fn session_survives_a_json_round_trip_mid_game() {
        let (session, _) = started(6, 10, 7);
        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
