//! What the player is told after answering a question.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect { expected: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    /// The answered question was the last one of the session.
    pub game_over: bool,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            Outcome::Correct => "Correct!",
            Outcome::Incorrect { .. } => "Wrong!",
        }
    }

    pub fn message(&self) -> String {
        if self.game_over {
            return "Game over! You can restart game.".to_string();
        }
        match self.outcome {
            Outcome::Correct => "Your answer is good, good job!".to_string(),
            Outcome::Incorrect { expected } => {
                format!("Your answer is wrong. This is: {}", expected)
            }
        }
    }
}

/// Colour of the answer buttons. Once an answer is picked every button takes the verdict colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerColor {
    Blue,
    Green,
    Red,
}
