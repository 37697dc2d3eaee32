//! Texts and reply keyboards shown in the chat.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::quiz::feedback::{AnswerColor, Verdict};
use crate::quiz::session::{GameSession, FACTORS, QUESTION_COUNTS};

pub const START_GAME: &str = "Start Game";
pub const CHANGE_MULTIPLICATION: &str = "Change multiplication";
pub const OK: &str = "OK";
pub const RESTART_GAME: &str = "Restart game";

pub const GREETING_TEXT: &str = "Hi! Let's learn math. Pick the multiplication table you want to practise.";
pub const SELECT_FACTOR_TEXT: &str = "Select multiplication:";
pub const SELECT_COUNT_TEXT: &str = "Select max number of questions:";
pub const PICK_AN_OPTION_TEXT: &str = "Please choose one of the options on the keyboard";

const FACTORS_PER_ROW: usize = 4;

fn row(labels: impl IntoIterator<Item = String>) -> Vec<KeyboardButton> {
    labels.into_iter().map(KeyboardButton::new).collect()
}

pub fn factor_keyboard() -> KeyboardMarkup {
    let factors = FACTORS.map(|f| f.to_string()).collect::<Vec<_>>();
    KeyboardMarkup::new(
        factors
            .chunks(FACTORS_PER_ROW)
            .map(|chunk| row(chunk.iter().cloned()))
            .collect::<Vec<_>>(),
    )
}

pub fn question_count_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![row(QUESTION_COUNTS.iter().map(|n| n.to_string()))])
}

pub fn setup_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(START_GAME)],
        vec![KeyboardButton::new(CHANGE_MULTIPLICATION)],
    ])
}

pub fn setup_text(session: &GameSession) -> String {
    format!(
        "Multiplication: {}\nQuestions: {}\n\nPress \"{}\" when you are ready.",
        session.config().factor,
        session.questions().len(),
        START_GAME
    )
}

pub fn question_text(session: &GameSession) -> String {
    let progress = session.progress();
    let prompt = session
        .current_question()
        .map(|q| q.prompt.as_str())
        .unwrap_or("No questions here");
    format!("Question {}/{}\n\n{}", progress.asked, progress.total, prompt)
}

pub fn candidates_keyboard(session: &GameSession) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![row(
        session.candidates().iter().map(|a| a.value.to_string()),
    )])
}

/// The answer buttons as text, painted with the verdict colour.
pub fn candidate_row(session: &GameSession) -> String {
    let mark = match session.answer_color() {
        AnswerColor::Blue => "🔵",
        AnswerColor::Green => "🟢",
        AnswerColor::Red => "🔴",
    };
    session
        .candidates()
        .iter()
        .map(|a| {
            if session.selected() == Some(a.value) {
                format!("{} [{}]", mark, a.value)
            } else {
                format!("{} {}", mark, a.value)
            }
        })
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn verdict_text(verdict: &Verdict, session: &GameSession) -> String {
    let mut text = format!(
        "{}\n{}\n\n{}",
        verdict.title(),
        candidate_row(session),
        verdict.message()
    );
    if verdict.game_over {
        let progress = session.progress();
        text.push_str(&format!(
            "\nYou answered {} of {} correctly.",
            progress.correct, progress.total
        ));
    }
    text
}

pub fn acknowledge_keyboard(game_over: bool) -> KeyboardMarkup {
    let label = if game_over { RESTART_GAME } else { OK };
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(label)]])
}

pub fn parse_number<T: std::str::FromStr>(text: Option<&str>) -> Option<T> {
    text?.trim().parse().ok()
}
