pub mod error;
pub mod feedback;
pub mod multiplication;
pub mod session;

/// A single times-table question. Built once per game and never changed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: u32,
}
impl Question {
    pub fn new(prompt: String, answer: u32) -> Self {
        Self { prompt, answer }
    }
}

/// One of the values offered on the answer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub value: u32,
    pub is_correct: bool,
}
impl Answer {
    pub fn new(value: u32, is_correct: bool) -> Self {
        Self { value, is_correct }
    }
}
