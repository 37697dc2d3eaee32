use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz;

/// Distractors are drawn from `0..=factor * DISTRACTOR_SPAN`.
pub const DISTRACTOR_SPAN: u32 = 10;
const DISTRACTORS: usize = 2;

pub fn generate(index: u32, factor: u32) -> quiz::Question {
    quiz::Question::new(
        format!("What is {} times {}?", index, factor),
        factor * index,
    )
}

/// Builds the candidate set for `question`: its answer plus two distinct distractors,
/// in random order. The correct value is present exactly once.
pub fn candidates<R: Rng>(
    question: &quiz::Question,
    factor: u32,
    rng: &mut R,
) -> Vec<quiz::Answer> {
    let upper = factor * DISTRACTOR_SPAN;

    let mut answers = vec![quiz::Answer::new(question.answer, true)];
    while answers.len() < DISTRACTORS + 1 {
        let value = rng.gen_range(0..=upper);
        if answers.iter().any(|a| a.value == value) {
            continue;
        }
        answers.push(quiz::Answer::new(value, false));
    }

    // So the correct one isn't always the first button
    answers.shuffle(rng);
    answers
}
