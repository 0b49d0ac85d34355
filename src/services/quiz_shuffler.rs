use rand::{seq::SliceRandom, Rng};

use crate::models::domain::QuizQuestion;

/// Makes sure each multiple-choice question offers its answer, then shuffles
/// the options uniformly. Duplicates are kept. Only `options` is touched.
pub fn shuffle_multiple_choice_with<R: Rng + ?Sized>(questions: &mut [QuizQuestion], rng: &mut R) {
    for question in questions.iter_mut() {
        if !question.is_multiple_choice() {
            continue;
        }
        let Some(options) = question.options.as_mut() else {
            continue;
        };
        if options.is_empty() {
            continue;
        }

        if !options.contains(&question.answer) {
            options.push(question.answer.clone());
        }
        options.shuffle(rng);
    }
}

pub fn shuffle_multiple_choice(questions: &mut [QuizQuestion]) {
    shuffle_multiple_choice_with(questions, &mut rand::thread_rng());
}
