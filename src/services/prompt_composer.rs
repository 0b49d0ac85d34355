use crate::{
    constants::{
        prompts::quiz_request_prompt,
        quiz_prompt::{FORBIDDEN_TOPIC_TERMS, MAX_TOPIC_LENGTH},
    },
    errors::RequestViolation,
    models::domain::{ConversationTurn, Difficulty},
};

/// A topic and difficulty set that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPrompt {
    topic: String,
    difficulties: Vec<Difficulty>,
}

impl QuizPrompt {
    pub fn new<S: AsRef<str>>(topic: &str, difficulties: &[S]) -> Result<Self, RequestViolation> {
        Ok(Self {
            topic: validate_topic(topic)?,
            difficulties: parse_difficulties(difficulties)?,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    pub fn user_turn(&self) -> ConversationTurn {
        let labels = self
            .difficulties
            .iter()
            .map(Difficulty::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        ConversationTurn::user(quiz_request_prompt(&self.topic, &labels))
    }
}

/// Returns the trimmed topic, or the first rule it breaks.
pub fn validate_topic(topic: &str) -> Result<String, RequestViolation> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(RequestViolation::EmptyTopic);
    }

    let length = topic.chars().count();
    if length > MAX_TOPIC_LENGTH {
        return Err(RequestViolation::TopicTooLong {
            length,
            max: MAX_TOPIC_LENGTH,
        });
    }

    let lowered = topic.to_lowercase();
    if let Some(term) = FORBIDDEN_TOPIC_TERMS
        .iter()
        .find(|term| lowered.contains(*term))
    {
        return Err(RequestViolation::ForbiddenTopic {
            term: term.to_string(),
        });
    }

    Ok(topic.to_string())
}

/// Parses labels case-insensitively; repeated labels collapse onto the first.
pub fn parse_difficulties<S: AsRef<str>>(labels: &[S]) -> Result<Vec<Difficulty>, RequestViolation> {
    if labels.is_empty() {
        return Err(RequestViolation::NoDifficulties);
    }

    let mut difficulties = Vec::with_capacity(labels.len());
    for label in labels {
        let difficulty: Difficulty =
            label
                .as_ref()
                .parse()
                .map_err(|label| RequestViolation::UnknownDifficulty { label })?;
        if !difficulties.contains(&difficulty) {
            difficulties.push(difficulty);
        }
    }

    Ok(difficulties)
}

/// Appends the quiz request turn to a copy of `history`.
pub fn compose_quiz_prompt(prompt: &QuizPrompt, history: &[ConversationTurn]) -> Vec<ConversationTurn> {
    let mut turns = history.to_vec();
    turns.push(prompt.user_turn());
    turns
}

/// Validates the request and composes the updated history in one step.
pub fn compose<S: AsRef<str>>(
    topic: &str,
    difficulties: &[S],
    history: &[ConversationTurn],
) -> Result<Vec<ConversationTurn>, RequestViolation> {
    let prompt = QuizPrompt::new(topic, difficulties)?;
    Ok(compose_quiz_prompt(&prompt, history))
}
