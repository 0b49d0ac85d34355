//! Turns raw model text into quiz questions.
//!
//! The model is asked for a JSON array but may wrap it in a code fence, emit
//! malformed JSON, return a single object, or answer in prose. Elements are
//! decoded one by one: usable ones are kept, broken ones skipped. When nothing
//! usable remains the whole reply becomes a single fallback question so the
//! caller always gets something it can show.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{
    constants::quiz_prompt::{EMPTY_RESPONSE_MARKER, FALLBACK_ANSWER},
    models::domain::{
        quiz_question::SHORT_ANSWER,
        Difficulty, QuizQuestion,
    },
};

/// Decode result for one array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Accepted(QuizQuestion),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    Malformed(String),
    EmptyField(&'static str),
}

/// Decode result for a whole model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Parsed(Vec<QuizQuestion>),
    Fallback {
        reason: FallbackReason,
        question: QuizQuestion,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    InvalidJson(String),
    NotAnArray,
    NoUsableItems { skipped: usize },
}

impl Normalized {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback { .. })
    }

    pub fn into_questions(self) -> Vec<QuizQuestion> {
        match self {
            Normalized::Parsed(questions) => questions,
            Normalized::Fallback { question, .. } => vec![question],
        }
    }
}

/// Text-valued field that also accepts numbers and booleans.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawQuizItem {
    question: Scalar,
    #[serde(rename = "type")]
    question_type: Scalar,
    answer: Scalar,
    // Optional fields are decoded one by one so a wrongly typed value only
    // loses that field, never the item.
    #[serde(default)]
    options: Option<Value>,
    #[serde(default)]
    difficulty: Option<Value>,
    #[serde(default)]
    show_answer: Option<Value>,
}

fn lenient<T: DeserializeOwned>(value: Option<Value>) -> Option<T> {
    value.and_then(|value| serde_json::from_value(value).ok())
}

/// Removes a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn decode_item(value: Value) -> ItemOutcome {
    if !value.is_object() {
        return ItemOutcome::Skipped(SkipReason::NotAnObject);
    }

    let raw: RawQuizItem = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => return ItemOutcome::Skipped(SkipReason::Malformed(e.to_string())),
    };

    let question: String = raw.question.into();
    let question_type: String = raw.question_type.into();
    let answer: String = raw.answer.into();

    for (field, text) in [
        ("question", &question),
        ("type", &question_type),
        ("answer", &answer),
    ] {
        if text.trim().is_empty() {
            return ItemOutcome::Skipped(SkipReason::EmptyField(field));
        }
    }

    let difficulty = lenient::<Scalar>(raw.difficulty)
        .map(String::from)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Difficulty::Medium.to_string());

    ItemOutcome::Accepted(QuizQuestion {
        question,
        question_type,
        options: lenient::<Vec<Scalar>>(raw.options)
            .map(|options| options.into_iter().map(String::from).collect()),
        answer,
        difficulty: Some(difficulty),
        show_answer: lenient::<bool>(raw.show_answer).unwrap_or(true),
    })
}

pub fn fallback_question(text: &str) -> QuizQuestion {
    let text = text.trim();
    QuizQuestion {
        question: if text.is_empty() {
            EMPTY_RESPONSE_MARKER.to_string()
        } else {
            text.to_string()
        },
        question_type: SHORT_ANSWER.to_string(),
        options: None,
        answer: FALLBACK_ANSWER.to_string(),
        difficulty: Some(Difficulty::Medium.to_string()),
        show_answer: true,
    }
}

/// Classifies a raw model reply. Never fails.
pub fn normalize(raw: &str) -> Normalized {
    let payload = strip_code_fence(raw);
    let fallback = |reason: FallbackReason| {
        log::warn!("Quiz output could not be used ({:?}); returning fallback question", reason);
        Normalized::Fallback {
            reason,
            question: fallback_question(payload),
        }
    };

    let items = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        Ok(_) => return fallback(FallbackReason::NotAnArray),
        Err(e) => return fallback(FallbackReason::InvalidJson(e.to_string())),
    };

    let total = items.len();
    let questions: Vec<QuizQuestion> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match decode_item(item) {
            ItemOutcome::Accepted(question) => Some(question),
            ItemOutcome::Skipped(reason) => {
                log::debug!("Skipping quiz item {}: {:?}", index, reason);
                None
            }
        })
        .collect();

    if questions.is_empty() {
        return fallback(FallbackReason::NoUsableItems { skipped: total });
    }

    Normalized::Parsed(questions)
}

/// Normalized question list for a raw model reply.
pub fn normalize_quiz_output(raw: &str) -> Vec<QuizQuestion> {
    normalize(raw).into_questions()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{rome_question, ROME_FENCED_OUTPUT};

    #[test]
    fn fenced_rome_output_yields_exact_fields() {
        let questions = normalize_quiz_output(ROME_FENCED_OUTPUT);

        assert_eq!(questions, vec![rome_question()]);
    }

    #[test]
    fn fenced_and_unfenced_payloads_agree() {
        let unfenced = strip_code_fence(ROME_FENCED_OUTPUT);

        assert!(unfenced.starts_with('['));
        assert_eq!(normalize(ROME_FENCED_OUTPUT), normalize(unfenced));
        assert_eq!(
            normalize("```\n{\"not\": \"a list\"}\n```"),
            normalize("{\"not\": \"a list\"}")
        );
    }

    #[test]
    fn prose_reply_becomes_fallback_question() {
        let normalized = normalize("I cannot comply with this request.");

        assert!(matches!(
            normalized,
            Normalized::Fallback {
                reason: FallbackReason::InvalidJson(_),
                ..
            }
        ));
        let questions = normalized.into_questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "I cannot comply with this request.");
        assert_eq!(questions[0].question_type, "short-answer");
        assert_eq!(questions[0].answer, FALLBACK_ANSWER);
        assert_eq!(questions[0].difficulty.as_deref(), Some("medium"));
        assert!(questions[0].show_answer);
        assert_eq!(questions[0].options, None);
    }

    #[test]
    fn non_array_json_becomes_fallback() {
        let normalized = normalize(r#"{"question":"Q","type":"short-answer","answer":"A"}"#);

        assert!(matches!(
            normalized,
            Normalized::Fallback {
                reason: FallbackReason::NotAnArray,
                ..
            }
        ));
    }

    #[test]
    fn empty_reply_uses_marker() {
        let questions = normalize_quiz_output("   ");

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, EMPTY_RESPONSE_MARKER);
    }

    #[test]
    fn empty_array_becomes_fallback() {
        assert_eq!(
            normalize("[]"),
            Normalized::Fallback {
                reason: FallbackReason::NoUsableItems { skipped: 0 },
                question: fallback_question("[]"),
            }
        );
    }

    #[test]
    fn malformed_items_are_skipped_not_fatal() {
        let raw = r#"[
            {"question":"Capital of France?","type":"short-answer","answer":"Paris"},
            {"question":"No answer here","type":"short-answer"},
            "just a string",
            {"question":"","type":"short-answer","answer":"x"},
            {"question":"2 + 2?","type":"short-answer","answer":4}
        ]"#;

        let questions = normalize_quiz_output(raw);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].answer, "Paris");
        assert_eq!(questions[1].answer, "4");
    }

    #[test]
    fn all_items_malformed_becomes_fallback() {
        let normalized = normalize(r#"[{"question":"Q"},{"type":"short-answer"}]"#);

        assert!(matches!(
            normalized,
            Normalized::Fallback {
                reason: FallbackReason::NoUsableItems { skipped: 2 },
                ..
            }
        ));
    }

    #[test]
    fn defaults_fill_missing_difficulty_and_show_answer() {
        let questions =
            normalize_quiz_output(r#"[{"question":"Q","type":"short-answer","answer":"A"}]"#);

        assert_eq!(questions[0].difficulty.as_deref(), Some("medium"));
        assert!(questions[0].show_answer);
        assert_eq!(questions[0].options, None);
    }

    #[test]
    fn explicit_fields_are_carried_through() {
        let questions = normalize_quiz_output(
            r#"[{"question":"Pick","type":"multiple-choice","options":["b","a","a"],"answer":"c","difficulty":"hard","show_answer":false}]"#,
        );

        let question = &questions[0];
        assert_eq!(
            question.options,
            Some(vec!["b".to_string(), "a".to_string(), "a".to_string()])
        );
        assert_eq!(question.answer, "c");
        assert_eq!(question.difficulty.as_deref(), Some("hard"));
        assert!(!question.show_answer);
    }

    #[test]
    fn wrongly_typed_optional_fields_fall_back_to_defaults() {
        let raw = r#"[
            {"question":"Capital of France?","type":"multiple-choice","options":"Paris, Lyon","answer":"Paris"},
            {"question":"2+2?","type":"short-answer","answer":"4","show_answer":"yes"},
            {"question":"Largest planet?","type":"short-answer","answer":"Jupiter","difficulty":{"level":3},"options":[["nested"]]}
        ]"#;

        let normalized = normalize(raw);

        assert!(!normalized.is_fallback());
        let questions = normalized.into_questions();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].options, None);
        assert_eq!(questions[0].answer, "Paris");
        assert!(questions[1].show_answer);
        assert_eq!(questions[2].difficulty.as_deref(), Some("medium"));
        assert_eq!(questions[2].options, None);
    }

    #[test]
    fn null_optional_fields_are_treated_as_missing() {
        let questions = normalize_quiz_output(
            r#"[{"question":"Q","type":"short-answer","answer":"A","options":null,"difficulty":null,"show_answer":null}]"#,
        );

        assert_eq!(questions[0].options, None);
        assert_eq!(questions[0].difficulty.as_deref(), Some("medium"));
        assert!(questions[0].show_answer);
    }

    #[test]
    fn decode_item_reports_reason() {
        assert_eq!(
            decode_item(serde_json::json!(42)),
            ItemOutcome::Skipped(SkipReason::NotAnObject)
        );
        assert_eq!(
            decode_item(serde_json::json!({"question":"Q","type":" ","answer":"A"})),
            ItemOutcome::Skipped(SkipReason::EmptyField("type"))
        );
        assert!(matches!(
            decode_item(serde_json::json!({"question":"Q","answer":"A"})),
            ItemOutcome::Skipped(SkipReason::Malformed(_))
        ));
    }

    #[test]
    fn strip_code_fence_handles_partial_fences() {
        assert_eq!(strip_code_fence("```json\n[1]"), "[1]");
        assert_eq!(strip_code_fence("[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  [1]  "), "[1]");
        assert_eq!(strip_code_fence("```JSON\n[1]\n```"), "[1]");
    }
}
