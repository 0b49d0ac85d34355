pub const QUIZ_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that ONLY generates educational quizzes. \
Output JSON only: an array of questions, with no prose before or after it. \
Each question object must include: question, type, options (if multiple-choice), answer, and difficulty. \
Use \"multiple-choice\" or \"short-answer\" for type. \
For multiple-choice questions the answer must be copied verbatim from options. \
Use \"easy\", \"medium\" or \"hard\" for difficulty.";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a friendly and helpful AI assistant.";

/// Instruction appended as the user turn of a quiz request.
pub fn quiz_request_prompt(topic: &str, difficulties: &str) -> String {
    format!(
        "Create a JSON quiz about '{topic}' with {difficulties} difficulty questions. \
         Each question must include question, type, options (if applicable), answer, and difficulty."
    )
}
