//! Context assembly and system prompt construction.

use std::fmt::Write;

use tutor_knowledge::Chunk;
use tutor_llm::Message;

use super::ChatConfig;

/// Worked examples lose their meaning when cut short, so chunks mentioning
/// any of these get the longer context cap.
pub const WORKED_EXAMPLE_KEYWORDS: &[&str] = &[
    "example",
    "screenshot",
    "explanation",
    "dissatisfactory",
    "output error",
    "ec example",
];

const BASE_PROMPT: &str = "\
You are the support assistant for an onboarding course that trains reviewers to \
evaluate AI agent trajectories.\n\
Answer using the training material below. If the material does not cover the \
question, say so instead of guessing.\n\
\n\
## Answer format\n\
- Lead with the answer, then explain.\n\
- When the user asks what to mark, begin with \"You should mark: X\" where X is the \
category, and give the reasoning afterwards.\n\
- Cite the page or section you relied on.\n\
- Keep it short: a few sentences or a brief list.\n\
\n\
## Language\n\
Respond in the same language the user wrote in. Keep course terms such as error \
category names in their original form.";

const REAL_TIME_PROMPT: &str = "\
## Live review scenario\n\
The user is reviewing a trajectory right now. Decide in this order:\n\
1. Determine the task status first: did the agent complete what the task asked?\n\
2. Identify the error category and the step where the error occurs.\n\
3. Derive the trajectory status from the task status and the error position:\n\
   - an error on the last step only means the trajectory status is success;\n\
   - an error on any earlier step means the trajectory status is failure.\n\
State the category to mark first, then the task status, then the trajectory status.";

#[must_use]
pub fn is_worked_example(chunk: &Chunk) -> bool {
    let content = chunk.content.to_lowercase();
    let source = chunk.source.to_lowercase();
    WORKED_EXAMPLE_KEYWORDS
        .iter()
        .any(|k| content.contains(k) || source.contains(k))
}

/// Cut `text` to at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Concatenate chunks in ranking order, each headed by its source label.
#[must_use]
pub fn build_context(chunks: &[&Chunk], config: &ChatConfig) -> String {
    let mut out = String::new();

    for chunk in chunks {
        let cap = if is_worked_example(chunk) {
            config.example_context_chars
        } else {
            config.default_context_chars
        };
        let body = truncate_chars(&chunk.content, cap);
        let ellipsis = if body.len() < chunk.content.len() {
            "..."
        } else {
            ""
        };
        let _ = write!(out, "[Source: {}]\n{body}{ellipsis}\n\n", chunk.source);
    }

    out.truncate(out.trim_end().len());
    out
}

#[must_use]
pub fn build_system_prompt(context: &str, is_real_time: bool) -> String {
    let mut prompt = BASE_PROMPT.to_owned();

    prompt.push_str("\n\n## Training material\n");
    prompt.push_str(context);

    if is_real_time {
        prompt.push_str("\n\n");
        prompt.push_str(REAL_TIME_PROMPT);
    }

    prompt
}

/// The last `window` turns of `history`, oldest first.
#[must_use]
pub fn window_history(history: &[Message], window: usize) -> &[Message] {
    &history[history.len().saturating_sub(window)..]
}

/// System instruction, windowed history, then the current message.
#[must_use]
pub fn assemble_messages(
    system: String,
    history: &[Message],
    window: usize,
    message: &str,
) -> Vec<Message> {
    let recent = window_history(history, window);
    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(Message::system(system));
    messages.extend_from_slice(recent);
    messages.push(Message::user(message));
    messages
}
