//! Scenario detection and answer-shaping rule tables.
//!
//! Every table is evaluated in order and the first match wins, so adding a
//! rule never changes control flow.

/// Phrases that mark a message as a live review situation rather than a
/// definition lookup. Matching widens the search.
pub const REAL_TIME_PHRASES: &[&str] = &[
    "what should i",
    "should i mark",
    "the model",
    "the agent",
    "critical error",
    "mark as",
    "mark it as",
    "task status",
    "trajectory status",
    "in my task",
    "my trajectory",
    "this trajectory",
    "this task",
    "i'm reviewing",
    "i am reviewing",
    "i'm working on",
    "i am working on",
    "stopped early",
    "at step",
    "last step",
    "final step",
];

/// Phrases that mean the user wants an error category to mark.
pub const MARKING_QUESTION_PHRASES: &[&str] = &[
    "what error",
    "which error",
    "what should i mark",
    "should i mark",
    "what do i mark",
    "how should i mark",
    "what to mark",
    "error should i",
    "mark this as",
    "what category",
    "which category",
];

/// Lead-ins that already satisfy the answer-first format.
pub const ANSWER_LEAD_INS: &[&str] = &["you should mark:", "you should mark trajectory", "mark:"];

/// Error-category vocabulary scanned in model output when the message itself
/// gives no hint.
pub const ANSWER_LABELS: &[&str] = &[
    "Early Stopping",
    "Infrastructure Error",
    "Prompt Error",
    "Output Error",
    "Tool Error",
    "Critical Error",
    "Hallucination",
    "Looping",
    "No Error",
];

pub const GENERIC_LEAD_IN: &str =
    "You should mark: the error category explained below.\n\n";

/// A label chosen when the user's message contains any of `phrases`.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub phrases: &'static [&'static str],
    pub label: &'static str,
}

impl LabelRule {
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, self.phrases)
    }
}

pub const MESSAGE_LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        phrases: &[
            "stopped early",
            "stops early",
            "early stop",
            "quit early",
            "gave up",
            "ended before",
            "didn't finish",
            "did not finish",
        ],
        label: "Early Stopping",
    },
    LabelRule {
        phrases: &[
            "timed out",
            "timeout",
            "server error",
            "crashed",
            "connection",
            "environment failed",
            "infrastructure",
        ],
        label: "Infrastructure Error",
    },
    LabelRule {
        phrases: &[
            "misunderstood",
            "misinterpret",
            "unclear instructions",
            "ambiguous prompt",
            "prompt error",
        ],
        label: "Prompt Error",
    },
    LabelRule {
        phrases: &["made up", "hallucinat", "fabricat", "invented"],
        label: "Hallucination",
    },
    LabelRule {
        phrases: &["loop", "kept repeating", "same action", "repeated the same"],
        label: "Looping",
    },
    LabelRule {
        phrases: &["wrong tool", "tool call", "tool error", "wrong arguments"],
        label: "Tool Error",
    },
    LabelRule {
        phrases: &[
            "wrong output",
            "output error",
            "wrong format",
            "wrong answer",
            "incorrect answer",
        ],
        label: "Output Error",
    },
    LabelRule {
        phrases: &["critical error", "deleted", "destructive", "unsafe"],
        label: "Critical Error",
    },
];

fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lowered.contains(p))
}

/// Whether the message describes a live review situation.
#[must_use]
pub fn detect_real_time_scenario(message: &str) -> bool {
    contains_any(&message.to_lowercase(), REAL_TIME_PHRASES)
}

/// Whether the message asks which error category to mark.
#[must_use]
pub fn is_marking_question(message: &str) -> bool {
    contains_any(&message.to_lowercase(), MARKING_QUESTION_PHRASES)
}

#[must_use]
pub fn has_answer_lead_in(answer: &str) -> bool {
    let lowered = answer.trim_start().to_lowercase();
    ANSWER_LEAD_INS.iter().any(|l| lowered.starts_with(l))
}

#[must_use]
pub fn label_from_message(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    MESSAGE_LABEL_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.label)
}

#[must_use]
pub fn label_from_answer(answer: &str) -> Option<&'static str> {
    let lowered = answer.to_lowercase();
    ANSWER_LABELS
        .iter()
        .find(|label| lowered.contains(&label.to_lowercase()))
        .copied()
}

/// Rewrite `answer` so it opens with the category to mark, when the
/// question calls for it and the model did not already lead with one.
///
/// Returns `None` when the answer is left unchanged.
#[must_use]
pub fn answer_first(message: &str, answer: &str, is_real_time: bool) -> Option<String> {
    if !(is_real_time || is_marking_question(message)) || has_answer_lead_in(answer) {
        return None;
    }

    let lead_in = label_from_message(message)
        .or_else(|| label_from_answer(answer))
        .map_or_else(
            || GENERIC_LEAD_IN.to_owned(),
            |label| format!("You should mark: {label}.\n\n"),
        );

    Some(format!("{lead_in}{answer}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_time_detects_situational_phrases() {
        assert!(detect_real_time_scenario(
            "The model stopped early, what should I mark?"
        ));
        assert!(detect_real_time_scenario("Is TASK STATUS complete here?"));
        assert!(detect_real_time_scenario("There is a critical error at step 4"));
    }

    #[test]
    fn real_time_ignores_definition_questions() {
        assert!(!detect_real_time_scenario("What is Infrastructure Error?"));
        assert!(!detect_real_time_scenario("Explain prompt errors"));
    }

    #[test]
    fn marking_question_detection() {
        assert!(is_marking_question("Which error applies here?"));
        assert!(is_marking_question("what should I mark for this one"));
        assert!(!is_marking_question("What is a trajectory?"));
    }

    #[test]
    fn lead_in_detection_is_case_and_space_insensitive() {
        assert!(has_answer_lead_in("  You Should Mark: Prompt Error."));
        assert!(has_answer_lead_in("You should mark trajectory as failed."));
        assert!(has_answer_lead_in("Mark: Looping"));
        assert!(!has_answer_lead_in("Because of X, mark Early Stopping."));
    }

    #[test]
    fn message_rules_first_match_wins() {
        // Mentions both early stop and a timeout; the earlier rule decides.
        assert_eq!(
            label_from_message("It stopped early after a timeout"),
            Some("Early Stopping")
        );
        assert_eq!(
            label_from_message("the server crashed mid-run"),
            Some("Infrastructure Error")
        );
        assert_eq!(
            label_from_message("it made up a file path"),
            Some("Hallucination")
        );
        assert_eq!(label_from_message("what now?"), None);
    }

    #[test]
    fn no_rule_is_shadowed_by_an_earlier_one() {
        for rule in MESSAGE_LABEL_RULES {
            let sample = rule.phrases[0];
            assert_eq!(label_from_message(sample), Some(rule.label), "{sample}");
        }
    }

    #[test]
    fn answer_scan_uses_vocabulary_order() {
        assert_eq!(
            label_from_answer("This is a looping case, not an output error."),
            Some("Output Error")
        );
        assert_eq!(label_from_answer("no category named"), None);
    }

    #[test]
    fn answer_first_prefers_message_label() {
        let shaped = answer_first(
            "the model stopped early, what should I mark?",
            "Because of X, mark Early Stopping.",
            true,
        )
        .unwrap();
        assert_eq!(
            shaped,
            "You should mark: Early Stopping.\n\nBecause of X, mark Early Stopping."
        );
    }

    #[test]
    fn answer_first_falls_back_to_answer_scan() {
        let shaped = answer_first(
            "which error is this?",
            "The agent called a tool with bad input, a Tool Error.",
            false,
        )
        .unwrap();
        assert!(shaped.starts_with("You should mark: Tool Error.\n\n"));
    }

    #[test]
    fn answer_first_generic_when_no_label() {
        let shaped = answer_first("what should I mark?", "It depends on the step.", true).unwrap();
        assert!(shaped.starts_with(GENERIC_LEAD_IN));
        assert!(shaped.ends_with("It depends on the step."));
    }

    #[test]
    fn answer_first_keeps_existing_lead_in() {
        assert!(answer_first("what should I mark?", "You should mark: Looping.", true).is_none());
    }

    #[test]
    fn answer_first_skips_plain_questions() {
        assert!(
            answer_first(
                "What is Infrastructure Error?",
                "Infrastructure Error is a non-model-fault error.",
                false
            )
            .is_none()
        );
    }
}
