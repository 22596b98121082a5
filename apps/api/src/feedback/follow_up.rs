//! Fixed follow-up questions keyed on phrases in the original question.
//!
//! First match wins, in table order. Overlapping triggers are not disambiguated.

/// Returned when no trigger occurs in the question.
pub const GENERIC_FOLLOW_UP: &str = "Based on your interest in orthopedic surgery, can you describe \
    a challenging case you've observed and what you learned from it?";

/// (lower-case trigger, follow-up question)
const FOLLOW_UP_TRIGGERS: &[(&str, &str)] = &[
    (
        "gustilo classification",
        "How would your management differ between a Type II and Type IIIB open fracture?",
    ),
    (
        "mangled extremity",
        "What factors would lead you to recommend primary amputation over limb salvage?",
    ),
    (
        "hip fracture",
        "How would your approach change for a displaced femoral neck fracture in a 45-year-old versus an 80-year-old?",
    ),
    (
        "supracondylar fracture",
        "What would you do if the hand remained pink but pulseless after closed reduction and pinning?",
    ),
    (
        "radius fracture",
        "Which radiographic parameters would make you recommend operative fixation of a distal radius fracture?",
    ),
    (
        "tibial plateau fracture",
        "How would you recognize and manage compartment syndrome after a high-energy tibial plateau fracture?",
    ),
    (
        "tell me about yourself",
        "What specific experiences shaped your interest in orthopedic surgery?",
    ),
    (
        "why orthopedics",
        "What aspect of orthopedic practice do you expect to find most challenging, and how will you prepare for it?",
    ),
];

/// Picks the follow-up question for `question`. The candidate's response does not
/// influence the choice.
pub fn follow_up_question(question: &str, _response: &str) -> String {
    let question = question.to_lowercase();
    FOLLOW_UP_TRIGGERS
        .iter()
        .find(|(trigger, _)| question.contains(trigger))
        .map(|(_, follow_up)| *follow_up)
        .unwrap_or(GENERIC_FOLLOW_UP)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gustilo_follow_up_is_exact() {
        assert_eq!(
            follow_up_question(
                "Describe the Gustilo classification for open fractures.",
                "anything"
            ),
            "How would your management differ between a Type II and Type IIIB open fracture?"
        );
    }

    #[test]
    fn test_tell_me_about_yourself() {
        let follow_up = follow_up_question("Tell me about yourself.", "");
        assert_eq!(
            follow_up,
            "What specific experiences shaped your interest in orthopedic surgery?"
        );
    }

    #[test]
    fn test_unmatched_question_gets_generic_follow_up() {
        assert_eq!(
            follow_up_question(
                "How do you view yourself as a practicing orthopedic surgeon?",
                "a long answer"
            ),
            GENERIC_FOLLOW_UP
        );
        assert_eq!(
            GENERIC_FOLLOW_UP,
            "Based on your interest in orthopedic surgery, can you describe a challenging case \
             you've observed and what you learned from it?"
        );
    }

    #[test]
    fn test_every_seeded_clinical_question_has_a_specific_follow_up() {
        let questions = [
            "Why orthopedics?",
            "How would you manage a mangled extremity?",
            "Describe your surgical planning approach for a hip fracture.",
            "What is your approach to a supracondylar fracture?",
            "How would you manage a distal radius fracture?",
            "Describe the classification and management of tibial plateau fractures.",
        ];
        for q in questions {
            assert_ne!(follow_up_question(q, ""), GENERIC_FOLLOW_UP, "question {q:?}");
        }
    }

    #[test]
    fn test_first_trigger_in_table_order_wins() {
        let follow_up = follow_up_question(
            "Tell me about yourself, then walk me through a hip fracture.",
            "",
        );
        assert!(follow_up.contains("femoral neck"));
    }

    #[test]
    fn test_response_does_not_change_follow_up() {
        let q = "How would you manage a distal radius fracture?";
        assert_eq!(follow_up_question(q, "short"), follow_up_question(q, &"long ".repeat(100)));
    }
}
