// Prompt templates for the remote feedback engine.

pub const FEEDBACK_SYSTEM: &str = r#"Your task is to evaluate a candidate's response to an interview question and provide detailed feedback.

Analyze both the content (accuracy, relevance, completeness) and presentation (structure, clarity, conciseness).

Return your evaluation in the following JSON format:
{
  "feedback": "Brief overall assessment of the response",
  "contentScore": <number between 0-100>,
  "presentationScore": <number between 0-100>,
  "strengths": ["Detailed strength point", "..."],
  "improvements": ["Detailed improvement suggestion", "..."]
}

Ensure your feedback is specific, actionable, and tailored to orthopedic surgery residency interviews."#;

pub const FEEDBACK_PROMPT_TEMPLATE: &str = "Question: {question}\n\nCandidate's Response: {response}";

pub const FOLLOW_UP_SYSTEM: &str = "Your task is to generate a relevant follow-up question \
based on a candidate's response to an interview question.

The follow-up question should:
1. Probe deeper into the candidate's knowledge or experience
2. Be related to their response
3. Be challenging but fair
4. Focus on orthopedic surgery concepts, clinical scenarios, or professional development
5. Be concise and clear

Return only the follow-up question with no additional text or explanation.";

pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = "Original Question: {question}\n\nCandidate's Response: {response}\n\nGenerate a follow-up question:";

/// Fills `{question}` and `{response}` in a template in a single pass.
/// Substituted text is never rescanned, so braces typed by a candidate stay literal.
pub fn render(template: &str, question: &str, response: &str) -> String {
    let mut out = String::with_capacity(template.len() + question.len() + response.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{question}") {
            out.push_str(question);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{response}") {
            out.push_str(response);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
