// All LLM prompt constants for the Statements module.

/// System prompt for witness statement generation — enforces JSON-only output.
pub const STATEMENTS_SYSTEM: &str =
    "You are a game master creating witness statements for a game called TruthSeeker. \
    The game asks players to analyze information and recognize the truth. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Statement generation prompt template.
/// Replace `{num_statements}` and `{topic}` before sending.
pub const STATEMENTS_PROMPT_TEMPLATE: &str = r#"Generate {num_statements} witness statements about the following topic: {topic}.

Some statements must be factual, and some must be fabricated to mislead the player. For each statement, clearly mark whether it is true or false.

Return the statements as a JSON object with a "statements" array, where each object in the array has a "text" field containing the statement, and an "isTrue" field indicating whether the statement is true or false.

The output MUST be valid JSON. Do not include any preamble or epilogue; output only the JSON. Ensure isTrue is a boolean (true/false), not a string.

This is the format of the output. The output MUST follow this format exactly.
{
  "statements": [
    {
      "text": "",
      "isTrue": true
    },
    {
      "text": "",
      "isTrue": false
    }
  ]
}"#;
