// All LLM prompt constants for the Ranking module.

/// System prompt for CV scoring — enforces JSON-only output.
pub const SCORING_SYSTEM: &str = "You are an expert CV analyzer and recruiter. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// CV scoring prompt template.
/// Replace `{job_description}`, `{required_keywords}` and `{cv_text}` before sending.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter AI.

We will rank CVs using this formula:
CV Score = (0.6 * SemanticSimilarity) + (0.4 * KeywordMatchScore)

- SemanticSimilarity (0-100): How well the CV semantically matches the job description.
- KeywordMatchScore (0-100): Percentage of required keywords found in the CV.
- Final CV Score must follow the formula above.

Instructions:
1. Calculate SemanticSimilarity (0-100).
2. Check which required keywords are present in the CV and which are missing.
3. Compute KeywordMatchScore = (matched keywords / total keywords) * 100.
4. Apply the formula to get the final CV score.
5. Return only valid JSON, with no explanation.

Return a JSON object with this EXACT schema (no extra fields):
{
  "semantic_score": 72.0,
  "keyword_score": 60.0,
  "final_score": 67.2,
  "reason": "short explanation",
  "matched_keywords": ["list"],
  "missing_keywords": ["list"]
}

Job Description:
{job_description}

Required Keywords:
{required_keywords}

Candidate Resume:
{cv_text}"#;
