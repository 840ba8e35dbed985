//! LLM prompt engineering for finding extraction

use sorbent_domain::FindingField;

/// Builds prompts for the LLM to extract findings from one segment
pub struct PromptBuilder<'a> {
    text: &'a str,
    questions: &'a [String],
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, questions: &'a [String]) -> Self {
        Self { text, questions }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role and task
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Numbered questions
        prompt.push_str("For each biochar you find, answer these questions:\n");
        for (idx, question) in self.questions.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", idx + 1, question));
        }
        prompt.push('\n');

        // 3. Rules, with the exact keys expected back
        prompt.push_str(EXTRACTION_RULES);
        prompt.push_str(&format!(
            "- Each object should have keys: {}\n\n",
            response_keys()
        ));

        // 4. The text to analyze
        prompt.push_str("TEXT TO ANALYZE:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

fn response_keys() -> String {
    FindingField::ALL
        .iter()
        .map(|field| format!("\"{}\"", field.key()))
        .collect::<Vec<_>>()
        .join(", ")
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are a scientific research assistant analyzing a research paper about biochar.

Your task: extract information about EVERY biochar mentioned in the text below."#;

const EXTRACTION_RULES: &str = r#"Rules:
- Only extract information that is explicitly stated in the text
- If a biochar is mentioned but some information is missing, use "Not specified"
- Include the page numbers or section where you found the information
- Report adsorption capacities with their units (e.g. "45.2 mg/g")
- Return your response as a JSON array of objects
"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "name": "Biochar name or type",
    "description": "What is this biochar",
    "targeted_molecule": "Molecule it targets",
    "adsorption_capacity": "Capacity with units",
    "location": "Page X, Section Y"
  }
]

If NO biochars are found in this text, return an empty array: []
Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
