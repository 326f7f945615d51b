//! Fixed prompt templates, one per assist action.

const SUMMARIZE_SYSTEM: &str = "You are an assistant helping a student read dense academic or research articles. \
Summarize text clearly and concisely, preserving key technical meaning.";

const EXPLAIN_SYSTEM: &str = "You explain complex academic language in simple, clear terms for a college student, \
without losing the main ideas. Use short sentences and concrete wording.";

const QUESTIONS_SYSTEM: &str = "You generate comprehension questions for students who just read a paragraph or section of a research article.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistAction {
    Summarize,
    Explain,
    Questions,
}

impl AssistAction {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Summarize => SUMMARIZE_SYSTEM,
            Self::Explain => EXPLAIN_SYSTEM,
            Self::Questions => QUESTIONS_SYSTEM,
        }
    }

    pub fn temperature(self) -> f64 {
        match self {
            Self::Summarize => 0.3,
            Self::Explain => 0.4,
            Self::Questions => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Explain => "explain",
            Self::Questions => "questions",
        }
    }
}

pub fn summarize_prompt(paragraph: &str, context: &str) -> String {
    format!(
        "Context (optional): {context}\n\nParagraph:\n{paragraph}\n\nSummarize this paragraph in 3–4 sentences."
    )
}

pub fn explain_prompt(text: &str) -> String {
    format!("Explain this text in simpler language. Keep all important details:\n\n{text}")
}

pub fn questions_prompt(text: &str) -> String {
    format!(
        "Create 3–5 short-answer comprehension questions that test understanding of the following text. \
Do not include the answers.\n\n{text}"
    )
}
