//! Prompts sent directly to the model backend by the conversation layer.
//!
//! Questions themselves go through the query engine, which builds its own
//! prompts. Clarification and explanation requests bypass the engine and are
//! built here.

use tabletalk_core::{ConversationTurn, DatasetSet, Prompt, PromptError};

use crate::memory::render_turns;

/// Number of sample rows shown per dataset.
const PREVIEW_ROWS: usize = 5;

// =============================================================================
// ClarificationPrompt
// =============================================================================

/// Asks the model which questions should be settled before answering.
#[derive(Debug, Clone)]
pub struct ClarificationPrompt {
    dataframes: String,
    conversation: String,
}

impl ClarificationPrompt {
    pub fn new(datasets: &DatasetSet, context: &[ConversationTurn]) -> Self {
        Self {
            dataframes: describe_datasets(datasets),
            conversation: render_turns(context),
        }
    }
}

impl Prompt for ClarificationPrompt {
    fn name(&self) -> &str {
        "clarification_questions"
    }

    fn render(&self) -> Result<String, PromptError> {
        Ok(format!(
            "You are a data analysis agent. Your main goal is to help non-technical users analyze data.\n\
             You are provided with the following dataframes:\n\
             {}\n\
             \n\
             <conversation>\n\
             {}\n\
             </conversation>\n\
             \n\
             Find the clarification questions a senior data scientist would ask about the last query.\n\
             - Only ask for clarification if the query is unclear or ambiguous.\n\
             - Return up to 3 questions as a JSON array of strings.\n\
             - Return an empty array if nothing needs clarifying.\n\
             \n\
             JSON:",
            self.dataframes, self.conversation
        ))
    }
}

fn describe_datasets(datasets: &DatasetSet) -> String {
    datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let description = ds
                .description
                .as_deref()
                .map(|d| format!(" description=\"{}\"", d))
                .unwrap_or_default();
            format!(
                "<dataframe index=\"{}\" name=\"{}\" rows=\"{}\" columns=\"{}\"{}>\n{}\n</dataframe>",
                i + 1,
                ds.name,
                ds.row_count(),
                ds.columns.len(),
                description,
                ds.to_preview(PREVIEW_ROWS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// ExplainPrompt
// =============================================================================

/// Asks the model to explain, in plain words, the code behind the last answer.
#[derive(Debug, Clone)]
pub struct ExplainPrompt {
    conversation: String,
    code: String,
}

impl ExplainPrompt {
    /// Fails with [`PromptError::MissingArtifact`] when no code has run yet.
    pub fn new(context: &[ConversationTurn], code: Option<&str>) -> Result<Self, PromptError> {
        let code = code.ok_or(PromptError::MissingArtifact)?;
        Ok(Self {
            conversation: render_turns(context),
            code: code.to_string(),
        })
    }
}

impl Prompt for ExplainPrompt {
    fn name(&self) -> &str {
        "explain"
    }

    fn render(&self) -> Result<String, PromptError> {
        Ok(format!(
            "The previous conversation we had:\n\
             <conversation>\n\
             {}\n\
             </conversation>\n\
             \n\
             Based on the last conversation you generated the following code:\n\
             <code>\n\
             {}\n\
             </code>\n\
             \n\
             Explain how you came up with this code for non-technical people, \
             without mentioning technical details or the libraries used.",
            self.conversation, self.code
        ))
    }
}
