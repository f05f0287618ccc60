use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Datasets
// =============================================================================

/// A tabular dataset the conversation is about.
///
/// Only the parts needed to describe the data to a model are kept here;
/// loading and normalizing the data is the query engine's business.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name shown to the model.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column headers, in order.
    pub columns: Vec<String>,
    /// Row cells, one `Vec` per row, aligned with `columns`.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a dataset with the given name and columns and no rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns,
            rows: Vec::new(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a row.
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<Value>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Render the header and first `n` rows as CSV-like text.
    pub fn to_preview(&self, n: usize) -> String {
        let mut out = self.columns.join(",");
        for row in self.head(n) {
            out.push('\n');
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            out.push_str(&cells.join(","));
        }
        out
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One or more datasets, fixed for the lifetime of a conversation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetSet(Vec<Dataset>);

impl DatasetSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Dataset] {
        &self.0
    }
}

impl From<Dataset> for DatasetSet {
    fn from(dataset: Dataset) -> Self {
        DatasetSet(vec![dataset])
    }
}

impl From<Vec<Dataset>> for DatasetSet {
    fn from(datasets: Vec<Dataset>) -> Self {
        DatasetSet(datasets)
    }
}

impl<'a> IntoIterator for &'a DatasetSet {
    type Item = &'a Dataset;
    type IntoIter = std::slice::Iter<'a, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Conversation turns
// =============================================================================

/// Who said a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when a conversation is rendered into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One recorded utterance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    /// Epoch seconds. Informational; ordering comes from insertion.
    pub created_at: i64,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

// =============================================================================
// Query results
// =============================================================================

/// The answer a query engine produces for one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryResult {
    /// Free-text answer.
    Text(String),
    /// Single numeric answer.
    Number(f64),
    /// Tabular answer.
    Table(Dataset),
    /// Path to a rendered chart.
    Plot(String),
}

impl QueryResult {
    /// Text form with tables cut to their first `max_rows` rows.
    pub fn summary(&self, max_rows: usize) -> String {
        match self {
            QueryResult::Table(dataset) if dataset.row_count() > max_rows => format!(
                "{}\n... ({} rows)",
                dataset.to_preview(max_rows),
                dataset.row_count()
            ),
            other => other.to_string(),
        }
    }

    /// The text payload, if this is a textual answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryResult::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Text(text) => f.write_str(text),
            QueryResult::Number(n) => write!(f, "{}", n),
            QueryResult::Table(dataset) => f.write_str(&dataset.to_preview(dataset.row_count())),
            QueryResult::Plot(path) => write!(f, "Plot saved to {}", path),
        }
    }
}

impl From<String> for QueryResult {
    fn from(text: String) -> Self {
        QueryResult::Text(text)
    }
}

impl From<&str> for QueryResult {
    fn from(text: &str) -> Self {
        QueryResult::Text(text.to_string())
    }
}
