//! Classification outcome

/// How a piece of text was classified
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Matched the keyword fast path; no embedding was computed
    Keyword,
    /// Scored against the reference matrix
    Semantic {
        /// Reference phrase with the highest similarity
        phrase: String,
        similarity: f32,
        is_goodbye: bool,
    },
}

impl Detection {
    pub fn is_goodbye(&self) -> bool {
        match self {
            Detection::Keyword => true,
            Detection::Semantic { is_goodbye, .. } => *is_goodbye,
        }
    }

    /// Label used for metrics and logs
    pub fn path(&self) -> &'static str {
        match self {
            Detection::Keyword => "fast",
            Detection::Semantic { .. } => "embedding",
        }
    }
}
