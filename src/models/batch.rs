use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BatchItemOutcome {
    pub keyword: String,
    pub success: bool,
    pub title: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total_requested: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub truncated: bool,
    pub items: Vec<BatchItemOutcome>,
}
