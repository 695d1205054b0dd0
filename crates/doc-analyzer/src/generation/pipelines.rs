//! Question answering, summarization and action-item extraction

use std::sync::Arc;

use crate::error::Result;
use crate::providers::TextGenerator;

use super::prompt::{PromptTemplate, ACTION_ITEM_TEMPLATE, QA_TEMPLATE, SUMMARIZATION_TEMPLATE};

/// Each pipeline renders one template and makes exactly one generator call
#[derive(Clone)]
pub struct Pipelines {
    generator: Arc<dyn TextGenerator>,
}

impl Pipelines {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer `question` from retrieved `context`
    pub async fn answer_question(&self, context: &str, question: &str) -> Result<String> {
        self.run(&QA_TEMPLATE, &[("context", context), ("question", question)])
            .await
    }

    /// Summarize `text`
    pub async fn summarize(&self, text: &str) -> Result<String> {
        self.run(&SUMMARIZATION_TEMPLATE, &[("text", text)]).await
    }

    /// List tasks, owners and deadlines found in `text`
    pub async fn extract_action_items(&self, text: &str) -> Result<String> {
        self.run(&ACTION_ITEM_TEMPLATE, &[("text", text)]).await
    }

    async fn run(&self, template: &PromptTemplate, values: &[(&str, &str)]) -> Result<String> {
        let prompt = template.render(values)?;
        tracing::info!(
            "Running {} pipeline on {} ({})",
            template.name(),
            self.generator.name(),
            self.generator.model()
        );
        let output = self.generator.generate(&prompt).await?;
        Ok(output.trim().to_string())
    }
}
