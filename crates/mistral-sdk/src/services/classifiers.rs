//! Text classification.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{ClassifierRequest, ClassifierResponse};
use std::collections::HashMap;
use tracing::instrument;

/// Classifier endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiersService<'a> {
    client: &'a Client,
}

impl<'a> ClassifiersService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Classify texts.
    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.input.len()))]
    pub async fn create(&self, request: &ClassifierRequest) -> Result<ClassifierResponse> {
        self.client.post(&["classifiers"], request).await
    }

    /// Classify many texts against the same labels.
    pub async fn batch(
        &self,
        texts: Vec<String>,
        labels: Vec<String>,
        model: &str,
    ) -> Result<ClassifierResponse> {
        self.create(&ClassifierRequest::new(model, texts, labels)).await
    }

    /// Classify allowing several labels per text.
    pub async fn multi_label(&self, request: &ClassifierRequest) -> Result<ClassifierResponse> {
        let mut request = request.clone();
        request.multi_label = true;
        self.create(&request).await
    }

    /// Score every label for one text.
    pub async fn confidence(
        &self,
        text: &str,
        labels: Vec<String>,
        model: &str,
    ) -> Result<HashMap<String, f32>> {
        let request = ClassifierRequest::new(model, vec![text.to_string()], labels);
        let response = self.create(&request).await?;

        response
            .results
            .into_iter()
            .next()
            .map(|result| result.scores)
            .ok_or_else(|| Error::parse_error("no classification results returned"))
    }
}
