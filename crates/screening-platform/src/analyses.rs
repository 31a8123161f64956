//! Analyses fetch adapter.
//!
//! One HTTP GET returning the full analysis list as a JSON array.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! No request parameters, no pagination, no retry.

use async_trait::async_trait;
use gloo_net::http::Request;

use screening_core::ports::AnalysesPort;
use screening_types::{analysis::AnalysisRecord, Result, WidgetError};

pub struct HttpAnalyses {
    url: String,
}

impl HttpAnalyses {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl AnalysesPort for HttpAnalyses {
    async fn fetch_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| WidgetError::Fetch(e.to_string()))?;

        if !response.ok() {
            return Err(WidgetError::Fetch(format!("HTTP {}", response.status())));
        }

        response
            .json::<Vec<AnalysisRecord>>()
            .await
            .map_err(|e| WidgetError::Fetch(e.to_string()))
    }
}
