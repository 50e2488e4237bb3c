//! Outbound AI provider abstraction.
//!
//! An [`AiProvider`] is a thin transport: it receives a fully synthesized
//! prompt and returns the model's free-form reply unmodified. All
//! sanitization and prompt construction happens before this seam, so a
//! provider never sees raw captured traffic.

pub mod claude;

use crate::error::{Result, ScrubLensError};
use crate::report::DisclosureReport;
use crate::sanitize::{sanitize, AnalysisMode, ProcessingMetadata};

/// Trait for AI analysis backends.
///
/// Implementations must be `Send + Sync` for use across async tasks.
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    /// Send a prompt and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check that the provider is reachable with its configured credentials.
    async fn test_connection(&self) -> bool {
        self.complete("Reply with the single word: ok").await.is_ok()
    }

    /// Human-readable name for logging (e.g., `"claude"`).
    fn name(&self) -> &str;
}

/// Construct a provider for the given model label.
///
/// Unknown labels are an error rather than a silent default, mirroring the
/// mode-label contract.
pub fn for_model(
    model: &str,
    api_key: String,
    model_name: Option<String>,
) -> Result<Box<dyn AiProvider>> {
    match model {
        "claude" => Ok(Box::new(claude::ClaudeProvider::new(api_key, model_name))),
        "openai" => Err(ScrubLensError::Provider(
            "OpenAI integration not implemented yet".to_string(),
        )),
        "custom" => Err(ScrubLensError::Provider(
            "Custom integration not implemented yet".to_string(),
        )),
        other => Err(ScrubLensError::UnknownModel(other.to_string())),
    }
}

/// Everything one analysis run produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Audit summary of the modifications (never sent anywhere).
    pub summary: String,
    /// The prompt that was handed to the provider.
    pub prompt: String,
    /// The provider's reply, unparsed.
    pub reply: String,
    pub request_meta: ProcessingMetadata,
    pub response_meta: ProcessingMetadata,
}

/// Run the full pipeline: sanitize both messages independently, build the
/// disclosure report, and hand only the prompt to the provider.
///
/// The metadata records live exactly as long as this call; nothing of the
/// original header values survives in the outcome beyond the summary's
/// content descriptions.
pub async fn run_analysis(
    provider: &dyn AiProvider,
    raw_request: &str,
    raw_response: &str,
    mode: AnalysisMode,
) -> Result<AnalysisOutcome> {
    let (sanitized_request, request_meta) = sanitize(raw_request, mode);
    let (sanitized_response, response_meta) = sanitize(raw_response, mode);

    let report = DisclosureReport::build(
        &sanitized_request,
        &request_meta,
        &sanitized_response,
        &response_meta,
        mode,
    );

    tracing::info!(
        provider = provider.name(),
        mode = %mode,
        redacted_request_headers = request_meta.redacted_headers.len(),
        redacted_response_headers = response_meta.redacted_headers.len(),
        "submitting sanitized exchange for analysis"
    );

    let reply = provider.complete(&report.prompt).await?;

    Ok(AnalysisOutcome {
        summary: report.summary,
        prompt: report.prompt,
        reply,
        request_meta,
        response_meta,
    })
}
