//! Disclosure report construction.
//!
//! Turns the metadata from a sanitized request/response pair into two
//! strings: a human-readable audit summary of every modification (so the
//! operator can review what will be disclosed before it leaves the machine),
//! and the analysis prompt that embeds the sanitized texts. The report is
//! built fresh on every call and holds no state.

use crate::sanitize::{header, AnalysisMode, ProcessingMetadata};

/// The pairing of an audit summary and the prompt synthesized from the
/// sanitized exchange. The prompt is the sole payload handed to the
/// transport; the summary never leaves the machine.
#[derive(Debug, Clone)]
pub struct DisclosureReport {
    pub summary: String,
    pub prompt: String,
}

impl DisclosureReport {
    /// Build the report for one sanitized request/response pair.
    ///
    /// Unknown modes cannot reach this function: mode labels are validated
    /// at [`AnalysisMode`] parse time, before any prompt text exists.
    pub fn build(
        sanitized_request: &str,
        request_meta: &ProcessingMetadata,
        sanitized_response: &str,
        response_meta: &ProcessingMetadata,
        mode: AnalysisMode,
    ) -> Self {
        let summary = processing_summary(request_meta, response_meta);
        let prompt = build_prompt(
            sanitized_request,
            sanitized_response,
            mode,
            request_meta,
            response_meta,
        );
        DisclosureReport { summary, prompt }
    }
}

/// One message's section of the audit summary.
fn message_section(label: &str, meta: &ProcessingMetadata) -> String {
    let mut section = format!("{} modifications:\n", label);

    if meta.has_redactions() {
        section.push_str(&format!(
            "- Redacted headers: {}\n",
            meta.redacted_headers.join(", ")
        ));
        for name in &meta.redacted_headers {
            let value = meta.header_values.get(name).map(String::as_str).unwrap_or("");
            section.push_str(&format!(
                "  • {}: {}\n",
                name,
                header::describe_content(name, value)
            ));
        }
    } else {
        section.push_str("- No headers were redacted\n");
    }

    if meta.body_truncated {
        section.push_str(&format!(
            "- {} body truncated (Original size: {} bytes)\n",
            label, meta.original_size
        ));
    }

    section
}

/// Human-readable summary of everything both sanitize passes changed,
/// request first, then response.
pub fn processing_summary(
    request_meta: &ProcessingMetadata,
    response_meta: &ProcessingMetadata,
) -> String {
    format!(
        "Processing Summary:\n\n{}\n{}",
        message_section("Request", request_meta),
        message_section("Response", response_meta)
    )
}

/// Context note placed at the top of every prompt. The explanatory paragraph
/// appears only when at least one message actually had redactions.
fn disclosure_context(
    request_meta: &ProcessingMetadata,
    response_meta: &ProcessingMetadata,
) -> String {
    let mut context = String::from("Note about the data being analyzed:\n");
    if request_meta.has_redactions() || response_meta.has_redactions() {
        context.push_str(
            "For security purposes, some sensitive headers have been redacted but should still be \
             considered in the security analysis. The presence of these headers might indicate \
             important security mechanisms that should be evaluated.\n\n",
        );
    }
    context
}

/// Synthesize the mode-specific analysis prompt around the sanitized texts.
fn build_prompt(
    request: &str,
    response: &str,
    mode: AnalysisMode,
    request_meta: &ProcessingMetadata,
    response_meta: &ProcessingMetadata,
) -> String {
    let context = disclosure_context(request_meta, response_meta);

    match mode {
        AnalysisMode::VulnerabilityScan => format!(
            "{context}\nAnalyze this HTTP request and response for security vulnerabilities.\n\
             Focus on critical security issues and provide actionable recommendations.\n\n\
             REQUEST:\n{request}\n\n\
             RESPONSE:\n{response}\n\n\
             Analyze for:\n\
             1. Input validation issues\n\
             2. Authentication/Authorization flaws (consider redacted auth headers in analysis)\n\
             3. Information disclosure\n\
             4. Security misconfigurations\n\
             5. Session management issues (consider cookie usage patterns even if redacted)\n\n\
             For each finding, provide:\n\
             - Severity (Critical/High/Medium/Low)\n\
             - Description\n\
             - Potential impact\n\
             - Specific remediation steps\n"
        ),
        AnalysisMode::SecurityHeadersCheck => format!(
            "{context}\nAnalyze the security headers in this HTTP exchange:\n\n\
             REQUEST:\n{request}\n\n\
             RESPONSE:\n{response}\n\n\
             Provide:\n\
             1. Analysis of present security headers\n\
             2. Missing critical security headers\n\
             3. Header-specific recommendations\n\
             4. Security implications of the current configuration\n\
             5. Best practices for header implementation\n"
        ),
        AnalysisMode::CustomPrompt => format!(
            "{context}\nAnalyze this HTTP exchange for security issues:\n\n\
             REQUEST:\n{request}\n\n\
             RESPONSE:\n{response}\n\n\
             Provide a focused security analysis of the most critical findings,\n\
             considering both visible and redacted security mechanisms.\n"
        ),
    }
}
