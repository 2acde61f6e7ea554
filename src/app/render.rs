use crate::core::{Failure, Outcome};
use crate::domain::model::{AnnotatedEvidence, Verdict};
use crate::utils::error::Result;

pub fn render_markdown(verdict: &Verdict) -> String {
    let mut out = format!("### Verdict: {}\n\n{}\n\n", verdict.label, verdict.explanation.trim());

    out.push_str("**Sources**\n\n");
    if verdict.evidence_used.is_empty() {
        out.push_str("_No sources were found._\n");
    } else {
        for (i, evidence) in verdict.evidence_used.iter().enumerate() {
            out.push_str(&render_source(i + 1, evidence));
        }
    }

    out.push_str(&format!(
        "\n_Checked at {}_\n",
        verdict.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out
}

fn render_source(n: usize, evidence: &AnnotatedEvidence) -> String {
    let title = if evidence.result.title.is_empty() {
        "(untitled)"
    } else {
        evidence.result.title.as_str()
    };
    let credibility = evidence
        .bias
        .credibility_score
        .map(|score| format!("{:.0}%", score * 100.0))
        .unwrap_or_else(|| "n/a".to_string());

    let mut line = format!(
        "- [S{}] **[{}]({})** _bias: {}, credibility: {}, tier {}: {}_\n",
        n,
        title,
        evidence.result.url,
        evidence.bias.label,
        credibility,
        evidence.trust.level,
        evidence.trust.reason
    );
    if !evidence.result.snippet.is_empty() {
        line.push_str(&format!("  {}\n", evidence.result.snippet));
    }
    line
}

pub fn render_failure(failure: &Failure) -> String {
    let kind = serde_json::to_value(failure.kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", failure.kind));

    format!(
        "### Check failed ({})\n\n{} (while {})\n\n💡 {}\n",
        kind, failure.message, failure.stage, failure.suggestion
    )
}

/// JSON 模式下每個結果輸出一行
pub fn render_outcome(outcome: &Outcome, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(outcome)?);
    }
    Ok(match outcome {
        Outcome::Done(verdict) => render_markdown(verdict),
        Outcome::Failed(failure) => render_failure(failure),
    })
}
