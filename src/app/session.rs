use crate::app::render::render_outcome;
use crate::core::{ClaimPipeline, Outcome};
use crate::domain::ports::{SearchClient, VerdictRequester};
use crate::utils::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub submitted: usize,
    pub done: usize,
    pub failed: usize,
}

/// 逐行讀取陳述，每一行各自跑一次獨立的查證；失敗不會中斷後續的提交。
/// 空白行直接略過。
pub async fn run_session<S, V, R, W>(
    pipeline: &ClaimPipeline<S, V>,
    input: R,
    output: &mut W,
    json: bool,
) -> Result<SessionSummary>
where
    S: SearchClient,
    V: VerdictRequester,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        summary.submitted += 1;
        let outcome = pipeline.run_outcome(&line).await;
        if outcome.is_done() {
            summary.done += 1;
        } else {
            summary.failed += 1;
        }

        writeln!(output, "{}", render_outcome(&outcome, json)?)?;
        output.flush()?;
    }

    tracing::info!(
        "📊 Session finished: {} submitted, {} verdicts, {} failed",
        summary.submitted,
        summary.done,
        summary.failed
    );
    Ok(summary)
}

/// 單次查證，回傳結果與輸出文字
pub async fn check_once<S, V>(pipeline: &ClaimPipeline<S, V>, claim: &str, json: bool) -> Result<(Outcome, String)>
where
    S: SearchClient,
    V: VerdictRequester,
{
    let outcome = pipeline.run_outcome(claim).await;
    let rendered = render_outcome(&outcome, json)?;
    Ok((outcome, rendered))
}
