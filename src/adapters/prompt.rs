use crate::domain::model::{AnnotatedEvidence, Claim, VerdictLabel};

/// 系統提示：要求模型回傳嚴格的 JSON 判定
pub fn system_prompt() -> String {
    let labels = VerdictLabel::ALL
        .iter()
        .map(|label| format!("\"{}\"", label.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a calm, empathetic misinformation checker.\n\
         TONE: kind, neutral, non-confrontational; acknowledge why the message feels plausible.\n\
         METHOD: assess the user's claim using ONLY the numbered sources provided. Each source carries \
         a static bias label, a credibility score and a trust tier; weigh official, reputable and \
         fact-checking sources above unvetted ones and treat bias labels as context, not as proof.\n\
         Cite sources as [S<n>]. If no source addresses the claim, say so and suggest what evidence would settle it.\n\
         OUTPUT: STRICT JSON with exactly two keys:\n\
         \"label\": one of {labels};\n\
         \"explanation\": Markdown text, 1-2 gentle sentences, 1-3 bullets citing [S<n>], \
         and one line on what would settle it."
    )
}

/// 使用者提示：陳述本身加上編號的來源清單
pub fn user_prompt(claim: &Claim, evidence: &[AnnotatedEvidence]) -> String {
    let mut prompt = format!("User message:\n\"\"\"{}\"\"\"\n\n", claim.as_str());

    if evidence.is_empty() {
        prompt.push_str("Sources: none were found by the web search.\n");
        return prompt;
    }

    prompt.push_str("Sources (cite as [S<n>]):\n");
    for (i, item) in evidence.iter().enumerate() {
        let title = if item.result.title.is_empty() {
            "(untitled)"
        } else {
            item.result.title.as_str()
        };
        let credibility = item
            .bias
            .credibility_score
            .map(|score| format!("{:.2}", score))
            .unwrap_or_else(|| "unknown".to_string());

        prompt.push_str(&format!(
            "[S{}] {} <{}>\n    domain: {}; bias: {}; credibility: {}; trust tier {}: {}\n    {}\n",
            i + 1,
            title,
            item.result.url,
            item.result.source_domain,
            item.bias.label,
            credibility,
            item.trust.level,
            item.trust.reason,
            item.result.snippet,
        ));
    }
    prompt
}
