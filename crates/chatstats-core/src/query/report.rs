//! Plain-text renderers for rankings and Q&A exports.

use crate::indexer::qa::QaIndex;
use crate::models::RankedUser;

pub const SEPARATOR_WIDTH: usize = 50;

/// One block per answered question:
///
/// ```text
/// Question:
/// <question>
/// Answer 1:
/// <answer>
/// --------------------------------------------------
/// ```
///
/// Unanswered questions are omitted.
pub fn render_qa(index: &QaIndex) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    for (question, answers) in index.answered() {
        out.push_str(&format!("Question:\n{question}\n"));
        for (number, answer) in answers.iter().enumerate() {
            out.push_str(&format!("Answer {}:\n{answer}\n", number + 1));
        }
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

fn render_section(out: &mut String, title: &str, rows: &[RankedUser]) {
    out.push_str(title);
    out.push('\n');
    for row in rows {
        out.push_str(&format!("{row}\n"));
    }
}

/// The two labeled top-N sections, repliers first.
pub fn render_top_report(repliers: &[RankedUser], talkative: &[RankedUser], n: usize) -> String {
    let mut out = String::new();
    render_section(&mut out, &format!("Top {n} repliers"), repliers);
    out.push('\n');
    render_section(&mut out, &format!("Top {n} talkative"), talkative);
    out
}

pub fn render_word_counts(words: &[(String, u64)]) -> String {
    words
        .iter()
        .map(|(word, count)| format!("{word}\t{count}\n"))
        .collect()
}
