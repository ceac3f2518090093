//! Turning raw service output into displayable text.

/// One line of a two-party exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueLine {
    pub speaker: String,
    pub text:    String,
}

/// Split an encounter reply into at most `max_lines` lines.
///
/// Blank lines are dropped.  Line `i` is attributed to `speakers[i % 2]`;
/// a leading `"<speaker>:"` prefix for that speaker is removed, then one
/// quote character (`"` or `'`) at each end.
pub fn parse_dialogue_lines(
    text:      &str,
    first:     &str,
    second:    &str,
    max_lines: usize,
) -> Vec<DialogueLine> {
    let speakers = [first, second];
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_lines)
        .enumerate()
        .map(|(i, line)| {
            let speaker = speakers[i % 2];
            DialogueLine { speaker: speaker.to_owned(), text: strip_line(line, speaker) }
        })
        .collect()
}

fn strip_line(line: &str, speaker: &str) -> String {
    let body = line
        .strip_prefix(speaker)
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
        .map_or(line, str::trim_start);
    let body = body.strip_prefix(['"', '\'']).unwrap_or(body);
    let body = body.strip_suffix(['"', '\'']).unwrap_or(body);
    body.to_owned()
}

/// Trim a single-text reply; `None` when nothing is left.
pub fn clean_reply(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
