/// Wrapped caption lines, top line first.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineLayout {
    pub lines: Vec<String>,
}

impl LineLayout {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines joined with single spaces, i.e. the upper-cased caption with whitespace collapsed.
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

/// Wrap `text` so each line measures at most `max_width`, filling from the last word backward.
///
/// The text is upper-cased first. Words are taken from the end of the text toward the start
/// and prepended to the current line while it still fits; when it would overflow, the current
/// line is committed above the lines already produced. The last line therefore tends to be the
/// fullest. A word that alone exceeds `max_width` becomes its own line and is never split.
/// Empty or whitespace-only text yields no lines.
pub fn wrap(text: &str, max_width: f32, mut measure: impl FnMut(&str) -> f32) -> LineLayout {
    let upper = text.to_uppercase();
    let words: Vec<&str> = upper.split_whitespace().collect();
    if words.is_empty() {
        return LineLayout::default();
    }

    let mut lines = Vec::<String>::new();
    // Words of the line being built, last word first.
    let mut acc = Vec::<&str>::new();
    for &word in words.iter().rev() {
        acc.push(word);
        let candidate = join_reversed(&acc);
        if measure(&candidate) > max_width && acc.len() > 1 {
            acc.pop();
            lines.push(join_reversed(&acc));
            acc.clear();
            acc.push(word);
        }
    }
    lines.push(join_reversed(&acc));

    lines.reverse();
    LineLayout { lines }
}

fn join_reversed(words: &[&str]) -> String {
    let mut out = String::new();
    for (i, w) in words.iter().rev().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(w);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
