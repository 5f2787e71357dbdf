//! Functionality for looking up lines in the source code.

/// Finds the line with the given 1-based line number. Lines are separated by `\n`,
/// matching how the lexer counts them.
pub fn find_line(source: &str, line_no: usize) -> Option<LineContext> {
    if line_no == 0 {
        return None;
    }

    inclusive_split_lines(source)
        .into_iter()
        .nth(line_no - 1)
        .map(|line| LineContext { source: line, line_no })
}

fn inclusive_split_lines(source: &str) -> Vec<&str> {
    let mut seen_lines: Vec<&str> = source.split_inclusive('\n').collect();

    // A trailing line break still starts a (blank) final line.
    if source.is_empty() || source.ends_with('\n') {
        seen_lines.push("");
    }

    seen_lines
}

/// Contains a slice pointing to a single line in the program,
/// enhanced with its line number.
pub struct LineContext<'a> {
    source: &'a str,
    line_no: usize,
}
impl LineContext<'_> {
    pub fn for_display(&self) -> String {
        self.source.replace(&['\r', '\n'], "")
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Whitespace that moves a caret under the given 1-based column. Tabs are
    /// kept, so the caret lines up however the terminal renders them.
    pub fn padding_to(&self, column: usize) -> String {
        let mut padding: String = self
            .source
            .chars()
            .take(column.saturating_sub(1))
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let missing = column.saturating_sub(1).saturating_sub(padding.chars().count());
        padding.extend(std::iter::repeat(' ').take(missing));
        padding
    }
}
