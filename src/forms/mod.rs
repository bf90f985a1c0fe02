pub mod auth;
pub mod banners;
pub mod categories;
pub mod checkout;
pub mod products;
pub mod settings;

/// Collapses whitespace runs, strips control characters, trims the ends.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitizes each line, drops leading/trailing blank lines and collapses
/// runs of blank lines to one.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(|line| sanitize_inline_text(line)).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
        } else {
            previous_empty = false;
        }
        result.push(line);
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  La   Vie \t Est Belle "), "La Vie Est Belle");
    }

    #[test]
    fn inline_text_strips_control_characters() {
        assert_eq!(sanitize_inline_text("Blo\u{0007}om"), "Bloom");
    }

    #[test]
    fn multiline_text_trims_blank_lines() {
        let input = "\n\nTop notes\n\n\nBase notes\n\n";
        assert_eq!(sanitize_multiline_text(input), "Top notes\n\nBase notes");
    }
}
