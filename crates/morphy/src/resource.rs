// Line-oriented text resources: character substitution tables and known
// prefix lists.
//
// One entry per line. `#` starts a comment, surrounding whitespace is
// ignored, and backslash escapes (`\uXXXX`, `\t`, `\n`, `\#`, `\\`) allow
// characters that would otherwise be stripped.

use crate::config::ConfigError;

/// Cut `line` at the first `#` that is not escaped.
fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '#' if !escaped => return &line[..i],
            _ => escaped = false,
        }
    }
    line
}

/// Trim surrounding whitespace, keeping a trailing `\ ` escape intact.
fn trim_raw(s: &str) -> &str {
    let s = s.trim_start();
    let trimmed = s.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
    if backslashes % 2 == 1 {
        if let Some(c) = s[trimmed.len()..].chars().next() {
            return &s[..trimmed.len() + c.len_utf8()];
        }
    }
    trimmed
}

/// Trim raw whitespace from `field`, then decode its escapes.
fn unescape(field: &str, line_no: usize) -> Result<String, ConfigError> {
    let field = trim_raw(field);
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| ConfigError::MalformedResource {
                        line: line_no,
                        message: format!("bad unicode escape \\u{hex}"),
                    })?;
                out.push(decoded);
            }
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {
                return Err(ConfigError::MalformedResource {
                    line: line_no,
                    message: "dangling backslash".to_string(),
                });
            }
        }
    }
    Ok(out)
}

/// Comment-stripped, trimmed, non-empty raw lines with their 1-based numbers.
fn raw_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, trim_raw(strip_comment(line))))
        .filter(|(_, line)| !line.is_empty())
}

/// Non-empty, unescaped, comment-stripped lines with their 1-based numbers.
pub fn resource_lines(text: &str) -> Result<Vec<(usize, String)>, ConfigError> {
    raw_lines(text)
        .map(|(line_no, line)| Ok((line_no, unescape(line, line_no)?)))
        .collect()
}

/// Parse `key => value` pairs.
pub fn parse_pairs(text: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw_lines(text)
        .map(|(line_no, line)| {
            let (key, value) =
                line.split_once("=>")
                    .ok_or_else(|| ConfigError::MalformedResource {
                        line: line_no,
                        message: format!("expected `key => value`, got {line:?}"),
                    })?;
            Ok((unescape(key, line_no)?, unescape(value, line_no)?))
        })
        .collect()
}

/// Parse a known-prefix list, one prefix per line, lowercased.
pub fn parse_known_prefixes(text: &str) -> Result<Vec<String>, ConfigError> {
    Ok(resource_lines(text)?
        .into_iter()
        .map(|(_, line)| line.to_lowercase())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines() {
        let text = "# header\n\n  псевдо  # trailing\nАнти\n";
        assert_eq!(
            parse_known_prefixes(text).unwrap(),
            vec!["псевдо".to_string(), "анти".to_string()]
        );
    }

    #[test]
    fn pairs_with_escapes() {
        let text = "е => ё\n\\u0433 => \\u0491\n\\# => hash\n";
        assert_eq!(
            parse_pairs(text).unwrap(),
            vec![
                ("е".to_string(), "ё".to_string()),
                ("г".to_string(), "ґ".to_string()),
                ("#".to_string(), "hash".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_pair_reports_line() {
        let err = parse_pairs("е => ё\nбез стрелки\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedResource { line: 2, .. }));
    }

    #[test]
    fn escaped_whitespace_is_kept() {
        assert_eq!(
            resource_lines("  \\tпре\\u0020  # note\n").unwrap(),
            vec![(1, "\tпре ".to_string())]
        );
        assert_eq!(
            parse_pairs("\\t => \\u0020\n").unwrap(),
            vec![("\t".to_string(), " ".to_string())]
        );
    }

    #[test]
    fn escaped_trailing_space() {
        assert_eq!(resource_lines("ab\\  \n").unwrap(), vec![(1, "ab ".to_string())]);
        assert_eq!(resource_lines("ab\\\\  ").unwrap(), vec![(1, "ab\\".to_string())]);
    }

    #[test]
    fn escaped_backslash_before_comment() {
        assert_eq!(
            resource_lines("a\\\\# comment").unwrap(),
            vec![(1, "a\\".to_string())]
        );
    }

    #[test]
    fn bad_unicode_escape() {
        assert!(resource_lines("\\uZZZZ").is_err());
        assert!(resource_lines("\\u12").is_err());
        assert!(resource_lines("abc\\").is_err());
    }
}
