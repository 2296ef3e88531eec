//! Read-only statement guard for the ad-hoc SQL path.

use crate::value_objects::InvalidArgument;

const ALLOWED_PREFIXES: &[&str] = &["SELECT", "PRAGMA"];
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "REPLACE", "ATTACH", "DETACH",
    "VACUUM", "REINDEX",
];

/// Checks a statement and returns it without its trailing semicolon.
pub fn validate_read_only(sql: &str) -> Result<String, InvalidArgument> {
    let sanitized = sanitize_sql(sql);
    if sanitized.trim().is_empty() {
        return Err(InvalidArgument::new("sql is required"));
    }

    validate_single_statement(&sanitized)?;

    let first = first_keyword(&sanitized).unwrap_or_default();
    if !ALLOWED_PREFIXES.contains(&first.as_str()) {
        return Err(InvalidArgument::new(
            "Only SELECT or PRAGMA statements are allowed",
        ));
    }

    if let Some(token) = tokens_upper(&sanitized)
        .into_iter()
        .find(|token| FORBIDDEN_KEYWORDS.contains(&token.as_str()))
    {
        return Err(InvalidArgument::new(format!(
            "statement contains forbidden keyword: {}",
            token
        )));
    }

    Ok(strip_trailing_semicolon(sql).to_string())
}

pub fn strip_trailing_semicolon(sql: &str) -> &str {
    let trimmed = sql.trim();
    match trimmed.strip_suffix(';') {
        Some(stripped) => stripped.trim_end(),
        None => trimmed,
    }
}

fn validate_single_statement(sanitized: &str) -> Result<(), InvalidArgument> {
    let body = strip_trailing_semicolon(sanitized);
    if body.contains(';') {
        return Err(InvalidArgument::new("multiple statements are not allowed"));
    }
    Ok(())
}

fn first_keyword(sql: &str) -> Option<String> {
    let keyword: String = sql
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_alphabetic())
        .collect();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword.to_ascii_uppercase())
    }
}

fn tokens_upper(sql: &str) -> Vec<String> {
    sql.split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

// Blanks out comments and quoted text so keywords inside them are ignored.
fn sanitize_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
            }
            out.push(' ');
            continue;
        }
        if in_block_comment {
            if ch == '*' && matches!(chars.peek(), Some('/')) {
                chars.next();
                in_block_comment = false;
                out.push(' ');
            }
            out.push(' ');
            continue;
        }
        if let Some(open) = quote {
            if ch == open {
                if chars.peek() == Some(&open) {
                    chars.next();
                    out.push(' ');
                } else {
                    quote = None;
                }
            }
            out.push(' ');
            continue;
        }

        match ch {
            '-' if matches!(chars.peek(), Some('-')) => {
                chars.next();
                in_line_comment = true;
                out.push_str("  ");
            }
            '/' if matches!(chars.peek(), Some('*')) => {
                chars.next();
                in_block_comment = true;
                out.push_str("  ");
            }
            '\'' | '"' | '`' => {
                quote = Some(ch);
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}
