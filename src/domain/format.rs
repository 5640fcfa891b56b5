use crate::domain::dates::{format_canonical, parse_contact_date};

/// Shown in place of an empty cell.
pub const EMPTY_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Email,
    Tel,
    Text,
}

impl InputKind {
    pub fn as_html(self) -> &'static str {
        match self {
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Text => "text",
        }
    }
}

pub fn input_kind(label: &str) -> InputKind {
    let normalized = label.to_lowercase();
    if normalized.contains("email") {
        InputKind::Email
    } else if normalized.contains("telefone") {
        InputKind::Tel
    } else {
        InputKind::Text
    }
}

/// Formats a cell for the table. Rules are keyed by header text first;
/// `is_last_contact` marks the column holding the last-contact role.
pub fn format_value(label: &str, value: &str, is_last_contact: bool) -> String {
    if value.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let normalized = label.to_lowercase();
    if normalized.contains("telefone") {
        return format_phone(value);
    }
    if normalized.contains("cpf") {
        return format_cpf(value);
    }
    if is_last_contact {
        return format_contact_date(value);
    }

    value.to_string()
}

pub fn format_phone(raw: &str) -> String {
    let digits = only_digits(raw);
    if digits.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    format!(
        "({}) {}-{}",
        segment(&digits, 0, 2),
        segment(&digits, 2, 7),
        segment(&digits, 7, digits.len())
    )
}

pub fn format_cpf(raw: &str) -> String {
    let digits = only_digits(raw);
    if digits.len() == 11 {
        return format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        );
    }
    if raw.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        raw.to_string()
    }
}

/// Re-renders any recognised date as `DD/MM/YYYY HH:mm`; unrecognised text
/// is shown as typed.
pub fn format_contact_date(raw: &str) -> String {
    if raw.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    parse_contact_date(raw)
        .map(|parsed| format_canonical(&parsed))
        .unwrap_or_else(|| raw.to_string())
}

fn only_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// ASCII-only input, so byte offsets are char offsets.
fn segment(digits: &str, start: usize, end: usize) -> &str {
    let len = digits.len();
    &digits[start.min(len)..end.min(len)]
}
