//! Number and text formatting for the account tables and charts.
//!
//! Numbers are formatted the way the vi-VN locale does: `.` as the thousands
//! separator and no decimals for counts.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Groups of accented lowercase letters and the plain letter they fold to.
const DIACRITIC_FOLDS: [(&str, char); 7] = [
    ("àáảãạăằắẳẵặâầấẩẫậ", 'a'),
    ("èéẻẽẹêềếểễệ", 'e'),
    ("ìíỉĩị", 'i'),
    ("òóỏõọôồốổỗộơờớởỡợ", 'o'),
    ("ùúủũụưừứửữự", 'u'),
    ("ỳýỷỹỵ", 'y'),
    ("đ", 'd'),
];

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .expect("'.' is a single byte separator")
            .precision(Precision::Decimals(0))
    })
}

/// Round `value` to a whole number and format it with `.` thousands separators,
/// e.g. `1234567.4` is formatted as "1.234.567".
pub fn format_number(value: f64) -> String {
    let rounded = value.round();

    if rounded == 0.0 {
        // numfmt renders zero as "0" already, this also avoids "-0".
        return "0".to_owned();
    }

    let formatted = get_thousands_separator_formatter().fmt_string(rounded.abs());

    if rounded < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format a percentage change with two decimals and an explicit plus sign for
/// increases, e.g. "+12.50%", "-3.00%" and "0.00%".
pub fn format_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}%")
    } else if value < 0.0 {
        format!("{value:.2}%")
    } else {
        "0.00%".to_owned()
    }
}

/// Format a percentage rounded to the nearest whole number, e.g. "13%".
pub fn format_rounded_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0%".to_owned()
    } else {
        format!("{rounded}%")
    }
}

/// Normalize `text` for case and accent insensitive search.
///
/// The text is lowercased, Vietnamese diacritics are removed and runs of
/// whitespace collapse to a single space.
pub fn normalize_search_text(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            DIACRITIC_FOLDS
                .iter()
                .find(|(accented, _)| accented.contains(c))
                .map_or(c, |&(_, plain)| plain)
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
