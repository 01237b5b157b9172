//! Russian-locale string ordering.
//!
//! Approximates the CLDR `ru` collation at three strengths:
//! - primary: spaces and punctuation < digits < Cyrillic < Latin < the rest,
//!   letters case-folded, `ё` equal to `е`;
//! - secondary: `е` before `ё`;
//! - tertiary: lowercase before uppercase.
//!
//! Strings equal at all three strengths fall back to code point order so the
//! result is a total order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Script {
    Separator,
    Digit,
    Cyrillic,
    Latin,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Weights {
    primary: (Script, u32),
    secondary: u8,
    tertiary: u8,
}

fn weights(c: char) -> Weights {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let tertiary = u8::from(lower != c);

    let (primary, secondary) = match lower {
        'ё' => ((Script::Cyrillic, 'е' as u32), 1),
        'а'..='я' => ((Script::Cyrillic, lower as u32), 0),
        '\u{0400}'..='\u{04FF}' => ((Script::Cyrillic, 0x1_0000 + lower as u32), 0),
        'a'..='z' => ((Script::Latin, lower as u32), 0),
        _ if lower.is_ascii_digit() => ((Script::Digit, lower as u32), 0),
        _ if lower.is_alphabetic() && (lower as u32) < 0x0250 => {
            ((Script::Latin, 0x1_0000 + lower as u32), 0)
        }
        _ if lower.is_whitespace() || lower.is_ascii_punctuation() => {
            ((Script::Separator, lower as u32), 0)
        }
        _ if lower.is_numeric() => ((Script::Digit, 0x1_0000 + lower as u32), 0),
        _ => ((Script::Other, lower as u32), 0),
    };

    Weights {
        primary,
        secondary,
        tertiary,
    }
}

/// Compare two strings the way a Russian-language UI sorts them.
pub fn compare_ru(a: &str, b: &str) -> Ordering {
    let left: Vec<Weights> = a.chars().map(weights).collect();
    let right: Vec<Weights> = b.chars().map(weights).collect();

    let primary = left
        .iter()
        .map(|w| w.primary)
        .cmp(right.iter().map(|w| w.primary));
    if primary != Ordering::Equal {
        return primary;
    }

    left.iter()
        .map(|w| w.secondary)
        .cmp(right.iter().map(|w| w.secondary))
        .then_with(|| {
            left.iter()
                .map(|w| w.tertiary)
                .cmp(right.iter().map(|w| w.tertiary))
        })
        .then_with(|| a.cmp(b))
}
