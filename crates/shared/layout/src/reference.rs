//! Reference-time layouts.
//!
//! A reference layout is written as a rendering of the fixed instant
//! `Mon Jan 2 15:04:05 MST 2006` (`01/02 03:04:05PM '06 -0700`), for example
//! `2006-01-02 15:04:05`. Each recognised fragment of that instant becomes a
//! chrono [`Item`]; everything else is literal text.

use crate::error::LayoutError;
use chrono::format::{Fixed, Item, Numeric, Pad};

/// Fragments ordered so that longer tokens win over their prefixes.
const TOKENS: &[(&str, Token)] = &[
    ("January", Token::Fixed(Fixed::LongMonthName)),
    ("Monday", Token::Fixed(Fixed::LongWeekdayName)),
    ("Z07:00", Token::Fixed(Fixed::TimezoneOffsetColonZ)),
    ("-07:00", Token::Fixed(Fixed::TimezoneOffsetColon)),
    ("Z0700", Token::Fixed(Fixed::TimezoneOffsetZ)),
    ("-0700", Token::Fixed(Fixed::TimezoneOffset)),
    ("2006", Token::Numeric(Numeric::Year, Pad::Zero)),
    ("Jan", Token::Fixed(Fixed::ShortMonthName)),
    ("Mon", Token::Fixed(Fixed::ShortWeekdayName)),
    ("MST", Token::Fixed(Fixed::TimezoneName)),
    ("002", Token::Numeric(Numeric::Ordinal, Pad::Zero)),
    ("01", Token::Numeric(Numeric::Month, Pad::Zero)),
    ("02", Token::Numeric(Numeric::Day, Pad::Zero)),
    ("_2", Token::Numeric(Numeric::Day, Pad::Space)),
    ("15", Token::Numeric(Numeric::Hour, Pad::Zero)),
    ("03", Token::Numeric(Numeric::Hour12, Pad::Zero)),
    ("04", Token::Numeric(Numeric::Minute, Pad::Zero)),
    ("05", Token::Numeric(Numeric::Second, Pad::Zero)),
    ("06", Token::Numeric(Numeric::YearMod100, Pad::Zero)),
    ("PM", Token::Fixed(Fixed::UpperAmPm)),
    ("pm", Token::Fixed(Fixed::LowerAmPm)),
    ("1", Token::Numeric(Numeric::Month, Pad::None)),
    ("2", Token::Numeric(Numeric::Day, Pad::None)),
    ("3", Token::Numeric(Numeric::Hour12, Pad::None)),
    ("4", Token::Numeric(Numeric::Minute, Pad::None)),
    ("5", Token::Numeric(Numeric::Second, Pad::None)),
];

#[derive(Clone)]
enum Token {
    Numeric(Numeric, Pad),
    Fixed(Fixed),
}

impl Token {
    fn item(&self) -> Item<'static> {
        match self {
            Self::Numeric(numeric, pad) => Item::Numeric(numeric.clone(), *pad),
            Self::Fixed(fixed) => Item::Fixed(fixed.clone()),
        }
    }
}

/// Compiles a reference layout into owned chrono items.
pub(crate) fn compile(pattern: &str) -> Result<Vec<Item<'static>>, LayoutError> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some((item, len)) = fraction(rest) {
            flush_literal(&mut literal, &mut items);
            items.push(item);
            rest = &rest[len..];
            continue;
        }

        if let Some((fragment, token)) =
            TOKENS.iter().find(|(fragment, _)| rest.starts_with(*fragment))
        {
            flush_literal(&mut literal, &mut items);
            items.push(token.item());
            rest = &rest[fragment.len()..];
            continue;
        }

        if rest.starts_with("-07") {
            return Err(LayoutError::invalid_pattern(
                pattern,
                "hour-only offsets are not supported, use -07:00 or -0700",
            ));
        }

        let Some(ch) = rest.chars().next() else { break };
        literal.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    flush_literal(&mut literal, &mut items);

    Ok(items)
}

/// Matches `.000`-style (fixed width) and `.999`-style (trimmed) fractions.
fn fraction(rest: &str) -> Option<(Item<'static>, usize)> {
    let digits = rest.strip_prefix('.')?;
    let first = digits.chars().next().filter(|c| *c == '0' || *c == '9')?;
    let width = digits.chars().take_while(|c| *c == first).count();

    // A fraction must not run into further digits, e.g. `.0001` is literal text.
    if digits[width..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let fixed = match (first, width) {
        ('9', _) => Fixed::Nanosecond,
        ('0', 3) => Fixed::Nanosecond3,
        ('0', 6) => Fixed::Nanosecond6,
        ('0', 9) => Fixed::Nanosecond9,
        _ => return None,
    };
    Some((Item::Fixed(fixed), width + 1))
}

fn flush_literal(literal: &mut String, items: &mut Vec<Item<'static>>) {
    if literal.is_empty() {
        return;
    }

    let mut run = String::new();
    let mut in_space = false;
    for ch in literal.drain(..) {
        if ch.is_whitespace() != in_space && !run.is_empty() {
            items.push(owned_run(std::mem::take(&mut run), in_space));
        }
        in_space = ch.is_whitespace();
        run.push(ch);
    }
    if !run.is_empty() {
        items.push(owned_run(run, in_space));
    }
}

fn owned_run(run: String, space: bool) -> Item<'static> {
    if space {
        Item::OwnedSpace(run.into_boxed_str())
    } else {
        Item::OwnedLiteral(run.into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_sql_datetime() {
        let items = compile("2006-01-02 15:04:05").unwrap();
        assert_eq!(
            items,
            vec![
                Item::Numeric(Numeric::Year, Pad::Zero),
                Item::OwnedLiteral("-".into()),
                Item::Numeric(Numeric::Month, Pad::Zero),
                Item::OwnedLiteral("-".into()),
                Item::Numeric(Numeric::Day, Pad::Zero),
                Item::OwnedSpace(" ".into()),
                Item::Numeric(Numeric::Hour, Pad::Zero),
                Item::OwnedLiteral(":".into()),
                Item::Numeric(Numeric::Minute, Pad::Zero),
                Item::OwnedLiteral(":".into()),
                Item::Numeric(Numeric::Second, Pad::Zero),
            ]
        );
    }

    #[test]
    fn test_compile_offsets_and_fractions() {
        let items = compile("15:04:05.000Z07:00").unwrap();
        assert!(items.contains(&Item::Fixed(Fixed::Nanosecond3)));
        assert_eq!(items.last(), Some(&Item::Fixed(Fixed::TimezoneOffsetColonZ)));

        let items = compile("05.999999999").unwrap();
        assert_eq!(items.last(), Some(&Item::Fixed(Fixed::Nanosecond)));
    }

    #[test]
    fn test_compile_names_before_numbers() {
        let items = compile("Monday, 02-Jan-06").unwrap();
        assert_eq!(items.first(), Some(&Item::Fixed(Fixed::LongWeekdayName)));
        assert!(items.contains(&Item::Fixed(Fixed::ShortMonthName)));
        assert_eq!(items.last(), Some(&Item::Numeric(Numeric::YearMod100, Pad::Zero)));
    }

    #[test]
    fn test_hour_only_offset_is_rejected() {
        assert!(matches!(compile("15:04 -07"), Err(LayoutError::InvalidPattern { .. })));
    }

    #[test]
    fn test_unknown_text_is_literal() {
        let items = compile("at 15h").unwrap();
        assert_eq!(
            items,
            vec![
                Item::OwnedLiteral("at".into()),
                Item::OwnedSpace(" ".into()),
                Item::Numeric(Numeric::Hour, Pad::Zero),
                Item::OwnedLiteral("h".into()),
            ]
        );
    }
}
