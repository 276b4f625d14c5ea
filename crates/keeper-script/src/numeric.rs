//! Numeric argument parsing.
//!
//! Accepts what C's `strtol(text, &end, 0)` accepts: optional leading
//! whitespace and sign, then a `0x` hexadecimal, `0` octal or decimal
//! magnitude. Trailing text is reported so the caller can warn about it.

use winnow::ascii::{digit1, hex_digit1, multispace0, oct_digit1};
use winnow::combinator::{alt, opt, preceded};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::one_of;

/// Result of reading a numeric script argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNumber {
    pub value: i64,
    /// The whole text was consumed.
    pub complete: bool,
}

fn negative(input: &mut &str) -> ModalResult<bool> {
    opt(one_of(['+', '-']))
        .map(|sign| sign == Some('-'))
        .parse_next(input)
}

fn magnitude(input: &mut &str) -> ModalResult<i64> {
    alt((
        preceded(alt(("0x", "0X")), hex_digit1).try_map(|d: &str| i64::from_str_radix(d, 16)),
        preceded('0', opt(oct_digit1))
            .try_map(|d: Option<&str>| i64::from_str_radix(d.unwrap_or("0"), 8)),
        digit1.try_map(|d: &str| d.parse::<i64>()),
    ))
    .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<i64> {
    preceded(multispace0, (negative, magnitude))
        .map(|(neg, value)| if neg { -value } else { value })
        .parse_next(input)
}

/// Parse `text` as a number, yielding 0 when no number prefix exists.
pub fn parse_number(text: &str) -> ParsedNumber {
    let mut input = text;
    match number.parse_next(&mut input) {
        Ok(value) => ParsedNumber {
            value,
            complete: input.is_empty(),
        },
        Err(_) => ParsedNumber {
            value: 0,
            complete: text.is_empty(),
        },
    }
}

fn decimal(input: &mut &str) -> ModalResult<i64> {
    preceded(multispace0, (negative, digit1.try_map(|d: &str| d.parse::<i64>())))
        .map(|(neg, value)| if neg { -value } else { value })
        .parse_next(input)
}

/// Leading decimal number of `text`, as C's `atol` reads it. Anything that
/// doesn't start with a number reads as 0.
pub fn leading_decimal(text: &str) -> i64 {
    let mut input = text;
    decimal.parse_next(&mut input).unwrap_or(0)
}
