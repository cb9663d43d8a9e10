//! Bracketed text form shared by both containers.
//!
//! Containers render as `[a,b,c]` (heap) or `[a, b, c]` (list). Parsing
//! accepts either separator and trims whitespace around each element, so
//! element types whose text form contains `,` do not round-trip.

use core::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Writes `items` between brackets, separated by `sep`.
pub(crate) fn write_bracketed<W, I, F>(out: &mut W, items: I, sep: &str, mut each: F) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator,
    F: FnMut(&mut W, I::Item) -> fmt::Result,
{
    out.write_char('[')?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.write_str(sep)?;
        }
        each(&mut *out, item)?;
    }
    out.write_char(']')
}

/// Renders `items` with a caller-supplied formatter.
pub(crate) fn render_with<I, F>(items: I, sep: &str, mut item2str: F) -> String
where
    I: IntoIterator,
    F: FnMut(I::Item) -> String,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_bracketed(&mut out, items, sep, |out, item| {
        out.push_str(&item2str(item));
        Ok(())
    });
    out
}

/// Parses the bracketed form back into its elements, in text order.
pub(crate) fn parse_bracketed<T: FromStr>(s: &str) -> Result<Vec<T>, ParseError<T::Err>> {
    let inner = s
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::MissingBrackets)?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|item| item.trim().parse().map_err(ParseError::Element))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn bracketed_separators() {
        let mut out = String::new();
        write_bracketed(&mut out, [1, 2, 3], ", ", |w, x| write!(w, "{x}")).unwrap();
        assert_eq!(out, "[1, 2, 3]");

        assert_eq!(render_with([4, 5], ",", |x| format!("<{x}>")), "[<4>,<5>]");
        assert_eq!(render_with(Vec::<u8>::new(), ",", |x| x.to_string()), "[]");
    }

    #[test]
    fn parse_both_separators() {
        assert_eq!(parse_bracketed::<i32>("[1,2,3]"), Ok(vec![1, 2, 3]));
        assert_eq!(parse_bracketed::<i32>(" [4, -5] "), Ok(vec![4, -5]));
        assert_eq!(parse_bracketed::<i32>("[]"), Ok(vec![]));
        assert_eq!(parse_bracketed::<i32>("[  ]"), Ok(vec![]));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_bracketed::<i32>("1, 2"),
            Err(ParseError::MissingBrackets)
        );
        assert!(matches!(
            parse_bracketed::<i32>("[1, x]"),
            Err(ParseError::Element(_))
        ));
    }
}
