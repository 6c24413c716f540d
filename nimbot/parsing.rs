//! Parsing utilities for positions and moves typed by hand

/// Implement [`std::str::FromStr`] using parser. Type must have `parse` method implemented.
macro_rules! impl_from_str_via_parser {
    ($t: ident) => {
        impl std::str::FromStr for $t {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $t::parse($crate::parsing::Parser::new(s)) {
                    Some((p, result)) if p.is_empty() => Ok(result),
                    Some(_) => Err("Parse error: leftover input"),
                    None => Err("Parse error: parser failed"),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use std::str::FromStr;

                $t::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

macro_rules! try_option {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => return None,
        }
    };
}
pub(crate) use try_option;

macro_rules! lexeme {
    ($p:expr, $f:expr) => {{
        let p = $p.trim_whitespace();
        match $f(p) {
            None => None,
            Some((p, val)) => {
                let p = p.trim_whitespace();
                Some((p, val))
            }
        }
    }};
}
pub(crate) use lexeme;

#[must_use]
#[derive(Debug, Clone, Copy)]
/// Recursive descent parser over a string slice
pub struct Parser<'s> {
    /// Remaining unparsed input
    pub input: &'s str,
}

impl<'s> Parser<'s> {
    /// Create new parser marking the beginning of the input
    pub const fn new(input: &'s str) -> Parser<'s> {
        Parser { input }
    }

    /// Check if the whole input has been consumed
    pub const fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Remove whitespace from the beginning of the input
    pub fn trim_whitespace(self) -> Parser<'s> {
        Parser {
            input: self
                .input
                .trim_start_matches(|c: char| matches!(c, '\t' | '\n' | '\r' | ' ')),
        }
    }

    /// Parse one ascii char if input is non-empty
    pub fn parse_any_ascii_char(self) -> Option<(Parser<'s>, char)> {
        let c = self.input.chars().next().filter(char::is_ascii)?;
        Some((
            Parser {
                input: &self.input[1..],
            },
            c,
        ))
    }

    /// Parse one ascii char if input is non-empty and it matches the `expected`
    pub fn parse_ascii_char(self, expected: char) -> Option<Parser<'s>> {
        match self.parse_any_ascii_char() {
            Some((p, c)) if c == expected => Some(p),
            _ => None,
        }
    }

    /// Skip a single `,` if present. Whitespace alone also separates values.
    pub fn skip_separator(self) -> Parser<'s> {
        let p = self.trim_whitespace();
        p.parse_ascii_char(',').unwrap_or(p).trim_whitespace()
    }

    /// Parse unsigned number. Fails on overflow.
    pub fn parse_u32(self) -> Option<(Parser<'s>, u32)> {
        let digits = self
            .input
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }

        let mut acc: u32 = 0;
        for b in self.input[..digits].bytes() {
            acc = acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
        }

        Some((
            Parser {
                input: &self.input[digits..],
            },
            acc,
        ))
    }
}
