//! Tokenizer and grammar for the edge list syntax of the `E` command:
//!
//! ```text
//! list := '{' [ pair { ',' pair } ] '}'
//! pair := '<' int ',' int '>'
//! int  := [ '-' ] digit { digit }
//! ```
//!
//! Whitespace is allowed between tokens. Vertex numbers are returned as written (1-indexed,
//! possibly out of range); range checks belong to the graph.

use crate::cust_error::ParseError;
use std::iter::Peekable;
use std::str::CharIndices;

/// Parses `input` into the sequence of raw `(a, b)` pairs it lists, in input order.
pub fn parse_edge_list(input: &str) -> Result<Vec<(i64, i64)>, ParseError> {
    let mut scanner = Scanner::new(input);
    let mut pairs = Vec::new();
    scanner.expect('{', "'{'")?;
    if !scanner.eat('}') {
        loop {
            pairs.push(scanner.pair()?);
            match scanner.next_token("',' or '}'")? {
                (_, ',') => continue,
                (_, '}') => break,
                (position, found) => {
                    return Err(ParseError::Unexpected {
                        position,
                        found,
                        expected: "',' or '}'",
                    })
                }
            }
        }
    }
    scanner.end()?;
    Ok(pairs)
}

struct Scanner<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    /// Returns the next non-whitespace character and its byte position.
    fn next_token(&mut self, expected: &'static str) -> Result<(usize, char), ParseError> {
        self.skip_whitespace();
        self.chars.next().ok_or(ParseError::UnexpectedEnd { expected })
    }

    /// Consumes `c` if it is the next non-whitespace character.
    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if(|(_, next)| *next == c).is_some()
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        match self.next_token(expected)? {
            (_, found) if found == c => Ok(()),
            (position, found) => Err(ParseError::Unexpected {
                position,
                found,
                expected,
            }),
        }
    }

    fn pair(&mut self) -> Result<(i64, i64), ParseError> {
        self.expect('<', "'<'")?;
        let a = self.int()?;
        self.expect(',', "','")?;
        let b = self.int()?;
        self.expect('>', "'>'")?;
        Ok((a, b))
    }

    fn int(&mut self) -> Result<i64, ParseError> {
        self.skip_whitespace();
        let start = match self.chars.peek() {
            Some((position, _)) => *position,
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: "a vertex number",
                })
            }
        };
        let mut end = start;
        if let Some((_, '-')) = self.chars.peek() {
            self.chars.next();
            end += 1;
        }
        while let Some((position, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
            end = position + c.len_utf8();
        }
        let input = self.input;
        let digits = &input[start..end];
        if digits.is_empty() || digits == "-" {
            let (position, found) = match self.chars.peek() {
                Some(&(position, found)) => (position, found),
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "a vertex number",
                    })
                }
            };
            return Err(ParseError::Unexpected {
                position,
                found,
                expected: "a vertex number",
            });
        }
        digits.parse().map_err(|source| ParseError::BadInt {
            position: start,
            source,
        })
    }

    fn end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.chars.next() {
            None => Ok(()),
            Some((position, found)) => Err(ParseError::Unexpected {
                position,
                found,
                expected: "end of edge list",
            }),
        }
    }
}
