//! Diagnostics reporting
//!
//! Lexical and syntax errors are both flattened into a [`Diagnostic`]: a line
//! number, an optional location within the line, and a message. The
//! [`Reporter`] writes each one as `[line <n>] Error<where>: <message>` and
//! remembers that an error happened. The flag lives in the reporter instance,
//! so two runs only share it if they share a reporter, and only the caller
//! resets it.

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use std::fmt;
use std::io::{self, Write};

/// Where on its line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Only the line is known (lexical errors).
    Bare,
    /// The parser ran out of tokens.
    AtEnd,
    /// The parser stopped at this lexeme.
    AtLexeme(String),
}

/// One reportable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Bare => {
                write!(f, "[line {}] Error: {}", self.line, self.message)
            }
            Location::AtEnd => write!(
                f,
                "[line {}] Error at end: {}",
                self.line, self.message
            ),
            Location::AtLexeme(lexeme) => write!(
                f,
                "[line {}] Error at '{}': {}",
                self.line, lexeme, self.message
            ),
        }
    }
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        Diagnostic {
            line: err.line,
            location: Location::Bare,
            message: err.message().to_string(),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let location = if err.token.is_eof() {
            Location::AtEnd
        } else {
            Location::AtLexeme(err.token.lexeme.clone())
        };

        Diagnostic {
            line: err.token.line,
            location,
            message: err.message.clone(),
        }
    }
}

/// Writes diagnostics to an error channel and tracks whether any were seen.
pub struct Reporter<W: Write> {
    out: W,
    had_error: bool,
    colored: bool,
}

impl Reporter<io::Stderr> {
    /// Report to stderr, in red when stderr is a terminal.
    pub fn stderr() -> Self {
        let stderr = io::stderr();
        let colored = stderr.is_tty();
        Self {
            colored,
            ..Self::new(stderr)
        }
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            had_error: false,
            colored: false,
        }
    }

    /// Write one diagnostic line and set the error flag.
    pub fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.had_error = true;
        if self.colored {
            writeln!(self.out, "{}", diagnostic.to_string().red())
        } else {
            writeln!(self.out, "{}", diagnostic)
        }
    }

    pub fn report_all<'a>(
        &mut self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.report(diagnostic)?;
        }
        Ok(())
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Clear the error flag. Called by the driver between independent runs.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexErrorKind;
    use crate::parser::token::{Token, TokenKind};

    #[test]
    fn test_lex_error_format() {
        let err = LexError {
            kind: LexErrorKind::UnexpectedCharacter('@'),
            line: 3,
        };
        assert_eq!(
            Diagnostic::from(&err).to_string(),
            "[line 3] Error: Unexpected character."
        );
    }

    #[test]
    fn test_parse_error_format() {
        let at_end = ParseError {
            token: Token::eof(2),
            message: "Expect expression.".to_string(),
        };
        assert_eq!(
            Diagnostic::from(&at_end).to_string(),
            "[line 2] Error at end: Expect expression."
        );

        let at_lexeme = ParseError {
            token: Token::new(TokenKind::RightParen, ")", None, 1),
            message: "Expect expression.".to_string(),
        };
        assert_eq!(
            Diagnostic::from(&at_lexeme).to_string(),
            "[line 1] Error at ')': Expect expression."
        );
    }

    #[test]
    fn test_reporter_flag_is_reset_by_caller_only() {
        let mut reporter = Reporter::new(Vec::new());
        assert!(!reporter.had_error());

        let diagnostic = Diagnostic {
            line: 1,
            location: Location::Bare,
            message: "Unterminated string.".to_string(),
        };
        reporter.report(&diagnostic).unwrap();
        assert!(reporter.had_error());
        // reading the flag leaves it set
        assert!(reporter.had_error());

        reporter.reset();
        assert!(!reporter.had_error());

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(written, "[line 1] Error: Unterminated string.\n");
    }
}
