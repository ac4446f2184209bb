//! Lexer (scanner) for Lox source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Scanning is a single left-to-right pass with at most two characters
//! of lookahead. Lexical errors never abort the scan: each one is recorded and
//! scanning resumes after the offending input, so the returned stream always
//! ends with exactly one `EOF` token.

use super::token::{Token, TokenKind, Value};
use log::{debug, trace};
use std::fmt;

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedBlockComment,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

impl LexError {
    pub fn message(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(_) => "Unexpected character.",
            LexErrorKind::UnterminatedString => "Unterminated string.",
            LexErrorKind::UnterminatedBlockComment => {
                "Unterminated block comment."
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(ch) => write!(
                f,
                "Lexer error at line {}: unexpected character '{}'",
                self.line, ch
            ),
            _ => write!(
                f,
                "Lexer error at line {}: {}",
                self.line,
                self.message()
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Output of a full scan: the token stream plus every lexical error found.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

/// Lexer for Lox source code
pub struct Lexer {
    input: Vec<char>,
    start: usize,
    position: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            position: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input. The lexer is consumed: a scan cannot be
    /// restarted.
    pub fn tokenize(mut self) -> ScanResult {
        while !self.is_at_end() {
            self.start = self.position;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        debug!(
            "scanned {} tokens ({} lexical errors)",
            self.tokens.len(),
            self.errors.len()
        );

        ScanResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.advance() else {
            return;
        };

        match ch {
            ' ' | '\t' | '\r' | '\n' => {}

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else if self.match_char('*') {
                    self.skip_block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            '"' => self.string_literal(),

            '0'..='9' => self.number_literal(),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),

            _ => self.error(LexErrorKind::UnexpectedCharacter(ch), self.line),
        }
    }

    /// Skip single-line comment (// ...). The newline itself is left for the
    /// main loop.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip block comment (/* ... */). Comments do not nest: the first `*/`
    /// closes the comment no matter how many `/*` were seen inside it.
    fn skip_block_comment(&mut self) {
        let start_line = self.line;

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return;
            }
            self.advance();
        }

        self.error(LexErrorKind::UnterminatedBlockComment, start_line);
    }

    /// Parse string literal. Strings may span lines and have no escapes.
    fn string_literal(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(LexErrorKind::UnterminatedString, self.line);
            return;
        }

        self.advance(); // consume closing quote

        let value: String =
            self.input[self.start + 1..self.position - 1].iter().collect();
        self.add_literal(TokenKind::String, Some(Value::Str(value)));
    }

    /// Parse numeric literal. A trailing `.` with no digit after it is not
    /// part of the number.
    fn number_literal(&mut self) {
        self.consume_digits();

        if self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // consume '.'
            self.consume_digits();
        }

        // Digits with an optional fraction always parse as f64.
        let literal = self.lexeme().parse::<f64>().ok().map(Value::Number);
        self.add_literal(TokenKind::Number, literal);
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Parse identifier or keyword. The reserved-word table is consulted
    /// before the token is emitted.
    fn identifier_or_keyword(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = self.lexeme();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        self.add_literal(kind, Some(Value::Str(text)));
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Option<Value>) {
        let token = Token::new(kind, self.lexeme(), literal, self.line);
        trace!("token {}", token);
        self.tokens.push(token);
    }

    fn error(&mut self, kind: LexErrorKind, line: usize) {
        debug!("lexical error at line {}: {:?}", line, kind);
        self.errors.push(LexError { kind, line });
    }

    fn lexeme(&self) -> String {
        self.input[self.start..self.position].iter().collect()
    }

    /// Consume the current character if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character, counting lines as newlines go by
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .tokens
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("(){},.-+;*"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("! != = == < <= > >= /"),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_greedy_two_char_operators() {
        // "!==" is "!=" then "="
        assert_eq!(
            kinds("!=="),
            vec![TokenKind::BangEqual, TokenKind::Equal, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments() {
        let scan = Lexer::new("1 // comment\n2 /* block\ncomment */ 3").tokenize();
        assert!(scan.errors.is_empty());
        let lines: Vec<_> = scan.tokens.iter().map(|t| (t.kind, t.line)).collect();
        assert_eq!(
            lines,
            vec![
                (TokenKind::Number, 1),
                (TokenKind::Number, 2),
                (TokenKind::Number, 3),
                (TokenKind::Eof, 3),
            ]
        );
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        // The inner "*/" closes the comment, leaving "2 */" as tokens.
        assert_eq!(
            kinds("/* outer /* inner */ 2 */"),
            vec![
                TokenKind::Number,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_empty_block_comment() {
        let scan = Lexer::new("/**/").tokenize();
        assert!(scan.errors.is_empty());
        assert_eq!(scan.tokens.len(), 1);
    }

    #[test]
    fn test_unterminated_block_comment_reports_opening_line() {
        let scan = Lexer::new("1\n/* never\nclosed\n").tokenize();
        assert_eq!(
            scan.errors,
            vec![LexError {
                kind: LexErrorKind::UnterminatedBlockComment,
                line: 2,
            }]
        );
        assert_eq!(scan.tokens.last().map(|t| t.line), Some(4));
    }

    #[test]
    fn test_string_literal() {
        let scan = Lexer::new("\"hello\nworld\"").tokenize();
        let token = &scan.tokens[0];
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"hello\nworld\"");
        assert_eq!(token.literal, Some(Value::Str("hello\nworld".into())));
        assert_eq!(token.line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let scan = Lexer::new("\"abc\ndef").tokenize();
        assert_eq!(
            scan.errors,
            vec![LexError {
                kind: LexErrorKind::UnterminatedString,
                line: 2,
            }]
        );
        assert_eq!(kinds("\"abc"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_numbers() {
        let scan = Lexer::new("12 3.25 7.").tokenize();
        let tokens = &scan.tokens;
        assert_eq!(tokens[0].literal, Some(Value::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Value::Number(3.25)));
        assert_eq!(tokens[2].lexeme, "7");
        assert_eq!(tokens[3].kind, TokenKind::Dot);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let scan = Lexer::new("orchid or _x1 nil").tokenize();
        let tokens = &scan.tokens;
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Or);
        assert_eq!(tokens[1].literal, Some(Value::Str("or".into())));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].lexeme, "_x1");
        assert_eq!(tokens[3].kind, TokenKind::Nil);
    }

    #[test]
    fn test_unexpected_character_continues() {
        let scan = Lexer::new("1 @ 2\n#").tokenize();
        assert_eq!(
            scan.errors,
            vec![
                LexError {
                    kind: LexErrorKind::UnexpectedCharacter('@'),
                    line: 1,
                },
                LexError {
                    kind: LexErrorKind::UnexpectedCharacter('#'),
                    line: 2,
                },
            ]
        );
        assert_eq!(scan.tokens.len(), 3);
    }
}
