//! Lexical analysis with significant indentation.
//!
//! Tokens are produced lazily through a `current()`/`advance()` cursor, the
//! protocol the parser drives. Block structure is recovered from
//! leading-space counts: two spaces form one indentation unit, and unit
//! transitions between logical lines surface as `Indent`/`Dedent` tokens,
//! interleaved with exactly one `Newline` per line.

pub mod token;

mod error;

pub use error::{LexError, LexResult};
pub use token::Token;

/// Spaces per indentation unit.
const INDENT_WIDTH: usize = 2;

pub struct Lexer<'a> {
    input: &'a str,
    /// Cursor within the current line; never crosses `line_end`.
    pos: usize,
    /// Exclusive end of the current line's content, the newline excluded.
    line_end: usize,
    /// Where the scan for the next significant line resumes.
    scan_pos: usize,
    in_line: bool,
    current_indent: usize,
    pending_indent: usize,
    current: Token,
}

impl<'a> Lexer<'a> {
    /// Builds a lexer over `input` and produces the first token, available
    /// through [`Lexer::current`] immediately after construction.
    pub fn new(input: &'a str) -> LexResult<Self> {
        let mut lexer = Self {
            input,
            pos: 0,
            line_end: 0,
            scan_pos: 0,
            in_line: false,
            current_indent: 0,
            pending_indent: 0,
            current: Token::Eof,
        };
        lexer.advance()?;
        Ok(lexer)
    }

    /// The token most recently produced by [`Lexer::advance`].
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Produces and returns the next token. Once `Eof` has been emitted,
    /// every further call returns `Eof` again.
    pub fn advance(&mut self) -> LexResult<Token> {
        let token = self.read_token()?;
        self.current = token.clone();
        Ok(token)
    }

    fn read_token(&mut self) -> LexResult<Token> {
        // Indentation transitions are settled one unit per token before any
        // text of the new line is considered.
        if self.pending_indent > self.current_indent {
            self.current_indent += 1;
            return Ok(Token::Indent);
        }
        if self.pending_indent < self.current_indent {
            self.current_indent -= 1;
            return Ok(Token::Dedent);
        }

        if !self.in_line {
            if !self.load_next_line() {
                if self.current_indent > 0 {
                    self.pending_indent = 0;
                    self.current_indent -= 1;
                    return Ok(Token::Dedent);
                }
                return Ok(Token::Eof);
            }
            // The fresh line may open or close blocks before its first token.
            return self.read_token();
        }

        self.skip_spaces();

        let Some(c) = self.peek_char() else {
            // Real or virtual end of the line.
            self.in_line = false;
            return Ok(Token::Newline);
        };

        if c == '#' {
            self.pos = self.line_end;
            self.in_line = false;
            return Ok(Token::Newline);
        }

        if let Some(token) = self.try_read_compound_comparison(c) {
            return Ok(token);
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let literal = self.read_literal();
            return Ok(Token::keyword(literal).unwrap_or_else(|| Token::Id(literal.to_string())));
        }

        if c == '"' || c == '\'' {
            return self.read_string(c);
        }

        if c.is_ascii_digit() {
            return self.read_number();
        }

        self.consume_char();
        Ok(Token::Char(c))
    }

    /// Scans forward for the next line that is neither blank nor
    /// comment-only and records its indentation depth. Skipped lines emit
    /// no tokens and leave `pending_indent` untouched. Returns `false` at
    /// end of input.
    fn load_next_line(&mut self) -> bool {
        while self.scan_pos < self.input.len() {
            let start = self.scan_pos;
            let rest = &self.input[start..];
            let content_len = rest.find('\n').unwrap_or(rest.len());
            let line = &rest[..content_len];
            self.scan_pos = start + content_len + 1;

            let leading = line.len() - line.trim_start_matches(' ').len();
            let significant = line[leading..].chars().next().is_some_and(|c| c != '#');
            if significant {
                self.pending_indent = leading / INDENT_WIDTH;
                self.pos = start + leading;
                self.line_end = start + content_len;
                self.in_line = true;
                return true;
            }
        }
        false
    }

    fn try_read_compound_comparison(&mut self, c: char) -> Option<Token> {
        let token = match c {
            '=' => Token::Eq,
            '!' => Token::NotEq,
            '<' => Token::LessOrEq,
            '>' => Token::GreaterOrEq,
            _ => return None,
        };
        if self.peek_next() != Some('=') {
            return None;
        }
        self.consume_char();
        self.consume_char();
        Some(token)
    }

    fn read_literal(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.consume_char();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn read_number(&mut self) -> LexResult<Token> {
        let start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
        }
        let literal = &self.input[start..self.pos];
        let value = literal
            .parse::<i64>()
            .map_err(|_| LexError::NumberOutOfRange {
                literal: literal.to_string(),
                position: start,
            })?;
        Ok(Token::Number(value))
    }

    fn read_string(&mut self, quote: char) -> LexResult<Token> {
        let start = self.pos;
        self.consume_char();
        let mut value = String::new();
        while let Some(c) = self.peek_char() {
            self.consume_char();
            if c == quote {
                return Ok(Token::String(value));
            }
            if c == '\\' {
                let Some(escaped) = self.peek_char() else {
                    break;
                };
                self.consume_char();
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    // Any other escaped character stands for itself.
                    other => other,
                });
            } else {
                value.push(c);
            }
        }
        Err(LexError::UnterminatedString { position: start })
    }

    fn skip_spaces(&mut self) {
        while self.peek_char() == Some(' ') {
            self.consume_char();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..self.line_end].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..self.line_end].chars();
        chars.next();
        chars.next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

/// Tokenizes a whole source string, including the trailing `Eof`.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(input)?;
    let mut tokens = vec![lexer.current().clone()];
    while tokens.last() != Some(&Token::Eof) {
        tokens.push(lexer.advance()?);
    }
    Ok(tokens)
}
