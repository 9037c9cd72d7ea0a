//! Word lexer and identifier vocabulary
//!
//! The surface syntax is nothing but whitespace-separated words: no
//! comments, no literals, no escaping. The lexer splits the source into
//! words with source spans; the vocabulary maps each recognized word
//! (case-insensitively) onto its opcode.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::middle::bytecode::Opcode;
use crate::util::span::{Position, Span};

/// The eight surface identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

impl Identifier {
    /// All identifiers, in opcode order
    pub const ALL: [Identifier; 8] = [
        Identifier::Up,
        Identifier::Down,
        Identifier::Left,
        Identifier::Right,
        Identifier::A,
        Identifier::B,
        Identifier::Start,
        Identifier::Select,
    ];

    /// Match a word against the vocabulary, ignoring ASCII case
    pub fn parse(word: &str) -> Option<Identifier> {
        match word.to_ascii_lowercase().as_str() {
            "up" => Some(Identifier::Up),
            "down" => Some(Identifier::Down),
            "left" => Some(Identifier::Left),
            "right" => Some(Identifier::Right),
            "a" => Some(Identifier::A),
            "b" => Some(Identifier::B),
            "start" => Some(Identifier::Start),
            "select" => Some(Identifier::Select),
            _ => None,
        }
    }

    /// Canonical (lowercase) spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Identifier::Up => "up",
            Identifier::Down => "down",
            Identifier::Left => "left",
            Identifier::Right => "right",
            Identifier::A => "a",
            Identifier::B => "b",
            Identifier::Start => "start",
            Identifier::Select => "select",
        }
    }

    /// The opcode this identifier compiles to
    pub fn opcode(&self) -> Opcode {
        match self {
            Identifier::Up => Opcode::IncrementCell,
            Identifier::Down => Opcode::DecrementCell,
            Identifier::Left => Opcode::MoveLeft,
            Identifier::Right => Opcode::MoveRight,
            Identifier::A => Opcode::ReadByte,
            Identifier::B => Opcode::WriteByte,
            Identifier::Start => Opcode::LoopStart,
            Identifier::Select => Opcode::LoopEnd,
        }
    }

    /// The identifier an opcode disassembles back to
    pub fn from_opcode(op: Opcode) -> Identifier {
        match op {
            Opcode::IncrementCell => Identifier::Up,
            Opcode::DecrementCell => Identifier::Down,
            Opcode::MoveLeft => Identifier::Left,
            Opcode::MoveRight => Identifier::Right,
            Opcode::ReadByte => Identifier::A,
            Opcode::WriteByte => Identifier::B,
            Opcode::LoopStart => Identifier::Start,
            Opcode::LoopEnd => Identifier::Select,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw word from the source, with its span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Word text, exactly as written
    pub text: String,
    /// Source span of the word
    pub span: Span,
}

/// Main lexer structure
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Skip any whitespace (word separators)
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Scan the next whitespace-delimited word, or `None` at end of input
    pub fn next_word(&mut self) -> Option<Word> {
        self.skip_whitespace();
        self.peek()?;

        let start = self.position();
        let mut text = String::new();
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            self.advance();
        }

        Some(Word {
            text,
            span: Span::new(start, self.position()),
        })
    }
}
