//! Tokens fed to the structural parser by a markup front-end.

use crate::listener::{Event, Parameters};

/// One item of the tokenizer stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open {
        name: String,
        parameters: Parameters,
    },
    Close {
        name: String,
    },
    Content(ContentToken),
    /// A run of blank source lines.
    BlankLines(usize),
}

impl Token {
    pub fn open(name: impl Into<String>) -> Self {
        Token::Open {
            name: name.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn open_with(name: impl Into<String>, parameters: Parameters) -> Self {
        Token::Open {
            name: name.into(),
            parameters,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        Token::Close { name: name.into() }
    }

    pub fn word(word: impl Into<String>) -> Self {
        Token::Content(ContentToken::Word(word.into()))
    }
}

/// Leaf content that maps one-to-one onto a singleton event.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentToken {
    Word(String),
    Space,
    NewLine,
    SpecialSymbol(char),
    RawText {
        text: String,
        syntax: String,
    },
    Verbatim {
        content: String,
        inline: bool,
        parameters: Parameters,
    },
    Id(String),
}

impl ContentToken {
    pub fn into_event(self) -> Event {
        match self {
            ContentToken::Word(word) => Event::OnWord { word },
            ContentToken::Space => Event::OnSpace,
            ContentToken::NewLine => Event::OnNewLine,
            ContentToken::SpecialSymbol(symbol) => Event::OnSpecialSymbol { symbol },
            ContentToken::RawText { text, syntax } => Event::OnRawText { text, syntax },
            ContentToken::Verbatim {
                content,
                inline,
                parameters,
            } => Event::OnVerbatim {
                content,
                inline,
                parameters,
            },
            ContentToken::Id(name) => Event::OnId { name },
        }
    }

    /// Split running text into words, spaces and special symbols.
    ///
    /// Any whitespace run collapses into a single space. ASCII punctuation
    /// becomes a special symbol each; everything else accumulates into words.
    pub fn split_text(text: &str) -> Vec<ContentToken> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut in_space = false;

        for c in text.chars() {
            if c.is_whitespace() {
                flush_word(&mut word, &mut tokens);
                if !in_space {
                    tokens.push(ContentToken::Space);
                    in_space = true;
                }
                continue;
            }
            in_space = false;
            if c.is_ascii_punctuation() {
                flush_word(&mut word, &mut tokens);
                tokens.push(ContentToken::SpecialSymbol(c));
            } else {
                word.push(c);
            }
        }
        flush_word(&mut word, &mut tokens);
        tokens
    }
}

fn flush_word(word: &mut String, tokens: &mut Vec<ContentToken>) {
    if !word.is_empty() {
        tokens.push(ContentToken::Word(std::mem::take(word)));
    }
}
