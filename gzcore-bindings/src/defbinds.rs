//! Parser for `DEFBINDS` default-binding lumps.
//!
//! A lump is a sequence of entries:
//!
//! ```text
//! [bind | doublebind | mapbind] <key> <command>
//! ```
//!
//! The directive is optional and defaults to `bind`. Tokens are
//! whitespace-separated words or double-quoted strings; `//` and `/* */`
//! comments are skipped.

use crate::error::DefbindsError;
use crate::key_names::{KeyCode, KeyNameTable, NO_KEY};
use crate::table::BindingKind;

/// One parsed default binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBinding {
    pub target: BindingKind,
    pub key: KeyCode,
    pub command: String,
}

/// Result of parsing one lump.
///
/// Entries before a syntax error are kept so they can still be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLump {
    pub entries: Vec<DefaultBinding>,
    pub error: Option<DefbindsError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    line: usize,
}

struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_trivia(&mut self) -> Result<(), DefbindsError> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some(&'/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            let start = self.line;
                            self.bump();
                            self.bump();
                            let mut prev = '\0';
                            loop {
                                match self.bump() {
                                    Some('/') if prev == '*' => break,
                                    Some(c) => prev = c,
                                    None => {
                                        return Err(DefbindsError::UnterminatedComment {
                                            line: start,
                                        });
                                    }
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, DefbindsError> {
        self.skip_trivia()?;
        let line = self.line;
        let Some(&first) = self.chars.peek() else {
            return Ok(None);
        };

        let mut text = String::new();
        if first == '"' {
            self.bump();
            loop {
                match self.bump() {
                    Some('"') => break,
                    Some('\\') => match self.bump() {
                        Some(c @ ('"' | '\\')) => text.push(c),
                        Some('n') => text.push('\n'),
                        Some(c) => {
                            text.push('\\');
                            text.push(c);
                        }
                        None => return Err(DefbindsError::UnterminatedString { line }),
                    },
                    Some(c) => text.push(c),
                    None => return Err(DefbindsError::UnterminatedString { line }),
                }
            }
        } else {
            while let Some(&c) = self.chars.peek() {
                if c.is_whitespace() || c == '"' {
                    break;
                }
                text.push(c);
                self.bump();
            }
        }
        Ok(Some(Token { text, line }))
    }
}

/// Parse a DEFBINDS lump, resolving key names with the config-alias lookup.
pub fn parse_defbinds(text: &str, names: &KeyNameTable) -> ParsedLump {
    let mut tokens = Tokenizer::new(text);
    let mut lump = ParsedLump::default();

    if let Err(e) = parse_entries(&mut tokens, names, &mut lump.entries) {
        log::warn!("DEFBINDS: {}", e);
        lump.error = Some(e);
    }
    lump
}

fn parse_entries(
    tokens: &mut Tokenizer<'_>,
    names: &KeyNameTable,
    entries: &mut Vec<DefaultBinding>,
) -> Result<(), DefbindsError> {
    while let Some(first) = tokens.next_token()? {
        let target = if first.text.eq_ignore_ascii_case("bind") {
            Some(BindingKind::Primary)
        } else if first.text.eq_ignore_ascii_case("doublebind") {
            Some(BindingKind::DoubleClick)
        } else if first.text.eq_ignore_ascii_case("mapbind") {
            Some(BindingKind::Automap)
        } else {
            None
        };

        let key_token = match target {
            Some(_) => expect(tokens, "a key name", &first)?,
            None => first,
        };
        let command = expect(tokens, "a command", &key_token)?;

        let key = names.config_code(&key_token.text);
        if key == NO_KEY {
            log::warn!(
                "DEFBINDS line {}: unknown key \"{}\", skipped",
                key_token.line,
                key_token.text
            );
            continue;
        }

        entries.push(DefaultBinding {
            target: target.unwrap_or(BindingKind::Primary),
            key,
            command: command.text,
        });
    }
    Ok(())
}

fn expect(
    tokens: &mut Tokenizer<'_>,
    expected: &'static str,
    after: &Token,
) -> Result<Token, DefbindsError> {
    tokens
        .next_token()?
        .ok_or_else(|| DefbindsError::UnexpectedEnd {
            line: after.line,
            expected,
            after: after.text.clone(),
        })
}
