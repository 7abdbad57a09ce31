//! Tag-level HTML scanner with 1-based line/column positions.
//!
//! Only markup structure is tokenized: text, comments and processing
//! instructions are skipped. Raw text elements (`script`, `style`, ...) are
//! jumped over to their matching end tag.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Doctype {
        pos: Position,
    },
    StartTag {
        name: &'a str,
        attrs: Vec<Attr<'a>>,
        self_closing: bool,
        pos: Position,
    },
    EndTag {
        name: &'a str,
        pos: Position,
    },
}

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Byte offset → line/column, counting columns in chars.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn position(&self, src: &str, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = src[self.starts[line]..offset].chars().count() + 1;
        Position {
            line: (line + 1) as u32,
            column: column as u32,
        }
    }
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn is_attr_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'')
}

/// Scan `src` into structural tokens.
pub fn scan(src: &str) -> Vec<Token<'_>> {
    Scanner::new(src).run()
}

struct Scanner<'a> {
    src: &'a str,
    lower: String,
    bytes: &'a [u8],
    lines: LineIndex,
    i: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            lower: src.to_ascii_lowercase(),
            bytes: src.as_bytes(),
            lines: LineIndex::new(src),
            i: 0,
            tokens: Vec::new(),
        }
    }

    fn pos(&self, offset: usize) -> Position {
        self.lines.position(self.src, offset)
    }

    /// Offset just past the next occurrence of `needle` at or after `from`, or EOF.
    fn skip_past(&self, from: usize, needle: &str) -> usize {
        self.src[from..]
            .find(needle)
            .map_or(self.src.len(), |rel| from + rel + needle.len())
    }

    fn skip_whitespace(&mut self) {
        while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_whitespace() {
            self.i += 1;
        }
    }

    fn take_name(&mut self) -> &'a str {
        let start = self.i;
        while self.i < self.bytes.len() && is_name_char(self.bytes[self.i]) {
            self.i += 1;
        }
        &self.src[start..self.i]
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while let Some(rel) = self.src[self.i..].find('<') {
            let lt = self.i + rel;
            let rest = &self.bytes[lt..];
            if rest.starts_with(b"<!--") {
                self.i = self.skip_past(lt + 4, "-->");
            } else if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
                if self.lower[lt..].starts_with("<!doctype") {
                    self.tokens.push(Token::Doctype { pos: self.pos(lt) });
                }
                self.i = self.skip_past(lt + 2, ">");
            } else if rest.starts_with(b"</") && rest.get(2).is_some_and(u8::is_ascii_alphabetic) {
                self.i = lt + 2;
                let name = self.take_name();
                self.tokens.push(Token::EndTag {
                    name,
                    pos: self.pos(lt),
                });
                self.i = self.skip_past(self.i, ">");
            } else if rest.get(1).is_some_and(u8::is_ascii_alphabetic) {
                self.i = lt + 1;
                self.start_tag(lt);
            } else {
                self.i = lt + 1;
            }
        }
        self.tokens
    }

    fn start_tag(&mut self, lt: usize) {
        let name = self.take_name();
        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.bytes.get(self.i) {
                None => break,
                Some(b'>') => {
                    self.i += 1;
                    break;
                }
                Some(b'/') => {
                    self.i += 1;
                    if self.bytes.get(self.i) == Some(&b'>') {
                        self_closing = true;
                        self.i += 1;
                        break;
                    }
                }
                Some(_) => attrs.push(self.attribute()),
            }
        }

        let pos = self.pos(lt);
        self.tokens.push(Token::StartTag {
            name,
            attrs,
            self_closing,
            pos,
        });

        let lower_name = name.to_ascii_lowercase();
        if !self_closing && RAW_TEXT_ELEMENTS.contains(&lower_name.as_str()) {
            let closing = format!("</{lower_name}");
            self.i = self.lower[self.i..]
                .find(&closing)
                .map_or(self.src.len(), |rel| self.i + rel);
        }
    }

    fn attribute(&mut self) -> Attr<'a> {
        let start = self.i;
        while self.i < self.bytes.len() && !is_attr_name_end(self.bytes[self.i]) {
            self.i += 1;
        }
        if self.i == start {
            // Stray quote or '=': consume it so the loop always advances.
            self.i += 1;
        }
        let name = &self.src[start..self.i];
        let pos = self.pos(start);

        let before_eq = self.i;
        self.skip_whitespace();
        if self.bytes.get(self.i) != Some(&b'=') {
            self.i = before_eq;
            return Attr {
                name,
                value: None,
                pos,
            };
        }
        self.i += 1;
        self.skip_whitespace();

        let value = match self.bytes.get(self.i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = self.i + 1;
                let end = self.src[value_start..]
                    .find(quote as char)
                    .map_or(self.src.len(), |rel| value_start + rel);
                self.i = (end + 1).min(self.src.len());
                &self.src[value_start..end]
            }
            _ => {
                let value_start = self.i;
                while self.i < self.bytes.len()
                    && !self.bytes[self.i].is_ascii_whitespace()
                    && self.bytes[self.i] != b'>'
                {
                    self.i += 1;
                }
                &self.src[value_start..self.i]
            }
        };
        Attr {
            name,
            value: Some(value),
            pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = scan("<p>\n  <span>x</span>\n</p>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "p",
                    attrs: vec![],
                    self_closing: false,
                    pos: at(1, 1)
                },
                Token::StartTag {
                    name: "span",
                    attrs: vec![],
                    self_closing: false,
                    pos: at(2, 3)
                },
                Token::EndTag {
                    name: "span",
                    pos: at(2, 10)
                },
                Token::EndTag {
                    name: "p",
                    pos: at(3, 1)
                },
            ]
        );
    }

    #[test]
    fn attributes_quoted_unquoted_and_bare() {
        let tokens = scan(r#"<input id="a" value='b c' size=3 disabled/>"#);
        let Token::StartTag {
            attrs,
            self_closing,
            ..
        } = &tokens[0]
        else {
            panic!("expected start tag");
        };
        assert!(*self_closing);
        let pairs: Vec<(&str, Option<&str>)> = attrs.iter().map(|a| (a.name, a.value)).collect();
        assert_eq!(
            pairs,
            vec![
                ("id", Some("a")),
                ("value", Some("b c")),
                ("size", Some("3")),
                ("disabled", None),
            ]
        );
        assert_eq!(attrs[1].pos, at(1, 15));
    }

    #[test]
    fn doctype_comments_and_raw_text() {
        let tokens = scan("<!DOCTYPE html><!-- <b> --><script>if (a < b) { x('</div>') }</script>");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[0], Token::Doctype { .. }));
        assert!(matches!(tokens[1], Token::StartTag { name: "script", .. }));
        assert!(matches!(tokens[2], Token::EndTag { name: "script", .. }));
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        let tokens = scan("a < b <> c </ d");
        assert!(tokens.is_empty());
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let tokens = scan("é<b>");
        assert!(matches!(tokens[0], Token::StartTag { pos, .. } if pos == at(1, 2)));
    }
}
