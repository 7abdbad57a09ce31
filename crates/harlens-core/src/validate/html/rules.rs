//! Rule checks over the scanned token stream.

use std::collections::HashSet;

use crate::config::RuleConfig;
use crate::error::EngineFault;
use crate::validate::EngineMessage;

use super::scanner::{Attr, Position, Token};

pub const CLOSE_ORDER: &str = "close-order";
pub const VOID_CONTENT: &str = "void-content";
pub const NO_DUP_ATTR: &str = "no-dup-attr";
pub const NO_DUP_ID: &str = "no-dup-id";
pub const DEPRECATED: &str = "deprecated";
pub const WCAG_H37: &str = "wcag/h37";
pub const NO_INLINE_STYLE: &str = "no-inline-style";
pub const MISSING_DOCTYPE: &str = "missing-doctype";
pub const ELEMENT_CASE: &str = "element-case";

/// Every rule the built-in engine implements.
pub const ALL_RULES: &[&str] = &[
    CLOSE_ORDER,
    VOID_CONTENT,
    NO_DUP_ATTR,
    NO_DUP_ID,
    DEPRECATED,
    WCAG_H37,
    NO_INLINE_STYLE,
    MISSING_DOCTYPE,
    ELEMENT_CASE,
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const DEPRECATED_ELEMENTS: &[&str] = &[
    "acronym", "applet", "basefont", "bgsound", "big", "blink", "center", "dir", "font",
    "frame", "frameset", "isindex", "keygen", "listing", "marquee", "menuitem", "multicol",
    "nextid", "nobr", "noembed", "noframes", "plaintext", "rb", "rtc", "spacer", "strike",
    "tt", "xmp",
];

/// Elements whose end tag may be omitted.
const OPTIONAL_END: &[&str] = &[
    "html", "head", "body", "p", "li", "dt", "dd", "option", "optgroup", "tr", "td", "th",
    "thead", "tbody", "tfoot", "colgroup", "caption", "rt", "rp",
];

/// Start tags that implicitly close an open `<p>`.
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hgroup", "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Open elements a start tag of `name` closes implicitly, innermost first.
fn implicitly_closed_by(name: &str) -> &'static [&'static str] {
    match name {
        "li" => &["li"],
        "dt" | "dd" => &["dt", "dd"],
        "td" | "th" => &["td", "th"],
        "tr" => &["td", "th", "tr"],
        "thead" | "tbody" | "tfoot" => &["td", "th", "tr", "thead", "tbody"],
        "option" => &["option"],
        "optgroup" => &["option", "optgroup"],
        "body" => &["head"],
        _ if CLOSES_P.contains(&name) => &["p"],
        _ => &[],
    }
}

struct OpenElement {
    name: String,
    pos: Position,
}

/// Collects messages for enabled rules only, with the configured severity.
struct Reporter<'r> {
    rules: &'r RuleConfig,
    messages: Vec<EngineMessage>,
}

impl Reporter<'_> {
    fn report(&mut self, rule: &str, pos: Position, message: String) {
        let Some(setting) = self.rules.get(rule).filter(|s| s.is_enabled()) else {
            return;
        };
        self.messages.push(EngineMessage {
            rule_id: rule.to_string(),
            severity: setting.level.severity_code(),
            message,
            line: pos.line,
            column: pos.column,
        });
    }
}

/// Run all rules over `tokens`, returning messages in document order
/// (unclosed elements are reported last).
pub fn check(
    tokens: &[Token<'_>],
    rules: &RuleConfig,
    max_depth: usize,
) -> Result<Vec<EngineMessage>, EngineFault> {
    let mut out = Reporter {
        rules,
        messages: Vec::new(),
    };
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_doctype = false;
    let mut checked_doctype = false;

    for token in tokens {
        match token {
            Token::Doctype { .. } => seen_doctype = true,
            Token::StartTag {
                name,
                attrs,
                self_closing,
                pos,
            } => {
                if !checked_doctype {
                    checked_doctype = true;
                    if !seen_doctype {
                        out.report(
                            MISSING_DOCTYPE,
                            Position { line: 1, column: 1 },
                            "Document is missing doctype".to_string(),
                        );
                    }
                }

                let lower = name.to_ascii_lowercase();
                check_case(&mut out, name, *pos);
                check_attributes(&mut out, &lower, *pos, attrs, &mut seen_ids);
                if DEPRECATED_ELEMENTS.contains(&lower.as_str()) {
                    out.report(DEPRECATED, *pos, format!("<{lower}> is deprecated"));
                }

                if *self_closing || VOID_ELEMENTS.contains(&lower.as_str()) {
                    continue;
                }
                let closes = implicitly_closed_by(&lower);
                while stack
                    .last()
                    .is_some_and(|top| closes.contains(&top.name.as_str()))
                {
                    stack.pop();
                }
                if stack.len() >= max_depth {
                    return Err(EngineFault::DepthExceeded {
                        max_depth,
                        line: pos.line,
                    });
                }
                stack.push(OpenElement {
                    name: lower,
                    pos: *pos,
                });
            }
            Token::EndTag { name, pos } => {
                let lower = name.to_ascii_lowercase();
                check_case(&mut out, name, *pos);
                if VOID_ELEMENTS.contains(&lower.as_str()) {
                    out.report(
                        VOID_CONTENT,
                        *pos,
                        format!("End tag for <{lower}> must be omitted"),
                    );
                    continue;
                }
                close_element(&mut out, &mut stack, &lower, *pos);
            }
        }
    }

    for open in &stack {
        if !OPTIONAL_END.contains(&open.name.as_str()) {
            out.report(
                CLOSE_ORDER,
                open.pos,
                format!("Unclosed element '<{}>'", open.name),
            );
        }
    }

    Ok(out.messages)
}

fn close_element(out: &mut Reporter<'_>, stack: &mut Vec<OpenElement>, name: &str, pos: Position) {
    let Some(idx) = stack.iter().rposition(|open| open.name == name) else {
        out.report(CLOSE_ORDER, pos, format!("Stray end tag '</{name}>'"));
        return;
    };
    for open in &stack[idx + 1..] {
        if !OPTIONAL_END.contains(&open.name.as_str()) {
            out.report(
                CLOSE_ORDER,
                pos,
                format!(
                    "Mismatched close-tag, expected '</{}>' but found '</{name}>'",
                    open.name
                ),
            );
        }
    }
    stack.truncate(idx);
}

fn check_case(out: &mut Reporter<'_>, name: &str, pos: Position) {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        out.report(
            ELEMENT_CASE,
            pos,
            format!("Element \"{name}\" should be lowercase"),
        );
    }
}

fn check_attributes<'t>(
    out: &mut Reporter<'_>,
    element: &str,
    pos: Position,
    attrs: &[Attr<'t>],
    seen_ids: &mut HashSet<&'t str>,
) {
    let mut names: HashSet<String> = HashSet::new();
    let mut has_alt = false;

    for attr in attrs {
        let name = attr.name.to_ascii_lowercase();
        if !names.insert(name.clone()) {
            out.report(
                NO_DUP_ATTR,
                attr.pos,
                format!("Attribute \"{name}\" duplicated"),
            );
            continue;
        }
        match name.as_str() {
            "id" => {
                if let Some(id) = attr.value.filter(|v| !v.is_empty()) {
                    if !seen_ids.insert(id) {
                        out.report(NO_DUP_ID, attr.pos, format!("Duplicate ID \"{id}\""));
                    }
                }
            }
            "style" => out.report(
                NO_INLINE_STYLE,
                attr.pos,
                "Inline style is not allowed".to_string(),
            ),
            "alt" => has_alt = true,
            _ => {}
        }
    }

    if element == "img" && !has_alt {
        out.report(
            WCAG_H37,
            pos,
            "<img> is missing required \"alt\" attribute".to_string(),
        );
    }
}
