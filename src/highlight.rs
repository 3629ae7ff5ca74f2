// src/highlight.rs
//! Token styling for example snippets.
//!
//! Example blocks are stored as the inner HTML of a `<pre>`: a `<code>` element
//! holding Rouge-style `<span class="kd">` tokens. This turns that fragment into
//! styled text runs using a fixed class table. No terminal or UI specifics here;
//! frontends map [`TokenStyle`] onto whatever they draw with.

use scraper::node::Node;
use scraper::{ElementRef, Html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenStyle {
    /// 0xRRGGBB
    pub color: u32,
    pub bold: bool,
    pub italic: bool,
}

impl TokenStyle {
    const fn new(color: u32) -> Self {
        Self { color, bold: false, italic: false }
    }
    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Unclassed text; renderers leave it in the terminal's own colour.
    pub fn is_plain(&self) -> bool {
        *self == PLAIN
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.color >> 16) as u8, (self.color >> 8) as u8, self.color as u8)
    }
}

pub const PLAIN: TokenStyle = TokenStyle::new(0x000000);
pub const KEYWORD: TokenStyle = TokenStyle::new(0xAD3DA4).bold();
pub const TYPE: TokenStyle = TokenStyle::new(0x703DAA);
pub const STRING: TokenStyle = TokenStyle::new(0xD12F1B);
pub const NUMBER: TokenStyle = TokenStyle::new(0x272AD8);
pub const COMMENT: TokenStyle = TokenStyle::new(0x707F8C).italic();
pub const ATTRIBUTE: TokenStyle = TokenStyle::new(0x947100);
pub const FUNCTION: TokenStyle = TokenStyle::new(0x4B21B0);
pub const VARIABLE: TokenStyle = TokenStyle::new(0x3E8087);
pub const ERROR: TokenStyle = TokenStyle::new(0xFF0000).bold();

/// Rouge short class → style. `None` means "not a token class", inherit.
pub fn style_for_class(class: &str) -> Option<TokenStyle> {
    let style = match class {
        "k" | "kd" | "kr" | "kp" | "kn" | "kc" | "kv" => KEYWORD,
        "kt" | "nc" | "nn" | "bp" => TYPE,
        "s" | "s1" | "s2" | "sb" | "sc" | "sd" | "se" | "sh" | "si" | "sr" | "ss" | "sx" => STRING,
        "m" | "mi" | "mf" | "mh" | "mo" | "mb" | "il" => NUMBER,
        "c" | "c1" | "cm" | "cp" | "cs" | "cd" | "ch" => COMMENT,
        "na" | "nd" => ATTRIBUTE,
        "nf" | "fm" => FUNCTION,
        "nv" | "vi" | "vc" | "vg" => VARIABLE,
        "err" => ERROR,
        "n" | "o" | "ow" | "p" | "w" | "nx" => PLAIN,
        _ => return None,
    };
    Some(style)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: TokenStyle,
}

/// Styled runs for one example snippet. Entities are decoded; adjacent runs
/// with the same style are merged.
pub fn render(snippet: &str) -> Vec<Token> {
    let doc = Html::parse_fragment(snippet);
    let mut out = Vec::new();
    walk(doc.root_element(), PLAIN, &mut out);
    out
}

/// Decoded text of a snippet, no styling.
pub fn plain_text(snippet: &str) -> String {
    render(snippet).into_iter().map(|t| t.text).collect()
}

fn walk(el: ElementRef<'_>, style: TokenStyle, out: &mut Vec<Token>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => push(out, t, style),
            Node::Element(e) => {
                let inner = e.classes().find_map(style_for_class).unwrap_or(style);
                if let Some(child_el) = ElementRef::wrap(child) {
                    walk(child_el, inner, out);
                }
            }
            _ => {}
        }
    }
}

fn push(out: &mut Vec<Token>, text: &str, style: TokenStyle) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => out.push(Token { text: s!(text), style }),
    }
}
