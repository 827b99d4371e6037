//! Generated block management
//!
//! A source file is viewed as a [`SourceLayout`]: either plain text, or text
//! split around one marker-delimited generated block. Only the block is ever
//! replaced; the surrounding text is written back untouched.
//!
//! The blank line and indentation right around a block belong to it, so
//! stripping and re-inserting a block never accumulates stray newlines.

use regex::Regex;
use std::sync::LazyLock;

/// One indentation level for generated members
pub const INDENT_UNIT: &str = "    ";

/// Open/close markers delimiting a generated block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub open: &'static str,
    pub close: &'static str,
}

impl Markers {
    /// Markers used in Kotlin, Java and Rust sources
    pub const SLASH: Markers = Markers {
        open: "//<RustJNI>",
        close: "//</RustJNI>",
    };

    /// Markers used in TOML files
    pub const HASH: Markers = Markers {
        open: "#<RustJNI>",
        close: "#</RustJNI>",
    };

    /// Split `text` around its first complete block
    pub fn locate<'a>(&self, text: &'a str) -> SourceLayout<'a> {
        let Some(open_at) = text.find(self.open) else {
            return SourceLayout::Plain(text);
        };
        let search_from = open_at + self.open.len();
        let Some(close_rel) = text[search_from..].find(self.close) else {
            return SourceLayout::Plain(text);
        };
        let close_end = search_from + close_rel + self.close.len();

        // Indentation on the marker line plus the preceding line break
        let mut lead_start = text[..open_at].trim_end_matches([' ', '\t']).len();
        if text[..lead_start].ends_with("\r\n") {
            lead_start -= 2;
        } else if text[..lead_start].ends_with('\n') {
            lead_start -= 1;
        }

        // Trailing spaces plus the line break ending the close marker line
        let rest = &text[close_end..];
        let mut trail_end = close_end + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
        if text[trail_end..].starts_with("\r\n") {
            trail_end += 2;
        } else if text[trail_end..].starts_with('\n') {
            trail_end += 1;
        }

        SourceLayout::Blocked(BlockedSource {
            before: &text[..lead_start],
            lead: &text[lead_start..open_at],
            block: &text[open_at..close_end],
            trail: &text[close_end..trail_end],
            after: &text[trail_end..],
        })
    }

    /// Remove every block (and the whitespace it owns) from `text`
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.to_string();
        while let SourceLayout::Blocked(parts) = self.locate(&current) {
            current = parts.without_block();
        }
        current
    }

    pub fn contains(&self, text: &str) -> bool {
        self.locate(text).is_blocked()
    }

    /// Wrap body lines between the markers
    pub fn wrap(&self, body: &str) -> String {
        format!("{}\n{}\n{}", self.open, body, self.close)
    }
}

/// A source file seen as plain text or as text around a generated block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout<'a> {
    Plain(&'a str),
    Blocked(BlockedSource<'a>),
}

/// The five segments of a file holding a generated block.
///
/// Concatenating all of them yields the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedSource<'a> {
    pub before: &'a str,
    /// Line break and indentation owned by the block
    pub lead: &'a str,
    /// Open marker through close marker
    pub block: &'a str,
    /// Trailing whitespace and line break owned by the block
    pub trail: &'a str,
    pub after: &'a str,
}

impl BlockedSource<'_> {
    pub fn without_block(&self) -> String {
        format!("{}{}", self.before, self.after)
    }

    /// Remove the block but keep the line break in front of it, so the
    /// lines around it stay separate
    pub fn without_block_lines(&self) -> String {
        let line_break = if self.lead.starts_with("\r\n") {
            "\r\n"
        } else if self.lead.starts_with('\n') {
            "\n"
        } else {
            ""
        };
        format!("{}{}{}", self.before, line_break, self.after)
    }

    /// Replace the block in place, keeping the whitespace around it
    pub fn with_block(&self, block: &str) -> String {
        format!(
            "{}{}{}{}{}",
            self.before, self.lead, block, self.trail, self.after
        )
    }
}

impl<'a> SourceLayout<'a> {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    /// Current block text, if any
    pub fn block(&self) -> Option<&'a str> {
        match self {
            Self::Plain(_) => None,
            Self::Blocked(parts) => Some(parts.block),
        }
    }

    /// Text with the block removed
    pub fn stripped(&self) -> String {
        match self {
            Self::Plain(text) => (*text).to_string(),
            Self::Blocked(parts) => parts.without_block(),
        }
    }
}

/// `class Name`, `object Name`, `interface Name`
static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|object|interface)\s+(\w+)\b").expect("type declaration pattern is valid")
});

/// Anything that ends a declaration header before its body opens
static HEADER_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r";|\b(?:class|object|interface|fun)\b").expect("header break pattern is valid")
});

/// Byte offset just past the opening brace of `class_name`'s declaration.
///
/// A declaration without a body of its own (`class Main` followed by other
/// code) does not count.
pub fn class_body_start(text: &str, class_name: &str) -> Option<usize> {
    TYPE_DECL.captures_iter(text).find_map(|caps| {
        let name = caps.get(1)?;
        if name.as_str() != class_name {
            return None;
        }
        let brace = name.end() + text[name.end()..].find('{')?;
        if HEADER_BREAK.is_match(&text[name.end()..brace]) {
            return None;
        }
        Some(brace + 1)
    })
}

/// Indent every non-blank line of `code`; blank lines stay as they are
pub fn indent_block(code: &str, indent: &str) -> String {
    code.lines()
        .map(|line| {
            let content = line.trim_start();
            if content.is_empty() {
                line.to_string()
            } else {
                format!("{indent}{content}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `block` right after the opening brace of `class_name`.
///
/// The block is indented one level deeper than the line holding the brace
/// and separated from the brace by a blank line. `None` when the class
/// declaration cannot be found.
pub fn insert_after_class(text: &str, block: &str, class_name: &str) -> Option<String> {
    let at = class_body_start(text, class_name)?;
    let (before, after) = text.split_at(at);

    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let class_indent: String = before[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let indented = indent_block(block, &format!("{class_indent}{INDENT_UNIT}"));

    let mut out = String::with_capacity(text.len() + indented.len() + 4);
    out.push_str(before);
    if !before.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&indented);
    if !after.starts_with('\n') {
        out.push('\n');
    }
    out.push_str(after);
    Some(out)
}

/// Insert `block` after the leading `use` declarations (or at the top when
/// there are none)
pub fn insert_after_uses(text: &str, block: &str) -> String {
    let mut offset = 0;
    let mut insert_at: Option<usize> = None;
    let mut in_use = false;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        let line_end = offset + line.len();

        if in_use {
            if trimmed.ends_with(';') {
                in_use = false;
                insert_at = Some(line_end);
            }
        } else if trimmed.starts_with("use ") || trimmed.starts_with("pub use ") {
            if trimmed.ends_with(';') {
                insert_at = Some(line_end);
            } else {
                in_use = true;
            }
        } else if !(trimmed.is_empty()
            || trimmed.starts_with("//")
            || trimmed.starts_with("#!")
            || trimmed.starts_with("extern crate "))
        {
            break;
        }

        offset = line_end;
    }

    match insert_at {
        Some(at) => {
            let (before, after) = text.split_at(at);
            let separator = if before.ends_with('\n') { "" } else { "\n" };
            format!("{before}{separator}{block}\n{after}")
        }
        None => format!("{block}\n{text}"),
    }
}
