//! Card description markdown to HTML.
//!
//! The dialect is deliberately small: `#`/`##`/`###` headings, `**bold**`,
//! inline and fenced code, `![alt](url)` images, blank-line paragraphs, and
//! labelled `TODO:` / `NOTE:` blocks. Anything else is passed through as
//! (escaped) text. The input is HTML-escaped before any rule runs, so card
//! text can never inject markup.
//!
//! Rendered fragments that later rules must not touch (code, images, special
//! blocks) are parked in a [`Stash`] and replaced by a private-use placeholder
//! until the final pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```([\s\S]*?)```").expect("fenced code pattern"));
static FENCE_LANGUAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_+#.-]+)\n").expect("fence language pattern"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern"));
static SPECIAL_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(TODO|NOTES|NOTE|Notes|Note)(?:\s*:\s*(.*?))?\s*$")
        .expect("special block pattern")
});
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\s]+)\)").expect("image pattern"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,3}) +(.+?)[ \t]*$").expect("heading pattern"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").expect("placeholder pattern"));

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            STASH_OPEN | STASH_CLOSE => {}
            c => out.push(c),
        }
    }
    out
}

struct Stashed {
    html: String,
    block: bool,
}

#[derive(Default)]
struct Stash {
    items: Vec<Stashed>,
}

impl Stash {
    fn push(&mut self, html: String, block: bool) -> String {
        let html = self.restore(&html);
        self.items.push(Stashed { html, block });
        format!("{STASH_OPEN}{}{STASH_CLOSE}", self.items.len() - 1)
    }

    fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.items.get(i))
                    .map(|item| item.html.clone())
                    .unwrap_or_default()
            })
            .into_owned()
    }

    /// True when `line` is nothing but one block-level placeholder.
    fn is_block_placeholder(&self, line: &str) -> bool {
        let Some(inner) = line
            .strip_prefix(STASH_OPEN)
            .and_then(|rest| rest.strip_suffix(STASH_CLOSE))
        else {
            return false;
        };
        inner
            .parse::<usize>()
            .ok()
            .and_then(|i| self.items.get(i))
            .is_some_and(|item| item.block)
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    special_blocks: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            special_blocks: true,
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn `TODO:` / `NOTE:` block extraction on or off.
    pub fn with_special_blocks(mut self, enabled: bool) -> Self {
        self.special_blocks = enabled;
        self
    }

    pub fn format(&self, markdown: &str) -> String {
        if markdown.trim().is_empty() {
            return String::new();
        }
        let mut stash = Stash::default();
        let text = escape_html(&markdown.replace("\r\n", "\n"));

        let text = stash_code(&text, &mut stash);
        let text = if self.special_blocks {
            stash_special_blocks(&text, &mut stash)
        } else {
            text
        };
        let text = stash_images(&text, &mut stash);
        let text = render_headings(&text);
        let text = render_bold(&text);
        let html = paragraphs(&text, &stash);

        stash.restore(&html)
    }
}

/// Format with the default [`Formatter`].
pub fn format(markdown: &str) -> String {
    Formatter::default().format(markdown)
}

fn stash_code(text: &str, stash: &mut Stash) -> String {
    let text = FENCED_CODE
        .replace_all(text, |caps: &Captures| {
            let mut body = caps[1].to_string();
            let mut class = String::new();
            if let Some(lang) = FENCE_LANGUAGE.captures(&caps[1]) {
                class = format!(" class=\"language-{}\"", &lang[1]);
                body = caps[1][lang[0].len()..].to_string();
            }
            let body = body.strip_prefix('\n').unwrap_or(&body);
            let body = body.strip_suffix('\n').unwrap_or(body);
            stash.push(format!("<pre><code{class}>{body}</code></pre>"), true)
        })
        .into_owned();
    INLINE_CODE
        .replace_all(&text, |caps: &Captures| {
            stash.push(format!("<code>{}</code>", &caps[1]), false)
        })
        .into_owned()
}

fn stash_special_blocks(text: &str, stash: &mut Stash) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<(String, Vec<String>)> = None;

    let mut close = |open: &mut Option<(String, Vec<String>)>, out: &mut Vec<String>| {
        if let Some((keyword, body)) = open.take() {
            let html = render_special_block(&keyword, &body, stash);
            out.push(stash.push(html, true));
        }
    };

    for line in text.split('\n') {
        if let Some(caps) = SPECIAL_BLOCK.captures(line) {
            close(&mut open, &mut out);
            let first = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let body = if first.is_empty() {
                Vec::new()
            } else {
                vec![first.to_string()]
            };
            open = Some((caps[1].to_string(), body));
        } else if line.trim().is_empty() {
            close(&mut open, &mut out);
            out.push(line.to_string());
        } else if let Some((_, body)) = open.as_mut() {
            body.push(line.trim().to_string());
        } else {
            out.push(line.to_string());
        }
    }
    close(&mut open, &mut out);
    out.join("\n")
}

/// Code in `body` is already stashed; images and bold are rendered here, once.
fn render_special_block(keyword: &str, body: &[String], stash: &mut Stash) -> String {
    let mut html = format!(
        "<div class=\"special-block special-block-{}\"><div class=\"special-block-header\">{}</div>",
        keyword.to_lowercase(),
        keyword.to_uppercase()
    );
    if !body.is_empty() {
        let body = render_bold(&stash_images(&body.join("<br>"), stash));
        html.push_str(&format!("<div class=\"special-block-body\">{body}</div>"));
    }
    html.push_str("</div>");
    html
}

fn stash_images(text: &str, stash: &mut Stash) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures| {
            let alt = match caps[1].trim() {
                "" => "Image",
                alt => alt,
            };
            let html = format!(
                "<div class=\"embedded-image\"><img src=\"{url}\" alt=\"{alt}\" class=\"card-image\" loading=\"lazy\"><div class=\"image-caption\">{alt}</div></div>",
                url = &caps[2],
            );
            stash.push(html, true)
        })
        .into_owned()
}

fn render_headings(text: &str) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

fn render_bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

fn is_heading(line: &str) -> bool {
    ["<h1>", "<h2>", "<h3>"]
        .iter()
        .any(|tag| line.starts_with(tag))
}

/// Blank lines separate paragraphs, single newlines become `<br>`, and
/// block-level content is emitted without a wrapping `<p>`. A block
/// placeholder in the middle of a line splits the paragraph around it.
fn paragraphs(text: &str, stash: &Stash) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();

    fn flush(run: &mut Vec<String>, blocks: &mut Vec<String>) {
        if !run.is_empty() {
            let joined = run.join("<br>");
            if !joined.trim().is_empty() {
                blocks.push(format!("<p>{joined}</p>"));
            }
            run.clear();
        }
    }

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut run, &mut blocks);
            continue;
        }
        if is_heading(trimmed) {
            flush(&mut run, &mut blocks);
            blocks.push(trimmed.to_string());
            continue;
        }

        let mut last = 0;
        for m in PLACEHOLDER.find_iter(line) {
            if !stash.is_block_placeholder(m.as_str()) {
                continue;
            }
            let before = line[last..m.start()].trim();
            if !before.is_empty() {
                run.push(before.to_string());
            }
            flush(&mut run, &mut blocks);
            blocks.push(m.as_str().to_string());
            last = m.end();
        }
        let tail = if last == 0 {
            line.trim_end()
        } else {
            line[last..].trim()
        };
        if !tail.is_empty() {
            run.push(tail.to_string());
        }
    }
    flush(&mut run, &mut blocks);
    blocks.join("\n")
}
