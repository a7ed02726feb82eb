//! Default documentation-comment parser.

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use super::{CodeFence, DocComment, DocTag, MarkupParser};
use crate::base::{LineIndex, Ranges, TextRange, TextSize};
use crate::syntax::classify::markup_style;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(?P<name>[A-Za-z][\w-]*)(?:\s+\{(?P<type>[^}]*)\})?(?:\s+(?P<rest>.*))?$").unwrap()
});

/// Tags whose first word after the type is a name.
const NAMING_TAGS: &[&str] = &[
    "param", "arg", "argument", "prop", "property", "typedef", "callback", "template", "member",
];

/// Parses `/** ... */` text into prose, tags and fenced code.
#[derive(Copy, Clone, Debug, Default)]
pub struct DocParser;

impl MarkupParser for DocParser {
    fn parse(&self, text: &str) -> DocComment {
        let mut builder = Builder::new(text);
        for line in lines(text) {
            builder.line(line);
        }
        builder.finish(text)
    }
}

/// A comment line without its `/**`, `*` or `*/` markers.
#[derive(Copy, Clone, Debug)]
struct Line<'a> {
    /// Byte offset of `body` within the comment text.
    start: usize,
    body: &'a str,
}

fn lines(text: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    let mut out = Vec::new();
    for raw in text.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let (start, body) = strip_gutter(line);
        out.push(Line {
            start: offset + start,
            body,
        });
        offset += raw.len();
    }
    out
}

fn strip_gutter(line: &str) -> (usize, &str) {
    let mut rest = line.trim_start();
    if let Some(r) = rest.strip_prefix("/**") {
        rest = r;
    } else if !rest.starts_with("*/") {
        if let Some(r) = rest.strip_prefix('*') {
            rest = r;
        }
    }
    rest = rest.strip_prefix(' ').unwrap_or(rest);
    let start = line.len() - rest.len();

    let mut body = rest.trim_end();
    if let Some(b) = body.strip_suffix("*/") {
        body = b.trim_end();
    }
    (start, body)
}

fn join_prose(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

struct OpenFence<'a> {
    marker: &'static str,
    info: &'a str,
    start: usize,
    end: usize,
    code: Vec<&'a str>,
}

struct Builder<'a> {
    index: LineIndex,
    description: Vec<&'a str>,
    tags: Vec<(DocTag, Vec<&'a str>)>,
    fences: Vec<CodeFence>,
    fence: Option<OpenFence<'a>>,
}

impl<'a> Builder<'a> {
    fn new(text: &str) -> Self {
        Self {
            index: LineIndex::new(text),
            description: Vec::new(),
            tags: Vec::new(),
            fences: Vec::new(),
            fence: None,
        }
    }

    fn ranges(&self, start: usize, end: usize) -> Ranges {
        self.index.ranges(TextRange::new(
            TextSize::from(start as u32),
            TextSize::from(end as u32),
        ))
    }

    fn line(&mut self, line: Line<'a>) {
        let trimmed = line.body.trim_start();
        let start = line.start + (line.body.len() - trimmed.len());
        let end = line.start + line.body.len();

        if let Some(fence) = self.fence.as_mut() {
            fence.end = end;
            if trimmed.starts_with(fence.marker) {
                self.close_fence();
            } else {
                fence.code.push(line.body);
            }
            return;
        }

        for marker in ["```", "~~~"] {
            if let Some(info) = trimmed.strip_prefix(marker) {
                self.fence = Some(OpenFence {
                    marker,
                    info: info.trim(),
                    start,
                    end,
                    code: Vec::new(),
                });
                return;
            }
        }

        let header = trimmed.trim_start_matches('#');
        let tag_text = if header.len() < trimmed.len() && header.starts_with(char::is_whitespace) {
            header.trim_start()
        } else {
            trimmed
        };
        if let Some((tag, first)) = parse_tag(tag_text, self.ranges(start, end)) {
            self.tags.push((tag, first.into_iter().collect()));
            return;
        }

        match self.tags.last_mut() {
            Some((_, lines)) => lines.push(line.body),
            None => self.description.push(line.body),
        }
    }

    fn close_fence(&mut self) {
        let Some(fence) = self.fence.take() else {
            return;
        };
        let ranges = self.ranges(fence.start, fence.end);
        let code = fence.code.join("\n");

        // ```@example fences are block markup: the fence body is the tag.
        if let Some(tag) = fence.info.strip_prefix('@') {
            let name = tag.split_whitespace().next().unwrap_or_default();
            if !name.is_empty() {
                self.tags.push((
                    DocTag {
                        name: SmolStr::new(name),
                        type_expr: None,
                        ident: None,
                        optional: false,
                        default: None,
                        description: code,
                        ranges,
                    },
                    Vec::new(),
                ));
                return;
            }
        }

        self.fences.push(CodeFence {
            lang: (!fence.info.is_empty()).then(|| SmolStr::new(fence.info)),
            code,
            ranges,
        });
    }

    fn finish(mut self, text: &str) -> DocComment {
        self.close_fence();
        let tags = self
            .tags
            .into_iter()
            .map(|(mut tag, lines)| {
                let prose = join_prose(&lines);
                if !prose.is_empty() {
                    tag.description = prose;
                }
                tag
            })
            .collect();

        DocComment {
            markup: markup_style(text),
            description: join_prose(&self.description),
            tags,
            fences: self.fences,
        }
    }
}

/// Parse one `@tag ...` line. Returns the tag and the description text on
/// the tag line itself.
fn parse_tag(line: &str, ranges: Ranges) -> Option<(DocTag, Option<&str>)> {
    let caps = TAG.captures(line)?;
    let name = caps.name("name")?.as_str();
    let type_expr = caps.name("type").map(|m| m.as_str().trim().to_string());
    let mut rest = caps.name("rest").map(|m| m.as_str().trim()).unwrap_or_default();

    let mut ident = None;
    let mut optional = false;
    let mut default = None;
    if NAMING_TAGS.contains(&name) && !rest.is_empty() {
        if let Some(bracketed) = rest.strip_prefix('[') {
            if let Some(close) = bracketed.find(']') {
                let inner = &bracketed[..close];
                let (id, value) = match inner.split_once('=') {
                    Some((id, value)) => (id.trim(), Some(value.trim().to_string())),
                    None => (inner.trim(), None),
                };
                ident = Some(id.to_string());
                optional = true;
                default = value;
                rest = bracketed[close + 1..].trim_start();
            }
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            ident = Some(rest[..end].to_string());
            rest = rest[end..].trim_start();
        }
    }
    let rest = rest.strip_prefix("- ").unwrap_or(rest);

    let tag = DocTag {
        name: SmolStr::new(name),
        type_expr,
        ident,
        optional,
        default,
        description: rest.to_string(),
        ranges,
    };
    Some((tag, (!rest.is_empty()).then_some(rest)))
}
