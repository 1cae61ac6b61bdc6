//! # Markdown collaborators
//!
//! The store never compiles markdown itself — compilation and
//! sanitization are external pure functions, injected into the text
//! element editor through these traits. Default implementations are
//! provided so a host gets sensible behavior without wiring anything.

use pulldown_cmark::{Event, Options, Parser};

/// `compile(markdownSource) -> html`, with GFM extensions and
/// newline-as-hard-break semantics.
pub trait MarkdownCompiler {
    fn compile(&self, source: &str) -> String;
}

/// `sanitize(html) -> safeHtml`: strip script execution vectors while
/// preserving the allowed structural tags.
pub trait HtmlSanitizer {
    fn sanitize(&self, html: &str) -> String;
}

/// Default compiler backed by pulldown-cmark. Tables, strikethrough and
/// task lists cover the GFM surface the editor emits; soft breaks are
/// promoted to hard breaks so a single newline renders as a line break.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkCompiler;

impl MarkdownCompiler for CmarkCompiler {
    fn compile(&self, source: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(source, options).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut html = String::with_capacity(source.len() * 2);
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

/// Structural tags preserved by the sanitizer: the html profile plus the
/// svg profile. Everything else is dropped.
const ALLOWED_TAGS: &[&str] = &[
    // html
    "a", "blockquote", "br", "code", "del", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "img", "input", "li", "ol", "p", "pre", "span", "strong", "table", "tbody", "td",
    "th", "thead", "tr", "ul",
    // svg
    "circle", "defs", "g", "line", "path", "polygon", "polyline", "rect", "svg", "text",
    "title", "use",
];

/// Disallowed tags whose inner content must go with them.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style", "iframe", "object", "noscript"];

/// Allowlist sanitizer over the html+svg profiles.
///
/// Conservative by construction: unknown tags are removed, `script`-like
/// elements lose their content, attributes outside [`ALLOWED_ATTRIBUTES`]
/// are dropped, and URL attributes must carry an allowed scheme after the
/// value is normalized the way a browser resolves it (character
/// references decoded, ASCII whitespace and controls stripped).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileSanitizer;

impl HtmlSanitizer for ProfileSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;

        while let Some(open) = rest.find('<') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('>') else {
                // Unterminated tag: drop the remainder.
                return out;
            };
            let raw = &after[..close];
            rest = &after[close + 1..];

            let (is_closing, body) = match raw.strip_prefix('/') {
                Some(body) => (true, body),
                None => (false, raw),
            };
            let name = tag_name(body);
            if name.is_empty() {
                continue;
            }

            if !ALLOWED_TAGS.contains(&name.as_str()) {
                if !is_closing && DROP_CONTENT_TAGS.contains(&name.as_str()) {
                    rest = skip_past_closing_tag(rest, &name);
                }
                continue;
            }

            if is_closing {
                out.push('<');
                out.push('/');
                out.push_str(&name);
                out.push('>');
            } else {
                emit_opening_tag(&mut out, &name, &body[name.len()..]);
            }
        }

        out.push_str(rest);
        out
    }
}

fn tag_name(body: &str) -> String {
    body.chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn skip_past_closing_tag<'a>(rest: &'a str, name: &str) -> &'a str {
    let closing = format!("</{name}");
    match rest.to_ascii_lowercase().find(&closing) {
        Some(at) => {
            let tail = &rest[at..];
            match tail.find('>') {
                Some(gt) => &tail[gt + 1..],
                None => "",
            }
        }
        None => "",
    }
}

fn emit_opening_tag(out: &mut String, name: &str, attrs: &str) {
    let self_closing = attrs.trim_end().ends_with('/');
    out.push('<');
    out.push_str(name);

    for (attr_name, attr_value) in parse_attributes(attrs) {
        if !attribute_allowed(&attr_name, attr_value.as_deref()) {
            continue;
        }
        out.push(' ');
        out.push_str(&attr_name);
        if let Some(value) = attr_value {
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
    }

    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
}

/// Attributes preserved on allowed tags. Everything unlisted is dropped,
/// so `on*` handlers, `style`, `formaction` and the like never need
/// individual handling.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    // html
    "alt", "checked", "class", "disabled", "height", "href", "id", "loading", "src",
    "srcset", "title", "type", "width",
    // svg
    "cx", "cy", "d", "fill", "points", "r", "rx", "ry", "stroke", "stroke-width",
    "transform", "viewbox", "x", "x1", "x2", "xlink:href", "xmlns", "y", "y1", "y2",
];

/// Attributes whose value resolves as a URL and must pass the scheme
/// allowlist.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "xlink:href"];

fn attribute_allowed(name: &str, value: Option<&str>) -> bool {
    if !ALLOWED_ATTRIBUTES.contains(&name) {
        return false;
    }
    if URL_ATTRIBUTES.contains(&name) {
        if let Some(value) = value {
            return url_allowed(value);
        }
    }
    true
}

/// Scheme check over the form a browser actually resolves: character
/// references decoded, then ASCII whitespace and control characters
/// removed. Relative URLs and fragments carry no scheme and pass.
fn url_allowed(value: &str) -> bool {
    let normalized: String = decode_references(value)
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    let normalized = normalized.to_ascii_lowercase();

    match normalized.split_once(':') {
        None => true,
        // ':' after a path/query/fragment separator is data, not a scheme.
        Some((scheme, _)) if scheme.contains(['/', '?', '#']) => true,
        Some((scheme, _)) => matches!(scheme, "http" | "https" | "mailto"),
    }
}

/// Decode the character references browsers expand inside attribute
/// values: numeric (`&#106;` / `&#x6a;`, terminating `;` optional) and
/// the named ones that can smuggle scheme characters.
fn decode_references(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];

        match decode_one(rest) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => out.push('&'),
        }
    }

    out.push_str(rest);
    out
}

fn decode_one(body: &str) -> Option<(char, usize)> {
    if let Some(numeric) = body.strip_prefix('#') {
        let (digits, radix, prefix_len) = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16u32, 2),
            None => (numeric, 10u32, 1),
        };
        let len = digits.chars().take_while(|c| c.is_digit(radix)).count();
        if len == 0 {
            return None;
        }
        let code = u32::from_str_radix(&digits[..len], radix).ok()?;
        let semicolon = usize::from(digits[len..].starts_with(';'));
        return char::from_u32(code).map(|c| (c, prefix_len + len + semicolon));
    }

    let end = body.find(';')?;
    let decoded = match body[..end].to_ascii_lowercase().as_str() {
        "colon" => ':',
        "tab" => '\t',
        "newline" => '\n',
        "sol" => '/',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => return None,
    };
    Some((decoded, end + 1))
}

/// Minimal attribute scanner: `name`, `name=value`, `name="value"`,
/// `name='value'`. Names are lowercased.
fn parse_attributes(attrs: &str) -> Vec<(String, Option<String>)> {
    let mut parsed = Vec::new();
    let mut chars = attrs.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == '/' {
            chars.next();
            continue;
        }

        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '=' || c == '/' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        let name = attrs[start..end].to_ascii_lowercase();

        let mut value = None;
        if let Some(&(_, '=')) = chars.peek() {
            chars.next();
            match chars.peek().copied() {
                Some((quote_start, quote @ ('"' | '\''))) => {
                    chars.next();
                    let value_start = quote_start + 1;
                    let mut value_end = value_start;
                    for (i, c) in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value_end = i + c.len_utf8();
                    }
                    value = Some(attrs[value_start..value_end].to_string());
                }
                Some((value_start, _)) => {
                    let mut value_end = value_start;
                    while let Some(&(i, c)) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value_end = i + c.len_utf8();
                        chars.next();
                    }
                    value = Some(attrs[value_start..value_end].to_string());
                }
                None => {}
            }
        }

        if !name.is_empty() {
            parsed.push((name, value));
        }
    }

    parsed
}
