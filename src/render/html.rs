//! HTML renderer
//!
//! Every line becomes a `<div>`; every code point becomes one `<dt>` (single
//! width) or `<dd>` (double width) so a stylesheet can pin each cell to 1ch
//! or 2ch. Runs of tokens share a `<dl>`, which is closed and reopened only
//! around link boundaries.

use crate::layout::postprocess::{TOC_FORWARD, TOC_REVERSE};
use crate::layout::{Document, Line};
use crate::theme::{PaintClass, Theme};
use crate::token::{Mark, UrlId};
use crate::width::char_width;

/// A leading token starting with this turns the line into `<hr>`
pub const RULE_PREFIX: &str = "====";

#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap the lines in a complete page with an embedded stylesheet
    pub standalone: bool,
    /// Page title for standalone output
    pub title: Option<String>,
    /// Colors for the standalone stylesheet
    pub theme: Theme,
}

/// Escape text for element content and single- or double-quoted attributes
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        push_escaped(out, ch);
    }
}

#[inline]
fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

/// Render every line of `doc`, one `<div>` (or `<hr>`) per line, joined by
/// newlines. External links get `target=link_target` when set.
pub fn render_html(doc: &Document, link_target: Option<&str>, options: &HtmlOptions) -> String {
    let mut body = String::with_capacity(doc.lines.len() * doc.columns * 12);
    for (i, line) in doc.lines.iter().enumerate() {
        if i > 0 {
            body.push('\n');
        }
        render_line(&mut body, line, doc, link_target);
    }

    if options.standalone {
        page(&body, options)
    } else {
        body
    }
}

/// `class`/`id` hook for TOC lines and the headings they point at
fn push_anchor_attrs(out: &mut String, url: &str) {
    let (class, mirror, rest) = if let Some(rest) = url.strip_prefix(TOC_FORWARD) {
        ("toc-f", "toc-r", rest)
    } else if let Some(rest) = url.strip_prefix(TOC_REVERSE) {
        ("toc-r", "toc-f", rest)
    } else {
        return;
    };
    let Some((document_id, _)) = rest.split_once('-') else {
        return;
    };

    out.push_str(" class='cls-");
    out.push_str(class);
    out.push('-');
    escape_into(out, document_id);
    out.push_str("' id='");
    out.push_str(mirror);
    out.push('-');
    escape_into(out, rest);
    out.push('\'');
}

fn open_link(out: &mut String, href: &str, link_target: Option<&str>) {
    out.push_str("<a");
    if !href.starts_with('#') {
        if let Some(target) = link_target {
            out.push_str(" target='");
            escape_into(out, target);
            out.push('\'');
        }
    }
    out.push_str(" href='");
    escape_into(out, href);
    out.push_str("'>");
}

fn render_line(out: &mut String, line: &Line, doc: &Document, link_target: Option<&str>) {
    let tokens = line.tokens();

    if tokens.first().is_some_and(|t| t.starts_with(RULE_PREFIX)) {
        out.push_str("<hr>");
        return;
    }

    out.push_str("<div");
    if let Some(url) = tokens.first().and_then(|t| doc.url_of(t)) {
        push_anchor_attrs(out, url);
    }
    out.push('>');

    let mut dl_open = false;
    let mut link: Option<UrlId> = None;

    for token in tokens {
        let href = doc.url_of(token);

        if let Some(href) = href {
            if token.mark() == Mark::Image {
                close_dl(out, &mut dl_open);
                out.push_str("<img class='_image' src='");
                escape_into(out, href);
                out.push_str("' alt='");
                escape_into(out, href);
                out.push_str("'>");
                break;
            }
        }

        if token.url() != link {
            close_dl(out, &mut dl_open);
            if link.take().is_some() {
                out.push_str("</a>");
            }
            if let Some(href) = href {
                open_link(out, href, link_target);
                link = token.url();
            }
        }

        // Terminators carry no cells
        if token.is_empty() {
            continue;
        }

        if !dl_open {
            out.push_str("<dl>");
            dl_open = true;
        }

        if token.mark() == Mark::Continuation {
            out.push_str("<dt class=conj>&rarr;");
        } else {
            for ch in token.text().chars() {
                out.push_str(if char_width(ch) == 1 { "<dt>" } else { "<dd>" });
                push_escaped(out, ch);
            }
        }
    }

    close_dl(out, &mut dl_open);
    if link.is_some() {
        out.push_str("</a>");
    }
    out.push_str("</div>");
}

fn close_dl(out: &mut String, dl_open: &mut bool) {
    if *dl_open {
        out.push_str("</dl>");
        *dl_open = false;
    }
}

/// Stylesheet for standalone pages, generated from theme colors
fn generate_css(theme: &Theme) -> String {
    format!(
        r#"
body {{
    margin: 0;
    padding: 16px;
    background: {background};
    color: {normal};
    font-family: "Unifont", "SF Mono", "Fira Code", Consolas, "Liberation Mono", Menlo, monospace;
    font-size: 16px;
    line-height: 1.2;
}}

div {{
    white-space: pre;
    min-height: 1.2em;
}}

dl, dt, dd {{
    display: inline;
    margin: 0;
    padding: 0;
}}

dt {{
    display: inline-block;
    width: 1ch;
}}

dd {{
    display: inline-block;
    width: 2ch;
}}

dt.conj {{
    color: {wrap_marker};
}}

a {{
    color: {string};
    text-decoration: none;
}}

a:hover {{
    text-decoration: underline;
}}

hr {{
    border: none;
    border-top: 1px solid {line_number};
}}

img._image {{
    max-width: 100%;
}}
"#,
        background = theme.color(PaintClass::Background).to_css(),
        normal = theme.color(PaintClass::Normal).to_css(),
        wrap_marker = theme.color(PaintClass::WrapMarker).to_css(),
        string = theme.color(PaintClass::String).to_css(),
        line_number = theme.color(PaintClass::LineNumber).to_css(),
    )
}

fn page(body: &str, options: &HtmlOptions) -> String {
    let mut title = String::new();
    escape_into(&mut title, options.title.as_deref().unwrap_or("eighty"));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
{}
</body>
</html>
"#,
        title,
        generate_css(&options.theme),
        body
    )
}
