//! Post-processing over the broken line list
//!
//! Four forward passes, in order: heading detection, URL recognition, image
//! line collapsing and table-of-contents materialization.

use super::{Line, UrlTable};
use crate::options::FormatOptions;
use crate::token::{Mark, Token, TokenKind, UrlId};

/// Permanent URI scheme names recognized in front of `://`
pub const URI_SCHEMES: &[&str] = &[
    "aaa", "aaas", "about", "acap", "acct", "cap", "cid", "coap", "coaps", "crid", "data", "dav",
    "dict", "dns", "example", "file", "ftp", "geo", "go", "gopher", "h323", "http", "https", "iax",
    "icap", "im", "imap", "info", "ipp", "ipps", "iris", "jabber", "ldap", "mailto", "mid", "msrp",
    "msrps", "mtqp", "mupdate", "news", "nfs", "ni", "nih", "nntp", "opaquelocktoken", "pkcs11",
    "pop", "pres", "reload", "rtsp", "rtsps", "rtspu", "service", "session", "shttp", "sieve",
    "sip", "sips", "sms", "snmp", "stun", "stuns", "tag", "tel", "telnet", "tftp", "thismessage",
    "tip", "tn3270", "turn", "turns", "tv", "urn", "vemmi", "vnc", "ws", "wss", "xcon", "xmpp",
    "zzz",
];

/// URL suffixes that turn a line into an inline image
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Prefix of forward TOC anchors (TOC line → heading)
pub const TOC_FORWARD: &str = "#toc-f-";
/// Prefix of reverse TOC anchors (heading → TOC line)
pub const TOC_REVERSE: &str = "#toc-r-";

/// Run every pass. URLs and TOC anchors are interned into `urls`.
pub fn run(mut lines: Vec<Line>, urls: &mut UrlTable, options: &FormatOptions) -> Vec<Line> {
    let headings = mark_headings(&mut lines, &options.heading_prefix);
    recognize_urls(&mut lines, urls);
    let lines = collapse_images(lines, urls);
    if options.toc && headings > 0 {
        prepend_toc(lines, urls, options.document_id)
    } else {
        lines
    }
}

/// Strip the heading prefix token from heading lines and flag them.
/// Returns the number of headings found.
pub fn mark_headings(lines: &mut [Line], prefix: &str) -> usize {
    let mut count = 0;
    for line in lines.iter_mut() {
        if line.len() > 1 && line.tokens()[0].starts_with(prefix) {
            line.tokens_mut().remove(0);
            line.set_heading();
            count += 1;
        }
    }
    count
}

pub fn is_scheme(token: &Token) -> bool {
    let text = token.text();
    URI_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(text))
}

#[inline]
fn is_uri_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '-' | '.'
                | '_'
                | '~'
                | ':'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
                | '@'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | '%'
                | '`'
        )
}

/// A token that may continue a URL under accumulation
fn continues_url(token: &Token) -> bool {
    if token.mark() == Mark::Continuation {
        return true;
    }
    !matches!(
        token.kind(),
        TokenKind::Space | TokenKind::Newline | TokenKind::End
    ) && !token.is_empty()
        && token.text().chars().all(is_uri_char)
}

/// Find `scheme` `://` runs and stamp every consumed token with one URL id.
/// A URL may continue across forced line breaks.
pub fn recognize_urls(lines: &mut [Line], urls: &mut UrlTable) {
    // (line, token) positions of the URL being accumulated
    let mut pending: Vec<(usize, usize)> = Vec::new();

    for li in 0..lines.len() {
        let mut ti = 0;
        while ti < lines[li].len() {
            let tokens = lines[li].tokens();
            if !pending.is_empty() && continues_url(&tokens[ti]) {
                pending.push((li, ti));
                ti += 1;
                continue;
            }

            let starts = is_scheme(&tokens[ti])
                && tokens.get(ti + 1).is_some_and(|t| t.starts_with("://"));

            if !pending.is_empty() {
                stamp_url(lines, &pending, urls);
                pending.clear();
            }

            if starts {
                pending.push((li, ti));
                pending.push((li, ti + 1));
                ti += 2;
            } else {
                ti += 1;
            }
        }
    }

    if !pending.is_empty() {
        stamp_url(lines, &pending, urls);
    }
}

fn stamp_url(lines: &mut [Line], positions: &[(usize, usize)], urls: &mut UrlTable) {
    let text: String = positions
        .iter()
        .map(|&(li, ti)| &lines[li].tokens()[ti])
        .filter(|t| t.mark() != Mark::Continuation)
        .map(Token::text)
        .collect();

    let id = urls.intern(text);
    for &(li, ti) in positions {
        lines[li].tokens_mut()[ti].set_url(id);
    }
}

pub fn is_image_url(url: &str) -> bool {
    let url = url.as_bytes();
    IMAGE_EXTENSIONS.iter().any(|ext| {
        url.len() >= ext.len() && url[url.len() - ext.len()..].eq_ignore_ascii_case(ext.as_bytes())
    })
}

/// Truncate image lines to their URL token and drop immediate repeats
pub fn collapse_images(lines: Vec<Line>, urls: &UrlTable) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut previous: Option<UrlId> = None;

    for mut line in lines {
        let Some(first) = line.tokens().first() else {
            out.push(line);
            continue;
        };

        let image = first
            .url()
            .filter(|&id| urls.get(id).is_some_and(is_image_url));

        match image {
            Some(id) if previous == Some(id) => continue,
            Some(id) => {
                let tokens = line.tokens_mut();
                tokens.truncate(1);
                tokens[0].set_mark(Mark::Image);
                previous = Some(id);
            }
            None => previous = None,
        }
        out.push(line);
    }

    out
}

/// Build one TOC line per flagged heading and prepend them, followed by an
/// empty separator line
pub fn prepend_toc(mut lines: Vec<Line>, urls: &mut UrlTable, document_id: u64) -> Vec<Line> {
    let mut toc = Vec::new();

    for line in lines.iter_mut().filter(|line| line.is_heading()) {
        let n = toc.len() + 1;
        let forward = urls.intern(format!("{}{}-{}", TOC_FORWARD, document_id, n));
        let reverse = urls.intern(format!("{}{}-{}", TOC_REVERSE, document_id, n));

        let mut tokens = Vec::with_capacity(line.len() + 4);
        tokens.push(Token::new(TokenKind::Latin, n.to_string()));
        tokens.push(Token::new(TokenKind::NarrowDelim, "."));
        tokens.push(Token::spaces(1));
        tokens.extend(
            line.tokens()
                .iter()
                .filter(|t| t.kind() != TokenKind::End)
                .cloned(),
        );
        if tokens.last().map(Token::kind) != Some(TokenKind::Newline) {
            tokens.push(Token::newline());
        }
        for token in &mut tokens {
            token.set_url(forward);
        }
        toc.push(Line::new(tokens));

        for token in line.tokens_mut() {
            token.set_url(reverse);
        }
    }

    tracing::debug!("Prepending {} table of contents entries", toc.len());
    if toc.is_empty() {
        return lines;
    }

    toc.push(Line::new(vec![Token::newline()]));
    toc.extend(lines);
    toc
}
