// src/core/html.rs
//
// Case-insensitive tag scanning over rendered markup.
// Tag-name-aware block slicing only; no HTML tree.

use std::borrow::Cow;

/// Elements whose content is never rendered as page rows.
const INERT_TAGS: [&str; 3] = ["script", "style", "template"];

/// ASCII-lowercases `s`. Byte offsets stay valid against `s`.
pub fn to_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Scanner over one markup slice with a cached lowercase twin.
pub struct Scanner<'a> {
    src: &'a str,
    lc: String,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, lc: to_lower(src) }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Position of the next `<tag` opener at or after `from`.
    /// `<th` does not match `<thead`: the name must end at whitespace, `>` or `/`.
    pub fn find_open(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("<", tag);
        let bytes = self.lc.as_bytes();
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(&pat)? + pos;
            let after = at + pat.len();
            match bytes.get(after) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
                Some(_) => pos = after,
                None => return None,
            }
        }
    }

    /// Next complete `<tag ...> ... </tag>` block from `from`, honoring nesting
    /// of the same tag. Returns byte range `(start, end)`; `end` is past the `>`.
    pub fn block(&self, tag: &str, from: usize) -> Option<(usize, usize)> {
        let start = self.find_open(tag, from)?;
        let open_end = self.src[start..].find('>')? + start + 1;
        let close_pat = join!("</", tag);

        let mut depth = 0usize;
        let mut cursor = open_end;
        loop {
            let close = self.lc.get(cursor..)?.find(&close_pat)? + cursor;
            match self.find_open(tag, cursor) {
                Some(open) if open < close => {
                    depth += 1;
                    cursor = open + 1;
                }
                _ => {
                    if depth == 0 {
                        let end = self.src[close..].find('>')? + close + 1;
                        return Some((start, end));
                    }
                    depth -= 1;
                    cursor = close + close_pat.len();
                }
            }
        }
    }

    /// Next block of any of `tags`, whichever opens first.
    pub fn block_any(
        &self,
        tags: &[&'static str],
        from: usize,
    ) -> Option<(&'static str, usize, usize)> {
        let (tag, _) = tags
            .iter()
            .filter_map(|t| self.find_open(t, from).map(|p| (*t, p)))
            .min_by_key(|(_, p)| *p)?;
        let (s, e) = self.block(tag, from)?;
        Some((tag, s, e))
    }
}

/// Blank out comments and `script`/`style`/`template` elements with spaces.
///
/// Byte length and every offset outside those regions are unchanged, so a
/// scan over the result never picks up a `<table>` that only lives inside a
/// client-side template or a commented-out fragment. An unclosed region runs
/// to the end of the document.
pub fn blank_inert(doc: &str) -> Cow<'_, str> {
    let sc = Scanner::new(doc);
    let lc = sc.lc.as_str();
    if !lc.contains("<!--") && !INERT_TAGS.iter().any(|t| sc.find_open(t, 0).is_some()) {
        return Cow::Borrowed(doc);
    }

    let mut bytes = doc.as_bytes().to_vec();
    let mut pos = 0usize;
    loop {
        let comment = lc.get(pos..).and_then(|rest| rest.find("<!--")).map(|i| (i + pos, None));
        let element = INERT_TAGS
            .iter()
            .filter_map(|t| sc.find_open(t, pos).map(|at| (at, Some(*t))))
            .min_by_key(|(at, _)| *at);
        let Some((start, tag)) = [comment, element].into_iter().flatten().min_by_key(|(at, _)| *at)
        else {
            break;
        };

        let end = match tag {
            None => lc[start + 4..].find("-->").map(|i| start + 4 + i + 3),
            Some(t) => {
                let close = join!("</", t);
                lc[start..]
                    .find(&close)
                    .and_then(|i| lc[start + i..].find('>').map(|j| start + i + j + 1))
            }
        }
        .unwrap_or(doc.len());

        bytes[start..end].fill(b' ');
        pos = end;
    }

    // regions start at `<` and end at `>` or the end, so no char is split
    match String::from_utf8(bytes) {
        Ok(s) => Cow::Owned(s),
        Err(_) => Cow::Borrowed(doc),
    }
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return &block[open_end + 1..close_start];
            }
        }
    }
    ""
}

/// Opening tag text of a block: everything up to and including the first `>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

/// Value of attribute `name` in an opening tag; quotes optional.
pub fn attr_value(open: &str, name: &str) -> Option<String> {
    let lc = to_lower(open);
    let pat = join!(name, "=");
    let mut from = 0usize;
    let at = loop {
        let at = lc.get(from..)?.find(&pat)? + from;
        // must be a whole attribute name
        let prev = lc.as_bytes().get(at.wrapping_sub(1)).copied().unwrap_or(b' ');
        if at == 0 || prev.is_ascii_whitespace() {
            break at;
        }
        from = at + pat.len();
    };
    let val = open[at + pat.len()..].trim_start();
    let (quote, body) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), &val[1..]),
        Some(b'\'') => (Some('\''), &val[1..]),
        _ => (None, val),
    };
    let end = match quote {
        Some(q) => body.find(q),
        None => body.find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/'),
    }
    .unwrap_or(body.len());
    Some(body[..end].to_string())
}

/// Remove all tags `<...>`, decode common entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&out))
}
