// ============================================================
// Layer 4 — HTML Helpers
// ============================================================
// Low-level HTML string manipulation, deliberately naive but
// tailored to the catalog's page structure. No HTML parser
// dependency: the pages are machine-generated and regular, so
// substring scanning is enough. All matching is ASCII
// case-insensitive on tag/attribute names.

/// Find the next complete tag block from `from` onwards.
/// `open_pat` may include attributes (e.g. `<article class="product_pod"`).
/// Returns the byte range from the start of the opening tag to
/// the end of the closing tag.
pub fn next_tag_block(
    s: &str,
    open_pat: &str,
    close_tag: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let lc       = s.to_ascii_lowercase();
    let open_lc  = open_pat.to_ascii_lowercase();
    let close_lc = close_tag.to_ascii_lowercase();

    let start    = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel  = lc[open_end..].find(&close_lc)?;
    Some((start, open_end + end_rel + close_tag.len()))
}

/// Return the HTML inside an opening tag (matched by prefix,
/// attributes allowed) and its closing tag.
pub fn slice_between<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc       = s.to_ascii_lowercase();
    let open_lc  = open_pat.to_ascii_lowercase();
    let close_lc = close_pat.to_ascii_lowercase();

    let open_idx   = lc.find(&open_lc)?;
    let after_open = s[open_idx..].find('>')? + open_idx + 1;
    let close_rel  = lc[after_open..].find(&close_lc)?;
    Some(&s[after_open..after_open + close_rel])
}

/// Extract a double-quoted attribute value from the FIRST tag
/// in `s` that carries it, e.g. `attr_value(block, "title")`.
pub fn attr_value(s: &str, attr: &str) -> Option<String> {
    let lc      = s.to_ascii_lowercase();
    let pattern = format!("{}=\"", attr.to_ascii_lowercase());

    let start = lc.find(&pattern)? + pattern.len();
    let len   = s[start..].find('"')?;
    Some(decode_entities(&s[start..start + len]))
}

/// Remove all `<...>` tags, then collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out    = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

/// Minimal entity decoding — the catalog only ever emits these.
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out        = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
