/// Elements whose content is dropped along with their tags.
const DROPPED: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template",
];

/// Reduce user input to plain text before it leaves the browser.
///
/// Tags (and with them any attributes such as `onerror=`) and comments are
/// removed, the content of executable elements is dropped, the remaining
/// text is left as typed.
///
/// Stripping is repeated until nothing changes, so fragments left around a
/// removed tag cannot join into a new one.
pub fn sanitize(input: &str) -> String {
    let mut current = strip(input);
    loop {
        let next = strip(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        let (text, markup) = rest.split_at(start);
        out.push_str(text);
        if markup.starts_with("<!--") {
            rest = match markup.find("-->") {
                Some(end) => &markup[end + 3..],
                None => "",
            };
            continue;
        }
        if !starts_tag(markup) {
            out.push('<');
            rest = &markup[1..];
            continue;
        }
        let Some(end) = tag_end(markup) else {
            // Unterminated tag, nothing after it can be trusted.
            return out;
        };
        let tag = &markup[..=end];
        rest = &markup[end + 1..];
        if let Some(name) = opening_name(tag) {
            if DROPPED.contains(&name.as_str()) && !tag.ends_with("/>") {
                rest = skip_element(rest, &name);
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `>` closing the tag, skipping quoted attribute values.
fn tag_end(markup: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in markup.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

fn starts_tag(markup: &str) -> bool {
    matches!(
        markup[1..].chars().next(),
        Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?'
    )
}

/// Lowercased element name of an opening tag, `None` for closing tags.
fn opening_name(tag: &str) -> Option<String> {
    let name: String = tag[1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

/// Skip past the matching close tag, or to the end if there is none.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let close = format!("</{name}");
    let Some(start) = lower.find(&close) else {
        return "";
    };
    match lower[start..].find('>') {
        Some(end) => &rest[start + end + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script() {
        assert_eq!(sanitize("<script>alert(1)</script>hello"), "hello");
        assert_eq!(
            sanitize("a<SCRIPT type=\"x\">steal()</Script >b"),
            "ab"
        );
        assert_eq!(sanitize("<script>never closed"), "");
    }

    #[test]
    fn test_attributes() {
        assert_eq!(sanitize("<img src=x onerror=alert(1)>hej"), "hej");
        assert_eq!(
            sanitize("<b onclick=\"evil()\">bold</b> and <i>it</i>"),
            "bold and it"
        );
        assert_eq!(sanitize("<style>body{}</style>ok"), "ok");
        assert_eq!(sanitize("x<!-- <script> -->y"), "xy");
    }

    #[test]
    fn test_nested_fragments() {
        assert_eq!(sanitize("<<b>script>alert(1)<</b>/script>hello"), "hello");
        let out = sanitize("<<i>img src=x onerror=alert(1)>hi");
        assert_eq!(out, "hi");
        assert!(!out.contains("<img"));
        assert_eq!(sanitize("<<<b>b>i>x"), "x");
    }

    #[test]
    fn test_quoted_attributes() {
        assert_eq!(sanitize("<a title=\">\">x</a>"), "x");
        assert_eq!(sanitize("<a title='1 > 0' href=\"#\">link</a> ok"), "link ok");
        assert_eq!(sanitize("<b>it's</b> fine"), "it's fine");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sanitize("Hur mår du?"), "Hur mår du?");
        assert_eq!(sanitize("1 < 2 && 3 > 2"), "1 < 2 && 3 > 2");
        assert_eq!(sanitize("<3 you"), "<3 you");
        assert_eq!(sanitize("trailing <"), "trailing <");
        assert_eq!(sanitize("cut <b"), "cut ");
    }
}
