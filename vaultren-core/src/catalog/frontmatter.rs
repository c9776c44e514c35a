use regex::Regex;
use std::sync::LazyLock;

static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)#([\p{L}\p{N}_/\-]+)").expect("inline tag pattern is valid")
});

/// Collect the tags of a Markdown document: the front-matter `tags:` key
/// followed by inline `#tag` tokens in the body. Tags are returned without
/// their `#`, deduplicated in first-seen order.
pub fn extract_tags(content: &str) -> Vec<String> {
    let (front, body) = split_front_matter(content);

    let mut tags = Vec::new();
    if let Some(front) = front {
        for tag in front_matter_tags(front) {
            push_unique(&mut tags, &tag);
        }
    }

    for cap in INLINE_TAG.captures_iter(body) {
        let tag = &cap[1];
        // A purely numeric token is a heading anchor or issue number, not a tag
        if tag.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        push_unique(&mut tags, tag);
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim().trim_matches(|c| c == '"' || c == '\'');
    let tag = tag.trim_start_matches('#');
    if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    // Unterminated block: treat the whole document as body
    (None, content)
}

fn front_matter_tags(front: &str) -> Vec<String> {
    let mut lines = front.lines().peekable();
    let mut tags = Vec::new();

    while let Some(line) = lines.next() {
        let Some(value) = line
            .strip_prefix("tags:")
            .or_else(|| line.strip_prefix("tag:"))
        else {
            continue;
        };
        let value = value.trim();

        if value.is_empty() {
            // Block list on the following lines
            while let Some(next) = lines.peek() {
                let Some(item) = next.trim_start().strip_prefix('-') else {
                    break;
                };
                tags.push(item.trim().to_string());
                lines.next();
            }
        } else {
            // A bracketed list is comma separated, so quoted items keep spaces
            let items: Vec<&str> = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
                Some(list) => list.split(',').collect(),
                None => value.split([',', ' ']).collect(),
            };
            tags.extend(
                items
                    .into_iter()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
    }

    tags
}
