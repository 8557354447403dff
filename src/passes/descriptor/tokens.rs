//! Line tokenizer for plugin descriptors
//!
//! Works on trimmed lines plus their indentation depth. This is not a YAML
//! parser: descriptors mix scalar and list shapes per key, and only a few
//! top-level facts are needed.

/// One physical line of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorLine<'a> {
    /// 1-indexed
    pub number: usize,
    /// Leading whitespace width (tabs count as one)
    pub indent: usize,
    /// Line with surrounding whitespace removed
    pub text: &'a str,
}

impl<'a> DescriptorLine<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.text.starts_with('#')
    }

    /// Value after `key:` when this line declares `key`
    pub fn value_of(&self, key: &str) -> Option<&'a str> {
        if self.is_comment() {
            return None;
        }
        let text: &'a str = self.text;
        let rest = text.strip_prefix(key)?;
        let value = rest.strip_prefix(':')?;
        Some(strip_trailing_comment(value.trim()))
    }
}

pub fn tokenize(content: &str) -> Vec<DescriptorLine<'_>> {
    content
        .lines()
        .enumerate()
        .map(|(index, raw)| {
            let trimmed_start = raw.trim_start();
            DescriptorLine {
                number: index + 1,
                indent: raw.len() - trimmed_start.len(),
                text: trimmed_start.trim_end(),
            }
        })
        .collect()
}

/// First line declaring `key`, with its value
pub fn find_key<'a>(lines: &[DescriptorLine<'a>], key: &str) -> Option<(usize, &'a str)> {
    lines
        .iter()
        .find_map(|line| line.value_of(key).map(|value| (line.number, value)))
}

/// Remove one pair of matching surrounding quotes
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Drop a ` # comment` suffix. A quoted value ends at its closing quote.
fn strip_trailing_comment(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            return match inner.find(quote) {
                Some(close) => &value[..close + 2],
                None => value,
            };
        }
    }
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Items declared under `key`, inline (`key: [A, B]` / `key: A`), as a flow
/// list continued on indented lines, or as a following block of indented
/// `- Item` lines.
///
/// The block tolerates blank lines and ends at the first non-blank line that
/// is not indented.
pub fn list_items(lines: &[DescriptorLine<'_>], key: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let Some(value) = lines[index].value_of(key) else {
            index += 1;
            continue;
        };
        index += 1;

        if value.starts_with('[') && !value.contains(']') {
            let mut flow = value.to_string();
            while index < lines.len()
                && lines[index].indent > 0
                && !lines[index].is_comment()
            {
                let text = strip_trailing_comment(lines[index].text);
                flow.push(' ');
                flow.push_str(text);
                index += 1;
                if text.contains(']') {
                    break;
                }
            }
            items.extend(inline_items(&flow));
            continue;
        }
        if !value.is_empty() {
            items.extend(inline_items(value));
            continue;
        }

        while index < lines.len() {
            let line = &lines[index];
            if line.is_blank() {
                index += 1;
                continue;
            }
            if line.indent == 0 {
                break;
            }
            if let Some(item) = line.text.strip_prefix('-') {
                let item = unquote(strip_trailing_comment(item.trim()));
                if !item.is_empty() {
                    items.push(item.to_string());
                }
            }
            index += 1;
        }
    }
    items
}

fn inline_items(value: &str) -> Vec<String> {
    let inner = value.strip_prefix('[').unwrap_or(value);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split(',')
        .map(|item| unquote(strip_trailing_comment(item.trim())))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
