//! Line-level CSV codec
//!
//! Comma-delimited, double-quote escaped. A field may contain the delimiter or
//! the quote character only inside quotes; `""` inside quotes is one literal
//! quote. Records never span lines.

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// A data line split into fields, with its 1-based line number in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// A parsed file: the header list and every non-blank data line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse a whole file. Blank lines are ignored; a leading BOM is stripped.
pub fn parse_document(content: &str) -> Document {
    let content = content.strip_prefix(BOM).unwrap_or(content);

    let mut lines = content
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty());

    let headers = match lines.next() {
        Some((_, line)) => parse_line(line),
        None => return Document::default(),
    };

    let rows = lines
        .map(|(line, text)| RawRow {
            line,
            fields: parse_line(text),
        })
        .collect();

    Document { headers, rows }
}

/// Split one line into fields.
///
/// Whitespace outside quotes is trimmed; whitespace inside quotes is kept.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = FieldBuf::default();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if field.in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.text.push(QUOTE);
                } else {
                    field.in_quotes = false;
                    field.quoted_end = field.text.len();
                }
            } else {
                field.text.push(c);
            }
        } else if c == DELIMITER {
            fields.push(std::mem::take(&mut field).finish());
        } else if c == QUOTE {
            field.open_quote();
        } else {
            field.text.push(c);
        }
    }

    fields.push(field.finish());
    fields
}

#[derive(Default)]
struct FieldBuf {
    text: String,
    in_quotes: bool,
    /// Byte range of the last quoted section, used to protect it from trimming
    quoted_start: Option<usize>,
    quoted_end: usize,
}

impl FieldBuf {
    fn open_quote(&mut self) {
        // Whitespace before the opening quote is padding, not content
        if self.quoted_start.is_none() && self.text.trim().is_empty() {
            self.text.clear();
        }
        if self.quoted_start.is_none() {
            self.quoted_start = Some(self.text.len());
        }
        self.in_quotes = true;
    }

    fn finish(self) -> String {
        match self.quoted_start {
            None => self.text.trim().to_string(),
            Some(start) => {
                let (head, rest) = self.text.split_at(start);
                let quoted_len = self.quoted_end.max(start) - start;
                let (quoted, tail) = rest.split_at(quoted_len.min(rest.len()));
                format!("{}{}{}", head.trim_start(), quoted, tail.trim_end())
            }
        }
    }
}

/// Quote a value if it would not survive `parse_line` unquoted
pub fn escape_field(value: &str) -> String {
    let needs_quotes = value.contains(DELIMITER)
        || value.contains(QUOTE)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);

    if needs_quotes {
        format!("\"{}\"", value.replace(QUOTE, "\"\""))
    } else {
        value.to_string()
    }
}

/// Join already-rendered values into one line (without terminator)
pub fn format_line<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| escape_field(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
