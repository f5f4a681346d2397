//! Reader and writer for the npm-style `key=value` profile format.
//!
//! The document keeps every line it was parsed from. Lines that are never
//! touched (comments, blank lines, foreign keys) are written back exactly as
//! they were read; only entries that are set or removed are re-rendered.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniError {
    pub line: usize,
    pub reason: String,
}

impl IniError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for IniError {}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
    /// Original text of the line, dropped once the value changes.
    raw: Option<String>,
}

#[derive(Debug, Clone)]
enum Line {
    /// Blank line or comment.
    Raw(String),
    Entry(Entry),
}

impl Line {
    fn is_blank(&self) -> bool {
        matches!(self, Line::Raw(raw) if raw.trim().is_empty())
    }

    fn entry_key(&self) -> Option<&str> {
        match self {
            Line::Entry(entry) => Some(&entry.key),
            Line::Raw(_) => None,
        }
    }
}

/// A named `[section]` or the unnamed block of keys before the first header.
#[derive(Debug, Clone, Default)]
pub struct Section {
    name: Option<String>,
    header: Option<String>,
    lines: Vec<Line>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            header: None,
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Renames the section. The header is re-rendered on the next write.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.header = None;
    }

    /// Returns the value of `key`. When a key repeats, the last one wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| {
            match line {
                Line::Entry(entry) if entry.key == key => Some(entry.value.as_str()),
                _ => None,
            }
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`.
    ///
    /// An existing entry is updated in place (earlier duplicates are dropped);
    /// a new entry is appended after the last non-blank line of the section.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let last = self
            .lines
            .iter()
            .rposition(|line| line.entry_key() == Some(key));

        match last {
            Some(last) => {
                if let Line::Entry(entry) = &mut self.lines[last] {
                    if entry.value != value {
                        entry.value = value;
                        entry.raw = None;
                    }
                }
                let mut index = 0;
                self.lines.retain(|line| {
                    let keep = index >= last || line.entry_key() != Some(key);
                    index += 1;
                    keep
                });
            }
            None => {
                let at = self
                    .lines
                    .iter()
                    .rposition(|line| !line.is_blank())
                    .map_or(0, |pos| pos + 1);
                self.lines.insert(
                    at,
                    Line::Entry(Entry {
                        key: key.to_string(),
                        value,
                        raw: None,
                    }),
                );
            }
        }
    }

    /// Removes every occurrence of `key`, returning the effective value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let value = self.get(key).map(String::from);
        self.lines.retain(|line| line.entry_key() != Some(key));
        value
    }

    /// Iterates over `(key, value)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| {
            match line {
                Line::Entry(entry) => Some((entry.key.as_str(), entry.value.as_str())),
                Line::Raw(_) => None,
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    fn render(&self, out: &mut String) {
        for line in &self.lines {
            match line {
                Line::Raw(raw) => out.push_str(raw),
                Line::Entry(Entry {
                    raw: Some(raw), ..
                }) => out.push_str(raw),
                Line::Entry(entry) => {
                    out.push_str(&entry.key);
                    out.push('=');
                    out.push_str(&encode_value(&entry.value));
                }
            }
            out.push('\n');
        }
    }
}

/// A parsed profile file.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    global: Section,
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses profile text.
    ///
    /// `;` and `#` start comments, `[name]` opens a section, `key=value` sets
    /// a key and a bare `key` means `key=true`. Values may be wrapped in single
    /// or double quotes. A repeated section header continues the first section
    /// with that name.
    ///
    /// # Errors
    ///
    /// Returns an [`IniError`] for an unterminated or empty section header and
    /// for an entry without a key.
    pub fn parse(input: &str) -> Result<Self, IniError> {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            let line = if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#')
            {
                Line::Raw(raw.to_string())
            } else if trimmed.starts_with('[') {
                let name = parse_header(trimmed).map_err(|reason| IniError::new(line_no, reason))?;
                let position = doc
                    .sections
                    .iter()
                    .position(|section| section.name.as_deref() == Some(name));
                current = Some(match position {
                    Some(position) => position,
                    None => {
                        doc.sections.push(Section {
                            name: Some(name.to_string()),
                            header: Some(raw.to_string()),
                            lines: Vec::new(),
                        });
                        doc.sections.len() - 1
                    }
                });
                continue;
            } else {
                let (key, value) = match trimmed.split_once('=') {
                    Some((key, value)) => (decode_key(key), decode_value(value)),
                    None => (decode_key(trimmed), "true".to_string()),
                };
                if key.is_empty() {
                    return Err(IniError::new(line_no, "missing key before `=`"));
                }
                Line::Entry(Entry {
                    key,
                    value,
                    raw: Some(raw.to_string()),
                })
            };

            match current {
                Some(position) => doc.sections[position].lines.push(line),
                None => doc.global.lines.push(line),
            }
        }

        Ok(doc)
    }

    pub fn global(&self) -> &Section {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut Section {
        &mut self.global
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.global.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.global.set(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.global.remove(key)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.name.as_deref() == Some(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.name.as_deref() == Some(name))
    }

    /// Named sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Appends `section` at the end of the document, replacing any section
    /// with the same name.
    pub fn push_section(&mut self, section: Section) {
        if let Some(name) = section.name() {
            let name = name.to_string();
            self.remove_section(&name);
        }
        self.sections.push(section);
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let position = self
            .sections
            .iter()
            .position(|section| section.name.as_deref() == Some(name))?;
        Some(self.sections.remove(position))
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.global.render(&mut out);

        for section in &self.sections {
            match (&section.header, &section.name) {
                (Some(header), _) => out.push_str(header),
                (None, Some(name)) => {
                    if !out.is_empty() && !out.ends_with("\n\n") {
                        out.push('\n');
                    }
                    out.push('[');
                    out.push_str(name);
                    out.push(']');
                }
                (None, None) => continue,
            }
            out.push('\n');
            section.render(&mut out);
        }

        f.write_str(&out)
    }
}

fn parse_header(trimmed: &str) -> Result<&str, &'static str> {
    let close = trimmed
        .find(']')
        .ok_or("unterminated section header")?;
    let rest = trimmed[close + 1..].trim();
    if !rest.is_empty() && !rest.starts_with(';') && !rest.starts_with('#') {
        return Err("unexpected text after section header");
    }
    let name = trimmed[1..close].trim();
    if name.is_empty() {
        return Err("empty section name");
    }
    Ok(name)
}

fn unquote(value: &str) -> Option<String> {
    if let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    match chars.next() {
                        Some('n') => out.push('\n'),
                        Some('r') => out.push('\r'),
                        Some('t') => out.push('\t'),
                        Some(escaped) => out.push(escaped),
                        None => out.push('\\'),
                    }
                }
                c => out.push(c),
            }
        }
        return Some(out);
    }

    value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(String::from)
}

fn decode_key(raw: &str) -> String {
    let key = raw.trim();
    unquote(key).unwrap_or_else(|| key.to_string())
}

fn decode_value(raw: &str) -> String {
    let value = raw.trim();
    if let Some(unquoted) = unquote(value) {
        return unquoted;
    }

    // An unquoted `;` or `#` preceded by whitespace starts a trailing comment.
    let mut prev_space = false;
    for (index, c) in value.char_indices() {
        if prev_space && (c == ';' || c == '#') {
            return value[..index].trim_end().to_string();
        }
        prev_space = c.is_whitespace();
    }
    value.to_string()
}

fn encode_value(value: &str) -> String {
    let needs_quotes = value != value.trim()
        || value.starts_with('"')
        || value.starts_with('\'')
        || value.contains(';')
        || value.contains('#')
        || value.chars().any(char::is_control);

    if !needs_quotes {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
