//! Declaration marker scanners.
//!
//! A scanner is fed a file one line at a time and reports the lines
//! that open a class-like or function-like declaration. Each language
//! family has its own scanner; the chunker only sees [`Marker`]s.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a marker line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Class,
    Function,
}

/// A declaration detected on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub name: String,
    /// Innermost class still open when this declaration starts
    pub enclosing_class: Option<String>,
}

/// Line-by-line declaration detector for one file
pub trait MarkerScanner: Send {
    /// Consume the next line (without its terminator)
    fn observe(&mut self, line: &str) -> Option<Marker>;
}

// ---------------------------------------------------------------------
// Keyword family: class/module/def scoped by indentation
// ---------------------------------------------------------------------

static KEYWORD_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:class|module)\s+([A-Za-z_]\w*(?:::\w+)*)\s*(?:[(:<]|$)").expect("valid regex")
});

static KEYWORD_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:async\s+)?def\s+(?:self\.)?([A-Za-z_]\w*[?!=]?)\s*(?:[(:]|$)")
        .expect("valid regex")
});

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Scanner for indentation-scoped languages (Python, Ruby)
///
/// A class stays open until a non-blank, non-comment line appears at
/// or left of the class keyword's indentation. Lines inside a
/// triple-quoted string never close a class.
#[derive(Debug, Default)]
pub struct KeywordScanner {
    classes: Vec<(usize, String)>,
    open_quote: Option<&'static str>,
}

impl KeywordScanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn innermost(&self) -> Option<String> {
        self.classes.last().map(|(_, name)| name.clone())
    }

    /// Follow triple-quoted strings opening and closing on `line`
    fn track_quotes(&mut self, line: &str) {
        let mut rest = line;
        loop {
            match self.open_quote {
                Some(quote) => match rest.find(quote) {
                    Some(i) => {
                        self.open_quote = None;
                        rest = &rest[i + quote.len()..];
                    }
                    None => return,
                },
                None => {
                    let next = TRIPLE_QUOTES
                        .iter()
                        .filter_map(|q| rest.find(q).map(|i| (i, *q)))
                        .min_by_key(|(i, _)| *i);
                    match next {
                        Some((i, quote)) => {
                            self.open_quote = Some(quote);
                            rest = &rest[i + quote.len()..];
                        }
                        None => return,
                    }
                }
            }
        }
    }
}

impl MarkerScanner for KeywordScanner {
    fn observe(&mut self, line: &str) -> Option<Marker> {
        if self.open_quote.is_some() {
            self.track_quotes(line);
            return None;
        }

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        self.track_quotes(trimmed);

        let indent = indent_width(line);
        while matches!(self.classes.last(), Some((class_indent, _)) if indent <= *class_indent) {
            self.classes.pop();
        }

        if let Some(caps) = KEYWORD_CLASS.captures(trimmed) {
            let name = caps[1].to_string();
            let enclosing_class = self.innermost();
            self.classes.push((indent, name.clone()));
            return Some(Marker {
                kind: MarkerKind::Class,
                name,
                enclosing_class,
            });
        }

        KEYWORD_DEF.captures(trimmed).map(|caps| Marker {
            kind: MarkerKind::Function,
            name: caps[1].to_string(),
            enclosing_class: self.innermost(),
        })
    }
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

// ---------------------------------------------------------------------
// Brace family: declarations scoped by brace depth
// ---------------------------------------------------------------------

static BRACE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:export|default|public|private|protected|internal|abstract|final|sealed|",
        r"static|partial|data|open|unsafe|pub(?:\([^)]*\))?)\s+)*",
        r"(?:class|struct|interface|trait|enum|object|record|union)\s+([A-Za-z_]\w*)"
    ))
    .expect("valid regex")
});

static RUST_IMPL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:unsafe\s+)?impl(?:<[^>]*>)?\s+(?:[\w:<>, ]+\s+for\s+)?([A-Za-z_]\w*)")
        .expect("valid regex")
});

static GO_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^type\s+([A-Za-z_]\w*)\s+(?:struct|interface)\b").expect("valid regex")
});

static RUST_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:pub(?:\([^)]*\))?\s+)?(?:(?:const|async|unsafe|extern(?:\s+"[^"]*")?)\s+)*fn\s+([A-Za-z_]\w*)"#,
    )
    .expect("valid regex")
});

static GO_FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)").expect("valid regex")
});

static KEYWORD_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:export|default|async|public|private|protected|static|final|abstract|",
        r"override|open|internal|suspend|inline|mutating)\s+)*",
        r"(?:function\*?|func|fun|def)\s+([A-Za-z_$][\w$]*)"
    ))
    .expect("valid regex")
});

static ARROW_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?",
        r"(?:function\b|\([^)]*\)\s*(?::[^=]+)?=>|[A-Za-z_$][\w$]*\s*=>)"
    ))
    .expect("valid regex")
});

/// Words that look like a call or signature head but never name a declaration
const CONTROL_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "catch", "try", "return",
    "new", "throw", "await", "yield", "sizeof", "typeof", "delete", "using", "lock", "match",
    "loop", "elif", "with", "defer", "go", "select", "when", "synchronized",
];

#[derive(Debug)]
struct ClassFrame {
    name: String,
    depth: usize,
    opened: bool,
}

/// Scanner for brace-delimited languages
///
/// Recognizes class-like declarations (`class`, `struct`, `trait`,
/// `impl`, Go `type ... struct`) and function declarations, either by
/// keyword (`fn`, `func`, `function`, `def`, arrow functions) or by a
/// typed signature followed by a body.
#[derive(Debug, Default)]
pub struct BraceScanner {
    depth: usize,
    classes: Vec<ClassFrame>,
    in_block_comment: bool,
}

impl BraceScanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn innermost(&self) -> Option<String> {
        self.classes.last().map(|frame| frame.name.clone())
    }

    fn detect(&self, trimmed: &str) -> Option<(MarkerKind, String)> {
        let trimmed = trimmed.trim_start_matches('}').trim_start();
        if trimmed.starts_with("//")
            || trimmed.starts_with("/*")
            || trimmed.starts_with('*')
            || trimmed.starts_with('#')
            || trimmed.starts_with('@')
        {
            return None;
        }

        for pattern in [&*BRACE_CLASS, &*RUST_IMPL, &*GO_TYPE] {
            if let Some(caps) = pattern.captures(trimmed) {
                return Some((MarkerKind::Class, caps[1].to_string()));
            }
        }

        for pattern in [&*RUST_FN, &*GO_FUNC, &*KEYWORD_FN, &*ARROW_FN] {
            if let Some(caps) = pattern.captures(trimmed) {
                return Some((MarkerKind::Function, caps[1].to_string()));
            }
        }

        signature_name(trimmed).map(|name| (MarkerKind::Function, name))
    }

    /// Track brace depth for one line, ignoring string literals and comments
    fn count_braces(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    i += 1;
                }
                i += 1;
                continue;
            }

            match c {
                '/' if next == Some('/') => return,
                '/' if next == Some('*') => {
                    self.in_block_comment = true;
                    i += 1;
                }
                '"' | '`' => {
                    i = skip_string(&chars, i, c);
                }
                '\'' => {
                    // Char literal only; lone quotes are lifetimes or labels
                    if next == Some('\\') {
                        i = skip_string(&chars, i, '\'');
                    } else if chars.get(i + 2) == Some(&'\'') {
                        i += 2;
                    }
                }
                '{' => self.depth += 1,
                '}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
            i += 1;
        }
    }
}

impl MarkerScanner for BraceScanner {
    fn observe(&mut self, line: &str) -> Option<Marker> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let depth_before = self.depth;
        let detected = if self.in_block_comment {
            None
        } else {
            self.detect(trimmed)
        };

        // A header still waiting for its body gives way to the next declaration
        if detected.is_some()
            && matches!(self.classes.last(), Some(frame) if !frame.opened && frame.depth == depth_before)
        {
            self.classes.pop();
        }

        let marker = detected.map(|(kind, name)| {
            let enclosing_class = self.innermost();
            if kind == MarkerKind::Class {
                self.classes.push(ClassFrame {
                    name: name.clone(),
                    depth: depth_before,
                    opened: false,
                });
            }
            Marker {
                kind,
                name,
                enclosing_class,
            }
        });

        self.count_braces(line);

        // Headers may span lines (`where` clauses, constructor parameters,
        // `extends` lists) until the body opens. A `;` at header depth means
        // there is no body; so does a one-line `{}` on the header itself.
        let class_line = matches!(&marker, Some(m) if m.kind == MarkerKind::Class);
        if let Some(frame) = self.classes.last() {
            if !frame.opened && self.depth <= frame.depth {
                let bodiless = self.depth < frame.depth
                    || trimmed.ends_with(';')
                    || (class_line && trimmed.ends_with('}'));
                if bodiless {
                    self.classes.pop();
                }
            }
        }

        let depth = self.depth;
        for frame in &mut self.classes {
            if depth > frame.depth {
                frame.opened = true;
            }
        }
        while matches!(self.classes.last(), Some(frame) if frame.opened && depth <= frame.depth) {
            self.classes.pop();
        }

        marker
    }
}

fn skip_string(chars: &[char], start: usize, quote: char) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            c if c == quote => return i,
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

/// Name of a typed signature such as `public int size() {` or `int main(void)`
///
/// Untyped heads (`name(args) {`) count only when the line opens a body
/// and the argument list does not look like a call with literals or
/// callbacks.
fn signature_name(trimmed: &str) -> Option<String> {
    let paren = trimmed.find('(')?;
    let head = trimmed[..paren].trim_end();
    let tail = trimmed[paren..].trim_end();

    if head.is_empty()
        || tail.contains(';')
        || head.contains(['=', '.', '"', '\'', ',', '!', '|', '+', '(', ')'])
        || head.contains("->")
    {
        return None;
    }

    let tokens: Vec<&str> = head.split_whitespace().collect();
    if tokens.iter().any(|t| CONTROL_WORDS.contains(t)) {
        return None;
    }

    let raw = tokens.last()?.trim_start_matches(['*', '&']);
    let name = raw.rsplit("::").next().unwrap_or(raw);
    let ident = name.trim_start_matches('~');
    if ident.is_empty()
        || !ident.chars().all(|c| c.is_alphanumeric() || c == '_')
        || ident.starts_with(|c: char| c.is_ascii_digit())
        || CONTROL_WORDS.contains(&ident)
    {
        return None;
    }

    let opens_body = tail.ends_with('{');
    let typed = tokens.len() >= 2;
    let accepted = if typed {
        opens_body || tail.ends_with(')') || tail.ends_with("const")
    } else {
        opens_body
            && !tail.contains("=>")
            && !tail.contains("function")
            && !tail.contains(['"', '\''])
            && closes_before_body(tail)
    };

    accepted.then(|| name.to_string())
}

/// Whether the argument list starting `tail` closes before the body opens
///
/// `(a, b) {` and `(a): Promise<T> {` close first; a call passing a
/// callback, `(function () {`, does not.
fn closes_before_body(tail: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in tail.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let rest = tail[i + 1..].trim();
                    return rest == "{" || (rest.starts_with(':') && !rest.contains('('));
                }
            }
            '{' => return false,
            _ => {}
        }
    }
    false
}
