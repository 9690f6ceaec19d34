//! Declaration outline of a PHP file.
//!
//! This is not a PHP parser. A single lexing pass blanks out strings,
//! comments and inline HTML (keeping byte offsets and newlines intact) while
//! recording doc comments and string literals. A second pass walks the
//! blanked text by brace depth and classifies the statements that sit
//! directly in the file (namespaces, type declarations) or directly in a
//! type body (methods, properties, constants, enum cases). Method bodies are
//! never looked into.

use super::{Located, Member, MemberKind, SourceOutline, TypeDecl, TypeKind};
use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    static ref NAMESPACE: Regex =
        Regex::new(r"\A\s*namespace(?:\s+([A-Za-z_\\][A-Za-z0-9_\\]*))?\s*\z").unwrap();
    static ref TYPE_DECL: Regex =
        Regex::new(r"\b(class|interface|trait|enum)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref FUNCTION: Regex =
        Regex::new(r"\bfunction\s+(?:&\s*)?([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap();
    static ref CASE: Regex = Regex::new(r"\Acase\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref CONST_KEYWORD: Regex = Regex::new(r"\bconst\b").unwrap();
    static ref CONST_NAME: Regex =
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=>]|\z)").unwrap();
    static ref VARIABLE: Regex = Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
}

const MODIFIERS: &[&[u8]] = &[
    b"public",
    b"protected",
    b"private",
    b"var",
    b"static",
    b"readonly",
    b"final",
    b"abstract",
];

/// Outline `content`. Never fails: unrecognised or malformed code simply
/// contributes nothing.
pub fn parse(content: &str) -> SourceOutline {
    let lexed = lex(content.as_bytes());
    let outline = Outliner {
        content,
        masked: &lexed.masked,
        docs: &lexed.docs,
        strings: &lexed.strings,
        lines: LineIndex::new(content),
    };
    outline.run()
}

/// Byte range `[start, end)` in the source.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

/// A string literal: `start` is the opening delimiter, `inner` its content.
#[derive(Debug, Clone, Copy)]
struct StringLiteral {
    start: usize,
    inner: Span,
}

struct Lexed {
    masked: Vec<u8>,
    docs: Vec<Span>,
    strings: Vec<StringLiteral>,
}

fn blank(masked: &mut [u8], from: usize, to: usize) {
    for byte in &mut masked[from..to] {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}

fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

fn lex(src: &[u8]) -> Lexed {
    let len = src.len();
    let mut masked = src.to_vec();
    let mut docs = Vec::new();
    let mut strings = Vec::new();
    let mut in_php = false;
    let mut i = 0;

    while i < len {
        if !in_php {
            match find(src, i, b"<?") {
                Some(open) => {
                    let tag_end = if src[open..].starts_with(b"<?php") {
                        open + 5
                    } else if src[open..].starts_with(b"<?=") {
                        open + 3
                    } else {
                        open + 2
                    };
                    blank(&mut masked, i, tag_end);
                    i = tag_end;
                    in_php = true;
                }
                None => {
                    blank(&mut masked, i, len);
                    break;
                }
            }
            continue;
        }

        let next = src.get(i + 1).copied();
        match src[i] {
            b'?' if next == Some(b'>') => {
                blank(&mut masked, i, i + 2);
                i += 2;
                in_php = false;
            }
            b'/' if next == Some(b'/') => i = skip_line_comment(src, &mut masked, i),
            b'#' if next != Some(b'[') => i = skip_line_comment(src, &mut masked, i),
            b'/' if next == Some(b'*') => {
                let end = find(src, i + 2, b"*/").map_or(len, |p| p + 2);
                // `/**/` is an empty block comment, not a doc comment
                if src[i..].starts_with(b"/**") && end - i > 4 {
                    docs.push(Span { start: i, end });
                }
                blank(&mut masked, i, end);
                i = end;
            }
            b'\'' | b'"' | b'`' => {
                let (inner_end, end) = quoted_end(src, i);
                let inner = Span {
                    start: i + 1,
                    end: inner_end,
                };
                blank(&mut masked, inner.start, inner.end);
                strings.push(StringLiteral { start: i, inner });
                i = end;
            }
            b'<' if src[i..].starts_with(b"<<<") => match heredoc(src, i) {
                Some((inner, end)) => {
                    blank(&mut masked, inner.start, inner.end);
                    strings.push(StringLiteral { start: i, inner });
                    i = end;
                }
                None => i += 3,
            },
            _ => i += 1,
        }
    }

    Lexed {
        masked,
        docs,
        strings,
    }
}

/// Line comments end at the newline or at a closing `?>`.
fn skip_line_comment(src: &[u8], masked: &mut [u8], start: usize) -> usize {
    let mut end = start;
    while end < src.len() && src[end] != b'\n' && !src[end..].starts_with(b"?>") {
        end += 1;
    }
    blank(masked, start, end);
    end
}

/// Returns (end of content, end of literal) for the literal opening at `start`.
fn quoted_end(src: &[u8], start: usize) -> (usize, usize) {
    let quote = src[start];
    let mut j = start + 1;
    while j < src.len() {
        match src[j] {
            b'\\' => j += 2,
            b if b == quote => return (j, j + 1),
            _ => j += 1,
        }
    }
    (src.len(), src.len())
}

/// Heredoc or nowdoc opening at `start` (`<<<ID`, `<<<"ID"`, `<<<'ID'`).
/// Returns the body span and the offset right after the closing identifier.
fn heredoc(src: &[u8], start: usize) -> Option<(Span, usize)> {
    let len = src.len();
    let mut j = start + 3;
    while j < len && (src[j] == b' ' || src[j] == b'\t') {
        j += 1;
    }
    let quoted = matches!(src.get(j), Some(b'\'') | Some(b'"'));
    if quoted {
        j += 1;
    }
    let id_start = j;
    while j < len && is_ident_byte(src[j]) {
        j += 1;
    }
    if j == id_start {
        return None;
    }
    let id = &src[id_start..j];
    if quoted {
        j += 1;
    }

    let inner_start = find(src, j, b"\n")? + 1;
    let mut line_start = inner_start;

    while line_start < len {
        let line_end = find(src, line_start, b"\n").unwrap_or(len);
        let mut k = line_start;
        while k < line_end && (src[k] == b' ' || src[k] == b'\t') {
            k += 1;
        }
        let closes = src[k..].starts_with(id)
            && !src.get(k + id.len()).copied().is_some_and(is_ident_byte);
        if closes {
            let inner_end = line_start.saturating_sub(1).max(inner_start);
            return Some((
                Span {
                    start: inner_start,
                    end: inner_end,
                },
                k + id.len(),
            ));
        }
        line_start = line_end + 1;
    }

    Some((
        Span {
            start: inner_start,
            end: len,
        },
        len,
    ))
}

struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line of a byte offset.
    fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

enum TopLevel {
    Namespace(Option<String>),
    Type(TypeDecl),
}

struct Outliner<'a> {
    content: &'a str,
    masked: &'a [u8],
    docs: &'a [Span],
    strings: &'a [StringLiteral],
    lines: LineIndex,
}

impl<'a> Outliner<'a> {
    fn run(&self) -> SourceOutline {
        let mut outline = SourceOutline::default();
        let mut depth = 0usize;
        // Depth at which namespaces and types are declared; 1 inside a
        // braced `namespace Foo { ... }`.
        let mut container_depth = 0usize;
        let mut current: Option<(TypeDecl, usize)> = None;
        let mut segment_start = 0usize;

        for (i, &byte) in self.masked.iter().enumerate() {
            match byte {
                b'{' | b';' => {
                    let opens_block = byte == b'{';

                    match current.as_mut() {
                        Some((decl, body_depth)) if depth == *body_depth => {
                            decl.members.extend(self.members(segment_start, i));
                        }
                        None if depth == container_depth => {
                            match self.top_level(segment_start, i) {
                                Some(TopLevel::Namespace(name)) => {
                                    outline.namespace = name;
                                    if opens_block {
                                        container_depth = depth + 1;
                                    }
                                }
                                Some(TopLevel::Type(decl)) if opens_block => {
                                    current = Some((decl, depth + 1));
                                }
                                _ => {}
                            }
                        }
                        _ => {}
                    }

                    if opens_block {
                        depth += 1;
                    }
                    segment_start = i + 1;
                }
                b'}' => {
                    if matches!(current, Some((_, body_depth)) if body_depth == depth) {
                        if let Some((decl, _)) = current.take() {
                            outline.types.push(decl);
                        }
                    }
                    depth = depth.saturating_sub(1);
                    container_depth = container_depth.min(depth);
                    segment_start = i + 1;
                }
                _ => {}
            }
        }

        // Unterminated type body: keep what was found.
        if let Some((decl, _)) = current {
            outline.types.push(decl);
        }

        outline
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.content.as_bytes()[start..end]).into_owned()
    }

    fn located(&self, start: usize, end: usize) -> Located {
        Located::new(self.text(start, end), self.lines.line(start))
    }

    /// Splits a source span into one [`Located`] per line.
    fn lines_of(&self, span: Span) -> Vec<Located> {
        let first_line = self.lines.line(span.start);
        self.text(span.start, span.end)
            .split('\n')
            .enumerate()
            .map(|(i, line)| Located::new(line.trim_end_matches('\r'), first_line + i))
            .collect()
    }

    /// The last doc comment lying entirely within `[from, to)`.
    fn doc_between(&self, from: usize, to: usize) -> Vec<Located> {
        self.docs
            .iter()
            .rev()
            .find(|doc| doc.start >= from && doc.end <= to)
            .map(|doc| self.lines_of(*doc))
            .unwrap_or_default()
    }

    /// Lines of a string literal assigned right after `offset`
    /// (`= 'value'`), if any.
    fn string_value_after(&self, offset: usize) -> Vec<Located> {
        let skip_ws = |mut j: usize| {
            while j < self.masked.len() && self.masked[j].is_ascii_whitespace() {
                j += 1;
            }
            j
        };

        let eq = skip_ws(offset);
        if self.masked.get(eq) != Some(&b'=') {
            return Vec::new();
        }
        let value_start = skip_ws(eq + 1);

        self.strings
            .iter()
            .find(|literal| literal.start == value_start)
            .map(|literal| self.lines_of(literal.inner))
            .unwrap_or_default()
    }

    fn top_level(&self, start: usize, end: usize) -> Option<TopLevel> {
        let segment = &self.masked[start..end];

        if let Some(caps) = NAMESPACE.captures(segment) {
            let name = caps
                .get(1)
                .map(|m| self.text(start + m.start(), start + m.end()));
            return Some(TopLevel::Namespace(name));
        }

        for caps in TYPE_DECL.captures_iter(segment) {
            let (Some(keyword), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            // `Foo::class`, `$class`, `$obj->class`, `new class`
            let before = segment[..keyword.start()].trim_ascii_end();
            let preceding = segment[..keyword.start()].last().copied();
            if matches!(preceding, Some(b':') | Some(b'>') | Some(b'$') | Some(b'\\'))
                || before.ends_with(b"new")
            {
                continue;
            }

            let kind = match keyword.as_bytes() {
                b"class" => TypeKind::Class,
                b"interface" => TypeKind::Interface,
                b"trait" => TypeKind::Trait,
                _ => TypeKind::Enum,
            };

            return Some(TopLevel::Type(TypeDecl {
                kind,
                name: self.located(start + name.start(), start + name.end()),
                doc: self.doc_between(start, start + keyword.start()),
                members: Vec::new(),
            }));
        }

        None
    }

    fn members(&self, start: usize, end: usize) -> Vec<Member> {
        let segment = &self.masked[start..end];
        let Some((word, word_at)) = first_word(segment) else {
            return Vec::new();
        };

        if word == b"use" {
            return Vec::new();
        }

        if let Some(caps) = FUNCTION.captures(segment) {
            return self.method(start, segment, &caps).into_iter().collect();
        }

        if word == b"case" {
            return CASE
                .captures(&segment[word_at..])
                .and_then(|caps| caps.get(1))
                .map(|name| {
                    let name_start = start + word_at + name.start();
                    let name_end = start + word_at + name.end();
                    Member {
                        kind: MemberKind::Case,
                        name: self.located(name_start, name_end),
                        params: Vec::new(),
                        value: self.string_value_after(name_end),
                        doc: self.doc_between(start, name_start),
                    }
                })
                .into_iter()
                .collect();
        }

        if let Some(keyword) = CONST_KEYWORD.find(segment) {
            return self.constants(start, segment, keyword.end());
        }

        if MODIFIERS.contains(&word) {
            return self.properties(start, segment);
        }

        Vec::new()
    }

    fn method(&self, start: usize, segment: &[u8], caps: &regex::bytes::Captures) -> Option<Member> {
        let name = caps.get(1)?;
        let open = caps.get(0)?.end() - 1;
        let close = matching_paren(segment, open).unwrap_or(segment.len());

        let params = VARIABLE
            .captures_iter(&segment[open..close])
            .filter_map(|c| c.get(1))
            .map(|m| self.located(start + open + m.start(), start + open + m.end()))
            .collect();

        Some(Member {
            kind: MemberKind::Method,
            name: self.located(start + name.start(), start + name.end()),
            params,
            value: Vec::new(),
            doc: self.doc_between(start, start + name.start()),
        })
    }

    fn constants(&self, start: usize, segment: &[u8], from: usize) -> Vec<Member> {
        let nesting = nesting_levels(segment);
        let mut doc_from = start;
        let mut members = Vec::new();

        for caps in CONST_NAME.captures_iter(&segment[from..]) {
            let Some(name) = caps.get(1) else { continue };
            let name_start = from + name.start();
            if nesting[name_start] != 0 {
                continue;
            }

            let (abs_start, abs_end) = (start + name_start, start + from + name.end());
            members.push(Member {
                kind: MemberKind::Constant,
                name: self.located(abs_start, abs_end),
                params: Vec::new(),
                value: self.string_value_after(abs_end),
                doc: self.doc_between(doc_from, abs_start),
            });
            doc_from = abs_end;
        }

        members
    }

    fn properties(&self, start: usize, segment: &[u8]) -> Vec<Member> {
        let nesting = nesting_levels(segment);
        let mut doc_from = start;
        let mut members = Vec::new();

        for caps in VARIABLE.captures_iter(segment) {
            let Some(name) = caps.get(1) else { continue };
            if nesting[name.start()] != 0 {
                continue;
            }

            let (abs_start, abs_end) = (start + name.start(), start + name.end());
            members.push(Member {
                kind: MemberKind::Property,
                name: self.located(abs_start, abs_end),
                params: Vec::new(),
                value: Vec::new(),
                doc: self.doc_between(doc_from, abs_start),
            });
            doc_from = abs_end;
        }

        members
    }
}

/// First keyword of a statement, skipping leading attributes (`#[...]`).
/// Returns the word and its offset.
fn first_word(segment: &[u8]) -> Option<(&[u8], usize)> {
    let mut i = 0;

    loop {
        while i < segment.len() && segment[i].is_ascii_whitespace() {
            i += 1;
        }
        if !segment[i..].starts_with(b"#[") {
            break;
        }
        let mut depth = 0usize;
        while i < segment.len() {
            match segment[i] {
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        i += 1;
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    let begin = i;
    while i < segment.len() && is_ident_byte(segment[i]) {
        i += 1;
    }

    (i > begin).then(|| (&segment[begin..i], begin))
}

fn matching_paren(segment: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &byte) in segment.iter().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parenthesis/bracket nesting level at each byte of a statement.
fn nesting_levels(segment: &[u8]) -> Vec<usize> {
    let mut level = 0usize;
    segment
        .iter()
        .map(|&byte| match byte {
            b'(' | b'[' => {
                level += 1;
                level - 1
            }
            b')' | b']' => {
                level = level.saturating_sub(1);
                level
            }
            _ => level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS_WITH_TYPOS: &str = r#"<?php

declare(strict_types=1);

namespace Tests\Fixtures\ClassesToTest;

/**
 * Class ClassWithTypoErrors
 *
 * This class is used to tst type errors in class properties.
 *
 * @internal
 */
final class ClassWithTypoErrors implements InterfaceWithSpellingMistake
{
    public int $propertyWithoutTypoError = 1;

    public int $properytWithTypoError = 2;

    /**
     * This is a property with a doc bolck typo error
     */
    public int $propertyWithDocBlockTypoError = 3;

    public function methodWithTypoErorr(): string
    {
        return 'This is a method { with a typo error';
    }

    public function methodWithTypoErrorInParameters(string $parameterWithoutTypoError, string $parameterWithTypoErorr): string
    {
        $localVariableWithTypoo = 'Nuno Maduro is a good teatcher';

        return $localVariableWithTypoo;
    }
}
"#;

    fn names(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.name.text.as_str()).collect()
    }

    #[test]
    fn test_class_outline() {
        let outline = parse(CLASS_WITH_TYPOS);

        assert_eq!(
            outline.namespace.as_deref(),
            Some("Tests\\Fixtures\\ClassesToTest")
        );
        assert_eq!(outline.types.len(), 1);

        let class = &outline.types[0];
        assert_eq!(class.kind, TypeKind::Class);
        assert_eq!(class.name, Located::new("ClassWithTypoErrors", 14));
        assert_eq!(class.doc.len(), 7);
        assert_eq!(class.doc[0], Located::new("/**", 7));
        assert_eq!(
            class.doc[3],
            Located::new(" * This class is used to tst type errors in class properties.", 10)
        );

        assert_eq!(
            names(&class.members),
            vec![
                "propertyWithoutTypoError",
                "properytWithTypoError",
                "propertyWithDocBlockTypoError",
                "methodWithTypoErorr",
                "methodWithTypoErrorInParameters",
            ]
        );
        assert_eq!(class.members[1].kind, MemberKind::Property);
        assert_eq!(class.members[1].name.line, 18);
        assert!(class.members[1].doc.is_empty());
    }

    #[test]
    fn test_member_docs_and_params() {
        let outline = parse(CLASS_WITH_TYPOS);
        let class = &outline.types[0];

        let documented = &class.members[2];
        assert_eq!(documented.doc.len(), 3);
        assert_eq!(
            documented.doc[1],
            Located::new("     * This is a property with a doc bolck typo error", 21)
        );

        let method = &class.members[4];
        assert_eq!(method.kind, MemberKind::Method);
        assert_eq!(method.name.line, 30);
        assert_eq!(
            method.params,
            vec![
                Located::new("parameterWithoutTypoError", 30),
                Located::new("parameterWithTypoErorr", 30),
            ]
        );
    }

    #[test]
    fn test_constants_with_string_values() {
        let outline = parse(
            "<?php\n\nnamespace App;\n\nfinal class ClassWithTypoOnConstants\n{\n    public const CONSTANT_WITHOUT_TYPO = 'constant_without_typo';\n\n    public const CONSTANT_WITH_TYPOO = 'constant_with_typoo';\n    const LIMIT = 10, OTHER_NAMEE = \"othr\";\n    const array MAP = ['keey' => self::LIMIT];\n}\n",
        );
        let members = &outline.types[0].members;

        assert_eq!(
            names(members),
            vec![
                "CONSTANT_WITHOUT_TYPO",
                "CONSTANT_WITH_TYPOO",
                "LIMIT",
                "OTHER_NAMEE",
                "MAP",
            ]
        );
        assert_eq!(members[1].name.line, 9);
        assert_eq!(members[1].value, vec![Located::new("constant_with_typoo", 9)]);
        assert!(members[2].value.is_empty());
        assert_eq!(members[3].value, vec![Located::new("othr", 10)]);
        assert!(members[4].value.is_empty());
    }

    #[test]
    fn test_backed_and_unit_enums() {
        let backed = parse(
            "<?php\nnamespace App;\n\n/**\n * Even the documentation has spellling mistakes.\n */\nenum Suit: string\n{\n    case NO_MISTAKES = 'No spelling mistakes!';\n    case SPELLLING_MISTAKE = 'Spelling';\n\n    private function labell(): string { return match($this) { default => 'x' }; }\n}\n",
        );
        let suit = &backed.types[0];
        assert_eq!(suit.kind, TypeKind::Enum);
        assert_eq!(suit.name, Located::new("Suit", 7));
        assert_eq!(suit.doc.len(), 3);
        assert_eq!(names(&suit.members), vec!["NO_MISTAKES", "SPELLLING_MISTAKE", "labell"]);
        assert_eq!(suit.members[0].kind, MemberKind::Case);
        assert_eq!(suit.members[0].value, vec![Located::new("No spelling mistakes!", 9)]);

        let unit = parse("<?php\nnamespace App;\nenum Status\n{\n    case ACTIVVE;\n    case Done;\n}\n");
        let status = &unit.types[0];
        assert_eq!(names(&status.members), vec!["ACTIVVE", "Done"]);
        assert!(status.members.iter().all(|m| m.value.is_empty()));
    }

    #[test]
    fn test_interface_and_trait() {
        let outline = parse(
            "<?php\nnamespace App;\n\ninterface Greeter\n{\n    public function methodWithTypoErorr(string $naame): string;\n}\n\ntrait Helps\n{\n    use Other { other as protected; }\n    protected static ?int $countt = null;\n}\n",
        );

        assert_eq!(outline.types.len(), 2);
        assert_eq!(outline.types[0].kind, TypeKind::Interface);
        assert_eq!(outline.types[0].members[0].params, vec![Located::new("naame", 6)]);
        assert_eq!(outline.types[1].kind, TypeKind::Trait);
        assert_eq!(names(&outline.types[1].members), vec!["countt"]);
    }

    #[test]
    fn test_strings_and_comments_are_opaque() {
        let outline = parse(
            "<?php\nnamespace App;\n// class Commented {\n# function nope() {\n/* enum Hidden { */\n$x = Foo::class;\n$y = new class { public $anon; };\nclass Real\n{\n    public string $brace = '}';\n    public string $heredoc = <<<TXT\n    } class Fake {\n    TXT;\n    public int $after = 1;\n}\n",
        );

        assert_eq!(outline.types.len(), 1);
        let real = &outline.types[0];
        assert_eq!(real.name.text, "Real");
        assert_eq!(names(&real.members), vec!["brace", "heredoc", "after"]);
    }

    #[test]
    fn test_multiline_string_value_is_split() {
        let outline = parse(
            "<?php\nnamespace App;\nclass Messages\n{\n    const GREETING = 'Hello\nwordl\nagain';\n}\n",
        );
        let constant = &outline.types[0].members[0];

        assert_eq!(
            constant.value,
            vec![
                Located::new("Hello", 5),
                Located::new("wordl", 6),
                Located::new("again", 7),
            ]
        );
    }

    #[test]
    fn test_attributes_and_promoted_parameters() {
        let outline = parse(
            "<?php\nnamespace App;\n\n#[Entity(name: 'users')]\nfinal class User\n{\n    #[Column]\n    public string $emial;\n\n    public function __construct(\n        private readonly string $fristName,\n        #[Sensitive] private string $pasword = '',\n    ) {}\n}\n",
        );
        let user = &outline.types[0];

        assert_eq!(user.name, Located::new("User", 5));
        assert_eq!(names(&user.members), vec!["emial", "__construct"]);
        assert_eq!(
            user.members[1].params,
            vec![Located::new("fristName", 11), Located::new("pasword", 12)]
        );
    }

    #[test]
    fn test_braced_namespace_and_no_php() {
        let outline = parse("<?php\nnamespace App\\Braced {\n    class Inside {\n        public $x;\n    }\n}\n");
        assert_eq!(outline.namespace.as_deref(), Some("App\\Braced"));
        assert_eq!(outline.types[0].name.text, "Inside");
        assert_eq!(names(&outline.types[0].members), vec!["x"]);

        let html = parse("<html>class NotPhp { }</html>");
        assert!(html.types.is_empty());
        assert!(html.namespace.is_none());
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line(0), 1);
        assert_eq!(index.line(2), 2);
        assert_eq!(index.line(5), 3);
        assert_eq!(index.line(6), 4);
    }
}
