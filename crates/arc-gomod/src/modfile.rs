//! `go.mod` records and the line-oriented parser that produces them.
//!
//! Each directive may appear on a single line (`require a/b v1.0.0`) or as a
//! parenthesized block whose lines carry only the directive arguments:
//!
//! ```text
//! require (
//!     github.com/a/b v1.0.0
//!     github.com/c/d v0.2.0 // indirect
//! )
//! ```

use crate::error::{ModFileError, Result};

/// Directives that carry no dependency information but are valid go.mod syntax.
const IGNORED_VERBS: &[&str] = &["retract", "godebug", "tool", "ignore"];

/// Directives that may open a parenthesized block.
const BLOCK_VERBS: &[&str] = &[
    "require", "replace", "exclude", "retract", "godebug", "tool", "ignore",
];

/// A parsed `go.mod` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFile {
    /// The module path declared by the `module` directive.
    pub module: Option<String>,
    /// Required modules, in file order.
    pub require: Vec<Require>,
    /// Replace directives, in file order.
    pub replace: Vec<Replace>,
}

/// A module path with an optional version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersion {
    pub path: String,
    pub version: Option<String>,
}

/// A `require` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    pub module: ModuleVersion,
    /// Set when the entry carries an `// indirect` comment.
    pub indirect: bool,
}

/// A `replace old [v] => new [v]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    pub old: ModuleVersion,
    pub new: ModuleVersion,
}

/// One source line split into tokens and its trailing `//` comment.
struct Line {
    tokens: Vec<String>,
    comment: Option<String>,
}

/// Parse the contents of a `go.mod` file.
///
/// `file_name` is used only in error messages.
pub fn parse(file_name: &str, data: &[u8]) -> Result<ModFile> {
    let text = std::str::from_utf8(data).map_err(|source| ModFileError::NotUtf8 {
        file: file_name.to_string(),
        source,
    })?;

    let mut parser = Parser {
        file: file_name,
        modfile: ModFile::default(),
    };
    let mut block: Option<(String, usize)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = parser.tokenize(raw, line_no)?;
        if line.tokens.is_empty() {
            continue;
        }

        if let Some((verb, _)) = &block {
            if line.tokens.len() == 1 && line.tokens[0] == ")" {
                block = None;
                continue;
            }
            parser.directive(verb, &line.tokens, line.comment.as_deref(), line_no)?;
            continue;
        }

        let verb = line.tokens[0].as_str();
        let args = &line.tokens[1..];

        if args.first().map(String::as_str) == Some("(") {
            if !BLOCK_VERBS.contains(&verb) {
                return Err(parser.syntax(line_no, format!("{verb} does not accept a block")));
            }
            match args.len() {
                1 => block = Some((verb.to_string(), line_no)),
                2 if args[1] == ")" => {}
                _ => {
                    return Err(parser.syntax(
                        line_no,
                        format!("unexpected tokens after '{verb} ('"),
                    ))
                }
            }
            continue;
        }

        parser.directive(verb, args, line.comment.as_deref(), line_no)?;
    }

    if let Some((verb, line)) = block {
        return Err(ModFileError::UnterminatedBlock {
            file: file_name.to_string(),
            line,
            verb,
        });
    }

    Ok(parser.modfile)
}

struct Parser<'a> {
    file: &'a str,
    modfile: ModFile,
}

impl Parser<'_> {
    fn directive(
        &mut self,
        verb: &str,
        args: &[String],
        comment: Option<&str>,
        line: usize,
    ) -> Result<()> {
        match verb {
            "module" => {
                let [path] = args else {
                    return Err(self.syntax(line, "usage: module module/path"));
                };
                self.modfile.module = Some(path.clone());
            }
            "go" => {
                if args.len() != 1 {
                    return Err(self.syntax(line, "usage: go 1.23"));
                }
            }
            "toolchain" => {
                if args.len() != 1 {
                    return Err(self.syntax(line, "usage: toolchain go1.23.0"));
                }
            }
            "require" => {
                let [path, version] = args else {
                    return Err(self.syntax(line, "usage: require module/path v1.2.3"));
                };
                self.modfile.require.push(Require {
                    module: ModuleVersion {
                        path: path.clone(),
                        version: Some(version.clone()),
                    },
                    indirect: comment.is_some_and(is_indirect),
                });
            }
            "exclude" => {
                if args.len() != 2 {
                    return Err(self.syntax(line, "usage: exclude module/path v1.2.3"));
                }
            }
            "replace" => {
                let replace = self.replace(args, line)?;
                self.modfile.replace.push(replace);
            }
            v if IGNORED_VERBS.contains(&v) => {}
            other => return Err(self.syntax(line, format!("unknown directive: {other}"))),
        }
        Ok(())
    }

    fn replace(&self, args: &[String], line: usize) -> Result<Replace> {
        const USAGE: &str =
            "usage: replace module/path [v1.2.3] => other/module v1.4\n\t or replace module/path [v1.2.3] => ../local/directory";

        let arrow = args
            .iter()
            .position(|a| a == "=>")
            .ok_or_else(|| self.syntax(line, USAGE))?;
        let (old, new) = (&args[..arrow], &args[arrow + 1..]);

        let old = module_version(old).ok_or_else(|| self.syntax(line, USAGE))?;
        let new = module_version(new).ok_or_else(|| self.syntax(line, USAGE))?;
        Ok(Replace { old, new })
    }

    fn tokenize(&self, raw: &str, line: usize) -> Result<Line> {
        let mut tokens = Vec::new();
        let mut comment = None;
        let mut chars = raw.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                c if c.is_whitespace() => {}
                '/' if chars.peek().map(|&(_, n)| n) == Some('/') => {
                    comment = Some(raw[start + 2..].trim().to_string());
                    break;
                }
                '(' | ')' => tokens.push(c.to_string()),
                '=' if chars.peek().map(|&(_, n)| n) == Some('>') => {
                    chars.next();
                    tokens.push("=>".to_string());
                }
                '"' | '`' => {
                    let quote = c;
                    let mut value = String::new();
                    let mut closed = false;
                    while let Some((_, q)) = chars.next() {
                        if q == quote {
                            closed = true;
                            break;
                        }
                        if q == '\\' && quote == '"' {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                            continue;
                        }
                        value.push(q);
                    }
                    if !closed {
                        return Err(self.syntax(line, "unterminated quoted string"));
                    }
                    tokens.push(value);
                }
                _ => {
                    let mut end = start + c.len_utf8();
                    while let Some(&(i, n)) = chars.peek() {
                        if n.is_whitespace() || matches!(n, '"' | '(' | ')') {
                            break;
                        }
                        if raw[i..].starts_with("//") {
                            break;
                        }
                        if raw[i..].starts_with("=>") {
                            break;
                        }
                        end = i + n.len_utf8();
                        chars.next();
                    }
                    tokens.push(raw[start..end].to_string());
                }
            }
        }

        Ok(Line { tokens, comment })
    }

    fn syntax(&self, line: usize, detail: impl Into<String>) -> ModFileError {
        ModFileError::Syntax {
            file: self.file.to_string(),
            line,
            detail: detail.into(),
        }
    }
}

fn module_version(tokens: &[String]) -> Option<ModuleVersion> {
    match tokens {
        [path] => Some(ModuleVersion {
            path: path.clone(),
            version: None,
        }),
        [path, version] => Some(ModuleVersion {
            path: path.clone(),
            version: Some(version.clone()),
        }),
        _ => None,
    }
}

/// Go marks transitive requirements with `// indirect`, optionally followed
/// by `; other comment text`.
fn is_indirect(comment: &str) -> bool {
    let comment = comment.trim();
    comment == "indirect" || comment.starts_with("indirect;")
}
