//! Ordered indicator table backing language detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// The ordered candidate table. Order matters: it is the tie-break for
/// ambiguous input, so entries must not be re-sorted.
static INDICATOR_TABLE: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("static indicator pattern"))
            .collect()
    };

    vec![
        (
            "javascript",
            compile(&[
                r"function\s+\w+",
                r"const\s+\w+\s*=",
                r"=>\s*\{",
                r"console\.log",
                r"import\s+.*from",
                r"export\s+(default\s+)?",
                r"\.map\s*\(",
                r"\.filter\s*\(",
                r"useState|useEffect",
            ]),
        ),
        (
            "python",
            compile(&[
                r"def\s+\w+",
                r"import\s+\w+",
                r"from\s+\w+\s+import",
                r"print\s*\(",
                r#"if\s+__name__\s*==\s*['"]__main__['"]"#,
                r"class\s+\w+:",
                r"elif\s+",
                r"(?m):\s*$",
            ]),
        ),
        (
            "css",
            compile(&[
                r"\.\w+\s*\{",
                r"@media",
                r"display\s*:",
                r"background\s*:",
                r"margin\s*:",
                r"padding\s*:",
                r"color\s*:",
                r"font-size\s*:",
                r"transform\s*:",
            ]),
        ),
        (
            "html",
            compile(&[
                r"(?i)<html",
                r"(?i)<div",
                r"(?i)<p>",
                r"(?i)<script",
                r"(?i)<style",
                r"(?i)<head>",
                r"(?i)<body>",
                r"(?i)<img",
                r"(?i)<a\s+href",
            ]),
        ),
        (
            "json",
            compile(&[
                r"^\s*\{",
                r#""\w+"\s*:"#,
                r"^\s*\[",
                r"\},\s*\{",
                r#"\],\s*""#,
                r"null|true|false",
            ]),
        ),
        (
            "markdown",
            compile(&[
                r"(?m)^#+\s",
                r"\*\*.+\*\*",
                r"\[.+\]\(.+\)",
                r"(?m)^\s*-\s+",
                r"(?m)^\s*\*\s+",
                r"(?m)^\s*\d+\.\s+",
                r"(?m)^>",
                r"```",
            ]),
        ),
        (
            "sql",
            compile(&[
                r"(?i)SELECT\s+",
                r"(?i)FROM\s+",
                r"(?i)WHERE\s+",
                r"(?i)INSERT\s+INTO",
                r"(?i)UPDATE\s+",
                r"(?i)DELETE\s+FROM",
                r"(?i)CREATE\s+TABLE",
                r"(?i)ALTER\s+TABLE",
            ]),
        ),
        (
            "bash",
            compile(&[
                r"^#!",
                r"sudo\s+",
                r"apt\s+",
                r"cd\s+",
                r"ls\s+",
                r"grep\s+",
                r"chmod\s+",
                r"export\s+\w+=",
                r"\$\w+",
            ]),
        ),
        (
            "php",
            compile(&[
                r"<\?php",
                r"\$\w+",
                r"echo\s+",
                r"function\s+\w+\s*\(",
                r"class\s+\w+",
                r"->\w+",
                r"::\w+",
            ]),
        ),
        (
            "java",
            compile(&[
                r"public\s+class",
                r"public\s+static\s+void\s+main",
                r"System\.out\.println",
                r"import\s+java\.",
                r"private\s+\w+\s+\w+",
                r"public\s+\w+\s+\w+\s*\(",
            ]),
        ),
        (
            "c",
            compile(&[
                r"#include\s*<",
                r"int\s+main\s*\(",
                r"printf\s*\(",
                r"scanf\s*\(",
                r"malloc\s*\(",
                r"free\s*\(",
                r"struct\s+\w+",
            ]),
        ),
        (
            "cpp",
            compile(&[
                r"#include\s*<",
                r"using\s+namespace\s+std",
                r"cout\s*<<",
                r"cin\s*>>",
                r"std::",
                r"class\s+\w+",
                r"template\s*<",
            ]),
        ),
        (
            "go",
            compile(&[
                r"package\s+main",
                r"import\s*\(",
                r"func\s+main\s*\(",
                r"fmt\.Print",
                r"var\s+\w+\s+\w+",
                r":=\s*",
                r"go\s+\w+\(",
            ]),
        ),
        (
            "rust",
            compile(&[
                r"fn\s+main\s*\(",
                r"println!\s*\(",
                r"let\s+mut\s+",
                r"match\s+\w+",
                r"impl\s+\w+",
                r"struct\s+\w+",
                r"use\s+std::",
            ]),
        ),
        (
            "yaml",
            compile(&[
                r"(?m)^\s*\w+:\s*$",
                r"(?m)^\s*-\s+\w+:",
                r#"version:\s*['"]?\d+"#,
                r"apiVersion:",
                r"kind:",
                r"metadata:",
            ]),
        ),
        (
            "xml",
            compile(&[
                r"<\?xml",
                r"</\w+>",
                r"<\w+\s+.*=",
                r"xmlns:",
                r"CDATA",
            ]),
        ),
        (
            "dockerfile",
            compile(&[
                r"(?i)FROM\s+\w+",
                r"(?i)RUN\s+",
                r"(?i)COPY\s+",
                r"(?i)ADD\s+",
                r"(?i)WORKDIR\s+",
                r"(?i)EXPOSE\s+\d+",
                r"(?i)CMD\s+",
                r"(?i)ENTRYPOINT\s+",
            ]),
        ),
    ]
});

/// Candidate languages with their compiled indicators, in contract order.
pub(super) fn indicator_table() -> &'static [(&'static str, Vec<Regex>)] {
    &INDICATOR_TABLE
}
