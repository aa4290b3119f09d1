//! Freedesktop `.desktop` entry rendering.
//!
//! String values are escaped as freedesktop.org desktop entries expect (`\s` is not needed
//! for our keys). `Exec` arguments are double-quoted with `"`, `` ` ``, `$` and
//! `\` backslash-escaped and `%` doubled; the general string escaping is then
//! applied on top of that.

use std::fmt;
use std::path::Path;

/// Key under which the wrapped site's URL is recorded.
pub const URL_KEY: &str = "X-Wadpack-Url";

/// A `[Desktop Entry]` group of type `Application`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub comment: Option<String>,
    /// Command line, already rendered by [`exec_line`].
    pub exec: String,
    pub icon: Option<String>,
    pub categories: Vec<String>,
    pub startup_wm_class: Option<String>,
    pub mime_types: Vec<String>,
    /// `X-` extension keys, written last in order.
    pub extensions: Vec<(String, String)>,
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Desktop Entry]")?;
        writeln!(f, "Type=Application")?;
        writeln!(f, "Version=1.0")?;
        writeln!(f, "Name={}", escape_value(&self.name))?;
        if let Some(comment) = &self.comment {
            writeln!(f, "Comment={}", escape_value(comment))?;
        }
        if let Some(icon) = &self.icon {
            writeln!(f, "Icon={}", escape_value(icon))?;
        }
        writeln!(f, "Exec={}", escape_value(&self.exec))?;
        writeln!(f, "Terminal=false")?;
        if !self.categories.is_empty() {
            writeln!(f, "Categories={}", list_value(&self.categories))?;
        }
        writeln!(f, "StartupNotify=true")?;
        if let Some(class) = &self.startup_wm_class {
            writeln!(f, "StartupWMClass={}", escape_value(class))?;
        }
        if !self.mime_types.is_empty() {
            writeln!(f, "MimeType={}", list_value(&self.mime_types))?;
        }
        for (key, value) in &self.extensions {
            writeln!(f, "{key}={}", escape_value(value))?;
        }
        Ok(())
    }
}

/// Builds an `Exec` value: `program` quoted, followed by an optional field
/// code such as `%u` (left unquoted).
pub fn exec_line(program: &Path, field_code: Option<&str>) -> String {
    let mut line = quote_exec_arg(&program.to_string_lossy());
    if let Some(code) = field_code {
        line.push(' ');
        line.push_str(code);
    }
    line
}

fn quote_exec_arg(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        match c {
            '"' | '`' | '$' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '%' => out.push_str("%%"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escapes a string/localestring value.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn list_value(items: &[String]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&escape_value(item).replace(';', "\\;"));
        out.push(';');
    }
    out
}

/// Raw (still escaped) value of the first `key=` line in rendered entry text.
pub fn lookup<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DesktopEntry {
        DesktopEntry {
            name: "Example".to_string(),
            comment: Some("Web app: Example".to_string()),
            exec: exec_line(Path::new("/home/u/apps/example/launch.sh"), None),
            icon: Some("/home/u/apps/example/example.svg".to_string()),
            categories: vec!["Network".to_string(), "WebBrowser".to_string()],
            startup_wm_class: Some("Example".to_string()),
            mime_types: Vec::new(),
            extensions: vec![(URL_KEY.to_string(), "https://example.com".to_string())],
        }
    }

    #[test]
    fn renders_application_entry() {
        let text = entry().to_string();
        assert!(text.starts_with("[Desktop Entry]\nType=Application\n"));
        assert!(text.contains("Name=Example\n"));
        assert!(text.contains("Comment=Web app: Example\n"));
        assert!(text.contains("Exec=\"/home/u/apps/example/launch.sh\"\n"));
        assert!(text.contains("Categories=Network;WebBrowser;\n"));
        assert!(text.contains("StartupWMClass=Example\n"));
        assert!(!text.contains("MimeType="));
        assert!(text.ends_with("X-Wadpack-Url=https://example.com\n"));
    }

    #[test]
    fn lookup_finds_keys() {
        let text = entry().to_string();
        assert_eq!(lookup(&text, "Name"), Some("Example"));
        assert_eq!(lookup(&text, URL_KEY), Some("https://example.com"));
        assert_eq!(lookup(&text, "Missing"), None);
    }

    #[test]
    fn exec_with_field_code() {
        assert_eq!(
            exec_line(Path::new("/x/launch.sh"), Some("%u")),
            "\"/x/launch.sh\" %u"
        );
    }

    #[test]
    fn exec_quotes_reserved_chars() {
        assert_eq!(
            exec_line(Path::new("/my $dir/100%/\"q\"/launch.sh"), None),
            r#""/my \$dir/100%%/\"q\"/launch.sh""#
        );
        // general escaping doubles the backslashes once more
        assert_eq!(escape_value(r#""/a\$b""#), r#""/a\\$b""#);
    }

    #[test]
    fn values_escape_newlines_and_list_separators() {
        let e = DesktopEntry {
            name: "Two\nLines".to_string(),
            categories: vec!["A;B".to_string()],
            mime_types: vec!["x-scheme-handler/http".to_string()],
            ..entry()
        };
        let text = e.to_string();
        assert!(text.contains("Name=Two\\nLines\n"));
        assert!(text.contains("Categories=A\\;B;\n"));
        assert!(text.contains("MimeType=x-scheme-handler/http;\n"));
    }
}
