//! Launch runtime: the external program that shows a site in its own window.
//!
//! The packager only asks a [`LaunchRuntime`] for the command that opens a
//! given URL under a given name; it never knows which browser or webview is
//! behind it. [`CommandTemplate`] is the configurable implementation.

use std::path::{Path, PathBuf};

use crate::config::RuntimeConfig;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("launch runtime program is empty")]
    EmptyProgram,
    #[error("unknown placeholder {{{0}}} in runtime argument")]
    UnknownPlaceholder(String),
    #[error("unterminated placeholder in runtime argument `{0}`")]
    Unterminated(String),
    #[error("placeholder {{{0}}} is not available for this launcher")]
    Unavailable(&'static str),
}

/// Which URL the launcher opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchTarget<'a> {
    /// A fixed site, baked into the launcher.
    Site(&'a str),
    /// Whatever URL the launcher receives as its first argument.
    Forwarded,
}

/// What the packager knows about the app being launched.
#[derive(Debug, Clone, Copy)]
pub struct LaunchRequest<'a> {
    pub target: LaunchTarget<'a>,
    pub name: &'a str,
    pub wm_class: &'a str,
    /// Generated per-app `config.json`, if the app has one.
    pub config_path: Option<&'a Path>,
}

/// Piece of a shell word: literal text or the forwarded URL argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    ForwardedUrl,
}

/// One argument of the launch command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellWord(pub Vec<Fragment>);

impl ShellWord {
    pub fn text(s: impl Into<String>) -> Self {
        ShellWord(vec![Fragment::Text(s.into())])
    }

    /// POSIX sh rendering: literal text single-quoted, forwarded URL as `"${1:-}"`.
    pub fn render(&self) -> String {
        if self.0.is_empty() {
            return "''".to_string();
        }
        self.0
            .iter()
            .map(|f| match f {
                Fragment::Text(t) => sh_single_quote(t),
                Fragment::ForwardedUrl => "\"${1:-}\"".to_string(),
            })
            .collect()
    }

    fn push_text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(Fragment::Text(t)) => t.push_str(s),
            _ => self.0.push(Fragment::Text(s.to_string())),
        }
    }
}

/// Command the launcher script `exec`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<ShellWord>,
    pub working_dir: Option<PathBuf>,
}

impl LaunchCommand {
    /// `launch.sh` contents for this command.
    pub fn render_script(&self) -> String {
        let mut script = String::from("#!/usr/bin/env sh\nset -eu\n");
        if let Some(dir) = &self.working_dir {
            script.push_str("cd ");
            script.push_str(&sh_single_quote(&dir.to_string_lossy()));
            script.push('\n');
        }
        script.push_str("exec ");
        script.push_str(&sh_single_quote(&self.program));
        for arg in &self.args {
            script.push(' ');
            script.push_str(&arg.render());
        }
        script.push('\n');
        script
    }
}

/// Produces the command that opens a dedicated window for an app.
pub trait LaunchRuntime {
    fn command(&self, request: &LaunchRequest<'_>) -> Result<LaunchCommand, RuntimeError>;
}

/// Program plus argument template with `{url}`, `{name}`, `{wm_class}` and
/// `{config}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandTemplate {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn from_config(cfg: &RuntimeConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
            working_dir: cfg.working_dir.clone(),
        }
    }

    fn expand(&self, template: &str, request: &LaunchRequest<'_>) -> Result<ShellWord, RuntimeError> {
        let mut word = ShellWord::default();
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            word.push_text(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| RuntimeError::Unterminated(template.to_string()))?;
            match &after[..close] {
                "url" => match request.target {
                    LaunchTarget::Site(url) => word.push_text(url),
                    LaunchTarget::Forwarded => word.0.push(Fragment::ForwardedUrl),
                },
                "name" => word.push_text(request.name),
                "wm_class" => word.push_text(request.wm_class),
                "config" => {
                    let path = request
                        .config_path
                        .ok_or(RuntimeError::Unavailable("config"))?;
                    word.push_text(&path.to_string_lossy());
                }
                other => return Err(RuntimeError::UnknownPlaceholder(other.to_string())),
            }
            rest = &after[close + 1..];
        }
        word.push_text(rest);
        Ok(word)
    }
}

impl LaunchRuntime for CommandTemplate {
    fn command(&self, request: &LaunchRequest<'_>) -> Result<LaunchCommand, RuntimeError> {
        if self.program.trim().is_empty() {
            return Err(RuntimeError::EmptyProgram);
        }
        let args = self
            .args
            .iter()
            .map(|a| self.expand(a, request))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LaunchCommand {
            program: self.program.clone(),
            args,
            working_dir: self.working_dir.clone(),
        })
    }
}

fn sh_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
