//! Argument-level policy for allowlisted commands whose name alone is not enough.

use crate::extract::base_name;
use crate::segment::STAGE_OPERATORS;
use regex::Regex;
use std::sync::OnceLock;

/// Processes `pkill` may target.
pub const DEV_PROCESSES: &[&str] = &["next", "node", "npm", "npx", "python", "uvicorn", "vite"];

/// The only script name the init-script command may run.
pub const INIT_SCRIPT: &str = "init.sh";

/// Why a restricted command's arguments were refused.
///
/// The `Display` text is surfaced verbatim as the deny reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Could not parse {0} command")]
    Unparsable(&'static str),

    #[error("Empty {0} command")]
    Empty(&'static str),

    #[error("Not a {0} command")]
    WrongCommand(&'static str),

    #[error("pkill requires a process name")]
    MissingProcessName,

    #[error("pkill target must be a single process name, got: {0}")]
    AmbiguousTarget(String),

    #[error(
        "pkill only allowed for dev processes ({procs}), got: {0}",
        procs = DEV_PROCESSES.join(", ")
    )]
    ProcessNotAllowed(String),

    #[error("chmod flags are not allowed, got: {0}")]
    FlagNotAllowed(String),

    #[error("chmod requires a mode")]
    MissingMode,

    #[error("chmod requires at least one file")]
    MissingFile,

    #[error("chmod only allowed with +x mode, got: {0}")]
    ModeNotAllowed(String),

    #[error("Only ./init.sh is allowed, got: {0}")]
    ScriptNotAllowed(String),
}

/// Allowlisted commands that also need their arguments checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictedCommand {
    /// `pkill`: may only target known development processes.
    ProcessKill,
    /// `chmod`: may only grant execute permission.
    ChangeMode,
    /// `init.sh`: may only run the project's own init script.
    InitScript,
}

impl RestrictedCommand {
    /// Classify a command base name. `None` means no extra validation applies.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pkill" => Some(Self::ProcessKill),
            "chmod" => Some(Self::ChangeMode),
            INIT_SCRIPT => Some(Self::InitScript),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ProcessKill => "pkill",
            Self::ChangeMode => "chmod",
            Self::InitScript => INIT_SCRIPT,
        }
    }

    /// Check the segment that invokes this command.
    pub fn validate(self, segment: &str) -> Result<(), Rejection> {
        match self {
            Self::ProcessKill => validate_pkill(segment),
            Self::ChangeMode => validate_chmod(segment),
            Self::InitScript => validate_init_script(segment),
        }
    }
}

/// Word-split `segment`, keeping only the words before the first operator.
fn tokenize(segment: &str, command: &'static str) -> Result<Vec<String>, Rejection> {
    let mut tokens = shlex::split(segment).ok_or(Rejection::Unparsable(command))?;
    if let Some(end) = tokens.iter().position(|t| STAGE_OPERATORS.contains(&t.as_str())) {
        tokens.truncate(end);
    }
    match tokens.first() {
        None => Err(Rejection::Empty(command)),
        Some(_) => Ok(tokens),
    }
}

fn ensure_invokes(tokens: &[String], command: &'static str) -> Result<(), Rejection> {
    match tokens.first() {
        Some(first) if base_name(first) == command => Ok(()),
        _ => Err(Rejection::WrongCommand(command)),
    }
}

fn validate_pkill(segment: &str) -> Result<(), Rejection> {
    let tokens = tokenize(segment, "pkill")?;
    ensure_invokes(&tokens, "pkill")?;

    let target = tokens[1..]
        .iter()
        .rev()
        .find(|t| !t.starts_with('-'))
        .ok_or(Rejection::MissingProcessName)?;

    if target.split_whitespace().count() != 1 {
        return Err(Rejection::AmbiguousTarget(target.clone()));
    }
    if DEV_PROCESSES.contains(&target.as_str()) {
        Ok(())
    } else {
        Err(Rejection::ProcessNotAllowed(target.clone()))
    }
}

fn chmod_mode_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ugoa]*\+x$").expect("chmod mode pattern is valid"))
}

fn validate_chmod(segment: &str) -> Result<(), Rejection> {
    let tokens = tokenize(segment, "chmod")?;
    ensure_invokes(&tokens, "chmod")?;

    let mut mode = None;
    let mut files = Vec::new();
    for token in &tokens[1..] {
        if token.starts_with('-') {
            return Err(Rejection::FlagNotAllowed(token.clone()));
        }
        if mode.is_none() {
            mode = Some(token);
        } else {
            files.push(token);
        }
    }

    let mode = mode.ok_or(Rejection::MissingMode)?;
    if files.is_empty() {
        return Err(Rejection::MissingFile);
    }
    if !chmod_mode_pattern().is_match(mode) {
        return Err(Rejection::ModeNotAllowed(mode.clone()));
    }
    Ok(())
}

fn validate_init_script(segment: &str) -> Result<(), Rejection> {
    let tokens = tokenize(segment, INIT_SCRIPT)?;
    let script = &tokens[0];

    if script == "./init.sh" || script.ends_with("/init.sh") {
        Ok(())
    } else {
        Err(Rejection::ScriptNotAllowed(script.clone()))
    }
}
