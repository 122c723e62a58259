//! Pre-tool-use hook contract.
//!
//! The agent harness sends one JSON document per proposed tool call and
//! reads back either `{}` (proceed) or a `hookSpecificOutput` object that
//! blocks the call and carries the deny reason.

use crate::decision::Decision;
use crate::policy::CommandPolicy;
use serde::{Deserialize, Serialize};

/// Name of the shell tool this hook gates.
pub const SHELL_TOOL: &str = "Bash";

/// Incoming tool call. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub command: Option<String>,
}

/// Hook response. Serializes to `{}` when the call may proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none", default)]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub permission_decision: String,
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Let the tool call proceed.
    pub fn proceed() -> Self {
        Self::default()
    }

    /// Block the tool call with `reason`.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: reason.into(),
            }),
        }
    }

    pub fn is_deny(&self) -> bool {
        self.hook_specific_output.is_some()
    }
}

impl From<Decision> for HookOutput {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow => Self::proceed(),
            Decision::Deny { reason } => Self::deny(reason),
        }
    }
}

/// Evaluate one tool call against `policy`.
///
/// Calls to other tools, and shell calls with no command, proceed untouched.
pub fn evaluate(policy: &CommandPolicy, input: &HookInput) -> HookOutput {
    let is_shell = input
        .tool_name
        .as_deref()
        .is_some_and(|name| name.eq_ignore_ascii_case(SHELL_TOOL));
    if !is_shell {
        return HookOutput::proceed();
    }

    let command = input
        .tool_input
        .as_ref()
        .and_then(|t| t.command.as_deref())
        .unwrap_or_default();
    if command.is_empty() {
        return HookOutput::proceed();
    }

    policy.authorize(command).into()
}

/// Evaluate a raw JSON hook document. Unparsable input is denied.
pub fn evaluate_json(policy: &CommandPolicy, raw: &str) -> HookOutput {
    match serde_json::from_str::<HookInput>(raw) {
        Ok(input) => evaluate(policy, &input),
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse hook input");
            HookOutput::deny(format!("Could not parse hook input: {err}"))
        }
    }
}
