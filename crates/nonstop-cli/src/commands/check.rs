use nonstop_core::CommandPolicy;

/// Print the decision for `command`. Returns whether it was allowed.
pub fn run(policy: &CommandPolicy, command: &str) -> bool {
    let decision = policy.authorize(command);
    println!("{decision}");
    decision.is_allowed()
}
