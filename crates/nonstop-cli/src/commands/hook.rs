use nonstop_core::{hook, CommandPolicy};
use std::io::Read;

/// Read one hook request from stdin and write the response to stdout.
pub fn run(policy: &CommandPolicy) -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = hook::evaluate_json(policy, &input);
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
