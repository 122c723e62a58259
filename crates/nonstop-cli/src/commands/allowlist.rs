use nonstop_core::CommandPolicy;

pub fn run(policy: &CommandPolicy) {
    for name in policy.allowed_commands() {
        println!("{name}");
    }
}
