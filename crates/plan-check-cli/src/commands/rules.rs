//! Rules command implementation.

use plan_check_rules::default_checkers;

/// Runs the rules command.
pub fn run() {
    println!("Available checkers:\n");
    println!("{:<20} Description", "Name");
    println!("{}", "-".repeat(72));

    for checker in default_checkers() {
        println!("{:<20} {}", checker.name(), checker.description());
    }

    println!("\nAll findings are ERROR severity except LAYER_UNAUTHORIZED and");
    println!("COLOR_NOT_BYLAYER, which are WARNING.");
    println!("\nUse --config to override the built-in rule tables, e.g.:");
    println!("  plan-check --config richtlinie.toml check plan.dwg");
}
