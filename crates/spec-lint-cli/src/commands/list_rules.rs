//! List rules command implementation.

use spec_lint_rules::{all_rule_types, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rule types:\n");
    println!("{:<20} {:<9} Description", "Type", "Severity");
    println!("{}", "-".repeat(80));

    for info in all_rule_types() {
        let note = if info.verified { "" } else { " (not verified)" };
        println!(
            "{:<20} {:<9} {}{}",
            info.rule_type, info.default_severity, info.summary, note
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        let ids: Vec<String> = preset.rules().iter().map(|r| r.id().to_string()).collect();
        println!("  {:<12} - {}", preset.name(), ids.join(", "));
    }

    println!("\nUse --rules to scan with a JSON rule set, or --only to filter, e.g.:");
    println!("  spec-lint check screen.json --rules rules.json");
    println!("  spec-lint check screen.json --preset basic --only min-font-size,image-alt");
}
