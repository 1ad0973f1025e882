//! List rules command implementation.

use law_enforcer_rules::default_registry;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<20} {:<40} Applies to", "Code", "Name", "Marker");
    println!("{}", "-".repeat(90));

    for binding in default_registry().bindings() {
        println!(
            "{:<8} {:<20} {:<40} {}",
            binding.descriptor.id,
            binding.descriptor.rule,
            binding.kind.metadata_name(),
            binding.kind.shape(),
        );
        println!("         {}", binding.descriptor.message);
    }

    println!("\nAll rules report errors and are always enabled.");
}
