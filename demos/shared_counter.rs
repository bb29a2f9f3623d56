//! Two unrelated consumers sharing one counter through the registry

use multistate::{StateCell, StateRegistry};

fn main() {
    println!("=== Shared Counter ===\n");

    let registry = StateRegistry::new();

    // Two consumers that know nothing about each other
    let toolbar = registry.named_handle("Toolbar");
    let status_bar = registry.named_handle("StatusBar");

    println!("1. StatusBar subscribes to the counter");
    let status_cell = status_bar.get::<i32>("counter", "clicks").unwrap();
    status_cell.subscribe(|value| {
        println!("   [StatusBar] clicks: {:?}", value);
    });

    println!("\n2. Toolbar writes through its own handle");
    for click in 1..=3 {
        toolbar.set("counter", "clicks", click).unwrap();
    }

    // Both handles resolved the very same cell
    let toolbar_cell = toolbar.get::<i32>("counter", "clicks").unwrap();
    println!(
        "\n3. Same storage on both sides: {}",
        StateCell::ptr_eq(&toolbar_cell, &status_cell)
    );

    println!(
        "\n4. Entry \"counter-clicks\" reference count: {}",
        registry.ref_count("counter-clicks")
    );

    toolbar.release();
    status_bar.release();
    println!(
        "5. After both released, entries left: {}",
        registry.entry_count()
    );
}
