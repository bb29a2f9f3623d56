//! Entry lifecycle driven purely by reference counting

use multistate::StateRegistry;

fn main() {
    println!("=== Entry Lifecycle ===\n");

    let registry = StateRegistry::new();

    println!("1. A long-lived consumer takes an interest");
    let sidebar = registry.named_handle("Sidebar");
    sidebar.set("user", 1, "alice".to_string()).unwrap();
    println!("   user-1 count: {}", registry.ref_count("user-1"));

    println!("\n2. Short-lived consumers come and go");
    for n in 0..3 {
        let dialog = registry.named_handle(format!("Dialog{n}"));
        let cell = dialog.get::<String>("user", 1).unwrap();
        println!(
            "   Dialog{n} sees {:?}, count now {}",
            cell.get(),
            registry.ref_count("user-1")
        );
        // dialog drops here; its reference is withdrawn automatically
    }
    println!("   after the dialogs: count back to {}", registry.ref_count("user-1"));

    println!("\n3. A released handle is rejected");
    let stale = registry.named_handle("Stale");
    let _ = stale.get::<String>("user", 1).unwrap();
    stale.release();
    match stale.get::<String>("user", 1) {
        Err(err) => println!("   {err}"),
        Ok(_) => unreachable!(),
    }

    println!("\n4. The last release tears the entry down");
    sidebar.release();
    println!(
        "   user-1 still present: {}",
        registry.contains("user-1")
    );
}
