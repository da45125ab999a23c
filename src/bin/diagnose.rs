//! Diagnostic tool - Check effective settings
//!
//! Run with: cargo run --bin diagnose

use std::env;

use rho_scan::config::Config;
use rho_scan::list::{detect_cycle, ListArena};

fn main() {
    println!("🔍 RHO-SCAN DIAGNOSTIC CHECK\n");

    dotenvy::dotenv().ok();

    println!("═══════════════════════════════════════════════════");
    println!("                  CONFIGURATION                     ");
    println!("═══════════════════════════════════════════════════\n");

    let checks = [
        ("PRICES", "7,1,5,3,6,4", "Daily prices for the profit scan"),
        ("LIST_VALUES", "1,2,3,4,5", "Node values from head to tail"),
        ("CYCLE_POS", "1", "Index the tail links back to (-1 = none)"),
        ("RUN_LOG", "false", "Append runs to a JSON-lines log?"),
        ("CROSSCHECK_TRIALS", "10000", "Random lists per crosscheck"),
        ("CROSSCHECK_MAX_LEN", "64", "Longest random list"),
    ];

    for (key, default, desc) in checks {
        let value = env::var(key).unwrap_or_else(|_| default.to_string());
        let marker = if env::var(key).is_err() { "(default)" } else { "(from .env)" };
        println!("  {}: {} {}", key, value, marker);
        println!("    └─ {}\n", desc);
    }

    println!("═══════════════════════════════════════════════════");
    println!("                     STATUS                         ");
    println!("═══════════════════════════════════════════════════\n");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("  ❌ Failed to load configuration: {}", e);
            return;
        }
    };

    match config.validate() {
        Ok(()) => println!("  ✅ Configuration is valid"),
        Err(e) => {
            println!("  ❌ {}", e);
            return;
        }
    }

    match ListArena::from_values_with_pos(&config.list_values, config.cycle_pos) {
        Ok((list, head)) => {
            let expected = config.cycle_pos.is_some();
            let found = detect_cycle(&list, head).is_some();
            let status = if expected == found { "✅" } else { "❌" };
            println!(
                "  {} Fixture: {} nodes, cycle expected: {}, detected: {}",
                status,
                list.len(),
                expected,
                found
            );
        }
        Err(e) => println!("  ❌ Fixture: {}", e),
    }

    if config.run_log {
        println!("  📝 Run log: {}", config.run_log_path);
    }

    println!("\n✅ Diagnostic complete!\n");
}
