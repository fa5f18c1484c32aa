use propsource::{OriginLookup, PropertySource};

/// How `view` renders the loaded sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

const MAX_VALUE_WIDTH: usize = 50;

fn truncate(value: &str, full: bool) -> String {
    if full || value.chars().count() <= MAX_VALUE_WIDTH {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_VALUE_WIDTH).collect();
        format!("{}...", head)
    }
}

/// Print a view of the loaded property sources.
pub fn print_view(sources: &[PropertySource], format: OutputFormat, full: bool) {
    if sources.is_empty() {
        eprintln!("No properties found");
        std::process::exit(1);
    }

    if format == OutputFormat::Json {
        match serde_json::to_string_pretty(sources) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for source in sources {
        println!("=== Property source: {} ===", source.name());
        println!(
            "Origin tracked: {}",
            if source.is_origin_tracked() { "yes" } else { "no" }
        );
        println!("Entries: {}", source.len());

        for entry in source.iter() {
            println!("\n  {} = {}", entry.key, truncate(entry.value, full));
            if let Some(origin) = source.origin(entry.key) {
                println!("    Origin: {}", origin);
            }
        }
    }
}
