//! Listing the available checkers

use super::output::Output;
use super::runner::CheckRunner;
use crate::plugin::PluginOrigin;

pub fn run(runner: &CheckRunner, output: &Output) {
    let plugins = runner.source().list();

    if output.is_json() {
        let items: Vec<_> = plugins
            .iter()
            .map(|p| match &p.origin {
                PluginOrigin::Builtin => serde_json::json!({
                    "name": p.name,
                    "builtin": true,
                }),
                PluginOrigin::File(path) => serde_json::json!({
                    "name": p.name,
                    "builtin": false,
                    "path": path.display().to_string(),
                }),
            })
            .collect();
        output.data(&items);
    } else if plugins.is_empty() {
        println!("No checkers found.");
    } else {
        println!("Available checkers:");
        println!("{:<30} SOURCE", "NAME");
        println!("{}", "-".repeat(70));
        for plugin in plugins {
            let source = match &plugin.origin {
                PluginOrigin::Builtin => "built-in".to_string(),
                PluginOrigin::File(path) => path.display().to_string(),
            };
            println!("{:<30} {}", plugin.name, source);
        }
    }
}
