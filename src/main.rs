//! Change Label config CLI
//!
//! Entry point for the `change-label-config` command-line tool. Drives the
//! editor bridge and the node from configuration files.

use change_label_config::form::FieldView;
use change_label_config::logging::init_tracing;
use change_label_config::{load_config, ChangeLabelConfig, ConfigBridge, FormStatus, FormValues, LoadedConfig};
use change_label_node::{ChangeLabelNode, Entity, EntityId, InMemoryEntityStore, RuleMessage};
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;
use tracing::debug;

#[derive(Parser)]
#[command(name = "change-label-config")]
#[command(about = "Change Entity Label node configuration editor", version)]
struct Cli {
    /// Log level when CHANGE_LABEL_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default node configuration
    Defaults {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Load a configuration into the editor and report field validity
    Check {
        /// Path to the configuration file (.json or .toml)
        config: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Apply field edits the way a user would and print the result
    Edit {
        /// Path to the configuration file (.json or .toml)
        config: PathBuf,

        /// Field assignment, repeatable (e.g. --set labelSource=MESSAGE_DATA)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,

        /// Open the editor read-only
        #[arg(long)]
        disabled: bool,
    },

    /// Run the node against one message
    Resolve {
        /// Path to the configuration file (.json or .toml)
        config: PathBuf,

        /// Originator entity as TYPE:ID (e.g. DEVICE:7f3c)
        #[arg(long)]
        originator: String,

        /// Label the originator currently has
        #[arg(long, default_value = "")]
        current_label: String,

        /// Metadata entry as KEY=VALUE, repeatable
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,

        /// Message payload
        #[arg(long, default_value = "{}")]
        data: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Defaults { json } => {
            run_defaults(json);
        }
        Commands::Check { config, json } => {
            run_check(&config, json);
        }
        Commands::Edit {
            config,
            assignments,
            disabled,
        } => {
            run_edit(&config, &assignments, disabled);
        }
        Commands::Resolve {
            config,
            originator,
            current_label,
            metadata,
            data,
            json,
        } => {
            run_resolve(&config, &originator, &current_label, &metadata, data, json);
        }
    }
}

fn run_defaults(json: bool) {
    let config = ChangeLabelConfig::default_configuration();

    if json {
        print_json(&config);
    } else {
        let bridge = ConfigBridge::mount(Some(config));
        print_fields(&bridge.form().views());
    }
}

fn run_check(path: &Path, json: bool) {
    let loaded = load_or_exit(path);
    let bridge = ConfigBridge::mount(Some(loaded.config.clone()));
    let status = bridge.status();

    if json {
        print_json(&serde_json::json!({
            "source": loaded.source,
            "fields": bridge.form().views(),
            "status": status,
        }));
    } else {
        println!("Configuration: {}", loaded.source.path);
        println!("  sha256: {}", loaded.source.digest);
        println!();
        print_fields(&bridge.form().views());
        println!();
        println!("Status: {}", status_label(status));
    }

    if status == FormStatus::Invalid {
        process::exit(1);
    }
}

fn run_edit(path: &Path, assignments: &[String], disabled: bool) {
    let loaded = load_or_exit(path);
    let mut bridge = ConfigBridge::mount(Some(loaded.config));

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emitted);
    bridge.register_change_listener(move |config| sink.borrow_mut().push(config.clone()));

    if disabled {
        bridge.set_enabled(false);
    }

    for assignment in assignments {
        let values = match FormValues::from_assignment(assignment) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        if !bridge.edit(values) {
            eprintln!("Warning: edit '{}' was not applied", assignment);
        }
    }
    bridge.teardown();

    debug!("{} change(s) emitted", emitted.borrow().len());

    print_json(&serde_json::json!({
        "config": bridge.value(),
        "changes": emitted.borrow().len(),
        "status": bridge.status(),
        "invalid": bridge.form().invalid_fields(),
    }));
}

fn run_resolve(
    path: &Path,
    originator: &str,
    current_label: &str,
    metadata: &[String],
    data: String,
    json: bool,
) {
    let loaded = load_or_exit(path);

    let originator: EntityId = match originator.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut message = RuleMessage::new(originator.clone(), data);
    for entry in metadata {
        match entry.split_once('=') {
            Some((key, value)) => message = message.with_metadata(key, value),
            None => {
                eprintln!("Error: expected KEY=VALUE, got '{}'", entry);
                process::exit(1);
            }
        }
    }

    let mut store = InMemoryEntityStore::new();
    store.insert(Entity::new(originator, current_label));

    let node = ChangeLabelNode::new(loaded.config);
    let outcome = node.on_msg(&message, &mut store);

    if json {
        print_json(&serde_json::json!({
            "relation": outcome.relation,
            "label": outcome.label,
            "error": outcome.error.as_ref().map(|e| e.to_string()),
        }));
    } else {
        match (&outcome.label, &outcome.error) {
            (Some(label), _) => println!("{}: label '{}'", outcome.relation, label),
            (None, Some(e)) => println!("{}: {}", outcome.relation, e),
            (None, None) => println!("{}", outcome.relation),
        }
    }

    if !outcome.is_success() {
        process::exit(1);
    }
}

fn load_or_exit(path: &Path) -> LoadedConfig {
    match load_config(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn print_fields(views: &[FieldView]) {
    for view in views {
        let mut flags = Vec::new();
        if view.required {
            flags.push("required");
        }
        if !view.enabled {
            flags.push("disabled");
        }
        if !view.valid {
            flags.push("INVALID");
        }
        println!(
            "  {:<20} {:<24} {}",
            view.name.as_str(),
            view.value.as_deref().unwrap_or("-"),
            flags.join(" ")
        );
    }
}

fn status_label(status: FormStatus) -> &'static str {
    match status {
        FormStatus::Valid => "VALID",
        FormStatus::Invalid => "INVALID",
        FormStatus::Disabled => "DISABLED",
    }
}
