//! # CI Type Validator
//!
//! A command-line utility for checking CI type definition files, and CI
//! records against them, with the same rules the library applies.
//!
//! ## Usage
//!
//! ### Validate a Single CI Type
//!
//! ```bash
//! cargo run --bin citype-validator citypes/server.json
//! ```
//!
//! ### Validate Every CI Type in a Directory
//!
//! ```bash
//! cargo run --bin citype-validator ./citypes/
//! ```
//!
//! ### Validate a Record Against a CI Type
//!
//! ```bash
//! cargo run --bin citype-validator citypes/server.json records/web01.json
//! ```
//!
//! On success the record is printed in canonical form (numbers, booleans and
//! timestamps coerced).
//!
//! ## Configuration
//!
//! Settings are read from `./cmdb.json` or `/etc/cmdb/cmdb.json` when present,
//! otherwise defaults apply. A configuration file that cannot be read or
//! parsed is an error. Set `RUST_LOG=debug` for validation logging.
//!
//! ## Exit Codes
//!
//! - `0`: everything validated
//! - `1`: a CI type or record is invalid, a file could not be read, or the
//!   configuration file is broken

use cmdb_schema::error::CmdbResult;
use cmdb_schema::schema::{AttributeDefinition, CiType, FormatRegistry};
use cmdb_schema::ValidationConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <citype-file-or-directory> [record-file]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} citypes/server.json", args[0]);
        eprintln!("  {} ./citypes/", args[0]);
        eprintln!("  {} citypes/server.json records/web01.json", args[0]);
        process::exit(1);
    }

    let config = load_config();
    let registry = FormatRegistry::new();
    let path = Path::new(&args[1]);

    if let Some(record_path) = args.get(2) {
        if !path.is_file() {
            eprintln!("Error: a record can only be checked against a single CI type file");
            process::exit(1);
        }
        validate_record(path, Path::new(record_path), &registry, &config);
    } else if path.is_file() {
        validate_single_file(path, &registry, &config);
    } else if path.is_dir() {
        validate_directory(path, &registry, &config);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn load_config() -> ValidationConfig {
    match ValidationConfig::discover_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn validate_single_file(file_path: &Path, registry: &FormatRegistry, config: &ValidationConfig) {
    println!("Validating CI type file: {}", file_path.display());

    match load_and_validate_citype(file_path, registry, config) {
        Ok(citype) => {
            println!("✓ CI type is valid!");
            print_citype_summary(&citype);
        }
        Err(e) => {
            eprintln!("❌ CI type validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path, registry: &FormatRegistry, config: &ValidationConfig) {
    println!("Validating CI types in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;
    let mut short_names = BTreeMap::new();

    for path in &paths {
        println!("\nValidating: {}", path.display());

        match load_and_validate_citype(path, registry, config) {
            Ok(citype) => {
                if let Some(other) = short_names.insert(citype.short_name.clone(), path.clone()) {
                    eprintln!(
                        "  ❌ Invalid - short name '{}' is already used by {}",
                        citype.short_name,
                        other.display()
                    );
                    error_count += 1;
                    continue;
                }
                println!("  ✓ Valid - {} ({})", citype.name, citype.short_name);
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid CI types: {}", valid_count);
    println!("  Invalid CI types: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn validate_record(
    citype_path: &Path,
    record_path: &Path,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) {
    let result = load_and_validate_citype(citype_path, registry, config).and_then(|citype| {
        let content = fs::read_to_string(record_path)?;
        let mut record: Value = serde_json::from_str(&content)?;
        citype.validate_record(registry, config, &mut record)?;
        Ok((citype, record))
    });

    match result {
        Ok((citype, record)) => {
            println!(
                "✓ Record {} is a valid '{}'",
                record_path.display(),
                citype.short_name
            );
            match serde_json::to_string_pretty(&record) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error printing record: {}", e),
            }
        }
        Err(e) => {
            eprintln!("❌ Record validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn load_and_validate_citype(
    file_path: &Path,
    registry: &FormatRegistry,
    config: &ValidationConfig,
) -> CmdbResult<CiType> {
    let content = fs::read_to_string(file_path)?;
    let mut citype: CiType = serde_json::from_str(&content)?;
    citype.validate_with(registry, config)?;
    Ok(citype)
}

fn print_citype_summary(citype: &CiType) {
    println!();
    println!("CI Type Summary:");
    println!("  Name: {}", citype.name);
    println!("  Short name: {}", citype.short_name);
    if !citype.description.is_empty() {
        println!("  Description: {}", citype.description);
    }
    println!("  Root attributes: {}", citype.attributes.len());

    let mut format_counts = BTreeMap::new();
    let mut required = Vec::new();
    count_attributes(&citype.attributes, "", &mut format_counts, &mut required);

    println!("  Attribute formats:");
    for (format, count) in format_counts {
        println!("    - {}: {}", format, count);
    }

    if !required.is_empty() {
        println!("  Required attributes: {}", required.join(", "));
    }
}

fn count_attributes(
    attributes: &[AttributeDefinition],
    parent: &str,
    format_counts: &mut BTreeMap<String, usize>,
    required: &mut Vec<String>,
) {
    for attr in attributes {
        let path = if parent.is_empty() {
            attr.short_name.clone()
        } else {
            format!("{}.{}", parent, attr.short_name)
        };

        *format_counts.entry(attr.format.clone()).or_insert(0) += 1;
        if attr.required {
            required.push(path.clone());
        }
        count_attributes(&attr.children, &path, format_counts, required);
    }
}
