//! Summarize a persisted descriptor set.
//!
//! Reads a descriptor-set JSON file, decodes it, and prints one summary
//! line per tag helper. A corrupt cache exits non-zero so callers can
//! fall back to recomputing descriptors from source.

use std::env;
use std::fs;
use std::process::ExitCode;

use serde_json::json;
use tagmeta_pack::{decode_tag_helper_set, StringCache};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: tagmeta-dump <descriptor-set.json>");
        return ExitCode::from(2);
    };

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut strings = StringCache::new();
    let helpers = match decode_tag_helper_set(&data, &mut strings) {
        Ok(helpers) => helpers,
        Err(err) => {
            eprintln!("{path}: corrupt descriptor cache: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summaries: Vec<_> = helpers
        .iter()
        .map(|helper| {
            json!({
                "name": &*helper.name,
                "assembly": &*helper.assembly_name,
                "rules": helper.tag_matching_rules.len(),
                "boundAttributes": helper.bound_attributes.len(),
                "allowedChildTags": helper.allowed_child_tags.len(),
                "diagnostics": helper.diagnostics.len(),
            })
        })
        .collect();
    let report = json!({
        "helpers": summaries,
        "internedStrings": strings.len(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
