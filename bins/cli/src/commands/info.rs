//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_ndjson_line, to_pretty_line};
use fieldset_config::config_crate_version;
use fieldset_domain::{FieldType, domain_crate_version};
use fieldset_forms::{BuiltinBlock, forms_crate_version};
use fieldset_schema::schema_crate_version;

struct BuildInfo {
    name: &'static str,
    version: &'static str,
    crates: [(&'static str, &'static str); 4],
}

const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        crates: [
            ("domain", domain_crate_version()),
            ("schema", schema_crate_version()),
            ("config", config_crate_version()),
            ("forms", forms_crate_version()),
        ],
    }
}

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();

    let stdout = if mode.is_ndjson() {
        let mut payload = info_json(&build);
        if let Some(map) = payload.as_object_mut() {
            map.insert("type".to_string(), "summary".into());
            map.insert("kind".to_string(), "info".into());
        }
        to_ndjson_line(&payload)?
    } else if mode.is_json() {
        to_pretty_line(&info_json(&build))?
    } else {
        format_info_text(&build)
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}

fn format_info_text(build: &BuildInfo) -> String {
    let mut out = format!("status: ok\nname: {}\nversion: {}\n", build.name, build.version);
    for (name, version) in build.crates {
        out.push_str(&format!("{name}: {version}\n"));
    }
    out.push_str(&format!("field types: {}\n", FieldType::expected_list()));
    let blocks: Vec<&str> = BuiltinBlock::ALL.iter().map(|block| block.as_str()).collect();
    out.push_str(&format!("form blocks: {}\n", blocks.join(", ")));
    out
}

fn info_json(build: &BuildInfo) -> serde_json::Value {
    let crates: serde_json::Map<String, serde_json::Value> = build
        .crates
        .iter()
        .map(|(name, version)| ((*name).to_string(), (*version).into()))
        .collect();
    let field_types: Vec<&str> = FieldType::ALL.iter().map(|kind| kind.as_str()).collect();
    let blocks: Vec<&str> = BuiltinBlock::ALL.iter().map(|block| block.as_str()).collect();

    serde_json::json!({
        "status": "ok",
        "build": {
            "name": build.name,
            "version": build.version,
            "crates": crates,
        },
        "fieldTypes": field_types,
        "formBlocks": blocks,
    })
}
