#![forbid(unsafe_code)]

use std::io::Write as _;

use fcell_playground::cli::{Cli, Commands, EncodeArgs, QuickArgs, run};
use fcell_playground::{PlaygroundError, decode_data_uri};
use tempfile::NamedTempFile;

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn run_to_string(cli: Cli) -> Result<String, PlaygroundError> {
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn toml_config_drives_quick_theme() {
    let file = config_file(
        ".toml",
        "background = \"#102030\"\n\n[font]\nsizes = [10, 20, 30]\ndefault_size = 10\n",
    );
    let out = run_to_string(Cli {
        config: Some(file.path().to_path_buf()),
        command: Commands::Quick(QuickArgs {
            step: 1,
            ..QuickArgs::default()
        }),
    })
    .expect("quick");
    assert_eq!(out, ".root {\n -fc-base: #102030;\n-fc-font-size: 200.0%;\n}\n");
}

#[test]
fn json_config_by_extension() {
    let file = config_file(".json", r#"{"font": {"sizes": [8, 12], "default_size": 8}}"#);
    let out = run_to_string(Cli {
        config: Some(file.path().to_path_buf()),
        command: Commands::Ladder,
    })
    .expect("ladder");
    assert_eq!(out, "8 *\n12\n");
}

#[test]
fn invalid_config_is_rejected_with_config_exit_code() {
    let file = config_file(".toml", "[font]\nsizes = []\n");
    let err = run_to_string(Cli {
        config: Some(file.path().to_path_buf()),
        command: Commands::Ladder,
    })
    .expect_err("empty ladder");
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("font.sizes must not be empty"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = run_to_string(Cli {
        config: Some(dir.path().join("absent.toml")),
        command: Commands::Ladder,
    })
    .expect_err("missing file");
    assert!(matches!(err, PlaygroundError::Config(_)));
}

#[test]
fn encode_reads_files() {
    let file = config_file(".css", ".table-cell { -fc-padding: 2; }\n");
    let out = run_to_string(Cli {
        config: None,
        command: Commands::Encode(EncodeArgs {
            file: Some(file.path().to_path_buf()),
            css: None,
        }),
    })
    .expect("encode");
    assert_eq!(
        decode_data_uri(out.trim_end()).as_deref(),
        Some(".table-cell { -fc-padding: 2; }\n")
    );
}

#[test]
fn show_config_reloads() {
    let out = run_to_string(Cli {
        config: None,
        command: Commands::ShowConfig,
    })
    .expect("show-config");
    let file = config_file(".toml", &out);
    let reloaded = fcell_playground::PlaygroundConfig::from_toml_file(file.path()).expect("reload");
    assert_eq!(reloaded, fcell_playground::PlaygroundConfig::default());
}
