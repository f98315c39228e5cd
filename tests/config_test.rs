//! Integration tests for Settings loading from a project directory.
//!
//! These tests run without a global config (temp directories only), so the
//! local `.orgtree.toml` is merged over compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use orgtree::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults_apply() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.max_depth, 100);
    assert_eq!(settings.max_field_len, 100);
    assert!(settings.confirm_deletes);
    assert!(settings.data_file.ends_with(".orgtree/orgchart.json"));
}

#[test]
fn given_local_config_when_load_then_overrides_only_specified_fields() {
    let project = TempDir::new().unwrap();
    let data_file = project.path().join("team.json");
    let local = format!(
        "data_file = \"{}\"\nmax_depth = 500\n",
        data_file.display()
    );
    fs::write(local_config_path(project.path()), local).unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.data_file, data_file);
    assert_eq!(settings.max_depth, 500);
    assert_eq!(settings.max_field_len, 100, "unspecified field keeps default");
    assert!(settings.confirm_deletes);
}

#[test]
fn given_local_config_disabling_confirmation_when_load_then_flag_is_off() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "confirm_deletes = false\nmax_field_len = 40\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert!(!settings.confirm_deletes);
    assert_eq!(settings.editor().max_field_len(), 40);
}

#[test]
fn given_low_max_depth_when_building_editor_then_ceiling_stays_at_minimum() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "max_depth = 5\n").unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.max_depth, 5);
    assert_eq!(settings.editor().max_depth(), 100);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "max_depth = \"deep\"\n").unwrap();

    let err = Settings::load(Some(project.path())).unwrap_err();

    assert!(err.to_string().contains(".orgtree.toml"), "{}", err);
}

#[test]
fn given_home_relative_data_file_when_load_then_tilde_is_expanded() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "data_file = \"~/charts/org.json\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert!(!settings.data_file.starts_with("~"));
    assert!(settings.data_file.ends_with(PathBuf::from("charts/org.json")));
}

#[test]
fn given_settings_when_rendering_toml_then_all_keys_present() {
    let toml = Settings::default().to_toml().unwrap();

    for key in ["data_file", "max_depth", "max_field_len", "confirm_deletes"] {
        assert!(toml.contains(key), "missing {} in\n{}", key, toml);
    }
}
