use tl_project::schema::*;
use tl_project::{ProjectError, load, load_json, load_yaml, parse_yaml, save_json, save_yaml};

fn scheduled_config() -> BenchConfig {
    let mut config = BenchConfig::new("Setpoint step");
    config.heater.power_w = 75.0;
    config.controller.setpoint_c = 36.0;
    config.run.t_end_s = 240.0;
    config.run.tick_order = TickOrderDef::ControllerFirst;
    config.schedule.push(SetpointChangeDef {
        at_s: 120.0,
        setpoint_c: 32.0,
    });
    config
}

#[test]
fn roundtrip_yaml_default_config() {
    let config = BenchConfig::new("Default bench");

    let path = std::env::temp_dir().join("tl_project_roundtrip_default.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_scheduled_config() {
    let config = scheduled_config();

    let path = std::env::temp_dir().join("tl_project_roundtrip_scheduled.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(config, loaded);

    let again = load(&path).unwrap();
    assert_eq!(config, again);
}

#[test]
fn minimal_yaml_uses_chip_defaults() {
    let config = parse_yaml("name: minimal\n").unwrap();

    assert_eq!(config.version, tl_project::LATEST_VERSION);
    assert_eq!(config.heater.power_w, 50.0);
    assert_eq!(config.controller.setpoint_c, 37.0);
    assert_eq!(config.run.t_end_s, 120.0);
    assert_eq!(config.run.tick_order, TickOrderDef::HeaterFirst);
    assert!(config.schedule.is_empty());
}

#[test]
fn yaml_with_schedule() {
    let yaml = r#"
version: 1
name: step
controller:
  setpoint_c: 37.0
run:
  t_end_s: 240
  tick_order: controller_first
schedule:
  - at_s: 120
    setpoint_c: 32
"#;
    let config = parse_yaml(yaml).unwrap();
    assert_eq!(config.run.tick_order, TickOrderDef::ControllerFirst);
    assert_eq!(config.schedule.len(), 1);
    assert_eq!(config.schedule[0].setpoint_c, 32.0);
}

#[test]
fn invalid_yaml_reports_validation_error() {
    let yaml = "name: bad\nheater:\n  power_w: -5\n";
    let err = parse_yaml(yaml).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn malformed_yaml_reports_parse_error() {
    let err = parse_yaml("name: [unterminated").unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}
