/*!
 * Configuration Tests
 * Environment overrides and JSON config files
 */

use mlfq_sim::config::{
    ENV_CONFIG_PATH, ENV_MAX_PHASES, ENV_MAX_PROCESSES, ENV_PROMOTION, ENV_WAKE_POLICY,
};
use mlfq_sim::{PromotionPolicy, SchedulerConfig, SchedulerError, WakePolicy};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const ALL_VARS: [&str; 5] = [
    ENV_CONFIG_PATH,
    ENV_WAKE_POLICY,
    ENV_PROMOTION,
    ENV_MAX_PROCESSES,
    ENV_MAX_PHASES,
];

fn clear_env() {
    for key in ALL_VARS {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    assert_eq!(SchedulerConfig::from_env().unwrap(), SchedulerConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_WAKE_POLICY, "exact");
    std::env::set_var(ENV_PROMOTION, "on-yield");
    std::env::set_var(ENV_MAX_PROCESSES, "16");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.wake_policy, WakePolicy::ExactTick);
    assert_eq!(config.promotion_policy, PromotionPolicy::OnYield);
    assert_eq!(config.max_processes, 16);
    assert_eq!(config.quanta, [10, 30, 100, 200]);
}

#[test]
#[serial]
fn test_from_env_reads_config_file() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"quanta": [5, 10, 20, 40], "promotion_policy": "on_yield"}}"#
    )
    .unwrap();
    std::env::set_var(ENV_CONFIG_PATH, file.path());
    std::env::set_var(ENV_MAX_PHASES, "4");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.quanta, [5, 10, 20, 40]);
    assert_eq!(config.promotion_policy, PromotionPolicy::OnYield);
    assert_eq!(config.wake_policy, WakePolicy::Elapsed);
    assert_eq!(config.max_phases, 4);
}

#[test]
#[serial]
fn test_from_env_rejects_unknown_policy() {
    clear_env();
    std::env::set_var(ENV_WAKE_POLICY, "whenever");

    let result = SchedulerConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(SchedulerError::Configuration(_))));
}

#[test]
fn test_invalid_file_contents() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"quanta": [10, 30]}}"#).unwrap();

    assert!(matches!(
        SchedulerConfig::from_path(file.path()),
        Err(SchedulerError::Configuration(_))
    ));
}

#[test]
fn test_zero_limit_rejected_from_json() {
    let result = SchedulerConfig::from_json_str(r#"{"demotion_limits": [0, 2, 2, null]}"#);

    assert!(matches!(result, Err(SchedulerError::Configuration(_))));
}

#[test]
fn test_presets() {
    assert_eq!(SchedulerConfig::reference().wake_policy, WakePolicy::ExactTick);
    assert_eq!(
        SchedulerConfig::adaptive().promotion_policy,
        PromotionPolicy::OnYield
    );
    assert_eq!(SchedulerConfig::new(), SchedulerConfig::default());
}
