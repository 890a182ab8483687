use std::io::Write;
use std::path::PathBuf;

use rusty_stableford::args::{Cli, Mode, load_config};
use rusty_stableford::model::leaderboard::LeaderboardOrder;
use rusty_stableford::model::stableford::PointsScale;

fn write_toml(contents: &str) -> Result<tempfile::NamedTempFile, std::io::Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn test8_defaults_without_file() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(Cli::default())?;
    assert_eq!(config.mode, Mode::Play);
    assert_eq!(config.db_path, PathBuf::from("stableford.db"));
    assert_eq!(config.snapshot_dir, PathBuf::from("."));
    assert_eq!(config.bind, "0.0.0.0:8081");
    assert_eq!(config.leaderboard_order, LeaderboardOrder::Ascending);
    assert_eq!(config.points_scale, PointsScale::Standard);
    assert!(!config.sync_roster);
    assert_eq!(config.course.len(), 18);
    Ok(())
}

#[test]
fn test8_file_settings_and_course() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_toml(
        r#"
mode = "serve"
db_path = "club.db"
leaderboard_order = "descending"
points_scale = "capped_at_five"
sync_roster = true

[[holes]]
number = 1
par = 4
stroke_index = 2

[[holes]]
number = 2
par = 5
stroke_index = 1
"#,
    )?;
    let cli = Cli {
        config_toml: Some(file.path().to_path_buf()),
        db_path: Some(PathBuf::from("override.db")),
        ..Cli::default()
    };
    let config = load_config(cli)?;
    assert_eq!(config.mode, Mode::Serve);
    assert_eq!(config.db_path, PathBuf::from("override.db"));
    assert_eq!(config.leaderboard_order, LeaderboardOrder::Descending);
    assert_eq!(config.points_scale, PointsScale::CappedAtFive);
    assert!(config.sync_roster);
    assert_eq!(config.course.len(), 2);
    assert_eq!(config.course.total_par(), 9);
    Ok(())
}

#[test]
fn test8_invalid_course_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_toml(
        r#"
[[holes]]
number = 1
par = 4
stroke_index = 3
"#,
    )?;
    let cli = Cli {
        config_toml: Some(file.path().to_path_buf()),
        ..Cli::default()
    };
    let err = load_config(cli).unwrap_err();
    assert!(format!("{err:#}").contains("invalid course"));
    Ok(())
}

#[test]
fn test8_unknown_keys_and_bad_bind_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_toml("colour = \"green\"\n")?;
    let cli = Cli {
        config_toml: Some(file.path().to_path_buf()),
        ..Cli::default()
    };
    assert!(load_config(cli).is_err());

    let file = write_toml("bind = \"not an address\"\n")?;
    let cli = Cli {
        config_toml: Some(file.path().to_path_buf()),
        ..Cli::default()
    };
    assert!(load_config(cli).is_err());
    Ok(())
}
