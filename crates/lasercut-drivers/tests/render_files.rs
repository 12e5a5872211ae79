//! Rendering jobs from files, the way the command line does.

use lasercut_core::{LaserJob, PowerSpeedFocusFrequency, VectorPart};
use lasercut_drivers::{
    export_job, DexArmDriver, DriverKind, DriverProfile, MotionCommandEmitter,
};
use tempfile::TempDir;

#[test]
fn test_render_job_file_with_profile() {
    let dir = TempDir::new().unwrap();

    let mut part = VectorPart::new(254.0);
    part.set_property(PowerSpeedFocusFrequency::new(100.0, 50.0))
        .move_to(0.0, 0.0)
        .line_to(100.0, 0.0);
    let job = LaserJob::new("line").with_part(part);
    let job_path = dir.path().join("line.json");
    std::fs::write(&job_path, serde_json::to_string_pretty(&job).unwrap()).unwrap();

    let mut arm = DexArmDriver::new();
    arm.set_pen_drop_distance(4.0).unwrap();
    let profile_path = dir.path().join("arm.json");
    DriverProfile::capture("Arm", &arm)
        .unwrap()
        .save_to_file(&profile_path)
        .unwrap();

    let driver = DriverProfile::load_from_file(&profile_path)
        .unwrap()
        .instantiate()
        .unwrap();
    let job = LaserJob::load_from_file(&job_path).unwrap();
    let out_path = dir.path().join("line.gcode");
    export_job(driver.as_ref(), &job, &out_path).unwrap();

    let gcode = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        gcode,
        "G21\nG90\nG0 Z0\nG0 X0.000000 Y0.000000 F3600\n\
         G0 Z-4\nG1 X10.000000 Y0.000000 S255.000000 F600\n\
         G0 Z0\nG0 X0 Y0\n"
    );
}

#[test]
fn test_every_model_listed() {
    let names: Vec<&str> = DriverKind::ALL.iter().map(|k| k.model_name()).collect();
    assert_eq!(names, ["Generic GCode Driver", "Marlin", "DexArm Driver"]);
    for kind in DriverKind::ALL {
        assert!(!kind.create().property_keys().is_empty());
    }
}

#[test]
fn test_render_profile_as_other_model() {
    let dir = TempDir::new().unwrap();
    let profile_path = dir.path().join("marlin.json");

    let mut marlin = lasercut_drivers::MarlinDriver::new();
    marlin.settings_mut().travel_speed = 3000.0;
    DriverProfile::capture("Marlin", &marlin)
        .unwrap()
        .save_to_file(&profile_path)
        .unwrap();

    let loaded = DriverProfile::load_from_file(&profile_path)
        .unwrap()
        .instantiate()
        .unwrap();
    let arm = DriverKind::DexArm.convert(loaded.as_ref()).unwrap();

    let mut part = VectorPart::new(100.0);
    part.move_to(100.0, 0.0);
    let job = LaserJob::new("travel").with_part(part);
    let out_path = dir.path().join("travel.gcode");
    export_job(arm.as_ref(), &job, &out_path).unwrap();

    let gcode = std::fs::read_to_string(&out_path).unwrap();
    assert!(gcode.contains("G0 Z0\nG0 X25.400000 Y0.000000 F3000\n"));
}
