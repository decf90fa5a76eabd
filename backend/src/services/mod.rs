//! Service layer: observability engine and alert pipeline.
//!
//! Leaves first:
//!
//! - [`coordinates`]: sidereal time, altitude, approximate Sun position
//! - [`visibility_computer`] and [`astronomical_night`]: sampled scans turned into windows
//! - [`catalog_diff`]: new designations against the known set
//! - [`alert_assembler`]: tiered entries plus the reasons for dropped objects
//! - [`report`]: plain-text cycle report
//! - [`watch_cycle`]: the whole load → diff → scan → assemble → save pass

pub mod alert_assembler;
pub mod astronomical_night;
pub mod catalog_diff;
pub mod coordinates;
pub mod report;
pub mod visibility_computer;
pub mod watch_cycle;

pub use alert_assembler::{assemble, NotObservableReason, ObjectAssessment};
pub use astronomical_night::{compute_night_periods, current_night};
pub use catalog_diff::new_objects;
pub use coordinates::{altitude, sidereal_time, sun_altitude, sun_position};
pub use visibility_computer::{scan_object, scan_windows, ScanParameters};
pub use watch_cycle::{run_cycle, run_cycle_with_params, CycleOutcome};
