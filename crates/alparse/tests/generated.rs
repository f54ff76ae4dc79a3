//! The checked-in `golden/Pendulum.rs` is the Rust module generated from
//! the pendulum fixture. It is compiled into this test, so the generated
//! code is type-checked and evaluated, not only pattern-matched.

#[path = "golden/Pendulum.rs"]
mod pendulum;

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};
use std::fs;
use std::path::Path;

use alparse::{ConvertOptions, DynamicSystem, Target, convert};
use pendulum::Pendulum;

const GOLDEN: &str = include_str!("golden/Pendulum.rs");

/// State used throughout: `omega = 0.1`, `theta = 0.2`.
const X: [f64; 2] = [0.1, 0.2];

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "element {i}: {a} != {e}");
    }
}

const OUTPUTS: [f64; 6] = [
    0.1,
    0.2,
    38.53781251449032,
    0.0225,
    -38.45781251449032,
    -34.95524593664908,
];

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_conversion_matches_golden_module() {
    let temp = tempfile::TempDir::new().unwrap();
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pendulum");
    let options = ConvertOptions::new(base, "Pendulum")
        .with_target(Target::Rust)
        .with_output_dir(temp.path());

    let path = convert(&options).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), GOLDEN);
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_metadata() {
    let system = Pendulum::new();
    assert_eq!(system.name(), "Pendulum");
    assert_eq!(system.state_names(), ["omega", "theta"]);
    assert_eq!(system.input_names(), ["torque", "force"]);
    assert_eq!(system.output_names().len(), 6);
    assert_eq!(system.initial_conditions(), [0.0, 0.0]);
    assert_eq!(system.parameters()["l"], 2.0);

    let options = system.integration_options();
    assert_eq!(options.final_time, 1.0);
    assert_eq!(options.absolute_error, 1e-8);
}

#[test]
fn test_inputs() {
    let system = Pendulum::new();
    assert_close(&system.inputs(0.0), &[5.0, 0.0]);
    let quarter = 10.0 * (FRAC_PI_6 + FRAC_PI_2).sin();
    assert_close(&system.inputs(0.25), &[quarter, 0.0]);
}

#[test]
fn test_derivatives() {
    let mut system = Pendulum::new();
    assert_close(&system.derivatives(&X, 0.0), &[-0.6212854534218231, 0.1]);
}

#[test]
fn test_outputs_on_fresh_instance() {
    let mut system = Pendulum::new();
    assert_close(&system.outputs(&X), &OUTPUTS);
}

#[test]
fn test_outputs_ignore_earlier_calls() {
    let mut system = Pendulum::new();
    system.derivatives(&[0.0, 1.3], 0.4);
    assert_close(&system.outputs(&X), &OUTPUTS);
}

#[test]
fn test_set_parameter_reevaluates_constants() {
    let mut system = Pendulum::new();
    system.set_parameter("m", 8.0);
    let dx = system.derivatives(&[0.0, 0.0], 0.0);
    // torque / (i + m*l^2/4) at theta = 0
    assert_close(&dx, &[5.0 / (0.5 + 8.0), 0.0]);
}

#[test]
fn test_linear_model() {
    let mut system = Pendulum::new();
    let linear = system.linear_model(&X, 0.0).unwrap();
    assert_eq!(linear.dimensions(), (2, 2, 6));
    assert_close(&linear.a[0], &[0.0, -1.732396564532934]);
    assert_close(&linear.a[1], &[1.0, 0.0]);
    assert_close(&[linear.b[0][0], linear.b[1][0]], &[0.2222222222222222, 0.0]);
}
