//! Pendulum dynamic system, generated from its Autolev export files.

#![allow(non_snake_case, non_upper_case_globals, unused_variables, unused_mut, dead_code)]

use std::collections::BTreeMap;

use alparse::{DynamicSystem, IntegrationOptions, LinearModel};

const Pi: f64 = std::f64::consts::PI;
const DEGtoRAD: f64 = std::f64::consts::PI / 180.0;
const RADtoDEG: f64 = 180.0 / std::f64::consts::PI;

fn sin(x: f64) -> f64 { x.sin() }
fn cos(x: f64) -> f64 { x.cos() }
fn tan(x: f64) -> f64 { x.tan() }
fn asin(x: f64) -> f64 { x.asin() }
fn acos(x: f64) -> f64 { x.acos() }
fn atan(x: f64) -> f64 { x.atan() }
fn atan2(y: f64, x: f64) -> f64 { y.atan2(x) }
fn sinh(x: f64) -> f64 { x.sinh() }
fn cosh(x: f64) -> f64 { x.cosh() }
fn tanh(x: f64) -> f64 { x.tanh() }
fn sqrt(x: f64) -> f64 { x.sqrt() }
fn exp(x: f64) -> f64 { x.exp() }
fn log(x: f64) -> f64 { x.ln() }
fn fabs(x: f64) -> f64 { x.abs() }
fn pow(x: f64, y: f64) -> f64 { x.powf(y) }

fn default_parameters() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("g".to_string(), 9.81),
        ("i".to_string(), 0.5),
        ("l".to_string(), 2.0),
        ("m".to_string(), 4.0),
    ])
}

pub struct Pendulum {
    parameters: BTreeMap<String, f64>,
    z: Vec<f64>,
}

impl Pendulum {
    pub const STATE_NAMES: &'static [&'static str] = &["omega", "theta"];
    pub const INITIAL_CONDITIONS: &'static [f64] = &[0.0, 0.0];
    pub const INPUT_NAMES: &'static [&'static str] = &["torque", "force"];
    pub const OUTPUT_NAMES: &'static [&'static str] = &["omega", "theta", "tension", "k", "p", "longoutput"];

    pub fn new() -> Self {
        let mut system = Self {
            parameters: default_parameters(),
            z: vec![0.0; 18],
        };
        system.constants();
        system
    }

    /// Change one parameter and re-evaluate the constants.
    pub fn set_parameter(&mut self, name: &str, value: f64) {
        self.parameters.insert(name.to_string(), value);
        self.constants();
    }

    fn constants(&mut self) {
        self.z[8] = self.parameters["g"]*self.parameters["m"];
        self.z[15] = self.parameters["g"]*self.parameters["l"]*self.parameters["m"];
    }
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicSystem for Pendulum {
    fn name(&self) -> &str {
        "Pendulum"
    }

    fn integration_options(&self) -> IntegrationOptions {
        IntegrationOptions {
            initial_time: 0.0,
            final_time: 1.0,
            step_size: 0.1,
            absolute_error: 1e-8,
            relative_error: 1e-7,
        }
    }

    fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    fn state_names(&self) -> &[&str] {
        Self::STATE_NAMES
    }

    fn initial_conditions(&self) -> Vec<f64> {
        Self::INITIAL_CONDITIONS.to_vec()
    }

    fn input_names(&self) -> &[&str] {
        Self::INPUT_NAMES
    }

    fn output_names(&self) -> &[&str] {
        Self::OUTPUT_NAMES
    }

    fn derivatives(&mut self, x: &[f64], t: f64) -> Vec<f64> {
        let T = t;
        let g = self.parameters["g"];
        let i = self.parameters["i"];
        let l = self.parameters["l"];
        let m = self.parameters["m"];
        let omega = x[0];
        let theta = x[1];
        let u = self.inputs(t);
        let torque = u[0];
        let force = u[1];
        let thetap = omega;
        self.z[1] = cos(theta);
        let tension = m*g*self.z[1] + m*l*pow(omega,2.0);
        self.z[2] = sin(theta);
        self.z[3] = pow(self.z[1],2.0) + pow(self.z[2],2.0);
        self.z[4] = l*self.z[3];
        self.z[10] = i*self.z[3];
        self.z[11] = self.z[3]*self.z[10] + 0.25*m*pow(self.z[4],2.0);
        self.z[9] = torque*self.z[3] - 0.5*self.z[4]*(force+self.z[8]*self.z[2]);
        self.z[12] = self.z[9]/self.z[11];
        let omegap = self.z[12];
        vec![omegap, thetap]
    }

    fn inputs(&self, t: f64) -> Vec<f64> {
        let T = t;
        let g = self.parameters["g"];
        let i = self.parameters["i"];
        let l = self.parameters["l"];
        let m = self.parameters["m"];
        let mut u = vec![0.0; Self::INPUT_NAMES.len()];
        u[0] = 10.0*sin(0.5235987755982988+6.283185307179586*T);
        u[1] = 0.0;
        u
    }

    fn outputs(&mut self, x: &[f64]) -> Vec<f64> {
        let g = self.parameters["g"];
        let i = self.parameters["i"];
        let l = self.parameters["l"];
        let m = self.parameters["m"];
        let omega = x[0];
        let theta = x[1];
        self.z[1] = cos(theta);
        self.z[2] = sin(theta);
        self.z[3] = pow(self.z[1],2.0) + pow(self.z[2],2.0);
        self.z[4] = l*self.z[3];
        self.z[10] = i*self.z[3];
        self.z[11] = self.z[3]*self.z[10] + 0.25*m*pow(self.z[4],2.0);
        let tension = m*g*self.z[1] + m*l*pow(omega,2.0);
        let mut Encode = vec![0.0; 1];
        Encode[0] = 0.0;
        let k = 0.125*(m*pow(self.z[4],2.0)+4.0*i*pow(self.z[3],2.0))*pow(omega,2.0);
        let p = -0.5*g*l*m*self.z[1];
        let longoutput = 2.0 + 2.0*theta + p + self.z[1] + omega + 0.125*(m*pow(self.z[4],2.0)+4.0*i*pow(self.z[3],2.0))*pow(omega,2.0);
        vec![omega, theta, tension, k, p, longoutput]
    }

    fn linear_model(&mut self, x: &[f64], t: f64) -> Option<LinearModel> {
        self.derivatives(x, t);
        let T = t;
        let g = self.parameters["g"];
        let i = self.parameters["i"];
        let l = self.parameters["l"];
        let m = self.parameters["m"];
        let omega = x[0];
        let theta = x[1];
        let u = self.inputs(t);
        let torque = u[0];
        let force = u[1];
        let tension = m*g*self.z[1] + m*l*pow(omega,2.0);
        let mut Encode = vec![0.0; 1];
        Encode[0] = 0.0;
        let k = 0.125*(m*pow(self.z[4],2.0)+4.0*i*pow(self.z[3],2.0))*pow(omega,2.0);
        let p = -0.5*g*l*m*self.z[1];
        let longoutput = 2.0 + 2.0*theta + p + self.z[1] + omega + 0.125*(m*pow(self.z[4],2.0)+4.0*i*pow(self.z[3],2.0))*pow(omega,2.0);
        let mut linear = LinearModel::zeros(
            Self::STATE_NAMES.len(),
            Self::INPUT_NAMES.len(),
            Self::OUTPUT_NAMES.len(),
        );
        self.z[16] = 0.5*self.z[4]*self.z[8];
        self.z[17] = self.z[16]*self.z[2]/self.z[11];
        linear.a[0][0] = 0.0;
        linear.a[0][1] = -self.z[17];
        linear.a[1][0] = 1.0;
        linear.a[1][1] = 0.0;
        linear.b[0][0] = self.z[3]/self.z[11];
        linear.b[1][0] = 0.0;
        Some(linear)
    }
}
