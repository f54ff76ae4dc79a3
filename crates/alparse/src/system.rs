//! The interface generated Rust modules implement.
//!
//! A [`DynamicSystem`] is everything a simulation runtime needs from a
//! converted model: names, options, parameters and the three evaluation
//! functions. Nothing here depends on how the module was generated.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use alparse::{DynamicSystem, IntegrationOptions};
//!
//! struct Decay {
//!     parameters: BTreeMap<String, f64>,
//! }
//!
//! impl DynamicSystem for Decay {
//!     fn name(&self) -> &str {
//!         "Decay"
//!     }
//!
//!     fn integration_options(&self) -> IntegrationOptions {
//!         IntegrationOptions {
//!             initial_time: 0.0,
//!             final_time: 1.0,
//!             step_size: 0.1,
//!             absolute_error: 1e-8,
//!             relative_error: 1e-7,
//!         }
//!     }
//!
//!     fn parameters(&self) -> &BTreeMap<String, f64> {
//!         &self.parameters
//!     }
//!
//!     fn state_names(&self) -> &[&str] {
//!         &["x"]
//!     }
//!
//!     fn initial_conditions(&self) -> Vec<f64> {
//!         vec![1.0]
//!     }
//!
//!     fn input_names(&self) -> &[&str] {
//!         &[]
//!     }
//!
//!     fn output_names(&self) -> &[&str] {
//!         &["x"]
//!     }
//!
//!     fn derivatives(&mut self, x: &[f64], _t: f64) -> Vec<f64> {
//!         vec![-self.parameters["k"] * x[0]]
//!     }
//!
//!     fn inputs(&self, _t: f64) -> Vec<f64> {
//!         Vec::new()
//!     }
//!
//!     fn outputs(&mut self, x: &[f64]) -> Vec<f64> {
//!         vec![x[0]]
//!     }
//! }
//!
//! let mut system = Decay { parameters: BTreeMap::from([("k".to_string(), 2.0)]) };
//! assert_eq!(system.derivatives(&[1.0], 0.0), vec![-2.0]);
//! ```

use std::collections::BTreeMap;

use alparse_core::IntegrationOptions;

/// State, input, output and feed-forward matrices of a linearized model.
///
/// Each matrix is stored row-major as a vector of rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearModel {
    pub a: Vec<Vec<f64>>,
    pub b: Vec<Vec<f64>>,
    pub c: Vec<Vec<f64>>,
    pub d: Vec<Vec<f64>>,
}

impl LinearModel {
    /// Zero matrices for `states` states, `inputs` inputs and `outputs` outputs.
    pub fn zeros(states: usize, inputs: usize, outputs: usize) -> Self {
        let zeros = |rows: usize, cols: usize| vec![vec![0.0; cols]; rows];
        Self {
            a: zeros(states, states),
            b: zeros(states, inputs),
            c: zeros(outputs, states),
            d: zeros(outputs, inputs),
        }
    }

    /// `(states, inputs, outputs)` read from the matrix shapes.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        let inputs = self.b.first().map_or(0, Vec::len);
        (self.a.len(), inputs, self.c.len())
    }
}

/// A model that can be simulated.
///
/// Vectors passed in and returned are ordered like the corresponding name
/// lists: `derivatives` in [`state_names`](Self::state_names) order,
/// `inputs` in [`input_names`](Self::input_names) order and `outputs` in
/// [`output_names`](Self::output_names) order.
pub trait DynamicSystem {
    /// Model name.
    fn name(&self) -> &str;

    fn integration_options(&self) -> IntegrationOptions;

    /// Current parameter values by name.
    fn parameters(&self) -> &BTreeMap<String, f64>;

    fn state_names(&self) -> &[&str];

    /// Initial values, one per state.
    fn initial_conditions(&self) -> Vec<f64>;

    fn input_names(&self) -> &[&str];

    fn output_names(&self) -> &[&str];

    /// State derivatives at state `x` and time `t`.
    fn derivatives(&mut self, x: &[f64], t: f64) -> Vec<f64>;

    /// Specified inputs at time `t`.
    fn inputs(&self, t: f64) -> Vec<f64>;

    /// Outputs at state `x`.
    ///
    /// The result depends on `x` and the parameters only, never on which
    /// methods ran before.
    fn outputs(&mut self, x: &[f64]) -> Vec<f64>;

    /// Linear model at state `x` and time `t`.
    ///
    /// Returns `None` for models exported without linear-matrix entries.
    fn linear_model(&mut self, x: &[f64], t: f64) -> Option<LinearModel> {
        let _ = (x, t);
        None
    }
}
