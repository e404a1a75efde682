//! Scenario Test Suite
//!
//! End-to-end checks of the public fieldcalc facade, one module per
//! primitive. Every test runs in the default build as well as in builds
//! with alternative widths and switches.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test scenarios
//! cargo test --test scenarios --features trace-16,warning-trace
//! ```

// Test modules
mod test_utils;

mod lock_scenarios;
mod option_scenarios;
mod settings_scenarios;
mod trace_scenarios;
mod twin_scenarios;
mod warning_scenarios;
