//! Technology-library loading and validation.

use crate::error::ConfigError;
use crate::types::{CellCoefficients, LibraryFile, TechLibrary};
use ppa_common::Operator;
use std::path::Path;

/// Loads a technology library from a TOML file overlaid on the built-in tables.
pub fn load_library(path: &Path) -> Result<TechLibrary, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_library_from_str(&content)
}

/// Parses a TOML technology library overlaid on the built-in tables.
///
/// An empty string yields [`TechLibrary::default`].
pub fn load_library_from_str(content: &str) -> Result<TechLibrary, ConfigError> {
    let file: LibraryFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let library = overlay(TechLibrary::default(), &file)?;
    validate_library(&library)?;
    Ok(library)
}

fn parse_operator(mnemonic: &str) -> Result<Operator, ConfigError> {
    mnemonic
        .parse::<Operator>()
        .map_err(|_| ConfigError::UnknownOperator(mnemonic.to_string()))
}

/// Applies every value present in `file` on top of `base`.
fn overlay(mut base: TechLibrary, file: &LibraryFile) -> Result<TechLibrary, ConfigError> {
    base.sequential = file.sequential.apply(base.sequential);

    for (mnemonic, coeffs) in &file.operators {
        let op = parse_operator(mnemonic)?;
        let current = base
            .operators
            .get(&op)
            .copied()
            .unwrap_or(CellCoefficients::new(0.0, 0.0, 0.0));
        base.operators.insert(op, coeffs.apply(current));
    }

    for (mnemonic, delay) in &file.gate_delays {
        let op = parse_operator(mnemonic)?;
        base.timing.gate_delays.insert(op, *delay);
    }

    let t = &file.timing;
    let timing = &mut base.timing;
    if let Some(frequency) = t.frequency {
        timing.frequency = frequency;
    }
    timing.clock_uncertainty_ns = t.clock_uncertainty_ns.unwrap_or(timing.clock_uncertainty_ns);
    timing.setup_ns = t.setup_ns.unwrap_or(timing.setup_ns);
    timing.input_delay_ns = t.input_delay_ns.unwrap_or(timing.input_delay_ns);
    timing.output_delay_ns = t.output_delay_ns.unwrap_or(timing.output_delay_ns);
    timing.register_delay_ns = t.register_delay_ns.unwrap_or(timing.register_delay_ns);

    let c = &file.calibration;
    let policy = &mut base.calibration;
    policy.sample_ratio = c.sample_ratio.unwrap_or(policy.sample_ratio);
    policy.sparse_floor = c.sparse_floor.unwrap_or(policy.sparse_floor);
    policy.min_samples = c.min_samples.unwrap_or(policy.min_samples);
    policy.max_samples = c.max_samples.unwrap_or(policy.max_samples);
    policy.small_scale_kilo = c.small_scale_kilo.unwrap_or(policy.small_scale_kilo);
    policy.medium_scale_kilo = c.medium_scale_kilo.unwrap_or(policy.medium_scale_kilo);

    Ok(base)
}

fn check_non_negative(what: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{what} must be a non-negative number, got {value}"
        )))
    }
}

fn check_coefficients(what: &str, c: &CellCoefficients) -> Result<(), ConfigError> {
    check_non_negative(&format!("{what}.area"), c.area)?;
    check_non_negative(&format!("{what}.static_power"), c.static_power)?;
    check_non_negative(&format!("{what}.dynamic_power"), c.dynamic_power)
}

/// Validates value ranges and cross-field consistency.
fn validate_library(library: &TechLibrary) -> Result<(), ConfigError> {
    check_coefficients("sequential", &library.sequential)?;
    for (op, coeffs) in &library.operators {
        check_coefficients(&format!("operators.{op}"), coeffs)?;
    }

    let timing = &library.timing;
    if timing.frequency.hz() <= 0.0 || !timing.frequency.hz().is_finite() {
        return Err(ConfigError::ValidationError(format!(
            "timing.frequency must be positive, got {}",
            timing.frequency
        )));
    }
    check_non_negative("timing.clock_uncertainty_ns", timing.clock_uncertainty_ns)?;
    check_non_negative("timing.setup_ns", timing.setup_ns)?;
    check_non_negative("timing.input_delay_ns", timing.input_delay_ns)?;
    check_non_negative("timing.output_delay_ns", timing.output_delay_ns)?;
    check_non_negative("timing.register_delay_ns", timing.register_delay_ns)?;
    for (op, delay) in &timing.gate_delays {
        check_non_negative(&format!("gate_delays.{op}"), *delay)?;
    }
    if timing.required_time_ns() <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "clock period {:.4} ns leaves no time after uncertainty and setup",
            timing.frequency.period_ns()
        )));
    }

    let policy = &library.calibration;
    if policy.sample_ratio <= 0.0 || !policy.sample_ratio.is_finite() {
        return Err(ConfigError::ValidationError(
            "calibration.sample_ratio must be positive".to_string(),
        ));
    }
    if policy.min_samples == 0 || policy.min_samples > policy.max_samples {
        return Err(ConfigError::ValidationError(format!(
            "calibration sample bounds must satisfy 0 < min_samples <= max_samples, got {}..{}",
            policy.min_samples, policy.max_samples
        )));
    }
    if policy.small_scale_kilo > policy.medium_scale_kilo {
        return Err(ConfigError::ValidationError(
            "calibration.small_scale_kilo must not exceed medium_scale_kilo".to_string(),
        ));
    }
    Ok(())
}
