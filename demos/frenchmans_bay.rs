//! Frenchman's Bay Example
//!
//! Walks the Frenchman's Bay preset through the full model:
//! 1. Derives the oscillator parameters from the embayment geometry
//! 2. Synthesizes one day of bay response to the five-mode lake forcing
//! 3. Estimates the flushed volume from the predicted levels
//! 4. Runs the relative-amplitude survey over the measured embayments
//! 5. Prints the mouth design chart
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=embay=debug cargo run --release --example frenchmans_bay
//! ```

use std::error::Error;

use embay::analysis::default_outliers;
use embay::response::{MouthDesignStudy, SweepSettings, amplitude_curves};
use embay::{
    Catalog, EmbaymentId, FlushingEstimator, ResponseSettings, ResponseSynthesizer,
    relative_amplitude_survey,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = Catalog::builtin();
    let cfg = catalog.preset(EmbaymentId::FrenchmansBay)?;

    // ========================================================================
    // Response
    // ========================================================================

    let response = ResponseSynthesizer::new(ResponseSettings::new(1.0, 12)).synthesize(cfg)?;
    let p = &response.parameters;

    println!("{}", "=".repeat(72));
    println!("Embayment: {}", cfg.name);
    println!("{}", "=".repeat(72));
    println!("  mouth cross-section  O  = {:>10.2} m²", p.mouth_cross_section);
    println!("  head-loss factor     fm = {:>10.4}", p.head_loss_coefficient);
    println!("  damping factor       n0 = {:>10.2}", p.linearized_damping);
    println!(
        "  eigenfrequency       w0 = {:>10.4e} rad/s  (T0 = {:.2} h)",
        p.eigen_angular_frequency,
        p.eigen_period_seconds() / 3600.0
    );
    println!();
    println!(
        "  {:>8}  {:>9}  {:>9}  {:>9}  {:>8}  {:>9}",
        "T (h)", "a (m)", "w/w0", "z (m)", "z/a", "phase"
    );
    for mode in &response.modes {
        println!(
            "  {:>8.3}  {:>9.4}  {:>9.3}  {:>9.4}  {:>8.3}  {:>9.3}",
            mode.period_hours,
            mode.forcing_amplitude,
            mode.relative_frequency,
            mode.bay_amplitude,
            mode.amplification(),
            mode.phase_lag
        );
    }
    for safeguard in response.safeguards() {
        println!("  safeguard: {}", safeguard);
    }

    // ========================================================================
    // Flushing
    // ========================================================================

    let flushing = FlushingEstimator::for_embayment(cfg)
        .estimate(response.series.total_response(), response.series.sample_interval())?;

    println!();
    println!("Flushing over {} samples:", response.series.len());
    println!("  flushed volume       = {:>12.1} m³", flushing.flushed_volume);
    println!("  level change         = {:>12.4} m", flushing.level_change);
    if flushing.interval_mismatch {
        println!(
            "  (sample spacing {:.1} s differs from the flushing interval)",
            flushing.sample_interval
        );
    }

    let curves = amplitude_curves(cfg, SweepSettings::default())?;
    println!();
    println!("Response peaks:");
    for curve in &curves {
        if let Some((w, z)) = curve.peak() {
            println!(
                "  {:<12} peak {:.4} m at w/w0 = {:.3}{}",
                curve.label,
                z,
                w / curve.eigen_angular_frequency,
                if curve.near_resonance { "  (near resonance)" } else { "" }
            );
        }
    }

    // ========================================================================
    // Survey
    // ========================================================================

    let survey = relative_amplitude_survey(&Catalog::survey(), &default_outliers())?;
    println!();
    println!("Relative-amplitude survey:");
    for point in &survey.points {
        println!(
            "  {:<18} w/w0 = {:>7.3}  measured {:>6.3}  calculated {:>6.3}{}",
            point.label(),
            point.dimensionless_frequency,
            point.measured_ratio,
            point.calculated_ratio,
            if point.outlier { "  (outlier)" } else { "" }
        );
    }
    if let Some(fit) = &survey.regression {
        println!(
            "  slope {:.3}  intercept {:.3}  r {:.3}  ({} points)",
            fit.slope, fit.intercept, fit.r_value, fit.n_points
        );
    }

    // ========================================================================
    // Mouth design
    // ========================================================================

    let study = MouthDesignStudy::default();
    let widths = MouthDesignStudy::default_widths();
    println!();
    println!(
        "Mouth design (a = {} m, T = {} h), z/a at the widest mouth:",
        study.forcing_amplitude, study.period_hours
    );
    for curve in study.curves(&MouthDesignStudy::DEFAULT_BASIN_AREAS, &widths)? {
        let relative = curve.relative_amplitudes();
        if let Some(last) = relative.last() {
            println!("  basin {:>10.0} m²  z/a = {:.3}", curve.basin_area, last);
        }
    }

    Ok(())
}
