//! Hardware, energy and emissions implied by a daily mac budget.

use crate::error::{FootprintError, Result};
use serde::Serialize;
use std::fmt;

pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Global electricity use, about 22,347 billion kWh in 2017.
pub const WORLDWIDE_KWH_PER_YEAR: f64 = 22e12;

/// kg per gigaton (1e3 kg per metric ton, 1e9 tons per gigaton).
const KG_PER_GIGATON: f64 = 1e12;

/// Electricity generation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelSource {
    Coal,
    NaturalGas,
    Petroleum,
    Solar,
}

impl FuelSource {
    pub const ALL: [FuelSource; 4] = [
        FuelSource::Coal,
        FuelSource::NaturalGas,
        FuelSource::Petroleum,
        FuelSource::Solar,
    ];

    /// kg of CO2-equivalent emitted per kWh generated.
    ///
    /// Fossil figures from the EIA FAQ; solar is a lifecycle estimate.
    pub fn kg_co2e_per_kwh(self) -> f64 {
        match self {
            FuelSource::Coal => 2.21,
            FuelSource::NaturalGas => 0.92,
            FuelSource::Petroleum => 2.11,
            FuelSource::Solar => 0.05,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FuelSource::Coal => "coal",
            FuelSource::NaturalGas => "natural_gas",
            FuelSource::Petroleum => "petroleum",
            FuelSource::Solar => "solar",
        }
    }
}

#[inline]
pub fn worldwide_kwh_per_day() -> f64 {
    WORLDWIDE_KWH_PER_YEAR / DAYS_PER_YEAR
}

/// What it takes to serve a day's worth of macs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactResult {
    pub tmacs_needed_per_sec: f64,
    /// Averaged accelerator count; fractional on purpose.
    pub num_gpus_needed: f64,
    pub kwh: f64,
    pub gwh: f64,
    pub pct_of_global_energy: f64,
    pub daily_kg_co2e_if_coal: f64,
    pub daily_gigatons_co2e_if_coal: f64,
    pub annual_gigatons_co2e_if_coal: f64,
}

/// Convert `macs` spent over `num_days` into hardware, energy and emissions.
///
/// `tmac_per_sec` is the achievable throughput of one accelerator and
/// `gpu_watts` its power draw at full load. Only `num_days == 1` is
/// supported.
pub fn estimate_impact(
    macs: f64,
    tmac_per_sec: f64,
    gpu_watts: f64,
    num_days: u32,
) -> Result<ImpactResult> {
    if num_days != 1 {
        return Err(FootprintError::UnsupportedParameter {
            name: "num_days",
            value: num_days.to_string(),
            reason: "only a single day of usage is supported",
        });
    }

    let macs_needed_per_sec = macs / SECONDS_PER_DAY;
    let tmacs_needed_per_sec = macs_needed_per_sec / 1e12;
    let num_gpus_needed = tmacs_needed_per_sec / tmac_per_sec;
    let gpu_kwatts = gpu_watts / 1000.0;
    let total_kwatts = num_gpus_needed * gpu_kwatts;
    let kwh = total_kwatts * HOURS_PER_DAY;

    let coal = FuelSource::Coal.kg_co2e_per_kwh();
    Ok(ImpactResult {
        tmacs_needed_per_sec,
        num_gpus_needed,
        kwh,
        gwh: kwh / 1e6,
        pct_of_global_energy: 100.0 * kwh / worldwide_kwh_per_day(),
        daily_kg_co2e_if_coal: kwh * coal,
        daily_gigatons_co2e_if_coal: kwh * (coal / KG_PER_GIGATON),
        annual_gigatons_co2e_if_coal: DAYS_PER_YEAR * kwh * (coal / KG_PER_GIGATON),
    })
}

impl fmt::Display for ImpactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  tmacs_needed_per_sec:         {:e}", self.tmacs_needed_per_sec)?;
        writeln!(f, "  num_gpus_needed:              {:e}", self.num_gpus_needed)?;
        writeln!(f, "  kwh:                          {:e}", self.kwh)?;
        writeln!(f, "  gwh:                          {:e}", self.gwh)?;
        writeln!(f, "  pct_of_global_energy:         {:e}", self.pct_of_global_energy)?;
        writeln!(f, "  daily_kg_co2e_if_coal:        {:e}", self.daily_kg_co2e_if_coal)?;
        writeln!(f, "  daily_gigatons_co2e_if_coal:  {:e}", self.daily_gigatons_co2e_if_coal)?;
        write!(f, "  annual_gigatons_co2e_if_coal: {:e}", self.annual_gigatons_co2e_if_coal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_chain_is_exact() {
        let impact = estimate_impact(1e20, 30.0, 250.0, 1).unwrap();
        let gpus = (1e20 / 86400.0 / 1e12) / 30.0;
        assert_eq!(impact.num_gpus_needed, gpus);
        assert_eq!(impact.kwh, gpus * 0.25 * 24.0);
        assert_eq!(impact.tmacs_needed_per_sec, 1e20 / 86400.0 / 1e12);
        assert_eq!(impact.gwh, impact.kwh / 1e6);
        assert_eq!(impact.daily_kg_co2e_if_coal, impact.kwh * 2.21);
    }

    #[test]
    fn annual_is_daily_times_365() {
        let impact = estimate_impact(5e22, 30.0, 250.0, 1).unwrap();
        let ratio = impact.annual_gigatons_co2e_if_coal / impact.daily_gigatons_co2e_if_coal;
        assert!((ratio - 365.0).abs() < 1e-9);
    }

    #[test]
    fn global_share_uses_daily_consumption() {
        let kwh_per_day = 22e12 / 365.0;
        assert_eq!(worldwide_kwh_per_day(), kwh_per_day);
        let impact = estimate_impact(1e20, 30.0, 250.0, 1).unwrap();
        assert_eq!(impact.pct_of_global_energy, 100.0 * impact.kwh / kwh_per_day);
    }

    #[test]
    fn multi_day_is_rejected() {
        let err = estimate_impact(1e20, 30.0, 250.0, 2).unwrap_err();
        assert!(matches!(
            err,
            FootprintError::UnsupportedParameter { name: "num_days", .. }
        ));
        assert!(err.to_string().contains("num_days=2"));
    }

    #[test]
    fn zero_macs_need_nothing() {
        let impact = estimate_impact(0.0, 30.0, 250.0, 1).unwrap();
        assert_eq!(impact.num_gpus_needed, 0.0);
        assert_eq!(impact.kwh, 0.0);
    }

    #[test]
    fn emission_table_is_complete() {
        let factors: Vec<(&str, f64)> = FuelSource::ALL
            .iter()
            .map(|f| (f.name(), f.kg_co2e_per_kwh()))
            .collect();
        assert_eq!(
            factors,
            vec![
                ("coal", 2.21),
                ("natural_gas", 0.92),
                ("petroleum", 2.11),
                ("solar", 0.05)
            ]
        );
    }
}
