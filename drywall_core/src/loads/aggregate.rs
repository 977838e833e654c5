//! Superposition of factored loads on a simply-supported member.
//!
//! Each load produces its own moment, end reaction and deflection. Moment and
//! shear totals are plain sums over every load; the deflection demand is
//! summed over the sources the member's check names. Loads are elastic and
//! non-interacting, so the order in which they are added does not change the
//! totals.

use serde::{Deserialize, Serialize};

use crate::equations::beam::{
    eccentric_point_load_deflection, point_load_max_moment, point_load_reactions,
    uniform_load_max_deflection, uniform_load_max_moment, uniform_load_reactions,
};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::loads::LoadSource;
use crate::units::{Millimeters, NewtonMillimeters, Newtons, NewtonsPerMillimeter};

/// Factored uniform line load over the full span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformLoad {
    pub source: LoadSource,
    pub line_load: NewtonsPerMillimeter,
}

/// Factored point load at a distance from the base support
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    pub source: LoadSource,
    pub load: Newtons,
    pub position: Millimeters,
}

/// Demand produced by a single load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadContribution {
    pub source: LoadSource,
    pub moment: NewtonMillimeters,
    pub shear: Newtons,
    pub deflection: Millimeters,
}

/// Per-load breakdown plus superposed moment and shear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub contributions: Vec<LoadContribution>,
    pub total_moment: NewtonMillimeters,
    pub total_shear: Newtons,
}

impl LoadSummary {
    /// Contribution of one source, summed if it was added more than once
    pub fn for_source(&self, source: LoadSource) -> LoadContribution {
        let of_source = || self.contributions.iter().filter(move |c| c.source == source);
        LoadContribution {
            source,
            moment: of_source().map(|c| c.moment).sum(),
            shear: of_source().map(|c| c.shear).sum(),
            deflection: of_source().map(|c| c.deflection).sum(),
        }
    }

    /// Deflection summed over the given sources only
    pub fn deflection_from(&self, sources: &[LoadSource]) -> Millimeters {
        self.contributions
            .iter()
            .filter(|c| sources.contains(&c.source))
            .map(|c| c.deflection)
            .sum()
    }
}

/// Loads acting on one simply-supported member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLoads {
    span: Millimeters,
    uniform: Vec<UniformLoad>,
    point: Vec<PointLoad>,
}

impl MemberLoads {
    pub fn new(span: Millimeters) -> CalcResult<Self> {
        require_positive("span_mm", span.0)?;
        Ok(MemberLoads {
            span,
            uniform: Vec::new(),
            point: Vec::new(),
        })
    }

    pub fn span(&self) -> Millimeters {
        self.span
    }

    pub fn add_uniform(&mut self, source: LoadSource, line_load: NewtonsPerMillimeter) -> CalcResult<()> {
        require_non_negative("line_load", line_load.0)?;
        self.uniform.push(UniformLoad { source, line_load });
        Ok(())
    }

    /// Add a point load; its position must lie within the span.
    pub fn add_point(&mut self, source: LoadSource, load: Newtons, position: Millimeters) -> CalcResult<()> {
        require_non_negative("point_load", load.0)?;
        require_non_negative("load_position", position.0)?;
        if position.0 > self.span.0 {
            return Err(CalcError::invalid_input(
                "load_position",
                position.0.to_string(),
                format!("{} must be applied within the span of {} mm", source.description(), self.span.0),
            ));
        }
        self.point.push(PointLoad { source, load, position });
        Ok(())
    }

    pub fn uniform_loads(&self) -> &[UniformLoad] {
        &self.uniform
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point
    }

    /// Total factored line load
    pub fn total_line_load(&self) -> NewtonsPerMillimeter {
        self.uniform.iter().map(|u| u.line_load).sum()
    }

    /// Per-load demand. Uniform loads first, then point loads, each in the
    /// order added.
    ///
    /// Point-load shear is the reaction at the base support, P(L-a)/L.
    pub fn contributions(&self, elastic_modulus_mpa: f64, inertia_mm4: f64) -> Vec<LoadContribution> {
        let l = self.span.0;
        let uniform = self.uniform.iter().map(|u| {
            let (r1, _) = uniform_load_reactions(u.line_load.0, l);
            LoadContribution {
                source: u.source,
                moment: NewtonMillimeters(uniform_load_max_moment(u.line_load.0, l)),
                shear: Newtons(r1),
                deflection: Millimeters(uniform_load_max_deflection(
                    u.line_load.0,
                    l,
                    elastic_modulus_mpa,
                    inertia_mm4,
                )),
            }
        });
        let point = self.point.iter().map(|p| {
            let (r1, _) = point_load_reactions(p.load.0, p.position.0, l);
            LoadContribution {
                source: p.source,
                moment: NewtonMillimeters(point_load_max_moment(p.load.0, p.position.0, l)),
                shear: Newtons(r1),
                deflection: Millimeters(eccentric_point_load_deflection(
                    p.load.0,
                    p.position.0,
                    l,
                    elastic_modulus_mpa,
                    inertia_mm4,
                )),
            }
        });
        uniform.chain(point).collect()
    }

    /// Superpose the moment and shear of every load.
    pub fn summarize(&self, elastic_modulus_mpa: f64, inertia_mm4: f64) -> CalcResult<LoadSummary> {
        require_positive("elastic_modulus_mpa", elastic_modulus_mpa)?;
        require_positive("inertia_mm4", inertia_mm4)?;

        let contributions = self.contributions(elastic_modulus_mpa, inertia_mm4);
        let total_moment = contributions.iter().map(|c| c.moment).sum();
        let total_shear = contributions.iter().map(|c| c.shear).sum();

        Ok(LoadSummary {
            contributions,
            total_moment,
            total_shear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: f64 = 205_000.0;
    const IXE: f64 = 125_552.0;

    fn reference_member() -> MemberLoads {
        let mut loads = MemberLoads::new(Millimeters(4100.0)).unwrap();
        loads
            .add_point(LoadSource::Imposed, Newtons(1.6 * 0.75 * 406.0), Millimeters(1100.0))
            .unwrap();
        loads
    }

    #[test]
    fn test_reference_point_load() {
        let summary = reference_member().summarize(E, IXE).unwrap();
        assert_eq!(summary.contributions.len(), 1);
        assert!((summary.total_moment.0 - 392_136.585).abs() < 1e-2);
        assert!((summary.total_shear.0 - 356.488).abs() < 1e-3);
        let deflection = summary.deflection_from(&[LoadSource::Imposed]);
        assert!((deflection.0 - 57_833.1085).abs() < 1e-3);
    }

    #[test]
    fn test_zero_loads_reduce_to_wind_only() {
        let mut wind_only = MemberLoads::new(Millimeters(3000.0)).unwrap();
        wind_only.add_uniform(LoadSource::Wind, NewtonsPerMillimeter(0.2196)).unwrap();

        let mut all = wind_only.clone();
        all.add_uniform(LoadSource::Dead, NewtonsPerMillimeter(0.0)).unwrap();
        all.add_point(LoadSource::Imposed, Newtons(0.0), Millimeters(1100.0)).unwrap();
        all.add_point(LoadSource::Fixture, Newtons(0.0), Millimeters(1800.0)).unwrap();

        let a = wind_only.summarize(E, IXE).unwrap();
        let b = all.summarize(E, IXE).unwrap();
        assert_eq!(a.total_moment, b.total_moment);
        assert_eq!(a.total_shear, b.total_shear);
        assert_eq!(a.deflection_from(&LoadSource::ALL), b.deflection_from(&LoadSource::ALL));
        assert_eq!(b.contributions.len(), 4);
    }

    #[test]
    fn test_superposition_is_additive() {
        let mut loads = MemberLoads::new(Millimeters(3000.0)).unwrap();
        loads.add_uniform(LoadSource::Wind, NewtonsPerMillimeter(0.2)).unwrap();
        loads.add_uniform(LoadSource::Dead, NewtonsPerMillimeter(0.1)).unwrap();

        let summary = loads.summarize(E, IXE).unwrap();
        // (0.2 + 0.1) × 3000² / 8
        assert!((summary.total_moment.0 - 337_500.0).abs() < 1e-6);
        assert!((summary.total_shear.0 - 450.0).abs() < 1e-9);
        assert!((loads.total_line_load().0 - 0.3).abs() < 1e-12);

        let wind = summary.for_source(LoadSource::Wind);
        assert!((wind.moment.0 - 225_000.0).abs() < 1e-6);
        assert_eq!(summary.for_source(LoadSource::Fixture).moment.0, 0.0);
    }

    #[test]
    fn test_deflection_only_from_named_sources() {
        let mut loads = reference_member();
        loads.add_uniform(LoadSource::Wind, NewtonsPerMillimeter(0.3)).unwrap();
        let summary = loads.summarize(E, IXE).unwrap();

        let imposed = summary.deflection_from(&[LoadSource::Imposed]);
        assert_eq!(imposed, summary.for_source(LoadSource::Imposed).deflection);
        assert!(summary.deflection_from(&[LoadSource::Wind, LoadSource::Imposed]) > imposed);
        assert_eq!(summary.deflection_from(&[]).0, 0.0);
    }

    #[test]
    fn test_point_load_outside_span_rejected() {
        let mut loads = MemberLoads::new(Millimeters(2500.0)).unwrap();
        let err = loads
            .add_point(LoadSource::Fixture, Newtons(100.0), Millimeters(2600.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_span_and_stiffness() {
        assert!(MemberLoads::new(Millimeters(0.0)).is_err());
        assert!(reference_member().summarize(E, 0.0).is_err());
        assert!(reference_member().summarize(f64::NAN, IXE).is_err());
    }

    #[test]
    fn test_negative_load_rejected() {
        let mut loads = MemberLoads::new(Millimeters(2500.0)).unwrap();
        assert!(loads.add_uniform(LoadSource::Wind, NewtonsPerMillimeter(-0.1)).is_err());
    }
}
