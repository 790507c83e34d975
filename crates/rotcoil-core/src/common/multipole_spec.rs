//! Published field-quality specifications per magnet family.
//!
//! Each family lists the systematic and random (rms) relative multipole
//! errors expected at its reference radius, plus alignment tolerances.
//! Families are keyed by the name prefix the magnets carry (`BQF-012`
//! belongs to `BQF`).

use super::multipole_spec_data::FAMILY_SPECS;
use crate::domain::HarmonicSide;
use serde::Serialize;

/// Relative multipole errors of one field component.
///
/// Monomials are 0-based harmonic indices (0 dipole, 1 quadrupole, ...);
/// magnitudes are relative to the main multipole at the reference radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideErrors {
    pub sys_monomials: &'static [usize],
    pub sys_relative: &'static [f64],
    pub rms_monomials: &'static [usize],
    pub rms_relative: &'static [f64],
}

impl SideErrors {
    pub const EMPTY: Self = Self {
        sys_monomials: &[],
        sys_relative: &[],
        rms_monomials: &[],
        rms_relative: &[],
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultipoleErrorSpec {
    pub family: &'static str,
    /// 0-based index of the main harmonic.
    pub main: usize,
    pub main_side: HarmonicSide,
    /// Reference radius in meters.
    pub reference_radius: f64,
    /// Offset tolerances in meters.
    pub offset_x_tolerance: f64,
    pub offset_y_tolerance: f64,
    /// Roll tolerance in radians.
    pub roll_tolerance: f64,
    pub normal: SideErrors,
    pub skew: SideErrors,
}

impl MultipoleErrorSpec {
    pub fn side(&self, side: HarmonicSide) -> &SideErrors {
        match side {
            HarmonicSide::Normal => &self.normal,
            HarmonicSide::Skew => &self.skew,
        }
    }

    /// 1-based main harmonic, comparable with a measurement's.
    pub fn main_harmonic(&self) -> usize {
        self.main + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecMatch {
    pub spec: &'static MultipoleErrorSpec,
    pub kind: MatchKind,
    /// Other families whose key is also a prefix of the name.
    pub competing: Vec<&'static str>,
}

impl SpecMatch {
    pub fn is_ambiguous(&self) -> bool {
        self.kind == MatchKind::Prefix && !self.competing.is_empty()
    }
}

pub fn all_specs() -> &'static [MultipoleErrorSpec] {
    &FAMILY_SPECS
}

pub fn families() -> impl Iterator<Item = &'static str> {
    FAMILY_SPECS.iter().map(|spec| spec.family)
}

/// Specification for the family `magnet_name` belongs to.
///
/// An exact family key wins; otherwise the longest family key that prefixes
/// the name. Ambiguous names are logged; use [`resolve`] to inspect them.
pub fn lookup(magnet_name: &str) -> Option<&'static MultipoleErrorSpec> {
    let resolved = resolve(magnet_name)?;
    if resolved.is_ambiguous() {
        tracing::warn!(
            "magnet '{}' matches families {:?}; using '{}'",
            magnet_name.trim(),
            resolved.competing,
            resolved.spec.family
        );
    }
    Some(resolved.spec)
}

pub fn resolve(magnet_name: &str) -> Option<SpecMatch> {
    resolve_in(&FAMILY_SPECS, magnet_name)
}

pub(crate) fn resolve_in(
    table: &'static [MultipoleErrorSpec],
    magnet_name: &str,
) -> Option<SpecMatch> {
    let name = magnet_name.trim().to_ascii_uppercase();
    if name.is_empty() {
        return None;
    }

    let mut candidates: Vec<&'static MultipoleErrorSpec> = table
        .iter()
        .filter(|spec| name.starts_with(spec.family))
        .collect();
    // Longest key first; ties keep declaration order.
    candidates.sort_by(|left, right| right.family.len().cmp(&left.family.len()));

    let (best, rest) = candidates.split_first()?;
    let kind = if best.family == name {
        MatchKind::Exact
    } else {
        MatchKind::Prefix
    };

    Some(SpecMatch {
        spec: *best,
        kind,
        competing: rest.iter().map(|spec| spec.family).collect(),
    })
}
