use super::multipole_spec::{MultipoleErrorSpec, SideErrors};
use crate::domain::HarmonicSide;

const BOOSTER_R0: f64 = 0.0175;
const RING_R0: f64 = 0.012;

const BOOSTER_OFFSET_TOL: f64 = 160.0e-6;
const BOOSTER_ROLL_TOL: f64 = 0.8e-3;
const RING_OFFSET_TOL: f64 = 40.0e-6;
const RING_ROLL_TOL: f64 = 0.3e-3;
const CORRECTOR_OFFSET_TOL: f64 = 160.0e-6;
const CORRECTOR_ROLL_TOL: f64 = 1.0e-3;

const DIPOLE_RMS_MONOMIALS: [usize; 6] = [1, 2, 3, 4, 5, 6];
const QUADRUPOLE_RMS_MONOMIALS: [usize; 8] = [2, 3, 4, 5, 6, 7, 8, 9];
const SEXTUPOLE_RMS_MONOMIALS: [usize; 7] = [3, 4, 5, 6, 7, 8, 9];

const BOOSTER_DIPOLE: SideErrors = SideErrors {
    sys_monomials: &[2, 4, 6],
    sys_relative: &[-9.0e-4, 3.0e-4, -1.5e-4],
    rms_monomials: &DIPOLE_RMS_MONOMIALS,
    rms_relative: &[5.5e-4, 5.0e-4, 2.0e-4, 2.0e-4, 1.0e-4, 1.0e-4],
};

const BOOSTER_DIPOLE_SKEW: SideErrors = SideErrors {
    rms_monomials: &DIPOLE_RMS_MONOMIALS,
    rms_relative: &[5.5e-4, 5.0e-4, 2.0e-4, 2.0e-4, 1.0e-4, 1.0e-4],
    ..SideErrors::EMPTY
};

const RING_DIPOLE: SideErrors = SideErrors {
    sys_monomials: &[2, 4, 6],
    sys_relative: &[-3.0e-4, 1.2e-4, -4.0e-5],
    rms_monomials: &DIPOLE_RMS_MONOMIALS,
    rms_relative: &[1.5e-4, 1.5e-4, 1.0e-4, 1.0e-4, 5.0e-5, 5.0e-5],
};

const RING_DIPOLE_SKEW: SideErrors = SideErrors {
    rms_monomials: &DIPOLE_RMS_MONOMIALS,
    rms_relative: &[1.5e-4, 1.5e-4, 1.0e-4, 1.0e-4, 5.0e-5, 5.0e-5],
    ..SideErrors::EMPTY
};

const BOOSTER_QUADRUPOLE: SideErrors = SideErrors {
    sys_monomials: &[5, 9, 13],
    sys_relative: &[-3.9e-4, 1.7e-3, -8.0e-4],
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[7.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4],
};

const BOOSTER_QUADRUPOLE_SKEW: SideErrors = SideErrors {
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[1.0e-3, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4],
    ..SideErrors::EMPTY
};

const RING_QUADRUPOLE: SideErrors = SideErrors {
    sys_monomials: &[5, 9, 13],
    sys_relative: &[-1.0e-3, 1.1e-3, 8.0e-5],
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4],
};

const RING_QUADRUPOLE_SKEW: SideErrors = SideErrors {
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[5.0e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4, 1.5e-4],
    ..SideErrors::EMPTY
};

const SKEW_QUADRUPOLE_MAIN: SideErrors = SideErrors {
    sys_monomials: &[5, 9],
    sys_relative: &[-2.4e-2, 2.0e-3],
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[1.0e-3, 1.0e-3, 1.0e-3, 1.0e-3, 5.0e-4, 5.0e-4, 5.0e-4, 5.0e-4],
};

const SKEW_QUADRUPOLE_PERP: SideErrors = SideErrors {
    rms_monomials: &QUADRUPOLE_RMS_MONOMIALS,
    rms_relative: &[1.0e-3, 1.0e-3, 1.0e-3, 1.0e-3, 5.0e-4, 5.0e-4, 5.0e-4, 5.0e-4],
    ..SideErrors::EMPTY
};

const BOOSTER_SEXTUPOLE: SideErrors = SideErrors {
    sys_monomials: &[8, 14],
    sys_relative: &[-2.5e-2, -1.2e-2],
    rms_monomials: &SEXTUPOLE_RMS_MONOMIALS,
    rms_relative: &[4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4],
};

const RING_SEXTUPOLE: SideErrors = SideErrors {
    sys_monomials: &[8, 14],
    sys_relative: &[-1.4e-2, -1.0e-3],
    rms_monomials: &SEXTUPOLE_RMS_MONOMIALS,
    rms_relative: &[4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4],
};

const SEXTUPOLE_SKEW: SideErrors = SideErrors {
    rms_monomials: &SEXTUPOLE_RMS_MONOMIALS,
    rms_relative: &[4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4, 4.0e-4],
    ..SideErrors::EMPTY
};

const CORRECTOR_MAIN: SideErrors = SideErrors {
    sys_monomials: &[2, 4],
    sys_relative: &[-8.0e-2, 4.0e-2],
    rms_monomials: &[2, 4],
    rms_relative: &[5.0e-3, 5.0e-3],
};

const CORRECTOR_PERP: SideErrors = SideErrors {
    rms_monomials: &[1, 2],
    rms_relative: &[5.0e-3, 5.0e-3],
    ..SideErrors::EMPTY
};

/// Declaration order is the tie-break between equally long family keys.
pub(super) static FAMILY_SPECS: [MultipoleErrorSpec; 18] = [
    MultipoleErrorSpec {
        family: "BD",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: BOOSTER_DIPOLE,
        skew: BOOSTER_DIPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BQF",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: BOOSTER_QUADRUPOLE,
        skew: BOOSTER_QUADRUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BQD",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: BOOSTER_QUADRUPOLE,
        skew: BOOSTER_QUADRUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BQS",
        main: 1,
        main_side: HarmonicSide::Skew,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: SKEW_QUADRUPOLE_PERP,
        skew: SKEW_QUADRUPOLE_MAIN,
    },
    MultipoleErrorSpec {
        family: "BSF",
        main: 2,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: BOOSTER_SEXTUPOLE,
        skew: SEXTUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BSD",
        main: 2,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: BOOSTER_OFFSET_TOL,
        offset_y_tolerance: BOOSTER_OFFSET_TOL,
        roll_tolerance: BOOSTER_ROLL_TOL,
        normal: BOOSTER_SEXTUPOLE,
        skew: SEXTUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BCH",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: CORRECTOR_OFFSET_TOL,
        offset_y_tolerance: CORRECTOR_OFFSET_TOL,
        roll_tolerance: CORRECTOR_ROLL_TOL,
        normal: CORRECTOR_MAIN,
        skew: CORRECTOR_PERP,
    },
    MultipoleErrorSpec {
        family: "BCV",
        main: 0,
        main_side: HarmonicSide::Skew,
        reference_radius: BOOSTER_R0,
        offset_x_tolerance: CORRECTOR_OFFSET_TOL,
        offset_y_tolerance: CORRECTOR_OFFSET_TOL,
        roll_tolerance: CORRECTOR_ROLL_TOL,
        normal: CORRECTOR_PERP,
        skew: CORRECTOR_MAIN,
    },
    MultipoleErrorSpec {
        family: "B1",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_DIPOLE,
        skew: RING_DIPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "B2",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_DIPOLE,
        skew: RING_DIPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "BC",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_DIPOLE,
        skew: RING_DIPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "Q14",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_QUADRUPOLE,
        skew: RING_QUADRUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "Q20",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_QUADRUPOLE,
        skew: RING_QUADRUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "Q30",
        main: 1,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_QUADRUPOLE,
        skew: RING_QUADRUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "QS",
        main: 1,
        main_side: HarmonicSide::Skew,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: SKEW_QUADRUPOLE_PERP,
        skew: SKEW_QUADRUPOLE_MAIN,
    },
    MultipoleErrorSpec {
        family: "S15",
        main: 2,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: RING_OFFSET_TOL,
        offset_y_tolerance: RING_OFFSET_TOL,
        roll_tolerance: RING_ROLL_TOL,
        normal: RING_SEXTUPOLE,
        skew: SEXTUPOLE_SKEW,
    },
    MultipoleErrorSpec {
        family: "CH",
        main: 0,
        main_side: HarmonicSide::Normal,
        reference_radius: RING_R0,
        offset_x_tolerance: CORRECTOR_OFFSET_TOL,
        offset_y_tolerance: CORRECTOR_OFFSET_TOL,
        roll_tolerance: CORRECTOR_ROLL_TOL,
        normal: CORRECTOR_MAIN,
        skew: CORRECTOR_PERP,
    },
    MultipoleErrorSpec {
        family: "CV",
        main: 0,
        main_side: HarmonicSide::Skew,
        reference_radius: RING_R0,
        offset_x_tolerance: CORRECTOR_OFFSET_TOL,
        offset_y_tolerance: CORRECTOR_OFFSET_TOL,
        roll_tolerance: CORRECTOR_ROLL_TOL,
        normal: CORRECTOR_PERP,
        skew: CORRECTOR_MAIN,
    },
];
