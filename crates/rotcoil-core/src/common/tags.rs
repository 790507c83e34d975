//! Accepted header tags per logical measurement field.
//!
//! Two generations of the bench software wrote the same quantities under
//! English and Portuguese tags. Each field lists every accepted spelling;
//! the first spelling is the one used when a record is written back out.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTags {
    pub field: &'static str,
    pub tags: &'static [&'static str],
}

impl FieldTags {
    pub const fn new(field: &'static str, tags: &'static [&'static str]) -> Self {
        Self { field, tags }
    }

    pub const fn canonical(&self) -> &'static str {
        self.tags[0]
    }
}

pub const MAGNET_NAME: FieldTags = FieldTags::new("magnet_name", &["magnet_name", "nome_ima"]);
pub const FILENAME: FieldTags = FieldTags::new("filename", &["file", "arquivo"]);
pub const DATE: FieldTags = FieldTags::new("date", &["date", "data"]);
pub const HOUR: FieldTags = FieldTags::new("hour", &["hour", "hora"]);
pub const OPERATOR: FieldTags = FieldTags::new("operator", &["operator", "operador"]);
pub const SOFTWARE_VERSION: FieldTags =
    FieldTags::new("software_version", &["software_version", "versao_software"]);
pub const BENCH: FieldTags = FieldTags::new("bench", &["bench", "bancada"]);
pub const TEMPERATURE: FieldTags =
    FieldTags::new("temperature", &["temperature", "temperatura"]);
pub const ACCELERATOR_TYPE: FieldTags =
    FieldTags::new("accelerator_type", &["accelerator_type", "tipo_acelerador"]);
pub const MAIN_COIL_TYPE: FieldTags =
    FieldTags::new("main_coil_type", &["main_coil_type", "tipo_bobina_principal"]);

pub const ROTATION_MOTOR_SPEED: FieldTags = FieldTags::new(
    "rotation_motor_speed",
    &["rotation_motor_speed", "velocidade_rotacao"],
);
pub const ROTATION_MOTOR_ACCELERATION: FieldTags = FieldTags::new(
    "rotation_motor_acceleration",
    &["rotation_motor_acceleration", "aceleracao_rotacao"],
);
pub const COIL_ROTATION_DIRECTION: FieldTags = FieldTags::new(
    "coil_rotation_direction",
    &["coil_rotation_direction", "sentido_rotacao"],
);

pub const INTEGRATOR_GAIN: FieldTags =
    FieldTags::new("integrator_gain", &["integrator_gain", "ganho_integrador"]);
pub const N_INTEGRATION_POINTS: FieldTags = FieldTags::new(
    "n_integration_points",
    &["n_integration_points", "pontos_integracao"],
);
pub const N_TURNS: FieldTags = FieldTags::new("n_turns", &["n_turns", "nr_voltas"]);
pub const ANALYSIS_INTERVAL: FieldTags =
    FieldTags::new("analysis_interval", &["analysis_interval", "intervalo_analise"]);

pub const MAIN_COIL_CURRENT_AVG: FieldTags = FieldTags::new(
    "main_coil_current_avg",
    &["main_coil_current_avg", "corrente_alim_principal_avg"],
);
pub const MAIN_COIL_CURRENT_STD: FieldTags = FieldTags::new(
    "main_coil_current_std",
    &["main_coil_current_std", "corrente_alim_principal_std"],
);
pub const TRIM_COIL_CURRENT_AVG: FieldTags = FieldTags::new(
    "trim_coil_current_avg",
    &["trim_coil_current_avg", "corrente_alim_secundaria_avg"],
);
pub const TRIM_COIL_CURRENT_STD: FieldTags = FieldTags::new(
    "trim_coil_current_std",
    &["trim_coil_current_std", "corrente_alim_secundaria_std"],
);
pub const CH_COIL_CURRENT_AVG: FieldTags = FieldTags::new(
    "ch_coil_current_avg",
    &["ch_coil_current_avg", "corrente_alim_ch_avg"],
);
pub const CH_COIL_CURRENT_STD: FieldTags = FieldTags::new(
    "ch_coil_current_std",
    &["ch_coil_current_std", "corrente_alim_ch_std"],
);
pub const CV_COIL_CURRENT_AVG: FieldTags = FieldTags::new(
    "cv_coil_current_avg",
    &["cv_coil_current_avg", "corrente_alim_cv_avg"],
);
pub const CV_COIL_CURRENT_STD: FieldTags = FieldTags::new(
    "cv_coil_current_std",
    &["cv_coil_current_std", "corrente_alim_cv_std"],
);
pub const QS_COIL_CURRENT_AVG: FieldTags = FieldTags::new(
    "qs_coil_current_avg",
    &["qs_coil_current_avg", "corrente_alim_qs_avg"],
);
pub const QS_COIL_CURRENT_STD: FieldTags = FieldTags::new(
    "qs_coil_current_std",
    &["qs_coil_current_std", "corrente_alim_qs_std"],
);

pub const MAIN_COIL_VOLT_AVG: FieldTags = FieldTags::new(
    "main_coil_volt_avg",
    &["main_coil_volt_avg", "tensao_alim_principal_avg"],
);
pub const MAIN_COIL_VOLT_STD: FieldTags = FieldTags::new(
    "main_coil_volt_std",
    &["main_coil_volt_std", "tensao_alim_principal_std"],
);
pub const MAGNET_RESISTANCE_AVG: FieldTags = FieldTags::new(
    "magnet_resistance_avg",
    &["magnet_resistance_avg", "resistencia_ima_avg"],
);
pub const MAGNET_RESISTANCE_STD: FieldTags = FieldTags::new(
    "magnet_resistance_std",
    &["magnet_resistance_std", "resistencia_ima_std"],
);

pub const ROTATING_COIL_NAME: FieldTags = FieldTags::new(
    "rotating_coil_name",
    &["rotating_coil_name", "nome_bobina_girante"],
);
pub const ROTATING_COIL_TYPE: FieldTags = FieldTags::new(
    "rotating_coil_type",
    &["rotating_coil_type", "tipo_bobina_girante"],
);
pub const ROTATING_COIL_TURNS: FieldTags = FieldTags::new(
    "rotating_coil_turns",
    &["rotating_coil_turns", "espiras_bobina_girante"],
);
pub const RADIUS1: FieldTags = FieldTags::new("radius1", &["radius1", "raio1"]);
pub const RADIUS2: FieldTags = FieldTags::new("radius2", &["radius2", "raio2"]);
pub const RADIUS_DELTA: FieldTags =
    FieldTags::new("radius_delta", &["radius_delta", "delta_raio"]);
pub const TRIGGER_REF: FieldTags =
    FieldTags::new("trigger_ref", &["trigger_ref", "referencia_trigger"]);
pub const COMMENTS: FieldTags = FieldTags::new("comments", &["comments", "comentarios"]);

/// Every field the scalar parser reads, in file-header order.
pub const ALL_FIELDS: [FieldTags; 38] = [
    MAGNET_NAME,
    FILENAME,
    DATE,
    HOUR,
    OPERATOR,
    SOFTWARE_VERSION,
    BENCH,
    TEMPERATURE,
    ACCELERATOR_TYPE,
    MAIN_COIL_TYPE,
    ROTATION_MOTOR_SPEED,
    ROTATION_MOTOR_ACCELERATION,
    COIL_ROTATION_DIRECTION,
    INTEGRATOR_GAIN,
    N_INTEGRATION_POINTS,
    N_TURNS,
    ANALYSIS_INTERVAL,
    MAIN_COIL_CURRENT_AVG,
    MAIN_COIL_CURRENT_STD,
    TRIM_COIL_CURRENT_AVG,
    TRIM_COIL_CURRENT_STD,
    CH_COIL_CURRENT_AVG,
    CH_COIL_CURRENT_STD,
    CV_COIL_CURRENT_AVG,
    CV_COIL_CURRENT_STD,
    QS_COIL_CURRENT_AVG,
    QS_COIL_CURRENT_STD,
    MAIN_COIL_VOLT_AVG,
    MAIN_COIL_VOLT_STD,
    MAGNET_RESISTANCE_AVG,
    MAGNET_RESISTANCE_STD,
    ROTATING_COIL_NAME,
    ROTATING_COIL_TYPE,
    ROTATING_COIL_TURNS,
    RADIUS1,
    RADIUS2,
    RADIUS_DELTA,
    TRIGGER_REF,
];

pub fn field_tags(field: &str) -> Option<&'static FieldTags> {
    ALL_FIELDS
        .iter()
        .chain(std::iter::once(&COMMENTS))
        .find(|entry| entry.field == field)
}
