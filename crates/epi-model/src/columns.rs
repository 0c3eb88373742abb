//! Column vocabulary of the epidemiological-week dataset.

/// Statistical year.
pub const ANO_ESTADISTICO: &str = "ANO_ESTADISTICO";
/// Epidemiological week within the statistical year.
pub const SEMANA_ESTADISTICA: &str = "SEMANA_ESTADISTICA";
/// Raw age-range label, e.g. `"0 a 14"` or `"80 +"`.
pub const GRUPO_EDAD: &str = "GRUPO_EDAD";
/// Sex code (raw `1`/`2`, transformed `"M"`/`"F"`).
pub const SEXO: &str = "SEXO";
/// Region name.
pub const REGION: &str = "REGION";
/// Population count.
pub const POBLACION: &str = "POBLACION";
/// Observed deaths.
pub const MUERTES_OBS: &str = "MUERTES_OBS";

/// Lower age bound derived from `GRUPO_EDAD`.
pub const EDAD_MIN: &str = "EDAD_MIN";
/// Upper age bound derived from `GRUPO_EDAD`.
pub const EDAD_MAX: &str = "EDAD_MAX";
/// Midpoint of the derived age bounds.
pub const EDAD_PROMEDIO: &str = "EDAD_PROMEDIO";
/// Load date stamped by the run.
pub const FECHA_CARGA: &str = "FECHA_CARGA";

/// Columns every raw dataset must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    ANO_ESTADISTICO,
    SEMANA_ESTADISTICA,
    GRUPO_EDAD,
    SEXO,
    REGION,
    POBLACION,
    MUERTES_OBS,
];

/// Columns appended by the transformer, in output order.
pub const DERIVED_COLUMNS: [&str; 4] = [EDAD_MIN, EDAD_MAX, EDAD_PROMEDIO, FECHA_CARGA];

/// Returns the required columns absent from `present`, in canonical order.
///
/// Matching is exact: `region` does not satisfy `REGION`.
pub fn missing_required_columns<'a, I>(present: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = present.into_iter().collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !present.contains(required))
        .collect()
}
