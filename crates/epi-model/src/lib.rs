//! Shared model for the epidemiological-week ETL.
//!
//! This crate holds everything the pipeline stages agree on:
//!
//! - **columns**: raw and derived column names, required-column checks
//! - **age**: the `GRUPO_EDAD` age-range rule
//! - **sex**: the `SEXO` categorical code
//! - **error**: the error taxonomy shared by every stage
//! - **cell**: reading single `AnyValue` cells

pub mod age;
pub mod cell;
pub mod columns;
pub mod error;
pub mod sex;

pub use age::{AgeBoundError, AgeRange, OPEN_ENDED_MAX_AGE, parse_age_range};
pub use columns::{
    ANO_ESTADISTICO, DERIVED_COLUMNS, EDAD_MAX, EDAD_MIN, EDAD_PROMEDIO, FECHA_CARGA, GRUPO_EDAD,
    MUERTES_OBS, POBLACION, REGION, REQUIRED_COLUMNS, SEMANA_ESTADISTICA, SEXO,
    missing_required_columns,
};
pub use error::ErrorKind;
pub use sex::Sex;
