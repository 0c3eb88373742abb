//! Integration tests for the local CSV loader.

use std::fs;

use chrono::NaiveDate;
use epi_ingest::read_delimited;
use epi_model::{ErrorKind, FECHA_CARGA};
use epi_output::{OUTPUT_SEPARATOR, OutputError, write_dataset_csv};
use epi_transform::transform_dataset;
use polars::prelude::*;
use tempfile::TempDir;

const RAW: &str = "ANO_ESTADISTICO|SEMANA_ESTADISTICA|GRUPO_EDAD|SEXO|REGION|POBLACION|MUERTES_OBS\n\
                   2020|1|0 a 14|1| Metropolitana |100000|50\n\
                   2020|1|15 a 29|2|Valparaiso|45000|3\n\
                   2020|2|80 +|1|Biobio |20000|75\n\
                   2020|2|Total|9|Maule|165000|128\n";

fn transformed() -> DataFrame {
    let raw = TempDir::new().unwrap();
    fs::write(raw.path().join("raw.csv"), RAW).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    transform_dataset(raw.path(), "raw.csv", date).unwrap()
}

#[test]
fn round_trip_preserves_values() {
    let out = TempDir::new().unwrap();
    let df = transformed();

    let path = write_dataset_csv(&df, out.path(), "transformed.csv").unwrap();
    let back = read_delimited(&path, OUTPUT_SEPARATOR).unwrap();

    assert_eq!(back.height(), df.height());
    assert_eq!(back.get_column_names(), df.get_column_names());
    let expected = df.drop(FECHA_CARGA).unwrap();
    let actual = back.drop(FECHA_CARGA).unwrap();
    assert!(actual.equals_missing(&expected));

    let dates = back
        .column(FECHA_CARGA)
        .unwrap()
        .cast(&DataType::String)
        .unwrap();
    let dates: Vec<Option<&str>> = dates.str().unwrap().into_iter().collect();
    assert_eq!(dates, vec![Some("2026-10-18"); 4]);
}

#[test]
fn writes_iso_dates_and_empty_nulls() {
    let out = TempDir::new().unwrap();

    let path = write_dataset_csv(&transformed(), out.path(), "transformed.csv").unwrap();

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "ANO_ESTADISTICO,SEMANA_ESTADISTICA,GRUPO_EDAD,SEXO,REGION,POBLACION,MUERTES_OBS,\
         EDAD_MIN,EDAD_MAX,EDAD_PROMEDIO,FECHA_CARGA"
    );
    assert!(lines[1].starts_with("2020,1,0 a 14,M,Metropolitana,100000,50,0,14,"));
    assert!(lines[1].ends_with(",2026-10-18"));
    assert_eq!(lines[4], "2020,2,Total,,Maule,165000,128,,,,2026-10-18");
}

#[test]
fn creates_missing_directories() {
    let out = TempDir::new().unwrap();
    let nested = out.path().join("data").join("transformed");

    let path = write_dataset_csv(&transformed(), &nested, "transformed.csv").unwrap();

    assert_eq!(path, nested.join("transformed.csv"));
    assert!(path.is_file());
}

#[test]
fn overwrites_existing_file() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("transformed.csv"), "stale content\n").unwrap();

    let path = write_dataset_csv(&transformed(), out.path(), "transformed.csv").unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn empty_dataset_creates_nothing() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("transformed");
    let empty = transformed().head(Some(0));

    let err = write_dataset_csv(&empty, &target, "transformed.csv").unwrap_err();

    assert!(matches!(err, OutputError::EmptyDataset));
    assert_eq!(err.kind(), ErrorKind::ContractViolation);
    assert!(!target.exists());
}
