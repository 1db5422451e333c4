use anyhow::Result;
use pcm_dose::{BatchEngine, Concentration, CsvBatchPipeline, DoseError, LocalStorage};
use tempfile::TempDir;

#[test]
fn test_end_to_end_batch_with_local_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("weights.csv"),
        "weight,concentration\n10,250\n10,120\n,250\nabc,\n0,\n",
    )?;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = CsvBatchPipeline::new(storage, "weights.csv", "out/report.csv", Concentration::Mg250);
    let summary = BatchEngine::new(pipeline).run()?;

    assert_eq!(summary.total, 5);
    assert_eq!(summary.valid, 3);
    assert_eq!(summary.invalid, 2);
    assert_eq!(summary.output_path, "out/report.csv");

    let report = std::fs::read_to_string(temp_dir.path().join("out/report.csv"))?;
    let mut reader = csv::Reader::from_reader(report.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;

    assert_eq!(&rows[0][4], "3.0");
    assert_eq!(&rows[1][4], "6.3");
    assert_eq!(&rows[2][3], "");
    assert_eq!(&rows[2][4], "Sila masukkan nombor berat yang sah");
    assert_eq!(&rows[3][1], "250");
    assert_eq!(&rows[4][4], "0.0");

    Ok(())
}

#[test]
fn test_missing_weight_column_is_a_csv_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("weights.csv"), "mass\n10\n")?;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = CsvBatchPipeline::new(storage, "weights.csv", "report.csv", Concentration::Mg250);

    let err = BatchEngine::new(pipeline).run().unwrap_err();
    assert!(matches!(err, DoseError::CsvError(_)));
    assert!(!temp_dir.path().join("report.csv").exists());

    Ok(())
}

#[test]
fn test_unknown_concentration_aborts_before_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("weights.csv"), "weight,concentration\n10,125\n")?;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = CsvBatchPipeline::new(storage, "weights.csv", "report.csv", Concentration::Mg250);

    let err = BatchEngine::new(pipeline).run().unwrap_err();
    assert!(matches!(err, DoseError::BatchInputError { row: 1, .. }));
    assert!(!temp_dir.path().join("report.csv").exists());

    Ok(())
}
