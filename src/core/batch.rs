use crate::core::{Pipeline, Storage};
use crate::domain::calculator::calculate;
use crate::domain::model::{Concentration, DoseRecord, DoseRequest};
use crate::utils::error::{DoseError, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct InputRow {
    weight: String,
    #[serde(default)]
    concentration: Option<String>,
}

/// 讀取體重 CSV，逐列計算，再寫出報表 CSV
pub struct CsvBatchPipeline<S: Storage> {
    storage: S,
    input: PathBuf,
    output: PathBuf,
    default_concentration: Concentration,
}

impl<S: Storage> CsvBatchPipeline<S> {
    pub fn new(
        storage: S,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        default_concentration: Concentration,
    ) -> Self {
        Self {
            storage,
            input: input.into(),
            output: output.into(),
            default_concentration,
        }
    }

    fn resolve_concentration(&self, row: usize, cell: Option<&str>) -> Result<Concentration> {
        match cell.map(str::trim) {
            None | Some("") => Ok(self.default_concentration),
            Some(text) => text.parse().map_err(|_| DoseError::BatchInputError {
                row,
                message: format!("unknown concentration '{}' (expected 120 or 250)", text),
            }),
        }
    }
}

impl<S: Storage> Pipeline for CsvBatchPipeline<S> {
    fn extract(&self) -> Result<Vec<DoseRequest>> {
        tracing::debug!("Reading weights from: {}", self.input.display());
        let data = self.storage.read_file(&self.input)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut requests = Vec::new();
        for (index, row) in reader.deserialize::<InputRow>().enumerate() {
            let row_number = index + 1;
            let row = row?;
            let concentration = self.resolve_concentration(row_number, row.concentration.as_deref())?;
            requests.push(DoseRequest {
                row: row_number,
                weight_text: row.weight,
                concentration,
            });
        }

        Ok(requests)
    }

    fn transform(&self, requests: Vec<DoseRequest>) -> Result<Vec<DoseRecord>> {
        let records = requests
            .iter()
            .map(|request| {
                let result = calculate(&request.weight_text, request.concentration);
                if !result.is_valid() {
                    tracing::debug!(row = request.row, weight = %request.weight_text, "invalid weight");
                }
                DoseRecord::from_result(request, &result)
            })
            .collect();

        Ok(records)
    }

    fn load(&self, records: &[DoseRecord]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        let data = writer.into_inner().map_err(|e| DoseError::IoError(e.into_error()))?;
        self.storage.write_file(&self.output, &data)?;

        Ok(self.output.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(Path::new(path))
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                DoseError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_extract_uses_default_concentration_for_empty_cells() {
        let storage = MockStorage::with_file("in.csv", "weight,concentration\n10,120\n12,\n");
        let pipeline = CsvBatchPipeline::new(storage, "in.csv", "out.csv", Concentration::Mg250);

        let requests = pipeline.extract().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].concentration, Concentration::Mg120);
        assert_eq!(requests[1].concentration, Concentration::Mg250);
        assert_eq!(requests[1].row, 2);
    }

    #[test]
    fn test_infinite_weight_leaves_numeric_cells_empty() {
        let storage = MockStorage::with_file("in.csv", "weight\nInfinity\n");
        let pipeline = CsvBatchPipeline::new(storage, "in.csv", "out.csv", Concentration::Mg250);

        let records = pipeline.transform(pipeline.extract().unwrap()).unwrap();
        assert!(records[0].is_valid());
        assert_eq!(records[0].volume_ml, None);

        pipeline.load(&records).unwrap();
        let report = pipeline.storage.get_file("out.csv").unwrap();
        assert_eq!(report.lines().nth(1), Some("Infinity,250,,,Infinity"));
        assert!(!report.contains("inf,"));
    }

    #[test]
    fn test_extract_without_concentration_column() {
        let storage = MockStorage::with_file("in.csv", "weight\n8\n");
        let pipeline = CsvBatchPipeline::new(storage, "in.csv", "out.csv", Concentration::Mg120);

        let requests = pipeline.extract().unwrap();
        assert_eq!(requests[0].weight_text, "8");
        assert_eq!(requests[0].concentration, Concentration::Mg120);
    }

    #[test]
    fn test_extract_rejects_unknown_concentration() {
        let storage = MockStorage::with_file("in.csv", "weight,concentration\n10,250\n10,500\n");
        let pipeline = CsvBatchPipeline::new(storage, "in.csv", "out.csv", Concentration::Mg250);

        match pipeline.extract() {
            Err(DoseError::BatchInputError { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected batch input error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_missing_input_file() {
        let pipeline = CsvBatchPipeline::new(
            MockStorage::default(),
            "missing.csv",
            "out.csv",
            Concentration::Mg250,
        );
        assert!(matches!(pipeline.extract(), Err(DoseError::IoError(_))));
    }

    #[test]
    fn test_transform_and_load_write_report() {
        let storage = MockStorage::with_file("in.csv", "weight,concentration\n10,120\nabc,250\n");
        let pipeline = CsvBatchPipeline::new(storage, "in.csv", "out.csv", Concentration::Mg250);

        let requests = pipeline.extract().unwrap();
        let records = pipeline.transform(requests).unwrap();
        assert!(records[0].is_valid());
        assert!(!records[1].is_valid());

        let output = pipeline.load(&records).unwrap();
        assert_eq!(output, "out.csv");

        let report = pipeline.storage.get_file("out.csv").unwrap();
        let mut lines = report.lines();
        assert_eq!(
            lines.next(),
            Some("weight,concentration,dose_mg,volume_ml,result")
        );
        assert_eq!(lines.next(), Some("10,120,150.0,6.3,6.3"));
        assert_eq!(
            lines.next(),
            Some("abc,250,,,Sila masukkan nombor berat yang sah")
        );
    }
}
