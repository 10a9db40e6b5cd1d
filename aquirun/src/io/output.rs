//! Result-file loading from a scenario's `Output/` directory.

use std::fs;
use std::io::ErrorKind;

use tracing::debug;

use crate::core::table::{DateColumns, OutputTable, parse_table};
use crate::error::{AquirunError, Result};
use crate::io::scenario::Scenario;

pub const DEFAULT_OUTPUT_SUFFIX: &str = ".out";

/// Loader for whitespace-delimited result files.
///
/// The date column names and the result-file suffix are fixed per instance;
/// different model components write different casings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLoader {
    pub date_columns: DateColumns,
    pub output_suffix: String,
}

impl Default for OutputLoader {
    fn default() -> Self {
        Self {
            date_columns: DateColumns::default(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl OutputLoader {
    /// Load `Output/<file_name>` as a typed table.
    ///
    /// When `column_names` is supplied the file is treated as headerless and
    /// the names apply positionally; otherwise the first line is the header.
    pub fn load_named(
        &self,
        scenario: &Scenario,
        file_name: &str,
        column_names: Option<&[String]>,
    ) -> Result<OutputTable> {
        let path = scenario.output_dir().join(file_name);
        if !path.is_file() {
            return Err(AquirunError::FileNotFound(path));
        }
        let contents =
            fs::read_to_string(&path).map_err(|err| AquirunError::io(&path, err))?;
        debug!(path = %path.display(), "loading result file");
        parse_table(&contents, column_names, &self.date_columns)
    }

    /// List result-file names in `Output/`, sorted, without parsing them.
    pub fn load_any(&self, scenario: &Scenario) -> Result<Vec<String>> {
        let dir = scenario.output_dir();
        let entries = fs::read_dir(&dir).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                AquirunError::DirectoryNotFound(dir.clone())
            } else {
                AquirunError::io(&dir, err)
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| AquirunError::io(&dir, err))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(&self.output_suffix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Column;
    use crate::test_support::write_output;
    use chrono::NaiveDate;

    #[test]
    fn load_named_derives_date_and_types_columns() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_output(
            temp.path(),
            "Q3K3S1_TimeSeries1.out",
            "Day Month Year GWL\n15 6 2020 12.34\n",
        );
        let scenario = Scenario::open(temp.path()).expect("open");

        let table = OutputLoader::default()
            .load_named(&scenario, "Q3K3S1_TimeSeries1.out", None)
            .expect("load");
        assert_eq!(
            table.dates(),
            Some(&[NaiveDate::from_ymd_opt(2020, 6, 15).expect("date")][..])
        );
        assert_eq!(table.column("GWL"), Some(&Column::Float(vec![12.34])));
    }

    #[test]
    fn load_named_missing_file_fails() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_output(temp.path(), "present.out", "n\n1\n");
        let scenario = Scenario::open(temp.path()).expect("open");

        let err = OutputLoader::default()
            .load_named(&scenario, "absent.out", None)
            .unwrap_err();
        assert!(matches!(err, AquirunError::FileNotFound(_)));
    }

    #[test]
    fn load_named_applies_positional_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_output(temp.path(), "raw.out", "1 2.5\n2 3.5\n");
        let scenario = Scenario::open(temp.path()).expect("open");

        let names: Vec<String> = ["step", "gwl"].iter().map(|s| (*s).to_string()).collect();
        let table = OutputLoader::default()
            .load_named(&scenario, "raw.out", Some(&names))
            .expect("load");
        assert_eq!(table.column("step"), Some(&Column::Int(vec![1, 2])));
        assert_eq!(table.column("gwl"), Some(&Column::Float(vec![2.5, 3.5])));
    }

    #[test]
    fn load_any_lists_only_result_files_sorted() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_output(temp.path(), "b_TimeSeries1.out", "n\n1\n");
        write_output(temp.path(), "a_TimeSeries1.out", "n\n1\n");
        write_output(temp.path(), "notes.txt", "ignore");
        let scenario = Scenario::open(temp.path()).expect("open");

        let names = OutputLoader::default().load_any(&scenario).expect("list");
        assert_eq!(names, ["a_TimeSeries1.out", "b_TimeSeries1.out"]);
    }

    #[test]
    fn load_any_missing_output_dir_fails() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scenario = Scenario::open(temp.path()).expect("open");
        let err = OutputLoader::default().load_any(&scenario).unwrap_err();
        assert!(matches!(err, AquirunError::DirectoryNotFound(_)));
    }
}
