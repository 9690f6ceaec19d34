use crate::ScanReport;
use std::process::ExitCode;

/// Process exit status of a scan.
///
/// - `Success` (0): no misspellings
/// - `Failure` (1): misspellings were reported
/// - `Error` (2): the scan could not run (configuration, spellchecker, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_report(report: &ScanReport) -> Self {
        if report.is_pass() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Issue, Misspelling};
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn test_from_report() {
        let mut report = ScanReport::default();
        assert_eq!(ExitStatus::from_report(&report), ExitStatus::Success);

        report.issues.push(Issue {
            misspelling: Misspelling::new("erorr", vec!["error".to_string()]),
            file: PathBuf::from("/p/Erorr.php"),
            line: 0,
            column: 0,
        });
        assert_eq!(ExitStatus::from_report(&report), ExitStatus::Failure);
    }
}
