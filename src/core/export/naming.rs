//! Output file naming

use crate::domain::ExportJob;
use std::path::PathBuf;

const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a notebook name usable as a file name
///
/// Characters Windows forbids in file names, control characters, and trailing
/// dots or spaces are each replaced with `_`. Distinct names may map to the
/// same result; callers do not deduplicate.
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let kept = sanitized.trim_end_matches(['.', ' ']).chars().count();
    let total = sanitized.chars().count();
    if kept < total {
        sanitized = sanitized.chars().take(kept).collect();
        sanitized.extend(std::iter::repeat('_').take(total - kept));
    }

    if sanitized.is_empty() {
        sanitized.push('_');
    }
    sanitized
}

/// Path the job's artifact is expected at
pub fn expected_output_path(job: &ExportJob) -> PathBuf {
    let file_name = format!(
        "{}{}",
        sanitize_file_name(job.target_name()),
        job.output_kind().extension()
    );
    job.destination_dir().join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationHint, NotebookId, OutputKind};
    use std::path::Path;
    use test_case::test_case;

    #[test_case("Work", "Work" ; "plain name")]
    #[test_case("Q1/Q2 Plans", "Q1_Q2 Plans" ; "slash")]
    #[test_case("a<b>c:d\"e|f?g*h\\i", "a_b_c_d_e_f_g_h_i" ; "every illegal char")]
    #[test_case("Tab\there", "Tab_here" ; "control char")]
    #[test_case("Notes.", "Notes_" ; "trailing dot")]
    #[test_case("Notes. ", "Notes__" ; "trailing dot and space")]
    #[test_case("", "_" ; "empty")]
    #[test_case("Überblick – 2025", "Überblick – 2025" ; "unicode kept")]
    fn test_sanitize_file_name(input: &str, expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[test]
    fn test_expected_output_path() {
        let job = ExportJob::new(
            NotebookId::new("{1}").unwrap(),
            "Team: Minutes",
            LocationHint::Local,
            "/backups",
            OutputKind::Xps,
        )
        .unwrap();

        assert_eq!(
            expected_output_path(&job),
            Path::new("/backups").join("Team_ Minutes.xps")
        );
    }

    #[test]
    fn test_colliding_names_share_a_path() {
        let a = ExportJob::new(
            NotebookId::new("{A}").unwrap(),
            "Plans?",
            LocationHint::Local,
            "/backups",
            OutputKind::Pdf,
        )
        .unwrap();
        let b = ExportJob::new(
            NotebookId::new("{B}").unwrap(),
            "Plans*",
            LocationHint::Local,
            "/backups",
            OutputKind::Pdf,
        )
        .unwrap();

        assert_eq!(expected_output_path(&a), expected_output_path(&b));
    }
}
