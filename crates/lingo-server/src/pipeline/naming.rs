//! Record identities and timestamps.

use jiff::Zoned;

/// Reduces free text to a file-name-safe identity fragment.
///
/// Keeps alphanumerics, spaces, `-` and `_`, trims the result and turns
/// the remaining spaces into underscores.
pub fn sanitize_identity(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    kept.trim().replace(' ', "_")
}

/// Identity of an extraction record: `{YYYYMMDD_HHMM}_{employer}`.
pub(crate) fn extraction_identity(now: &Zoned, employer: &str) -> String {
    format!("{}_{}", now.strftime("%Y%m%d_%H%M"), sanitize_identity(employer))
}

/// Identity of a task record: `{YYYYMMDD_HHMMSS}_{name}`.
pub(crate) fn task_identity(now: &Zoned, name: &str) -> String {
    format!("{}_{}", now.strftime("%Y%m%d_%H%M%S"), sanitize_identity(name))
}

/// Upload date stored in extraction metadata.
pub(crate) fn upload_date(now: &Zoned) -> String {
    now.strftime("%Y-%m-%d %H:%M").to_string()
}

/// Submission time stored in task records.
pub(crate) fn submitted_at(now: &Zoned) -> String {
    now.strftime("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use jiff::civil;
    use jiff::tz::TimeZone;

    use super::*;

    fn at() -> anyhow::Result<Zoned> {
        Ok(civil::date(2024, 1, 2)
            .at(3, 4, 5, 0)
            .to_zoned(TimeZone::UTC)?)
    }

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_identity("  Acme Corp. (NL)  "), "Acme_Corp_NL");
        assert_eq!(sanitize_identity("a-b_c"), "a-b_c");
        assert_eq!(sanitize_identity("../../etc"), "etc");
        assert_eq!(sanitize_identity("Café Zürich"), "Café_Zürich");
        assert_eq!(sanitize_identity("!!!"), "");
    }

    #[test]
    fn identities_use_minute_and_second_precision() -> anyhow::Result<()> {
        let now = at()?;
        assert_eq!(extraction_identity(&now, "Acme Corp"), "20240102_0304_Acme_Corp");
        assert_eq!(task_identity(&now, "Clean up"), "20240102_030405_Clean_up");
        Ok(())
    }

    #[test]
    fn timestamps() -> anyhow::Result<()> {
        let now = at()?;
        assert_eq!(upload_date(&now), "2024-01-02 03:04");
        assert_eq!(submitted_at(&now), "2024-01-02T03:04:05+00:00");
        Ok(())
    }
}
