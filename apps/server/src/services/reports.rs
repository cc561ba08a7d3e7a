//! Reporting parameter validation and delegation.

use chrono::NaiveDate;

use crate::{
    db::ReportRepository,
    models::report::{ClinicVisitReport, TopDiseaseReport},
    Error, Result,
};

const DEFAULT_TOP_DISEASE_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
}

impl ReportService {
    pub fn new(repo: ReportRepository) -> Self {
        Self { repo }
    }

    pub async fn clinic_visits(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<ClinicVisitReport>> {
        let (start, end) = parse_range(start_date, end_date)?;
        self.repo.clinic_visits(start, end).await
    }

    pub async fn top_diseases(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<TopDiseaseReport>> {
        let (start, end) = parse_range(start_date, end_date)?;
        let limit = match limit {
            Some(l) if l > 0 => l,
            _ => DEFAULT_TOP_DISEASE_LIMIT,
        };
        self.repo.top_diseases(start, end, limit).await
    }
}

fn parse_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    let (Some(start_raw), Some(end_raw)) = (start_date, end_date) else {
        return Err(Error::Validation(
            "start_date and end_date are required".to_string(),
        ));
    };

    let parse = |raw: &str| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| Error::Validation("invalid date format, please use YYYY-MM-DD".to_string()))
    };
    let start = parse(start_raw)?;
    let end = parse(end_raw)?;

    if end < start {
        return Err(Error::Validation(
            "end_date cannot be before start_date".to_string(),
        ));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_range() {
        let (start, end) = parse_range(Some("2025-08-01"), Some("2025-08-31")).unwrap();
        assert!(end > start);
    }

    #[test]
    fn rejects_missing_inverted_or_malformed_ranges() {
        assert!(parse_range(None, Some("2025-08-31")).is_err());
        assert!(parse_range(Some("2025-08-31"), Some("2025-08-01")).is_err());
        assert!(parse_range(Some("31-08-2025"), Some("2025-08-31")).is_err());
    }
}
