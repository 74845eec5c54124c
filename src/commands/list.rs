use crate::commands::Out;
use crate::{render, DataService};

/// Lists every sheet in the workbook.
pub fn sheets(service: &DataService) -> Out<Vec<String>> {
    let names = service.sheet_names().to_vec();
    Out::new(listing(service, &names, "No sheets found!"), names)
}

/// Lists the years that have at least one month sheet, oldest first.
pub fn years(service: &DataService) -> Out<Vec<String>> {
    let years = service.available_years();
    Out::new(listing(service, &years, "No data found!"), years)
}

/// Lists the month sheets of `year` in calendar order. Without a year, the latest year is used.
pub fn months(service: &DataService, year: Option<&str>) -> Out<Vec<String>> {
    let year = match year {
        Some(year) => year.to_string(),
        None => match service.available_years().pop() {
            Some(latest) => latest,
            None => return Out::new(listing(service, &[], "No data found!"), Vec::new()),
        },
    };
    let months = service.months_for_year(&year);
    let empty = format!("No months found for {year}!");
    Out::new(listing(service, &months, &empty), months)
}

fn listing(service: &DataService, items: &[String], empty: &str) -> String {
    let mut text = String::new();
    if let Some(e) = service.init_error() {
        text.push_str(&format!("Unable to read the data source: {e}\n"));
    }
    if items.is_empty() {
        text.push_str(empty);
        text.push('\n');
    } else {
        text.push_str(&render::list(items));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_sheets() {
        let service = TestEnv::new().await.service().await;
        let out = sheets(&service);
        assert_eq!(out.structure().unwrap().len(), 5);
        assert!(out.message().starts_with("December 2024\nJuly 2025\n"));
    }

    #[tokio::test]
    async fn test_years() {
        let service = TestEnv::new().await.service().await;
        let out = years(&service);
        assert_eq!(out.message(), "2024\n2025\n");
    }

    #[tokio::test]
    async fn test_months_defaults_to_latest_year() {
        let service = TestEnv::new().await.service().await;
        let out = months(&service, None);
        assert_eq!(out.structure().unwrap(), &vec!["July", "August"]);
    }

    #[tokio::test]
    async fn test_months_for_empty_year() {
        let service = TestEnv::new().await.service().await;
        let out = months(&service, Some("1999"));
        assert!(out.structure().unwrap().is_empty());
        assert_eq!(out.message(), "No months found for 1999!\n");
    }
}
