//! Property-based tests for awscost using proptest

use awscost::{
    date_window::{DATE_FORMAT, DateSelection, DateWindow, parse_date},
    normalize::normalize,
    response::{CostAndUsage, Group, ResultByTime, TimePeriod},
    types::CostSummary,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Strategies for generating test data

prop_compose! {
    fn arb_date()(days in 0i64..3650) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap() + Duration::days(days)
    }
}

prop_compose! {
    fn arb_amount()(cents in 0u64..10_000_000, scale in 0usize..3) -> String {
        // Cost Explorer sends up to ten fractional digits
        let value = cents as f64 / 100.0;
        match scale {
            0 => format!("{value:.2}"),
            1 => format!("{value:.4}"),
            _ => format!("{value:.10}"),
        }
    }
}

prop_compose! {
    fn arb_group()(
        service in prop::sample::select(vec![
            "AmazonEC2",
            "AmazonS3",
            "AWSLambda",
            "Amazon Relational Database Service",
            "AWS Cost Explorer",
            "Tax",
        ]),
        amount in arb_amount(),
    ) -> Group {
        Group::unblended(service, amount, "USD")
    }
}

prop_compose! {
    fn arb_period()(
        date in arb_date(),
        groups in prop::collection::vec(arb_group(), 0..8),
    ) -> ResultByTime {
        ResultByTime {
            time_period: TimePeriod {
                start: date.format(DATE_FORMAT).to_string(),
                end: (date + Duration::days(1)).format(DATE_FORMAT).to_string(),
            },
            groups,
        }
    }
}

proptest! {
    #[test]
    fn test_single_day_window(date in arb_date(), today in arb_date()) {
        let window = DateWindow::resolve(&DateSelection::Single(date), today).unwrap();

        prop_assert_eq!(window.start, date);
        prop_assert_eq!(window.end, date + Duration::days(1));
        prop_assert_eq!(window.days(), 1);
        prop_assert_eq!(&window.label, &date.format(DATE_FORMAT).to_string());
    }

    #[test]
    fn test_range_window(start in arb_date(), len in 0i64..400) {
        let end = start + Duration::days(len);
        let selection = DateSelection::Range { start, end };
        let window = DateWindow::resolve(&selection, start).unwrap();

        prop_assert_eq!(window.start, start);
        prop_assert_eq!(window.end, end + Duration::days(1));
        prop_assert_eq!(window.days(), len + 1);
        prop_assert_eq!(
            &window.label,
            &format!("{}_to_{}", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
        );
    }

    #[test]
    fn test_reversed_range_is_rejected(start in arb_date(), back in 1i64..400) {
        let end = start - Duration::days(back);
        let selection = DateSelection::Range { start, end };
        prop_assert!(DateWindow::resolve(&selection, start).is_err());

        let start_str = start.format(DATE_FORMAT).to_string();
        let end_str = end.format(DATE_FORMAT).to_string();
        prop_assert!(DateSelection::from_inputs(None, Some(&start_str), Some(&end_str)).is_err());
    }

    #[test]
    fn test_yesterday_window(today in arb_date()) {
        let window = DateWindow::resolve(&DateSelection::Yesterday, today).unwrap();

        prop_assert_eq!(window.start, today - Duration::days(1));
        prop_assert_eq!(window.end, today);
        prop_assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_formatted_dates_parse_back(date in arb_date()) {
        let text = date.format(DATE_FORMAT).to_string();
        prop_assert_eq!(parse_date(&text).unwrap(), date);
    }

    #[test]
    fn test_one_record_per_group(periods in prop::collection::vec(arb_period(), 0..10)) {
        let expected: usize = periods.iter().map(|p| p.groups.len()).sum();
        let response = CostAndUsage { results_by_time: periods.clone() };

        let records = normalize(&response).unwrap();
        prop_assert_eq!(records.len(), expected);

        // Records keep response order and take their date from the period
        let expected_dates: Vec<&str> = periods
            .iter()
            .flat_map(|p| p.groups.iter().map(move |_| p.time_period.start.as_str()))
            .collect();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        prop_assert_eq!(dates, expected_dates);
    }

    #[test]
    fn test_total_is_sum_of_amounts(periods in prop::collection::vec(arb_period(), 0..10)) {
        let response = CostAndUsage { results_by_time: periods };
        let records = normalize(&response).unwrap();
        let summary = CostSummary::from_records(&records);

        let sum: f64 = records.iter().map(|r| r.amount).sum();
        prop_assert!((summary.total - sum).abs() < 1e-6);
        prop_assert!(summary.total >= 0.0);
        prop_assert_eq!(summary.record_count, records.len());
    }
}
