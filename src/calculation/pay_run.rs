//! Pay run calculation.
//!
//! A pay run is a batch of independent net salary calculations. Entries
//! share no mutable state, so they are computed in parallel with
//! [`rayon`]; results keep the input order and one failing entry does not
//! fail the run.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{PayRunItem, PayRunOutcome, PayRunResult, PayRunTotals};

use super::money;
use super::net_salary::calculate_net_salary;

/// Calculates net salary for every item of a pay run.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_pay_run;
/// use salary_engine::config::PayrollConfig;
/// use salary_engine::models::{Employee, EmploymentType, Gender, PayFrequency, PayRunItem};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Adaeze Nwosu".to_string(),
///     gender: Gender::Female,
///     employment_type: EmploymentType::FullTime,
///     pay_frequency: PayFrequency::Monthly,
///     is_paye_applicable: false,
///     is_pension_applicable: false,
///     is_nhf_applicable: false,
///     is_nsitf_applicable: false,
/// };
/// let items = vec![PayRunItem {
///     employee,
///     gross_salary: Decimal::from(50_000),
///     components: vec![],
/// }];
///
/// let run = calculate_pay_run(&items, &PayrollConfig::finance_act_2023()).unwrap();
/// assert_eq!(run.totals.employees_paid, 1);
/// assert_eq!(run.totals.net_salary, Decimal::from(50_000));
/// ```
///
/// # Errors
///
/// Individual entry failures are reported inside the result. The run
/// itself only fails if the totals overflow.
pub fn calculate_pay_run(
    items: &[PayRunItem],
    config: &PayrollConfig,
) -> EngineResult<PayRunResult> {
    let entries: Vec<PayRunOutcome> = items
        .par_iter()
        .map(|item| {
            match calculate_net_salary(&item.employee, item.gross_salary, &item.components, config)
            {
                Ok(calculation) => PayRunOutcome::Calculated {
                    calculation: Box::new(calculation),
                },
                Err(err) => {
                    warn!(
                        employee_id = %item.employee.id,
                        error = %err,
                        "Pay run entry failed"
                    );
                    PayRunOutcome::Failed {
                        employee_id: item.employee.id.clone(),
                        error: err.to_string(),
                    }
                }
            }
        })
        .collect();

    let totals = summarize(&entries)?;
    info!(
        employees_paid = totals.employees_paid,
        employees_failed = totals.employees_failed,
        net_salary = %totals.net_salary.round_dp(2),
        "Pay run calculated"
    );

    Ok(PayRunResult { entries, totals })
}

fn summarize(entries: &[PayRunOutcome]) -> EngineResult<PayRunTotals> {
    let mut totals = PayRunTotals::default();

    for entry in entries {
        let Some(calculation) = entry.calculation() else {
            totals.employees_failed += 1;
            continue;
        };
        let p = &calculation.per_period;
        totals.employees_paid += 1;
        totals.gross_salary = money::add(totals.gross_salary, p.gross_salary, "pay run gross")?;
        totals.pension_employee =
            money::add(totals.pension_employee, p.pension_employee, "pay run pension")?;
        totals.pension_employer =
            money::add(totals.pension_employer, p.pension_employer, "pay run pension")?;
        totals.nhf = money::add(totals.nhf, p.nhf, "pay run NHF")?;
        totals.nsitf = money::add(totals.nsitf, p.nsitf, "pay run NSITF")?;
        totals.paye_tax = money::add(totals.paye_tax, p.paye_tax, "pay run PAYE")?;
        totals.net_salary = money::add(totals.net_salary, p.net_salary, "pay run net")?;
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmploymentType, Gender, PayFrequency};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_item(id: &str, gross: &str) -> PayRunItem {
        PayRunItem {
            employee: Employee {
                id: id.to_string(),
                name: format!("Employee {}", id),
                gender: Gender::Male,
                employment_type: EmploymentType::FullTime,
                pay_frequency: PayFrequency::Monthly,
                is_paye_applicable: true,
                is_pension_applicable: true,
                is_nhf_applicable: true,
                is_nsitf_applicable: true,
            },
            gross_salary: dec(gross),
            components: vec![],
        }
    }

    #[test]
    fn test_entries_keep_input_order() {
        let items: Vec<PayRunItem> = (1..=50)
            .map(|i| create_item(&format!("emp_{:03}", i), &format!("{}", i * 10_000)))
            .collect();

        let run = calculate_pay_run(&items, &PayrollConfig::finance_act_2023()).unwrap();

        let ids: Vec<&str> = run
            .entries
            .iter()
            .map(|e| e.calculation().unwrap().employee_id.as_str())
            .collect();
        let expected: Vec<String> = (1..=50).map(|i| format!("emp_{:03}", i)).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_failed_entry_does_not_fail_run() {
        let items = vec![
            create_item("emp_001", "200000"),
            create_item("emp_002", "0"),
            create_item("emp_003", "200000"),
        ];

        let run = calculate_pay_run(&items, &PayrollConfig::finance_act_2023()).unwrap();

        assert_eq!(run.totals.employees_paid, 2);
        assert_eq!(run.totals.employees_failed, 1);
        match &run.entries[1] {
            PayRunOutcome::Failed { employee_id, error } => {
                assert_eq!(employee_id, "emp_002");
                assert!(error.contains("gross salary must be > 0"));
            }
            other => panic!("Expected failed entry, got {:?}", other),
        }
    }

    #[test]
    fn test_totals_sum_successful_entries() {
        let items = vec![
            create_item("emp_001", "200000"),
            create_item("emp_002", "200000"),
        ];

        let run = calculate_pay_run(&items, &PayrollConfig::finance_act_2023()).unwrap();

        assert_eq!(run.totals.gross_salary, dec("400000"));
        assert_eq!(run.totals.pension_employee, dec("32000"));
        assert_eq!(run.totals.pension_employer, dec("40000"));
        assert_eq!(run.totals.nhf, dec("10000"));
        assert_eq!(run.totals.nsitf, dec("4000"));
        assert_eq!(run.totals.paye_tax.round_dp(2), dec("34749.33"));
        assert_eq!(run.totals.net_salary.round_dp(2), dec("319250.67"));
    }

    #[test]
    fn test_empty_run() {
        let run = calculate_pay_run(&[], &PayrollConfig::finance_act_2023()).unwrap();
        assert!(run.entries.is_empty());
        assert_eq!(run.totals, PayRunTotals::default());
    }
}
