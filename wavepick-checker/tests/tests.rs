#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use float_cmp::approx_eq;
    use test_case::test_case;

    use wavepick::checker::{ObjectiveError, Violation};
    use wavepick_checker::{PairResult, check_folders, check_pair};

    const INSTANCES: &str = "../assets/instances";
    const SOLUTIONS: &str = "../assets/solutions";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn pair(name: &str) -> (PathBuf, PathBuf) {
        (
            Path::new(INSTANCES).join(name),
            Path::new(SOLUTIONS).join(name),
        )
    }

    #[test]
    fn feasible_pair_reports_objective() {
        init_logger();
        let (instance, solution) = pair("instance_0001.txt");
        let report = check_pair(&instance, &solution).unwrap();

        assert_eq!(report.instance, "instance_0001");
        assert!(report.verdict.feasible);
        assert!(approx_eq!(f64, report.verdict.objective.unwrap(), 3.0, ulps = 4));
        assert_eq!(report.describe(), "feasible, objective 3.00");
    }

    #[test]
    fn infeasible_pair_names_shortage() {
        let (instance, solution) = pair("instance_0002.txt");
        let report = check_pair(&instance, &solution).unwrap();

        assert!(!report.verdict.feasible);
        assert!(matches!(
            report.verdict.violation,
            Some(Violation::ItemShortage { item: 2, .. })
        ));
        assert!(report.describe().starts_with("infeasible"));
    }

    #[test]
    fn empty_selection_has_undefined_objective() {
        let (instance, solution) = pair("instance_0004.txt");
        let report = check_pair(&instance, &solution).unwrap();

        assert!(report.verdict.feasible);
        assert_eq!(report.verdict.objective, Err(ObjectiveError::NoAislesVisited));
        assert!(report.describe().contains("objective undefined"));
        assert!(!report.passed());
        assert!(PairResult::Checked(report).is_failure());
    }

    #[test]
    fn unknown_order_is_an_error_for_the_pair() {
        let (instance, solution) = pair("instance_0005.txt");
        let err = check_pair(&instance, &solution).unwrap_err();

        assert!(format!("{err:#}").contains("order 7 does not exist"));
    }

    #[test_case("instance_0001.txt", "missing.txt"; "missing solution")]
    #[test_case("missing.txt", "instance_0001.txt"; "missing instance")]
    fn unreadable_pair_is_an_error(instance: &str, solution: &str) {
        let result = check_pair(
            &Path::new(INSTANCES).join(instance),
            &Path::new(SOLUTIONS).join(solution),
        );
        assert!(result.is_err());
    }

    #[test]
    fn folder_check_skips_missing_solutions() {
        init_logger();
        let results = check_folders(Path::new(INSTANCES), Path::new(SOLUTIONS)).unwrap();

        assert_eq!(results.len(), 5);
        assert!(matches!(&results[0], PairResult::Checked(r) if r.passed()));
        assert!(matches!(&results[1], PairResult::Checked(r) if !r.verdict.feasible));
        assert!(matches!(
            &results[2],
            PairResult::Missing { instance } if instance.ends_with("instance_0003.txt")
        ));
        // feasible, but failing on its undefined objective
        assert!(matches!(
            &results[3],
            PairResult::Checked(r) if r.verdict.feasible && r.verdict.objective.is_err()
        ));
        assert!(matches!(&results[4], PairResult::Error { .. }));

        let failed = results.iter().filter(|r| r.is_failure()).collect::<Vec<_>>();
        assert_eq!(failed.len(), 3);
        assert!(!results[2].is_failure());
    }
}
