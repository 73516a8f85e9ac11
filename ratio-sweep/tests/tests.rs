#[cfg(test)]
mod tests {
    use std::path::Path;

    use float_cmp::approx_eq;
    use test_case::test_case;

    use ratio_sweep::batch::{self, InstanceOutcome};
    use ratio_sweep::config::{SolverBackend, SweepConfig};
    use ratio_sweep::solver::GoodLpSolver;
    use ratio_sweep::sweep::RatioSweep;
    use wavepick::checker;
    use wavepick::entities::Selection;
    use wavepick::io::{parse_instance, read_instance, read_selection};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn solver() -> GoodLpSolver {
        GoodLpSolver::new(SolverBackend::Microlp, None)
    }

    #[test_case("../assets/instances/instance_0001.txt", 1, 3.0; "scenario")]
    #[test_case("../assets/instances/instance_0002.txt", 1, 5.0; "five orders")]
    #[test_case("../assets/instances/instance_0004.txt", 1, 3.0; "no lower bound")]
    fn sweep_finds_best_ratio(instance_path: &str, k: usize, ratio: f64) {
        init_logger();
        let instance = read_instance(Path::new(instance_path)).unwrap();
        let solver = solver();

        let report = RatioSweep::new(&instance, &solver).solve().unwrap();
        let best = report.best.unwrap();

        assert_eq!(best.k, k);
        assert!(approx_eq!(f64, best.ratio, ratio, ulps = 4));
        assert!(checker::is_feasible(&instance, &best.selection));
        assert_eq!(report.records.len() + report.skipped.len(), instance.n_aisles());
    }

    #[test]
    fn scenario_selects_first_order_and_aisle() {
        let instance = read_instance(Path::new("../assets/instances/instance_0001.txt")).unwrap();
        let solver = solver();

        let best = RatioSweep::new(&instance, &solver).solve().unwrap().best.unwrap();

        assert_eq!(best.selection, Selection::new([0], [0]));
        assert_eq!(best.total_units, 3);
    }

    #[test]
    fn unreachable_lower_bound_has_no_solution() {
        init_logger();
        let instance = read_instance(Path::new("../assets/instances/instance_0003.txt")).unwrap();
        let solver = solver();

        let report = RatioSweep::new(&instance, &solver).solve().unwrap();

        assert!(report.best.is_none());
        assert!(report.records.is_empty());
        assert_eq!(report.skipped.len(), instance.n_aisles());
    }

    #[test]
    fn equal_ratios_keep_smallest_budget() {
        // one unit per aisle: every budget reaches ratio 1
        let instance = parse_instance("tie", "2 2 2\n1 0 1\n1 1 1\n1 0 1\n1 1 1\n1 2\n").unwrap();
        let solver = solver();

        let report = RatioSweep::new(&instance, &solver).solve().unwrap();
        let best = report.best.unwrap();

        assert_eq!((best.k, best.total_units), (1, 1));
        assert!(report.records.iter().all(|r| approx_eq!(f64, r.ratio, 1.0, ulps = 4)));
    }

    #[test]
    fn units_never_decrease_with_budget() {
        let instance = read_instance(Path::new("../assets/instances/instance_0002.txt")).unwrap();
        let solver = solver();

        let report = RatioSweep::new(&instance, &solver)
            .with_parallel(true)
            .solve()
            .unwrap();

        assert_eq!(report.records.len(), instance.n_aisles());
        assert!(
            report
                .records
                .windows(2)
                .all(|w| w[0].k < w[1].k && w[0].total_units <= w[1].total_units)
        );
    }

    #[test]
    fn batch_writes_checkable_solutions() {
        init_logger();
        let solution_folder =
            std::env::temp_dir().join(format!("ratio-sweep-batch-{}", std::process::id()));
        std::fs::create_dir_all(&solution_folder).unwrap();

        let config = SweepConfig {
            n_workers: Some(2),
            ..SweepConfig::default()
        };
        let files = batch::collect_instance_files(Path::new("../assets/instances")).unwrap();
        let reports = batch::run_batch(&files, &solver(), &config, &solution_folder).unwrap();

        let names = reports.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "instance_0001",
                "instance_0002",
                "instance_0003",
                "instance_0004",
                "instance_0005"
            ]
        );
        assert_eq!(reports[2].outcome, InstanceOutcome::NoSolution);
        assert!(!solution_folder.join("instance_0003.txt").exists());

        for (report, file) in reports.iter().zip(&files) {
            let InstanceOutcome::Solved { path, .. } = &report.outcome else {
                continue;
            };
            let instance = read_instance(file).unwrap();
            let selection = read_selection(path).unwrap();
            assert!(checker::is_feasible(&instance, &selection));
            assert!(path.with_extension("json").exists());
        }

        std::fs::remove_dir_all(&solution_folder).unwrap();
    }
}
