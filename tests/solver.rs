use fastrand::Rng;
use sat_dpll::sat::dpll::{Dpll, Step};
use sat_dpll::sat::propagation::is_unit;
use sat_dpll::sat::restarter::{Geometric, Never, Restarter};
use sat_dpll::{Cnf, Config, Solver, SolverError, Verdict, solve, solve_with};

/// Uniform random k-SAT: `num_clauses` clauses of `k` distinct variables each.
fn random_ksat(rng: &mut Rng, num_vars: usize, num_clauses: usize, k: usize) -> Vec<Vec<i32>> {
    (0..num_clauses)
        .map(|_| {
            let mut vars: Vec<i32> = Vec::with_capacity(k);
            while vars.len() < k {
                let v = rng.i32(1..=i32::try_from(num_vars).unwrap());
                if !vars.contains(&v) {
                    vars.push(v);
                }
            }
            vars.into_iter()
                .map(|v| if rng.bool() { v } else { -v })
                .collect()
        })
        .collect()
}

/// `holes + 1` pigeons into `holes` holes. Always unsatisfiable.
fn pigeonhole(holes: usize) -> (usize, Vec<Vec<i32>>) {
    let pigeons = holes + 1;
    let var = |p: usize, h: usize| i32::try_from(p * holes + h + 1).unwrap();
    let mut clauses = Vec::new();

    for p in 0..pigeons {
        clauses.push((0..holes).map(|h| var(p, h)).collect());
    }
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }

    (pigeons * holes, clauses)
}

#[test]
fn test_single_variable_contradiction() {
    for seed in 0..50 {
        let verdict = solve_with(1, &[vec![1], vec![-1]], Config::default().with_seed(seed));
        assert_eq!(verdict, Ok(Verdict::Unsat));
    }
}

#[test]
fn test_two_variable_xor() {
    let clauses = vec![vec![1, 2], vec![-1, -2]];
    let cnf = Cnf::new(2, &clauses);

    for seed in 0..50 {
        let verdict = solve_with(2, &clauses, Config::default().with_seed(seed)).unwrap();
        let model = verdict.solutions().unwrap();

        assert!(cnf.verify(model));
        assert_ne!(model.value(0), model.value(1));
    }
}

#[test]
fn test_empty_clause_list() {
    for seed in 0..50 {
        let verdict = solve_with::<Vec<i32>>(3, &[], Config::default().with_seed(seed)).unwrap();
        assert!(verdict.solutions().unwrap().len() <= 1);
    }
}

#[test]
fn test_no_variables_is_unsat() {
    assert_eq!(solve::<Vec<i32>>(0, &[]), Ok(Verdict::Unsat));
    assert_eq!(solve(0, &[Vec::<i32>::new()]), Ok(Verdict::Unsat));
}

#[test]
fn test_unseeded_solve() {
    let clauses = vec![vec![1, -2], vec![2, 3], vec![-1, -3]];
    let cnf = Cnf::new(3, &clauses);

    if let Verdict::Sat(model) = solve(3, &clauses).unwrap() {
        assert!(cnf.verify(&model));
    }
}

#[test]
fn test_random_3sat_models_verify() {
    let mut rng = Rng::with_seed(0x5eed);

    for round in 0..200 {
        let num_vars = rng.usize(3..=20);
        let num_clauses = rng.usize(1..=num_vars * 5);
        let clauses = random_ksat(&mut rng, num_vars, num_clauses, 3);
        let cnf = Cnf::new(num_vars, &clauses);

        let mut solver: Dpll = Dpll::with_config(cnf.clone(), Config::default().with_seed(round));
        let verdict = solver.solve().unwrap();

        if let Verdict::Sat(model) = &verdict {
            assert!(cnf.verify(model), "round {round}: {verdict} does not satisfy\n{cnf}");
            assert!(cnf.verify(model), "verification is not idempotent");
            assert!(model.len() <= num_vars);
        }
    }
}

#[test]
fn test_never_restarting_models_verify() {
    let mut rng = Rng::with_seed(7);

    for round in 0..100 {
        let clauses = random_ksat(&mut rng, 12, 40, 3);
        let cnf = Cnf::new(12, &clauses);

        let mut solver: Dpll<Never> =
            Dpll::with_config(cnf.clone(), Config::default().with_seed(round));

        if let Verdict::Sat(model) = solver.solve().unwrap() {
            assert!(cnf.verify(&model));
        }
        assert_eq!(solver.stats().restarts, 0);
    }
}

#[test]
fn test_pigeonhole_is_unsat() {
    let (num_vars, clauses) = pigeonhole(3);

    for seed in 0..10 {
        let verdict = solve_with(num_vars, &clauses, Config::default().with_seed(seed));
        assert_eq!(verdict, Ok(Verdict::Unsat));
    }
}

#[test]
fn test_forced_variable_never_assigned_during_search() {
    let mut rng = Rng::with_seed(11);
    let clauses = random_ksat(&mut rng, 10, 45, 3);

    for seed in 0..20 {
        let mut solver: Dpll =
            Dpll::with_config(Cnf::new(10, &clauses), Config::default().with_seed(seed));

        while solver.is_active() {
            for clause in solver.cnf.iter() {
                if let Some(var) = is_unit(clause, &solver.assignment, &solver.order) {
                    assert!(solver.assignment[var].is_unassigned());
                }
            }

            solver.step().unwrap();
            if solver.cnf.is_satisfied(&solver.assignment) {
                break;
            }
        }
    }
}

#[test]
fn test_restart_cutoffs_ignore_seed() {
    let (num_vars, clauses) = pigeonhole(4);

    let cutoffs = |seed: u64| {
        let mut solver: Dpll<Geometric> =
            Dpll::with_config(Cnf::new(num_vars, &clauses), Config::default().with_seed(seed));
        let mut seen = vec![solver.restarter.cutoff()];

        while solver.is_active() {
            if solver.step().unwrap() == Step::Restarted {
                seen.push(solver.restarter.cutoff());
            }
        }
        seen
    };

    for seed in 0..10 {
        let seen = cutoffs(seed);
        let expected: Vec<usize> = (0..seen.len()).map(|i| 4 << i).collect();
        assert_eq!(seen, expected, "seed {seed}");
    }
}

#[test]
fn test_restarts_happen_on_hard_instances() {
    let (num_vars, clauses) = pigeonhole(4);
    let config = Config::default().with_seed(1).with_restart_cutoff(1);
    let mut solver: Dpll = Dpll::with_config(Cnf::new(num_vars, &clauses), config);

    assert_eq!(solver.solve(), Ok(Verdict::Unsat));

    // The first total assignment leaves more than one decision open, so the
    // first backtrack is always followed by a restart.
    let stats = solver.stats();
    assert!(stats.restarts > 0);
    assert_eq!(stats.restart_cutoff, 1 << stats.restarts);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut rng = Rng::with_seed(3);
    let clauses = random_ksat(&mut rng, 15, 60, 3);

    let run = |seed: u64| {
        let mut solver: Dpll =
            Dpll::with_config(Cnf::new(15, &clauses), Config::default().with_seed(seed));
        (solver.solve(), solver.stats())
    };

    for seed in 0..10 {
        assert_eq!(run(seed), run(seed));
    }
}

#[test]
fn test_iteration_budget() {
    let (num_vars, clauses) = pigeonhole(4);
    let config = Config::default().with_seed(0).with_max_iterations(5);

    let mut solver: Dpll = Dpll::with_config(Cnf::new(num_vars, &clauses), config);
    assert_eq!(
        solver.solve(),
        Err(SolverError::BudgetExhausted { iterations: 5 })
    );
    assert_eq!(solver.stats().iterations, 5);
}
