use criterion::{Criterion, criterion_group, criterion_main};
use fastrand::Rng;
use sat_dpll::sat::dpll::Dpll;
use sat_dpll::sat::restarter::{Geometric, Never, Restarter};
use sat_dpll::{Cnf, Config, Solver};
use std::hint::black_box;
use std::time::Duration;

fn random_3sat(rng: &mut Rng, num_vars: usize, num_clauses: usize) -> Cnf {
    let n = i32::try_from(num_vars).unwrap();
    let clauses = (0..num_clauses)
        .map(|_| {
            let mut clause = Vec::with_capacity(3);
            while clause.len() < 3 {
                let v = rng.i32(1..=n);
                if !clause.contains(&v) && !clause.contains(&-v) {
                    clause.push(if rng.bool() { v } else { -v });
                }
            }
            clause
        })
        .collect::<Vec<_>>();

    Cnf::new(num_vars, clauses)
}

fn pigeonhole(holes: usize) -> Cnf {
    let pigeons = holes + 1;
    let var = |p: usize, h: usize| i32::try_from(p * holes + h + 1).unwrap();
    let mut clauses: Vec<Vec<i32>> = Vec::new();

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

    Cnf::new(pigeons * holes, clauses)
}

/// Uniform random 3-SAT near the phase transition (ratio ~4.26), fixed seed.
fn uf_instances(num_vars: usize, count: usize) -> Vec<Cnf> {
    let mut rng = Rng::with_seed(20);
    (0..count)
        .map(|_| random_3sat(&mut rng, num_vars, num_vars * 426 / 100))
        .collect()
}

fn solve_all<R: Restarter>(cnfs: &[Cnf]) {
    for (seed, cnf) in (0u64..).zip(cnfs) {
        let mut state: Dpll<R> = Dpll::with_config(cnf.clone(), Config::default().with_seed(seed));
        let _ = black_box(state.solve());
    }
}

fn bench_3sat(c: &mut Criterion) {
    let cnfs = uf_instances(20, 100);

    let mut group = c.benchmark_group("3sat - restarter");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(20));

    group.bench_function("Geometric", |b| b.iter(|| solve_all::<Geometric>(&cnfs)));
    group.bench_function("Geometric x3", |b| b.iter(|| solve_all::<Geometric<3>>(&cnfs)));
    group.bench_function("Never", |b| b.iter(|| solve_all::<Never>(&cnfs)));

    group.finish();
}

fn bench_restart_cutoff(c: &mut Criterion) {
    let cnfs = uf_instances(30, 20);

    let mut group = c.benchmark_group("3sat - initial cutoff");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(20));

    for cutoff in [1, 4, 16, 64] {
        group.bench_function(format!("cutoff {cutoff}"), |b| {
            b.iter(|| {
                for (seed, cnf) in (0u64..).zip(&cnfs) {
                    let config = Config::default().with_seed(seed).with_restart_cutoff(cutoff);
                    let mut state: Dpll = Dpll::with_config(cnf.clone(), config);
                    let _ = black_box(state.solve());
                }
            });
        });
    }

    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole");
    group.sample_size(20);

    for holes in [3, 4, 5] {
        let cnf = pigeonhole(holes);
        group.bench_function(format!("php {}-{holes}", holes + 1), |b| {
            b.iter(|| {
                let mut state: Dpll = Dpll::with_config(cnf.clone(), Config::default().with_seed(0));
                let _ = black_box(state.solve());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_3sat, bench_restart_cutoff, bench_pigeonhole);
criterion_main!(benches);
