/*!
 * Simulation Benchmarks
 *
 * Throughput of full simulations over seeded random workloads
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mlfq_sim::{
    NullSink, PromotionPolicy, Scheduler, SchedulerConfig, WakePolicy, Workload, WorkloadRecord,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_workload(processes: u32, seed: u64) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=processes)
        .flat_map(|pid| {
            let arrival = rng.gen_range(0..processes as u64 * 4);
            let phases = rng.gen_range(1..4);
            (0..phases)
                .map(|_| {
                    WorkloadRecord::new(
                        arrival,
                        pid,
                        rng.gen_range(1..250),
                        rng.gen_range(0..40),
                        rng.gen_range(0..5),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn bench_workload_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_size");

    for processes in [10u32, 100, 1000] {
        let workload = random_workload(processes, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(processes),
            &workload,
            |b, workload| {
                b.iter(|| {
                    let mut scheduler =
                        Scheduler::with_workload(SchedulerConfig::default(), workload).unwrap();
                    black_box(scheduler.run(&mut NullSink).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_policy");
    let workload = random_workload(200, 7);

    let configs = [
        ("elapsed_inert", SchedulerConfig::default()),
        (
            "elapsed_on_yield",
            SchedulerConfig::default().with_promotion_policy(PromotionPolicy::OnYield),
        ),
        (
            "short_quanta",
            SchedulerConfig::default()
                .with_wake_policy(WakePolicy::Elapsed)
                .with_quanta([2, 4, 8, 16]),
        ),
    ];

    for (name, config) in configs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| {
                let mut scheduler = Scheduler::with_workload(config.clone(), &workload).unwrap();
                black_box(scheduler.run(&mut NullSink).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_event_collection(c: &mut Criterion) {
    let workload = random_workload(200, 11);

    c.bench_function("collect_events_vec", |b| {
        b.iter(|| {
            let mut scheduler =
                Scheduler::with_workload(SchedulerConfig::default(), &workload).unwrap();
            let mut events = Vec::new();
            scheduler.run(&mut events).unwrap();
            black_box(events.len())
        });
    });
}

criterion_group!(
    benches,
    bench_workload_size,
    bench_policies,
    bench_event_collection
);
criterion_main!(benches);
