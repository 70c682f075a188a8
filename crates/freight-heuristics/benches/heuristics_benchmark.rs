// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use freight_heuristics::strategy::Method;
use freight_model::model::Model;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const SIZES: [(usize, usize); 4] = [(10, 10), (25, 40), (50, 50), (100, 80)];

fn random_model(seed: u64, m: usize, n: usize) -> Model<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut supply: Vec<f64> = (0..m).map(|_| rng.random_range(1..=500u32) as f64).collect();
    let mut demand: Vec<f64> = (0..n).map(|_| rng.random_range(1..=500u32) as f64).collect();

    let total_supply: f64 = supply.iter().sum();
    let total_demand: f64 = demand.iter().sum();
    if total_supply > total_demand {
        demand[n - 1] += total_supply - total_demand;
    } else {
        supply[m - 1] += total_demand - total_supply;
    }

    let costs: Vec<Vec<f64>> = (0..m)
        .map(|_| (0..n).map(|_| rng.random_range(1..=100u32) as f64).collect())
        .collect();

    Model::from_parts(&costs, &supply, &demand).expect("balanced by construction")
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristics_benchmark");

    for (m, n) in SIZES {
        let model = random_model(0xF2E16, m, n);
        group.throughput(Throughput::Elements((m * n) as u64));

        for method in Method::ALL {
            let heuristic = method.heuristic::<f64>();
            group.bench_with_input(
                BenchmarkId::new(method.to_string(), format!("{}x{}", m, n)),
                &model,
                |b, model| b.iter(|| black_box(heuristic.allocate(black_box(model)))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_heuristics);
criterion_main!(benches);
