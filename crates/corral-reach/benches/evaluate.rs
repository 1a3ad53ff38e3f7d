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

use corral_model::{GridBuilder, GridModel, Placement, Terrain};
use corral_reach::ReachabilityEngine;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Builds an `n x n` grid with the origin in the middle, a diagonal band of
/// water, and a sprinkling of reward cells.
fn build_grid(n: usize) -> GridModel {
    let mut builder = GridBuilder::new(n, n);
    builder.set_origin(builder.cell_at(n / 2, n / 2));
    builder.set_budget(8);
    for row in 1..n - 1 {
        let col = (row * 3 + 1) % (n - 2) + 1;
        if (row, col) != (n / 2, n / 2) {
            builder.set_terrain(builder.cell_at(row, col), Terrain::Water);
        }
    }
    for row in (2..n - 2).step_by(5) {
        if (row, 2) != (n / 2, n / 2) {
            builder.set_reward(builder.cell_at(row, 2), true);
        }
    }
    builder.build().expect("benchmark grid must be valid")
}

/// A loose ring of walls around the origin, leaving gaps the BFS has to
/// flow through.
fn build_placement(grid: &GridModel) -> Placement {
    let (origin_row, origin_col) = grid.position(grid.origin());
    let mut walls = Vec::new();
    for offset in [2usize, 3] {
        if origin_row >= offset {
            walls.push(grid.cell_at(origin_row - offset, origin_col));
        }
        if origin_col >= offset {
            walls.push(grid.cell_at(origin_row, origin_col - offset));
        }
    }
    Placement::new(walls)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability_evaluate");
    for n in [8usize, 16, 32, 64] {
        let grid = build_grid(n);
        let placement = build_placement(&grid);
        let mut engine = ReachabilityEngine::new();

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _n| {
            b.iter(|| {
                let eval = engine.evaluate(black_box(&grid), black_box(&placement));
                black_box(eval.raw_score())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
