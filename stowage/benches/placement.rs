#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use stowage::math::{Cell, GridSize};
use stowage::{GridSurface, Item, ItemId};

/// Grid side lengths to benchmark at.
const SIDES: [u32; 3] = [8, 16, 64];

/// A grid checkerboarded with 1×1 items, so every other cell is free.
fn checkerboard(side: u32) -> GridSurface {
    let mut grid = GridSurface::new([side, side]);
    let mut id = 0;
    for y in 0..side {
        for x in (y % 2..side).step_by(2) {
            id += 1;
            grid.try_place(
                Item::new(ItemId::new(id), [1, 1]),
                Cell::new(x as i32, y as i32),
            )
            .unwrap();
        }
    }
    grid
}

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place");

    for side in SIDES {
        let description = format!("{side}×{side}");
        let size = GridSize::new(side, side);

        group.bench_function(BenchmarkId::new("try_place() whole grid", &description), |b| {
            b.iter_batched_ref(
                || GridSurface::new(size),
                |grid: &mut GridSurface| {
                    grid.try_place(Item::new(ItemId::new(1), size), Cell::new(0, 0))
                        .unwrap()
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("try_place() swap", &description), |b| {
            b.iter_batched_ref(
                || {
                    let mut grid = GridSurface::new(size);
                    grid.try_place(Item::new(ItemId::new(1), size), Cell::new(0, 0))
                        .unwrap();
                    grid
                },
                |grid: &mut GridSurface| {
                    grid.try_place(Item::new(ItemId::new(2), size), Cell::new(0, 0))
                        .unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for side in SIDES {
        let description = format!("{side}×{side}");
        let grid = checkerboard(side);

        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
        group.bench_function(BenchmarkId::new("conflicts_at() 2×2", &description), |b| {
            b.iter(|| {
                for y in 0..(side as i32 - 1) {
                    for x in 0..(side as i32 - 1) {
                        black_box(grid.conflicts_at(
                            Cell::new(x, y),
                            GridSize::new(2, 2),
                            None,
                        ));
                    }
                }
            })
        });

        // No 2×1 footprint fits on a checkerboard, so this scans every candidate.
        group.bench_function(
            BenchmarkId::new("find_free_anchor() none", &description),
            |b| b.iter(|| black_box(grid.find_free_anchor(GridSize::new(2, 1), None))),
        );
    }
    group.finish();
}

fn bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");

    for side in SIDES {
        let description = format!("{side}×{side}");
        let count = u64::from(side / 2) * u64::from(side / 2);
        group.throughput(Throughput::Elements(count));

        group.bench_function(BenchmarkId::new("insert() until full", &description), |b| {
            b.iter_batched_ref(
                || GridSurface::new([side, side]),
                |grid: &mut GridSurface| {
                    for id in 0..count {
                        grid.insert(Item::new(ItemId::new(id), [2, 2])).unwrap();
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("organize()", &description), |b| {
            b.iter_batched_ref(
                || checkerboard(side),
                |grid: &mut GridSurface| grid.organize().unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, placement, queries, bulk);
criterion_main!(benches);
