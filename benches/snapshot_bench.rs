use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use driftwatch::config::TrackingConfig;
use driftwatch::engine::SnapshotEngine;
use driftwatch::snapshot::{self, Snapshot};
use driftwatch::utils::hash::{hash_bytes, hash_file};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::tempdir;

fn create_test_tree(dir: &std::path::Path, count: usize) {
    for i in 0..count {
        let sub = dir.join(format!("sub_{}", i % 10));
        fs::create_dir_all(&sub).unwrap();
        let content = format!("This is test file number {i} with some content to hash");
        fs::write(sub.join(format!("file_{i}.txt")), content).unwrap();
    }
}

fn synthetic_snapshot(count: usize) -> Snapshot {
    let mut s = Snapshot::new();
    for i in 0..count {
        s.insert(
            PathBuf::from(format!("sub_{}/file_{i}.txt", i % 10)),
            hash_bytes(&(i as u64).to_le_bytes()),
        );
    }
    s
}

fn benchmark_hashing(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let small_file = dir.path().join("small.txt");
    let medium_file = dir.path().join("medium.txt");
    let large_file = dir.path().join("large.txt");

    fs::write(&small_file, vec![b'a'; 1024]).unwrap(); // 1KB
    fs::write(&medium_file, vec![b'b'; 1024 * 100]).unwrap(); // 100KB
    fs::write(&large_file, vec![b'c'; 1024 * 1024 * 10]).unwrap(); // 10MB

    let mut group = c.benchmark_group("file_hashing");

    group.bench_function("hash_1kb", |b| b.iter(|| hash_file(black_box(&small_file))));
    group.bench_function("hash_100kb", |b| {
        b.iter(|| hash_file(black_box(&medium_file)));
    });
    group.bench_function("hash_10mb", |b| {
        b.iter(|| hash_file(black_box(&large_file)));
    });

    group.finish();
}

fn benchmark_build_current(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_current");

    for count in &[50usize, 200, 500] {
        let dir = tempdir().unwrap();
        create_test_tree(dir.path(), *count);
        let engine = SnapshotEngine::new(
            dir.path().to_path_buf(),
            dir.path().join("snapshot.txt"),
            &TrackingConfig::default(),
        );

        group.bench_with_input(BenchmarkId::from_parameter(count), &engine, |b, engine| {
            b.iter(|| black_box(engine.build_current()));
        });
    }

    group.finish();
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    for count in &[100usize, 1000, 10000] {
        let previous = synthetic_snapshot(*count);
        let mut current = previous.clone();
        for i in (0..*count).step_by(10) {
            current.insert(
                PathBuf::from(format!("sub_{}/file_{i}.txt", i % 10)),
                hash_bytes(b"edited"),
            );
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &(previous, current),
            |b, (previous, current)| {
                b.iter(|| black_box(snapshot::diff(previous, current)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_hashing,
    benchmark_build_current,
    benchmark_diff
);
criterion_main!(benches);
