use chm_mphf::{Builder, Keys};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn gen_keys(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let mut buf = [0u8; 16];
        rng.fill_bytes(&mut buf);
        out.push(buf.to_vec());
    }
    out
}

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [1_000usize, 10_000, 100_000] {
        let raw = gen_keys(n, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &raw, |b, raw| {
            b.iter(|| {
                let mut keys: Keys<()> = Keys::with_capacity(raw.len());
                for k in raw {
                    keys.add_no_copy(k.clone(), ());
                }
                let mut rng = StdRng::seed_from_u64(7);
                Builder::new().build(keys, &mut rng).expect("constructs")
            })
        });
    }
    group.finish();
}

pub fn lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for n in [1_000usize, 10_000, 100_000] {
        let raw = gen_keys(n, 2);
        let mut keys: Keys<()> = Keys::with_capacity(raw.len());
        for k in &raw {
            keys.add_no_copy(k.clone(), ());
        }
        let mut rng = StdRng::seed_from_u64(11);
        let mphf = Builder::new().build(keys, &mut rng).expect("constructs");

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &raw, |b, raw| {
            b.iter(|| {
                let mut acc = 0usize;
                for k in raw {
                    if mphf.lookup(k).is_some() {
                        acc += 1;
                    }
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(benches, build, lookup);
criterion_main!(benches);
