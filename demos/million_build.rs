//! Throughput demo: generate, build, and look up one million keys.
//!
//! Run with `cargo run --release --example million_build`.

use chm_mphf::{BuildConfig, Builder, Keys};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 1_000_000;
const GEN_SEED: u64 = 42;

fn main() {
    println!("--- chm_mphf throughput demo ---");
    println!("n = {N_KEYS}");

    // 1) Generate unique keys
    let t0 = Instant::now();
    let raw_keys = gen_unique_keys(N_KEYS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!(
        "gen:    {:>8.3} s   ({:.1} M keys/s)",
        gen_s,
        N_KEYS as f64 / gen_s / 1e6
    );

    // 2) Collect into the builder's input type
    let t1 = Instant::now();
    let mut keys: Keys<()> = Keys::with_capacity(N_KEYS);
    for k in &raw_keys {
        keys.add_no_copy(k.clone(), ());
    }
    let collect_s = t1.elapsed().as_secs_f64();
    println!(
        "collect:{:>8.3} s   ({:.1} M keys/s)",
        collect_s,
        N_KEYS as f64 / collect_s / 1e6
    );

    // 3) Build the MPHF
    let t2 = Instant::now();
    let cfg = BuildConfig {
        edge_capacity_hint: 4,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(GEN_SEED ^ 0xA5A5_A5A5);
    let mphf = Builder::new()
        .with_config(cfg)
        .build(keys, &mut rng)
        .expect("one million distinct keys should construct within the default iteration cap");
    let build_s = t2.elapsed().as_secs_f64();
    println!(
        "build:  {:>8.3} s   ({:.1} M keys/s)",
        build_s,
        N_KEYS as f64 / build_s / 1e6
    );

    // 4) Lookup every key
    let t3 = Instant::now();
    let mut acc: u64 = 0;
    for chunk in raw_keys.chunks(32_768) {
        for k in chunk {
            if let Some(rec) = mphf.lookup(k) {
                acc ^= rec.key_bytes().len() as u64;
            }
        }
    }
    let lookup_s = t3.elapsed().as_secs_f64();
    println!(
        "lookup: {:>8.3} s   ({:.1} M lookups/s)   (acc={acc})",
        lookup_s,
        N_KEYS as f64 / lookup_s / 1e6
    );

    println!("----------------------------------------------");
    println!(
        "Total (gen + collect + build + lookup): {:.3} s",
        gen_s + collect_s + build_s + lookup_s
    );
    println!("stats: {:?}", mphf.stats());
}

/// Generate N unique 16-byte keys (raw bytes), deterministically.
fn gen_unique_keys(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let mut buf = [0u8; 16];
        rng.fill_bytes(&mut buf);
        if set.insert(buf) {
            keys.push(buf.to_vec());
        }
    }
    keys
}
