use chm_mphf::{Builder, Keys};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn random_distinct_keys(n: usize, len: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n);
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let mut buf = vec![0u8; len];
        rng.fill(&mut buf[..]);
        if seen.insert(buf.clone()) {
            out.push(buf);
        }
    }
    out
}

#[test]
fn large_random_set_every_key_found_and_false_positives_are_rare() {
    let keys_raw = random_distinct_keys(100_000, 64, 1);

    let mut keys: Keys<()> = Keys::with_capacity(keys_raw.len());
    for k in &keys_raw {
        assert!(keys.add_safe(k, ()));
    }

    let mut rng = StdRng::seed_from_u64(1);
    let mphf = Builder::new()
        .build(keys, &mut rng)
        .expect("100k distinct 64-byte keys should construct");

    for k in &keys_raw {
        assert!(mphf.lookup(k).is_some(), "inserted key must be found");
    }

    let inserted: HashSet<&Vec<u8>> = keys_raw.iter().collect();
    let probes = random_distinct_keys(10_000, 64, 2)
        .into_iter()
        .filter(|p| !inserted.contains(p))
        .collect::<Vec<_>>();

    let false_positives = probes.iter().filter(|p| mphf.lookup(p).is_some()).count();
    let rate = false_positives as f64 / probes.len() as f64;
    assert!(
        rate < 0.0001,
        "false-positive rate {rate} exceeds 0.01% over {} probes",
        probes.len()
    );
}

#[test]
fn recycled_inputs_reconstruct_to_an_agreeing_table() {
    let words: Vec<&str> = vec![
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliet",
    ];

    let mut keys: Keys<usize> = Keys::new();
    for (i, w) in words.iter().enumerate() {
        keys.add(w.as_bytes(), i);
    }

    let mut rng1 = StdRng::seed_from_u64(10);
    let first = Builder::new()
        .build(keys, &mut rng1)
        .expect("first construction should succeed");

    let recycled = first.recycle_inputs();
    assert_eq!(recycled.len(), words.len());

    let mut rng2 = StdRng::seed_from_u64(20);
    let second = Builder::new()
        .build(recycled, &mut rng2)
        .expect("reconstruction from recycled inputs should succeed");

    for w in &words {
        let a = first.lookup(w.as_bytes());
        let b = second.lookup(w.as_bytes());
        assert!(a.is_some() && b.is_some());
        assert_eq!(a.unwrap().payload, b.unwrap().payload);
    }
    assert!(first.lookup(b"not-a-key").is_none());
    assert!(second.lookup(b"not-a-key").is_none());
}

#[test]
fn same_seed_and_insertion_order_produce_agreeing_tables() {
    let words: Vec<&str> = vec!["one", "two", "three", "four", "five", "six", "seven"];

    let build = || -> chm_mphf::Mphf<usize> {
        let mut keys: Keys<usize> = Keys::new();
        for (i, w) in words.iter().enumerate() {
            keys.add(w.as_bytes(), i);
        }
        let mut rng = StdRng::seed_from_u64(99);
        Builder::new().build(keys, &mut rng).expect("constructs")
    };

    let a = build();
    let b = build();

    for w in &words {
        let ra = a.lookup(w.as_bytes()).expect("present in a");
        let rb = b.lookup(w.as_bytes()).expect("present in b");
        assert_eq!(ra.payload, rb.payload);
    }
}

#[test]
fn zero_length_add_is_invisible_to_construction() {
    let words: Vec<&str> = vec!["red", "green", "blue"];

    let mut with_noop: Keys<()> = Keys::new();
    assert!(!with_noop.add(b"", ()));
    for w in &words {
        with_noop.add(w.as_bytes(), ());
    }

    let mut without_noop: Keys<()> = Keys::new();
    for w in &words {
        without_noop.add(w.as_bytes(), ());
    }

    assert_eq!(with_noop.len(), without_noop.len());

    let mut rng_a = StdRng::seed_from_u64(3);
    let mut rng_b = StdRng::seed_from_u64(3);
    let mphf_a = Builder::new().build(with_noop, &mut rng_a).expect("constructs");
    let mphf_b = Builder::new().build(without_noop, &mut rng_b).expect("constructs");

    for w in &words {
        assert!(mphf_a.lookup(w.as_bytes()).is_some());
        assert!(mphf_b.lookup(w.as_bytes()).is_some());
    }
    assert_eq!(mphf_a.len(), mphf_b.len());
}
