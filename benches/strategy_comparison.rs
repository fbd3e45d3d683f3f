use core::hash::BuildHasherDefault;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use collision_maps::DoubleHashingTable;
use collision_maps::DynamicArrayChainingTable;
use collision_maps::LinearProbingTable;
use collision_maps::LinkedListChainingTable;
use collision_maps::QuadraticProbingTable;
use collision_maps::TreeChainingTable;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::BenchmarkGroup;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::WallTime;
use hashbrown::HashMap as HashbrownHashMap;
use rand::TryRngCore;
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

type Sip = BuildHasherDefault<SipHasher>;

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14), (1 << 16)];

const LOOKUPS_PER_KEY: usize = 4;

trait BenchMap {
    fn empty() -> Self;
    fn put(&mut self, key: u64, value: u64);
    fn lookup(&self, key: &u64) -> Option<&u64>;
}

macro_rules! collision_map {
    ($table:ident) => {
        impl BenchMap for $table<u64, u64, Sip> {
            fn empty() -> Self {
                Self::new()
            }

            fn put(&mut self, key: u64, value: u64) {
                self.insert(key, value);
            }

            fn lookup(&self, key: &u64) -> Option<&u64> {
                self.get(key).ok()
            }
        }
    };
}

collision_map!(LinearProbingTable);
collision_map!(QuadraticProbingTable);
collision_map!(DoubleHashingTable);
collision_map!(DynamicArrayChainingTable);
collision_map!(LinkedListChainingTable);
collision_map!(TreeChainingTable);

impl BenchMap for HashbrownHashMap<u64, u64, Sip> {
    fn empty() -> Self {
        Self::with_hasher(Sip::default())
    }

    fn put(&mut self, key: u64, value: u64) {
        self.insert(key, value);
    }

    fn lookup(&self, key: &u64) -> Option<&u64> {
        self.get(key)
    }
}

impl BenchMap for StdHashMap<u64, u64, Sip> {
    fn empty() -> Self {
        Self::with_hasher(Sip::default())
    }

    fn put(&mut self, key: u64, value: u64) {
        self.insert(key, value);
    }

    fn lookup(&self, key: &u64) -> Option<&u64> {
        self.get(key)
    }
}

fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = OsRng;
    (0..count).map(|_| rng.try_next_u64().unwrap()).collect()
}

fn insert_one<M: BenchMap>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, keys: &[u64]) {
    group.bench_function(name, |b| {
        b.iter_batched(
            || {
                let mut keys = keys.to_vec();
                keys.shuffle(&mut SmallRng::from_os_rng());
                keys
            },
            |keys| {
                let mut map = M::empty();
                for key in keys {
                    map.put(key, key);
                }
                black_box(map)
            },
            BatchSize::SmallInput,
        )
    });
}

fn lookup_one<M: BenchMap>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    keys: &[u64],
    order: &[usize],
) {
    let mut map = M::empty();
    for &key in keys {
        map.put(key, key);
    }

    group.bench_function(name, |b| {
        b.iter(|| {
            for &index in order {
                black_box(map.lookup(&keys[index]));
            }
        })
    });
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        insert_one::<LinearProbingTable<u64, u64, Sip>>(&mut group, &format!("linear/{size}"), &keys);
        insert_one::<QuadraticProbingTable<u64, u64, Sip>>(
            &mut group,
            &format!("quadratic/{size}"),
            &keys,
        );
        insert_one::<DoubleHashingTable<u64, u64, Sip>>(&mut group, &format!("double/{size}"), &keys);
        insert_one::<DynamicArrayChainingTable<u64, u64, Sip>>(
            &mut group,
            &format!("chain_vec/{size}"),
            &keys,
        );
        insert_one::<LinkedListChainingTable<u64, u64, Sip>>(
            &mut group,
            &format!("chain_list/{size}"),
            &keys,
        );
        insert_one::<TreeChainingTable<u64, u64, Sip>>(&mut group, &format!("chain_tree/{size}"), &keys);
        insert_one::<HashbrownHashMap<u64, u64, Sip>>(&mut group, &format!("hashbrown/{size}"), &keys);
        insert_one::<StdHashMap<u64, u64, Sip>>(&mut group, &format!("std/{size}"), &keys);
    }

    group.finish();
}

fn bench_lookup_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let distr = Zipf::new(size as f64, 1.1).unwrap();
        let mut rng = SmallRng::from_os_rng();
        let order: Vec<usize> = (0..size * LOOKUPS_PER_KEY)
            .map(|_| (distr.sample(&mut rng) as usize).saturating_sub(1).min(size - 1))
            .collect();
        group.throughput(Throughput::Elements(order.len() as u64));

        lookup_one::<LinearProbingTable<u64, u64, Sip>>(
            &mut group,
            &format!("linear/{size}"),
            &keys,
            &order,
        );
        lookup_one::<QuadraticProbingTable<u64, u64, Sip>>(
            &mut group,
            &format!("quadratic/{size}"),
            &keys,
            &order,
        );
        lookup_one::<DoubleHashingTable<u64, u64, Sip>>(
            &mut group,
            &format!("double/{size}"),
            &keys,
            &order,
        );
        lookup_one::<DynamicArrayChainingTable<u64, u64, Sip>>(
            &mut group,
            &format!("chain_vec/{size}"),
            &keys,
            &order,
        );
        lookup_one::<LinkedListChainingTable<u64, u64, Sip>>(
            &mut group,
            &format!("chain_list/{size}"),
            &keys,
            &order,
        );
        lookup_one::<TreeChainingTable<u64, u64, Sip>>(
            &mut group,
            &format!("chain_tree/{size}"),
            &keys,
            &order,
        );
        lookup_one::<HashbrownHashMap<u64, u64, Sip>>(
            &mut group,
            &format!("hashbrown/{size}"),
            &keys,
            &order,
        );
        lookup_one::<StdHashMap<u64, u64, Sip>>(&mut group, &format!("std/{size}"), &keys, &order);
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup_zipf);

criterion_main!(benches);
