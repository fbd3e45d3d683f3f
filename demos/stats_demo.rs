use clap::Parser;
use collision_maps::ChainingConfig;
use collision_maps::DoubleHashingTable;
use collision_maps::DynamicArrayChainingTable;
use collision_maps::LinearProbingTable;
use collision_maps::LinkedListChainingTable;
use collision_maps::OpenAddressingConfig;
use collision_maps::QuadraticProbingTable;
use collision_maps::TreeChainingTable;

#[derive(Parser, Debug)]
struct Args {
    /// Number of keys inserted into every table.
    #[arg(short = 'n', long = "num_keys", default_value_t = 1000)]
    num_keys: u64,

    /// Initial slot or bucket count.
    #[arg(short = 'c', long = "capacity", default_value_t = 64)]
    capacity: usize,

    /// Open-addressing resize factor.
    #[arg(short = 'r', long = "resize_factor", default_value_t = 0.7)]
    resize_factor: f64,

    /// Chaining bucket length that triggers growth.
    #[arg(short = 'm', long = "max_chain_size", default_value_t = 5)]
    max_chain_size: usize,

    /// Remove every third key after filling, to show tombstones.
    #[arg(long = "churn", default_value_t = false)]
    churn: bool,
}

macro_rules! report_open_addressing {
    ($table:ident, $args:expr, $config:expr) => {{
        let mut table = $table::<u64, u64>::from_iter_with_config(
            (0..$args.num_keys).map(|k| (k, k)),
            $config,
        )
        .unwrap_or_else(|err| panic!("invalid configuration: {err}"));
        if $args.churn {
            for k in (0..$args.num_keys).step_by(3) {
                let _ = table.remove(&k);
            }
        }

        println!("\n## {}", stringify!($table));
        println!(
            "{} entries in {} slots ({} bytes)",
            table.len(),
            table.capacity(),
            table.memory_footprint()
        );
        table.probe_histogram().print();
        table.debug_stats().print();
    }};
}

macro_rules! report_chaining {
    ($table:ident, $args:expr, $config:expr) => {{
        let mut table = $table::<u64, u64>::from_iter_with_config(
            (0..$args.num_keys).map(|k| (k, k)),
            $config,
        )
        .unwrap_or_else(|err| panic!("invalid configuration: {err}"));
        if $args.churn {
            for k in (0..$args.num_keys).step_by(3) {
                let _ = table.remove(&k);
            }
        }

        println!("\n## {}", stringify!($table));
        println!(
            "{} entries in {} buckets ({} bytes)",
            table.len(),
            table.capacity(),
            table.memory_footprint()
        );
        table.chain_histogram().print();
        table.debug_stats().print();
    }};
}

fn main() {
    let args = Args::parse();

    let open = OpenAddressingConfig::default()
        .capacity(args.capacity)
        .resize_factor(args.resize_factor);
    let chaining = ChainingConfig::default()
        .capacity(args.capacity)
        .max_chain_size(args.max_chain_size);

    println!(
        "Filling every table with {} keys (initial capacity {})",
        args.num_keys, args.capacity
    );

    report_open_addressing!(LinearProbingTable, args, open);
    report_open_addressing!(QuadraticProbingTable, args, open);
    report_open_addressing!(DoubleHashingTable, args, open);
    report_chaining!(DynamicArrayChainingTable, args, chaining);
    report_chaining!(LinkedListChainingTable, args, chaining);
    report_chaining!(TreeChainingTable, args, chaining);
}
