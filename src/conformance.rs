//! Contract tests shared by every table variant.
//!
//! Each invocation of `conformance_suite!` generates one test module that
//! runs the same map contract against one table type.

macro_rules! conformance_suite {
    ($module:ident, $table:ident, $config:ident) => {
        mod $module {
            use alloc::format;
            use alloc::vec::Vec;

            use crate::$config;
            use crate::$table;
            use crate::ConfigError;
            use crate::Error;
            use crate::test_util::SipState;
            use crate::test_util::ZeroState;

            type Table<K, V, S = SipState> = $table<K, V, S>;

            fn small() -> Table<u64, u64> {
                Table::with_config($config::default().capacity(4)).unwrap()
            }

            #[test]
            fn collects_from_pairs() {
                let table: $table<&str, i32> =
                    [("a", 10), ("b", 20), ("c", 30)].into_iter().collect();
                assert_eq!(table.get(&"a"), Ok(&10));
                assert_eq!(table.get(&"c"), Ok(&30));
                assert_eq!(table.len(), 3);
            }

            #[test]
            fn collect_keeps_last_duplicate() {
                let table: Table<u64, &str> = [(1, "x"), (2, "y"), (1, "z")].into_iter().collect();
                assert_eq!(table.get(&1), Ok(&"z"));
                assert_eq!(table.len(), 2);
            }

            #[test]
            fn from_iter_with_config_validates() {
                let table: Table<u64, u64> = Table::from_iter_with_config(
                    (0..10u64).map(|k| (k, k)),
                    $config::default().capacity(3),
                )
                .unwrap();
                assert_eq!(table.len(), 10);

                let invalid =
                    Table::<u64, u64>::from_iter_with_config([(1, 1)], $config::default().capacity(0));
                assert_eq!(invalid.unwrap_err(), ConfigError::ZeroCapacity);
            }

            #[test]
            fn zero_capacity_is_rejected() {
                let error = Table::<u64, u64>::with_config($config::default().capacity(0)).unwrap_err();
                assert_eq!(error, ConfigError::ZeroCapacity);
                assert_eq!(Error::from(error), Error::Config(ConfigError::ZeroCapacity));
            }

            #[test]
            fn missing_key_is_not_found() {
                let mut table = small();
                assert_eq!(table.get(&7), Err(Error::NotFound));
                assert_eq!(table.remove(&7), Err(Error::NotFound));
                assert!(!table.contains_key(&7));

                table.insert(1, 1);
                assert_eq!(table.get(&7), Err(Error::NotFound));
            }

            #[test]
            fn insert_then_get_round_trips() {
                let mut table = small();
                for k in 0..1_000 {
                    assert_eq!(table.insert(k, k * 3), None);
                }
                assert_eq!(table.len(), 1_000);
                assert!(table.capacity() > 4);
                for k in 0..1_000 {
                    assert_eq!(table.get(&k), Ok(&(k * 3)));
                }
            }

            #[test]
            fn remove_deletes_only_that_key() {
                let mut table = small();
                table.extend((0..50).map(|k| (k, k)));
                for k in (0..50).step_by(2) {
                    assert_eq!(table.remove(&k), Ok(k));
                }
                for k in 0..50 {
                    assert_eq!(table.contains_key(&k), k % 2 == 1);
                }
                assert_eq!(table.get(&4), Err(Error::NotFound));
                assert_eq!(table.len(), 25);
            }

            #[test]
            fn len_follows_inserts_and_removes() {
                let mut table = small();
                let mut lens = Vec::new();
                table.insert(1, 1);
                lens.push(table.len());
                table.insert(2, 2);
                lens.push(table.len());
                table.insert(1, 11);
                lens.push(table.len());
                table.remove(&2).unwrap();
                lens.push(table.len());
                let _ = table.remove(&2);
                lens.push(table.len());
                assert_eq!(lens, [1, 2, 2, 1, 1]);
                assert!(!table.is_empty());
            }

            #[test]
            fn same_key_replaces_value() {
                let mut table = small();
                assert_eq!(table.insert(5, 1), None);
                assert_eq!(table.insert(5, 2), Some(1));
                assert_eq!(table.get(&5), Ok(&2));
                assert_eq!(table.len(), 1);
            }

            #[test]
            fn get_mut_changes_stored_value() {
                let mut table = small();
                table.insert(3, 30);
                *table.get_mut(&3).unwrap() += 1;
                assert_eq!(table.get(&3), Ok(&31));
                assert_eq!(table.get_mut(&4), Err(Error::NotFound));
            }

            #[test]
            fn colliding_keys_coexist() {
                let mut table = Table::<u64, u64, ZeroState>::with_config($config::default().capacity(8))
                    .unwrap();
                for k in 0..20 {
                    table.insert(k, k + 100);
                }
                for k in 0..20 {
                    assert_eq!(table.get(&k), Ok(&(k + 100)));
                }
                assert_eq!(table.remove(&10), Ok(110));
                assert_eq!(table.get(&11), Ok(&111));
                assert_eq!(table.len(), 19);
            }

            #[test]
            fn iteration_visits_each_entry_once() {
                let mut table = small();
                table.extend((0..100).map(|k| (k, k * 2)));
                table.remove(&50).unwrap();

                let mut pairs: Vec<(u64, u64)> = table.iter().map(|(k, v)| (*k, *v)).collect();
                pairs.sort_unstable();
                let expected: Vec<(u64, u64)> =
                    (0..100).filter(|&k| k != 50).map(|k| (k, k * 2)).collect();
                assert_eq!(pairs, expected);
                assert_eq!((&table).into_iter().len(), 99);
                assert_eq!(table.keys().count(), 99);
            }

            #[test]
            fn clear_empties_and_keeps_capacity() {
                let mut table = small();
                table.extend((0..30).map(|k| (k, k)));
                let capacity = table.capacity();
                table.clear();
                assert!(table.is_empty());
                assert_eq!(table.capacity(), capacity);
                assert_eq!(table.get(&3), Err(Error::NotFound));

                table.insert(3, 4);
                assert_eq!(table.get(&3), Ok(&4));
            }

            #[test]
            fn equality_ignores_insertion_order() {
                let mut first = small();
                let mut second = small();
                first.extend((0..20).map(|k| (k, k)));
                second.extend((0..20).rev().map(|k| (k, k)));
                assert_eq!(first, second);

                second.insert(0, 99);
                assert_ne!(first, second);
                second.insert(0, 0);
                second.remove(&19).unwrap();
                assert_ne!(first, second);
            }

            #[test]
            fn clone_is_independent() {
                let mut original = small();
                original.extend((0..10).map(|k| (k, k)));
                let mut copy = original.clone();
                copy.insert(0, 100);
                copy.remove(&9).unwrap();

                assert_eq!(original.get(&0), Ok(&0));
                assert_eq!(original.get(&9), Ok(&9));
                assert_eq!(copy.get(&0), Ok(&100));
                assert_eq!(copy.len(), 9);
            }

            #[test]
            fn debug_prints_a_map() {
                let mut table = small();
                assert_eq!(format!("{:?}", table), "{}");
                table.insert(1, 10);
                assert_eq!(format!("{:?}", table), "{1: 10}");
            }

            #[test]
            fn footprint_grows_with_the_table() {
                let mut table = small();
                let empty = table.memory_footprint();
                table.extend((0..200).map(|k| (k, k)));
                assert!(table.memory_footprint() > empty);
            }
        }
    };
}

conformance_suite!(linear_probing, LinearProbingTable, OpenAddressingConfig);
conformance_suite!(quadratic_probing, QuadraticProbingTable, OpenAddressingConfig);
conformance_suite!(double_hashing, DoubleHashingTable, OpenAddressingConfig);
conformance_suite!(dynamic_array_chaining, DynamicArrayChainingTable, ChainingConfig);
conformance_suite!(linked_list_chaining, LinkedListChainingTable, ChainingConfig);
conformance_suite!(tree_chaining, TreeChainingTable, ChainingConfig);
