//! Integration tests for the demo helpers.

use qsearch_demos::counts_rows;
use qsearch_grover::{GroverSearch, Target};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_rows_from_a_grover_run() {
    let search = GroverSearch::new(Target::parse("01").unwrap());
    let counts = search.run(512, &mut StdRng::seed_from_u64(11)).unwrap();

    let rows = counts_rows(&counts);
    let keys: Vec<&str> = rows.iter().map(|r| r.bitstring.as_str()).collect();
    assert_eq!(keys, ["00", "01", "10", "11"]);

    let marked = &rows[1];
    assert_eq!(marked.count, 512);
    assert!((marked.fraction - 1.0).abs() < 1e-12);
    assert_eq!(marked.bar.chars().count(), 40);
}

#[test]
fn test_single_qubit_rows() {
    let search = GroverSearch::new(Target::parse("0").unwrap());
    let counts = search.run(100, &mut StdRng::seed_from_u64(5)).unwrap();

    let rows = counts_rows(&counts);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.iter().map(|r| r.count).sum::<u64>(), 100);
}
