#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use assert_cmd::Command;

/// A gene table with two genomes carrying the same variable island between
/// the same persistent neighborhoods: two RGPs, one spot.
pub fn shared_island_table() -> String {
    let layout = [
        ("p0", "persistent"),
        ("p1", "persistent"),
        ("p2", "persistent"),
        ("v0", "cloud"),
        ("v1", "cloud"),
        ("v2", "cloud"),
        ("v3", "cloud"),
        ("v4", "cloud"),
        ("p3", "persistent"),
        ("p4", "persistent"),
        ("p5", "persistent"),
    ];
    let mut table =
        String::from("organism\tcontig\tcircular\tgene\tfamily\tpartition\tstart\tstop\tstrand\ttype\n");
    for org in ["orgA", "orgB"] {
        for (i, (family, partition)) in layout.iter().enumerate() {
            writeln!(
                table,
                "{org}\t{org}_c\tfalse\t{org}_g{i}\t{family}\t{partition}\t{}\t{}\t+\tCDS",
                i * 1000 + 1,
                i * 1000 + 900
            )
            .unwrap();
        }
    }
    table
}

pub fn write_table(path: &Path, table: &str) {
    std::fs::write(path, table).unwrap();
}

/// Runs the panrgp binary with the given arguments.
pub fn run_panrgp(args: &[&str]) -> assert_cmd::assert::Assert {
    Command::cargo_bin("panrgp").unwrap().args(args).assert()
}
