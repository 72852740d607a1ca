use std::fs;
use std::path::Path;

use huffpack::{
    CodeTable, FrequencyTable, HuffmanError, HuffmanTree, PackedBytes, compress_file,
    compress_text, encode, pack,
};
use proptest::prelude::*;

#[test]
fn file_round_trip_with_out_of_band_bit_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.bin");
    let text = "this is an example for huffman encoding\n";
    fs::write(&input, text).unwrap();

    let compressed = compress_file(&input, &output).unwrap();

    let on_disk = fs::read(&output).unwrap();
    assert_eq!(on_disk, compressed.packed.as_bytes());
    assert_eq!(on_disk.len() as u64, compressed.packed.bit_len().div_ceil(8));
    assert_eq!(entries(dir.path()), vec!["input.txt", "output.bin"]);

    let packed = PackedBytes::from_parts(on_disk, compressed.packed.bit_len());
    assert_eq!(compressed.tree.decode(&packed).unwrap(), text);
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn input_sharing_output_stem_survives() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.tmp");
    let output = dir.path().join("notes.bin");
    fs::write(&input, "abracadabra").unwrap();

    compress_file(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&input).unwrap(), "abracadabra");
    assert_eq!(fs::read(&output).unwrap(), vec![0x6e, 0x8a, 0xdc]);
    assert_eq!(entries(dir.path()), vec!["notes.bin", "notes.tmp"]);
}

#[test]
fn unrelated_sibling_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("out.bin");
    let sibling = dir.path().join("out.tmp");
    fs::write(&input, "abc").unwrap();
    fs::write(&sibling, "keep me").unwrap();

    compress_file(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
    assert_eq!(entries(dir.path()), vec!["input.txt", "out.bin", "out.tmp"]);
}

#[test]
fn failed_persist_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("taken");
    fs::write(&input, "abc").unwrap();
    fs::create_dir(&output).unwrap();
    fs::write(output.join("child"), "x").unwrap();

    let err = compress_file(&input, &output).unwrap_err();
    assert!(matches!(err, HuffmanError::SinkWrite(_)));
    assert_eq!(entries(dir.path()), vec!["input.txt", "taken"]);
    assert_eq!(entries(&output), vec!["child"]);
}

#[test]
fn empty_file_is_rejected_and_nothing_written() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("empty.bin");
    fs::write(&input, "").unwrap();

    let err = compress_file(&input, &output).unwrap_err();
    assert!(matches!(err, HuffmanError::EmptyInput));
    assert!(!output.exists());
}

#[test]
fn binary_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blob.bin");
    fs::write(&input, [0xfe, 0xff, 0x00]).unwrap();

    let err = compress_file(&input, &dir.path().join("out.bin")).unwrap_err();
    assert!(matches!(err, HuffmanError::InvalidInput));
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = compress_file(&dir.path().join("nope.txt"), &dir.path().join("out.bin")).unwrap_err();
    assert!(matches!(err, HuffmanError::Io(_)));
}

#[test]
fn unwritable_sink_is_sink_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "abc").unwrap();
    let output = dir.path().join("no_such_dir").join("out.bin");

    let err = compress_file(&input, &output).unwrap_err();
    assert!(matches!(err, HuffmanError::SinkWrite(_)));
}

#[test]
fn abracadabra_lengths() {
    let compressed = compress_text("abracadabra").unwrap();
    let codes = &compressed.codes;
    let expected: usize = [('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]
        .iter()
        .map(|&(symbol, count)| count * codes.get(symbol).unwrap().len())
        .sum();
    assert_eq!(compressed.stream.len(), expected);
    assert_eq!(compressed.packed.as_bytes().len(), expected.div_ceil(8));
}

#[test]
fn truncated_bits_are_detected() {
    let compressed = compress_text("abracadabra").unwrap();
    // drop the final 'a' and the last bit of the preceding 'r'
    let short = PackedBytes::from_parts(compressed.packed.as_bytes().to_vec(), 21);
    assert!(matches!(
        compressed.tree.decode(&short),
        Err(HuffmanError::TruncatedStream)
    ));
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'h'), 1..400)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn counts_sum_to_length(text in "\\PC{1,300}") {
        let table = FrequencyTable::from_text(&text);
        prop_assert_eq!(table.total(), text.chars().count() as u64);
    }

    #[test]
    fn codes_are_prefix_free(text in text_strategy()) {
        let table = FrequencyTable::from_text(&text);
        prop_assume!(table.len() >= 2);
        let codes = CodeTable::from_tree(&HuffmanTree::build(&table).unwrap());
        for (a, ca) in codes.iter() {
            for (b, cb) in codes.iter() {
                if a != b {
                    prop_assert!(!ca.is_prefix_of(cb));
                }
            }
        }
    }

    #[test]
    fn codes_resolve_to_original_leaves(text in text_strategy()) {
        let table = FrequencyTable::from_text(&text);
        let tree = HuffmanTree::build(&table).unwrap();
        let codes = CodeTable::from_tree(&tree);
        let resolved: Vec<(char, u64)> = codes
            .iter()
            .map(|(_, code)| tree.resolve(code).unwrap())
            .collect();
        prop_assert_eq!(resolved, table.iter().collect::<Vec<_>>());
    }

    #[test]
    fn encoding_is_idempotent(text in text_strategy()) {
        let first = compress_text(&text).unwrap();
        let second = compress_text(&text).unwrap();
        prop_assert_eq!(&first.stream, &second.stream);
        prop_assert_eq!(&first.packed, &second.packed);
    }

    #[test]
    fn packed_length_and_decode(text in text_strategy()) {
        let table = FrequencyTable::from_text(&text);
        let tree = HuffmanTree::build(&table).unwrap();
        let codes = CodeTable::from_tree(&tree);
        let stream = encode(&text, &codes).unwrap();
        prop_assert_eq!(stream.len() as u64, codes.encoded_len(&table).unwrap());
        let packed = pack(&stream).unwrap();
        prop_assert_eq!(packed.as_bytes().len(), stream.len().div_ceil(8));
        prop_assert_eq!(tree.decode(&packed).unwrap(), text);
    }
}
